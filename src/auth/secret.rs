//! Secret wrappers that keep key material and bearer credentials out of logs.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}

			/// Returns `true` when the secret is empty or whitespace only.
			pub fn is_blank(&self) -> bool {
				self.0.trim().is_empty()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { PrivateKeyPem, "PEM-encoded RSA private key (PKCS#1 or PKCS#8)." }
def_secret! { DelegatedToken, "Merchant-issued access token an ISV presents as the `sub` claim." }
def_secret! { CompactToken, "Signed compact token (`header.claims.signature`)." }
