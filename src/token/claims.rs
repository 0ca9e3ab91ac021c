//! Token header and claim set.

// self
use crate::{_prelude::*, digest::ContentDigest};

/// Signature algorithm label carried by every token.
pub const RS256: &str = "RS256";
/// Token type label carried by every token.
pub const JWT: &str = "JWT";

/// Token header. The body digest lives here rather than in the claims so integrity checks do not
/// depend on parsing the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
	/// Signature algorithm (`RS256`).
	pub alg: String,
	/// Token type (`JWT`).
	pub typ: String,
	/// Base64 SHA-256 digest of the canonical body; absent for requests without a body.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub digest: Option<String>,
}
impl TokenHeader {
	/// Builds an RS256 header, embedding `digest` when a body is present.
	pub fn rs256(digest: Option<&ContentDigest>) -> Self {
		Self { alg: RS256.into(), typ: JWT.into(), digest: digest.map(ContentDigest::to_base64) }
	}
}

/// Registered claims. No expiry is ever set; freshness is judged remotely from `iat`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issuer: the signing partner's identifier.
	pub iss: String,
	/// Audience: the platform identity, or the merchant an ISV acts for.
	pub aud: String,
	/// Issued-at, whole seconds since the Unix epoch.
	pub iat: i64,
	/// Subject: the merchant-issued access token in delegated flows only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
}
impl Debug for TokenClaims {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClaims")
			.field("iss", &self.iss)
			.field("aud", &self.aud)
			.field("iat", &self.iat)
			.field("sub", &self.sub.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}
