//! Signing-core error types shared by the serializer, digest, token, and header layers.
//!
//! Messages identify the role, claim, or field that failed. None of them embed private key
//! material or signed token contents, so every variant is safe to log.

// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, PartnerRole},
	key::{AccessorError, Environment},
	platform::PlatformProfileError,
	token::VerifyError,
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical signing error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request body is not representable as JSON.
	#[error(transparent)]
	Serialization(#[from] SerializationError),
	/// Content digest could not be produced or parsed.
	#[error(transparent)]
	Digest(#[from] DigestError),
	/// Private key is absent or malformed.
	#[error(transparent)]
	Key(#[from] KeyError),
	/// Claim set violates the rules of the partner role.
	#[error(transparent)]
	Claim(#[from] ClaimError),
	/// Cryptographic backend or token encoding failure.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Token or body failed verification.
	#[error(transparent)]
	Verify(#[from] VerifyError),
	/// Platform profile is invalid.
	#[error(transparent)]
	Config(#[from] PlatformProfileError),
	/// Key accessor backend failure.
	#[error("{0}")]
	Accessor(
		#[from]
		#[source]
		AccessorError,
	),

	/// Composed header value cannot be represented on the wire.
	#[error("Header `{name}` contains bytes that are not valid in an HTTP header.")]
	Header {
		/// Header name that failed conversion.
		name: &'static str,
	},
}

/// Failures raised while producing the canonical form of a request body.
///
/// `path` is the dotted location of the failing member (`.` for the document root).
#[derive(Debug, ThisError)]
pub enum SerializationError {
	/// Floating point value is NaN or infinite.
	#[error("Request body contains a non-finite number at `{path}`.")]
	NonFiniteNumber {
		/// Location of the offending number.
		path: String,
	},
	/// The value cannot be expressed as a JSON document (e.g., non-string map keys).
	#[error("Request body is not representable as JSON at `{path}`.")]
	Json {
		/// Location of the offending member.
		path: String,
		/// Encoder failure.
		#[source]
		source: serde_json::Error,
	},
	/// Custom error raised by a `Serialize` implementation.
	#[error("Request body serialization failed at `{path}`: {message}.")]
	Custom {
		/// Location of the failing member.
		path: String,
		/// Message reported by the failing implementation.
		message: String,
	},
}
impl SerializationError {
	/// Root location used before a path is known.
	pub(crate) const ROOT: &'static str = ".";

	/// Returns the same error anchored at `path`.
	pub(crate) fn at(self, path: String) -> Self {
		match self {
			Self::NonFiniteNumber { .. } => Self::NonFiniteNumber { path },
			Self::Json { source, .. } => Self::Json { path, source },
			Self::Custom { message, .. } => Self::Custom { path, message },
		}
	}
}
impl serde::ser::Error for SerializationError {
	fn custom<T>(msg: T) -> Self
	where
		T: Display,
	{
		Self::Custom { path: Self::ROOT.into(), message: msg.to_string() }
	}
}

/// Failures raised while computing or decoding a content digest.
#[derive(Debug, ThisError)]
pub enum DigestError {
	/// A canonical document is never empty, so an empty input signals a broken caller.
	#[error("Cannot digest an empty canonical form.")]
	EmptyCanonicalForm,
	/// Encoded digest is not valid base64.
	#[error("Content digest is not valid base64.")]
	Malformed(#[from] base64::DecodeError),
	/// Decoded digest does not contain exactly 32 bytes.
	#[error("Content digest must be 32 bytes, got {actual}.")]
	InvalidLength {
		/// Number of decoded bytes.
		actual: usize,
	},
}

/// Private key failures. Key material never appears in these messages.
#[derive(Debug, ThisError)]
pub enum KeyError {
	/// No key is configured for the role in the given environment.
	#[error("No private key is configured for the {role} role in the {environment} environment.")]
	Missing {
		/// Role the key was requested for.
		role: PartnerRole,
		/// Environment the key was requested for.
		environment: Environment,
	},
	/// The supplied PEM is blank.
	#[error("Private key for the {role} role is empty.")]
	Empty {
		/// Role whose key is empty.
		role: PartnerRole,
	},
	/// The PEM could not be decoded as a PKCS#1 or PKCS#8 RSA private key.
	#[error("Private key for the {role} role is not a PKCS#1 or PKCS#8 RSA key.")]
	Unparsable {
		/// Role whose key failed to parse.
		role: PartnerRole,
		/// Decoder failure.
		#[source]
		source: BoxError,
	},
}
impl KeyError {
	/// Wraps a PEM decoder failure for `role`.
	pub fn unparsable(role: PartnerRole, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Unparsable { role, source: Box::new(src) }
	}
}

/// Claim construction failures.
#[derive(Debug, ThisError)]
pub enum ClaimError {
	/// The key accessor has no partner identifier for the role.
	#[error("No partner identifier is configured for the {role} role.")]
	MissingIssuer {
		/// Role the identifier was requested for.
		role: PartnerRole,
	},
	/// The resolved audience is blank.
	#[error("Audience is missing for the {role} role.")]
	MissingAudience {
		/// Role being signed for.
		role: PartnerRole,
	},
	/// Delegated flows require a non-empty merchant access token.
	#[error("Delegated access token (sub) is missing for the {role} role.")]
	MissingSubject {
		/// Role being signed for.
		role: PartnerRole,
	},
	/// Only ISV partners may act on behalf of a merchant.
	#[error("The {role} role cannot sign on behalf of a merchant.")]
	DelegationRequiresIsv {
		/// Role that attempted delegation.
		role: PartnerRole,
	},
	/// A delegated audience must name a merchant, not the platform.
	#[error("Delegated audience for the {role} role must be a merchant identifier, not the platform.")]
	AudienceIsPlatform {
		/// Role being signed for.
		role: PartnerRole,
	},
	/// Claim value failed identifier validation.
	#[error("The `{claim}` claim is invalid.")]
	InvalidIdentifier {
		/// Claim name (`iss` or `aud`).
		claim: &'static str,
		/// Validation failure.
		#[source]
		source: IdentifierError,
	},
}

/// Failures raised while encoding or signing a token.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The RSA backend refused to sign.
	#[error("RS256 signing failed for the {role} role.")]
	Backend {
		/// Role whose key was used.
		role: PartnerRole,
		/// Backend failure.
		#[source]
		source: rsa::signature::Error,
	},
	/// Token header or claims could not be encoded.
	#[error("Token {part} could not be encoded.")]
	Encoding {
		/// Which token segment failed (`header` or `claims`).
		part: &'static str,
		/// Encoder failure.
		#[source]
		source: serde_json::Error,
	},
}
