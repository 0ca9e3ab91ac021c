//! SHA-256 content digests over canonical request bodies.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	canonical::{self, CanonicalDocument},
	error::DigestError,
};

/// Raw SHA-256 digest of a canonical body.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);
impl ContentDigest {
	/// Byte length of a SHA-256 digest.
	pub const LEN: usize = 32;

	/// Hashes raw bytes, typically a body exactly as it was transmitted.
	pub fn compute(bytes: &[u8]) -> Self {
		Self(Sha256::digest(bytes).into())
	}

	/// Returns the raw digest bytes.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Encodes the digest with the standard, padded base64 alphabet (always 44 characters).
	pub fn to_base64(&self) -> String {
		STANDARD.encode(self.0)
	}

	/// Parses a digest previously produced by [`ContentDigest::to_base64`].
	pub fn from_base64(encoded: &str) -> Result<Self, DigestError> {
		let raw = STANDARD.decode(encoded)?;
		let bytes = <[u8; 32]>::try_from(raw.as_slice())
			.map_err(|_| DigestError::InvalidLength { actual: raw.len() })?;

		Ok(Self(bytes))
	}
}
impl Debug for ContentDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ContentDigest({})", self.to_base64())
	}
}
impl Display for ContentDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.to_base64())
	}
}

/// Digest state for a request: either no body at all, or the digest of its canonical form.
///
/// `Absent` is deliberately distinct from the digest of `{}`; the receiving system treats the two
/// as different intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyDigest {
	/// The request carries no body.
	Absent,
	/// Digest of the canonical body.
	Present(ContentDigest),
}
impl BodyDigest {
	/// Returns the digest when a body was supplied.
	pub fn digest(&self) -> Option<&ContentDigest> {
		match self {
			Self::Absent => None,
			Self::Present(digest) => Some(digest),
		}
	}

	/// Returns `true` when the request carries no body.
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}
}

/// Hashes the UTF-8 bytes of a canonical document.
pub fn digest_canonical(document: &CanonicalDocument) -> Result<ContentDigest, DigestError> {
	if document.as_str().is_empty() {
		return Err(DigestError::EmptyCanonicalForm);
	}

	Ok(ContentDigest::compute(document.as_bytes()))
}

/// Canonicalizes and digests an optional body.
///
/// Returns the canonical document alongside the digest so callers can transmit exactly the bytes
/// that were hashed.
pub fn digest_body(body: Option<&Value>) -> Result<(Option<CanonicalDocument>, BodyDigest)> {
	let Some(body) = body else {
		return Ok((None, BodyDigest::Absent));
	};
	let document = canonical::canonicalize_value(body)?;
	let digest = digest_canonical(&document)?;

	Ok((Some(document), BodyDigest::Present(digest)))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn digest_matches_known_vector() {
		let (document, digest) = digest_body(Some(&json!({ "trData": { "amount": "10.00" } })))
			.expect("Body fixture should digest.");
		let digest = digest.digest().expect("Present body should carry a digest.");

		assert_eq!(
			document.expect("Present body should carry a canonical document.").as_str(),
			r#"{"trData":{"amount":"10.00"}}"#
		);
		assert_eq!(digest.to_base64(), "Bcs91weaj8NkFwmgtftfQyHzPvk3t7D0NETrnhpLEGU=");
		assert_eq!(digest.to_base64().len(), 44);
		assert_eq!(digest.as_bytes().len(), ContentDigest::LEN);
	}

	#[test]
	fn absent_body_is_not_empty_object() {
		let (none_doc, none_digest) = digest_body(None).expect("Absent body should succeed.");
		let (_, empty_digest) =
			digest_body(Some(&json!({}))).expect("Empty object body should digest.");

		assert!(none_doc.is_none());
		assert!(none_digest.is_absent());
		assert_eq!(
			empty_digest.digest().map(ContentDigest::to_base64).as_deref(),
			Some("RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=")
		);
		assert_ne!(none_digest, empty_digest);
	}

	#[test]
	fn single_character_change_alters_digest() {
		let (_, original) = digest_body(Some(&json!({ "trData": { "amount": "10.00" } })))
			.expect("Original body should digest.");
		let (_, tampered) = digest_body(Some(&json!({ "trData": { "amount": "10.01" } })))
			.expect("Tampered body should digest.");

		assert_ne!(original, tampered);
	}

	#[test]
	fn base64_round_trip_validates_length() {
		let digest = ContentDigest::compute(b"{}");

		assert_eq!(
			ContentDigest::from_base64(&digest.to_base64()).expect("Digest should decode."),
			digest
		);
		assert!(matches!(
			ContentDigest::from_base64("AAAA"),
			Err(DigestError::InvalidLength { actual: 3 })
		));
		assert!(matches!(ContentDigest::from_base64("not base64!"), Err(DigestError::Malformed(_))));
	}
}
