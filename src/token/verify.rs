//! Receiver-side verification of compact tokens and their body binding.
//!
//! Used to check that a token validates under the partner's public key and that the transmitted
//! body still matches the digest embedded in the header. Freshness of `iat` is left to the
//! caller; [`VerifiedToken::issued_at`] exposes the instant for that purpose.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rsa::{
	RsaPublicKey,
	pkcs1::DecodeRsaPublicKey,
	pkcs1v15::{Signature, VerifyingKey},
	pkcs8::DecodePublicKey,
	signature::Verifier,
};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	digest::ContentDigest,
	error::DigestError,
	token::{RS256, TokenClaims, TokenHeader, pem_block},
};

const PKCS1_PUBLIC_LABEL: &str = "-----BEGIN RSA PUBLIC KEY-----";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Verification failures.
#[derive(Debug, ThisError)]
pub enum VerifyError {
	/// Public key PEM could not be decoded.
	#[error("Public key is not an SPKI or PKCS#1 RSA public key.")]
	InvalidPublicKey {
		/// Decoder failure.
		#[source]
		source: BoxError,
	},
	/// Token does not have the `header.claims.signature` shape.
	#[error("Token is malformed: {reason}.")]
	Malformed {
		/// What was wrong with the token.
		reason: &'static str,
	},
	/// Token segment is not valid JSON of the expected shape.
	#[error("Token {part} is not valid JSON.")]
	Segment {
		/// Which segment failed (`header` or `claims`).
		part: &'static str,
		/// Decoder failure.
		#[source]
		source: serde_json::Error,
	},
	/// Header announces an algorithm other than RS256.
	#[error("Token algorithm `{alg}` is not supported.")]
	UnsupportedAlgorithm {
		/// Announced algorithm.
		alg: String,
	},
	/// Signature does not verify under the public key.
	#[error("Token signature is invalid.")]
	BadSignature,
	/// Body was transmitted but the token carries no digest.
	#[error("Token carries no body digest but a body was supplied.")]
	UnexpectedBody,
	/// Token carries a digest but no body was transmitted.
	#[error("Token carries a body digest but no body was supplied.")]
	MissingBody,
	/// Body digest differs from the digest in the header.
	#[error("Body does not match the digest embedded in the token.")]
	BodyMismatch,
	/// Header digest could not be decoded.
	#[error(transparent)]
	Digest(#[from] DigestError),
}

/// Verifies RS256 tokens against one partner public key.
#[derive(Clone, Debug)]
pub struct TokenVerifier {
	key: VerifyingKey<Sha256>,
}
impl TokenVerifier {
	/// Parses an SPKI (`BEGIN PUBLIC KEY`) or PKCS#1 (`BEGIN RSA PUBLIC KEY`) PEM public key.
	///
	/// Text before the first `-----BEGIN` line is ignored.
	pub fn from_public_key_pem(pem: &str) -> Result<Self, VerifyError> {
		let text = pem_block(pem);
		let public_key = if text.starts_with(PKCS1_PUBLIC_LABEL) {
			RsaPublicKey::from_pkcs1_pem(text)
				.map_err(|e| VerifyError::InvalidPublicKey { source: Box::new(e) })?
		} else {
			RsaPublicKey::from_public_key_pem(text)
				.map_err(|e| VerifyError::InvalidPublicKey { source: Box::new(e) })?
		};

		Ok(Self::from_public_key(public_key))
	}

	/// Wraps an already decoded public key.
	pub fn from_public_key(public_key: RsaPublicKey) -> Self {
		Self { key: VerifyingKey::<Sha256>::new(public_key) }
	}

	/// Checks the token shape, algorithm, and signature, then decodes header and claims.
	pub fn verify(&self, compact: &str) -> Result<VerifiedToken, VerifyError> {
		let mut parts = compact.split('.');
		let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
			(parts.next(), parts.next(), parts.next(), parts.next())
		else {
			return Err(VerifyError::Malformed { reason: "expected three segments" });
		};
		let header: TokenHeader = decode_segment("header", header_b64)?;

		if header.alg != RS256 {
			return Err(VerifyError::UnsupportedAlgorithm { alg: header.alg });
		}

		let signature_raw = URL_SAFE_NO_PAD
			.decode(signature_b64)
			.map_err(|_| VerifyError::Malformed { reason: "signature is not base64url" })?;
		let signature =
			Signature::try_from(signature_raw.as_slice()).map_err(|_| VerifyError::BadSignature)?;
		let signing_input_len = header_b64.len() + 1 + claims_b64.len();

		self.key
			.verify(&compact.as_bytes()[..signing_input_len], &signature)
			.map_err(|_| VerifyError::BadSignature)?;

		let claims: TokenClaims = decode_segment("claims", claims_b64)?;

		Ok(VerifiedToken { header, claims })
	}
}

/// Token whose signature has been verified.
#[derive(Clone, Debug)]
pub struct VerifiedToken {
	header: TokenHeader,
	claims: TokenClaims,
}
impl VerifiedToken {
	/// Verified header.
	pub fn header(&self) -> &TokenHeader {
		&self.header
	}

	/// Verified claims.
	pub fn claims(&self) -> &TokenClaims {
		&self.claims
	}

	/// Issued-at instant, when representable.
	pub fn issued_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.claims.iat).ok()
	}

	/// Checks the transmitted body against the header digest.
	///
	/// A token without a digest only accepts requests without a body, and vice versa.
	pub fn verify_body(&self, body: Option<&str>) -> Result<(), VerifyError> {
		match (self.header.digest.as_deref(), body) {
			(None, None) => Ok(()),
			(None, Some(_)) => Err(VerifyError::UnexpectedBody),
			(Some(_), None) => Err(VerifyError::MissingBody),
			(Some(expected), Some(body)) => {
				if ContentDigest::from_base64(expected)? == ContentDigest::compute(body.as_bytes()) {
					Ok(())
				} else {
					Err(VerifyError::BodyMismatch)
				}
			},
		}
	}
}

fn decode_segment<T>(part: &'static str, segment: &str) -> Result<T, VerifyError>
where
	T: for<'de> Deserialize<'de>,
{
	let raw = URL_SAFE_NO_PAD
		.decode(segment)
		.map_err(|_| VerifyError::Malformed { reason: "segment is not base64url" })?;

	serde_json::from_slice(&raw).map_err(|source| VerifyError::Segment { part, source })
}
