//! Caller-owned partner identity handed to every signing call.

// self
use crate::auth::{PartnerId, PartnerRole, PrivateKeyPem};

/// Fully resolved partner identity. The core never persists it.
#[derive(Clone, Debug)]
pub struct PartnerIdentity {
	/// Issuer identifier placed in the `iss` claim.
	pub partner_id: PartnerId,
	/// Role the partner signs as.
	pub role: PartnerRole,
	/// RSA private key used for RS256 signatures.
	pub private_key: PrivateKeyPem,
}
impl PartnerIdentity {
	/// Creates an identity from already-resolved parts.
	pub fn new(partner_id: PartnerId, role: PartnerRole, private_key: PrivateKeyPem) -> Self {
		Self { partner_id, role, private_key }
	}
}
