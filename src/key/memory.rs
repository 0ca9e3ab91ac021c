//! Thread-safe in-memory [`KeyAccessor`] implementation for embedding and tests.

// self
use crate::{
	_prelude::*,
	auth::{PartnerId, PartnerRole, PrivateKeyPem},
	key::{AccessorError, Environment, KeyAccessor},
};

#[derive(Debug, Default)]
struct Entries {
	partners: HashMap<PartnerRole, PartnerId>,
	keys: HashMap<(Environment, PartnerRole), PrivateKeyPem>,
}

/// Key accessor that keeps identifiers and PEM keys in-process.
///
/// Clones share the same storage, so a key rotated through one handle is visible to every signer
/// holding another.
#[derive(Clone, Debug, Default)]
pub struct StaticKeyAccessor(Arc<RwLock<Entries>>);
impl StaticKeyAccessor {
	/// Registers the partner identifier for `role`.
	pub fn with_partner(self, role: PartnerRole, partner_id: PartnerId) -> Self {
		self.insert_partner(role, partner_id);

		self
	}

	/// Registers the private key for `role` in `environment`.
	pub fn with_key(self, environment: Environment, role: PartnerRole, key: PrivateKeyPem) -> Self {
		self.insert_key(environment, role, key);

		self
	}

	/// Inserts or replaces the partner identifier for `role`.
	pub fn insert_partner(&self, role: PartnerRole, partner_id: PartnerId) {
		self.0.write().partners.insert(role, partner_id);
	}

	/// Inserts or replaces (rotates) the private key for `role` in `environment`.
	pub fn insert_key(&self, environment: Environment, role: PartnerRole, key: PrivateKeyPem) {
		self.0.write().keys.insert((environment, role), key);
	}

	/// Removes the private key for `role` in `environment`, returning whether one existed.
	pub fn remove_key(&self, environment: Environment, role: PartnerRole) -> bool {
		self.0.write().keys.remove(&(environment, role)).is_some()
	}
}
impl KeyAccessor for StaticKeyAccessor {
	fn resolve_private_key(
		&self,
		environment: Environment,
		role: PartnerRole,
	) -> Result<Option<PrivateKeyPem>, AccessorError> {
		Ok(self.0.read().keys.get(&(environment, role)).cloned())
	}

	fn resolve_partner_id(&self, role: PartnerRole) -> Result<Option<PartnerId>, AccessorError> {
		Ok(self.0.read().partners.get(&role).cloned())
	}
}
