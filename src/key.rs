//! Key accessor contract and the built-in in-memory implementation.
//!
//! The signing core consumes key material and partner identifiers through [`KeyAccessor`] and
//! never reads files, environment variables, or secret stores itself.

pub mod memory;

pub use memory::StaticKeyAccessor;

// self
use crate::{
	_prelude::*,
	auth::{PartnerId, PartnerIdentity, PartnerRole, PrivateKeyPem},
	error::{ClaimError, KeyError},
};

/// Deployment environment a key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Test environment.
	Sandbox,
	/// Live environment.
	Production,
}
impl Environment {
	/// Returns a stable label suitable for span fields and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Production => "production",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Source of private keys and partner identifiers.
///
/// Implementations return `Ok(None)` when nothing is configured and reserve errors for backend
/// failures.
pub trait KeyAccessor
where
	Self: Send + Sync,
{
	/// Resolves the PEM private key for `role` in `environment`.
	fn resolve_private_key(
		&self,
		environment: Environment,
		role: PartnerRole,
	) -> Result<Option<PrivateKeyPem>, AccessorError>;

	/// Resolves the partner identifier for `role`.
	fn resolve_partner_id(&self, role: PartnerRole) -> Result<Option<PartnerId>, AccessorError>;

	/// Resolves both halves of a [`PartnerIdentity`].
	fn resolve_identity(
		&self,
		environment: Environment,
		role: PartnerRole,
	) -> Result<PartnerIdentity> {
		let partner_id =
			self.resolve_partner_id(role)?.ok_or(ClaimError::MissingIssuer { role })?;
		let private_key = self
			.resolve_private_key(environment, role)?
			.ok_or(KeyError::Missing { role, environment })?;

		Ok(PartnerIdentity::new(partner_id, role, private_key))
	}
}

/// Error type produced by [`KeyAccessor`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AccessorError {
	/// Backend-level failure (secret store unreachable, permission denied, ...).
	#[error("Key accessor backend failure: {message}.")]
	Backend {
		/// Human-readable error payload. Must not contain key material.
		message: String,
	},
}
