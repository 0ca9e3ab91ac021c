//! Optional observability helpers for signing calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `partner_auth.sign` with the `kind`, `role`,
//!   and `destination` fields.
//! - Enable `metrics` to increment the `partner_auth_sign_total` counter for every
//!   attempt/success/failure, labeled by `kind`, `role`, and `outcome`.
//!
//! Neither layer ever records token, subject, or key contents.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Signing flow kinds observed by the signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignKind {
	/// Merchant, payment institution, or ISV signing for itself.
	FirstParty,
	/// ISV signing on behalf of a merchant.
	Delegated,
}
impl SignKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignKind::FirstParty => "first_party",
			SignKind::Delegated => "delegated",
		}
	}
}
impl Display for SignKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignOutcome {
	/// Entry to a signing call.
	Attempt,
	/// Token and headers were produced.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl SignOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignOutcome::Attempt => "attempt",
			SignOutcome::Success => "success",
			SignOutcome::Failure => "failure",
		}
	}
}
impl Display for SignOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
