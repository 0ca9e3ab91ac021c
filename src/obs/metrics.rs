// self
use crate::{
	auth::PartnerRole,
	obs::{SignKind, SignOutcome},
};

/// Counter incremented once per signing attempt, success, and failure.
pub const SIGN_COUNTER: &str = "partner_auth_sign_total";

/// Records a signing outcome for `role` via the global metrics recorder (when enabled).
pub fn record_sign_outcome(kind: SignKind, role: PartnerRole, outcome: SignOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			SIGN_COUNTER,
			"kind" => kind.as_str(),
			"role" => role.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, role, outcome);
	}
}
