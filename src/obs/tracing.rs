// self
use crate::{_prelude::*, auth::PartnerRole, header::Destination, obs::SignKind};

/// Span wrapper used by signing calls; a no-op when the `tracing` feature is disabled.
#[derive(Clone, Debug)]
pub struct SignSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SignSpan {
	/// Creates a new span tagged with the flow kind, role, and destination.
	pub fn new(kind: SignKind, role: PartnerRole, destination: Destination) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"partner_auth.sign",
				kind = kind.as_str(),
				role = role.as_str(),
				destination = destination.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, role, destination);

			Self {}
		}
	}

	/// Enters the span; signing is synchronous so the guard covers the whole call.
	pub fn entered(self) -> SignSpanGuard {
		#[cfg(feature = "tracing")]
		{
			SignSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			SignSpanGuard {}
		}
	}
}

/// RAII guard returned by [`SignSpan::entered`].
pub struct SignSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for SignSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SignSpanGuard(..)")
	}
}

/// Records that a token was signed, noting only whether a body digest was attached.
pub fn record_signed(role: PartnerRole, digest_attached: bool, issued_at: i64) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(role = role.as_str(), digest_attached, issued_at, "Signed partner token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (role, digest_attached, issued_at);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sign_span_is_usable_with_or_without_tracing() {
		let _guard =
			SignSpan::new(SignKind::Delegated, PartnerRole::Isv, Destination::OAuth2).entered();

		record_signed(PartnerRole::Isv, true, 1_700_000_000);
	}
}
