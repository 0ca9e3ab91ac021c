//! Per-call signing context with the role rules enforced at construction.

// self
use crate::{
	_prelude::*,
	auth::{DelegatedToken, PartnerId, PartnerIdentity, PartnerRole},
	error::ClaimError,
	header::Destination,
	platform::PlatformProfile,
};

/// Who the token is addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Audience {
	/// First-party call: the platform itself is the audience and no subject is sent.
	Platform,
	/// Delegated call: an ISV acts for `merchant` under the merchant-issued `access_token`.
	OnBehalfOf {
		/// Merchant the ISV acts for; becomes the `aud` claim.
		merchant: PartnerId,
		/// Merchant-issued access token; becomes the `sub` claim.
		access_token: DelegatedToken,
	},
}
impl Audience {
	/// Convenience constructor for the delegated variant.
	pub fn on_behalf_of(merchant: PartnerId, access_token: impl Into<String>) -> Self {
		Self::OnBehalfOf { merchant, access_token: DelegatedToken::new(access_token) }
	}

	/// Returns `true` for the delegated variant.
	pub fn is_delegated(&self) -> bool {
		matches!(self, Self::OnBehalfOf { .. })
	}
}

/// Immutable inputs for one signing call.
///
/// A delegated context always has a non-platform audience and a non-empty subject; a first-party
/// context never has a subject.
#[derive(Clone, Debug)]
pub struct SigningContext {
	role: PartnerRole,
	issuer: PartnerId,
	audience: String,
	subject: Option<DelegatedToken>,
	body: Option<Value>,
	destination: Destination,
}
impl SigningContext {
	/// Validates the role rules and builds the context.
	pub fn new(
		identity: &PartnerIdentity,
		audience: Audience,
		profile: &PlatformProfile,
		body: Option<Value>,
		destination: Destination,
	) -> Result<Self, ClaimError> {
		let role = identity.role;
		let (audience, subject) = match audience {
			Audience::Platform => {
				if profile.audience.trim().is_empty() {
					return Err(ClaimError::MissingAudience { role });
				}

				(profile.audience.clone(), None)
			},
			Audience::OnBehalfOf { merchant, access_token } => {
				if !role.can_delegate() {
					return Err(ClaimError::DelegationRequiresIsv { role });
				}
				if access_token.is_blank() {
					return Err(ClaimError::MissingSubject { role });
				}
				if merchant.as_str() == profile.audience {
					return Err(ClaimError::AudienceIsPlatform { role });
				}

				(merchant.into(), Some(access_token))
			},
		};

		Ok(Self {
			role,
			issuer: identity.partner_id.clone(),
			audience,
			subject,
			body,
			destination,
		})
	}

	/// Role of the signing partner.
	pub fn role(&self) -> PartnerRole {
		self.role
	}

	/// Issuer (`iss`).
	pub fn issuer(&self) -> &PartnerId {
		&self.issuer
	}

	/// Audience (`aud`).
	pub fn audience(&self) -> &str {
		&self.audience
	}

	/// Subject (`sub`), present only in delegated flows.
	pub fn subject(&self) -> Option<&DelegatedToken> {
		self.subject.as_ref()
	}

	/// Request body, if any.
	pub fn body(&self) -> Option<&Value> {
		self.body.as_ref()
	}

	/// Target subsystem.
	pub fn destination(&self) -> Destination {
		self.destination
	}

	/// Returns `true` when the call targets the delegated-authorization subsystem.
	pub fn is_oauth2_request(&self) -> bool {
		self.destination.is_oauth2()
	}

	/// Returns `true` for ISV-on-behalf-of-merchant contexts.
	pub fn is_delegated(&self) -> bool {
		self.subject.is_some()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::{TEST_PLATFORM_AUDIENCE, test_identity, test_profile};

	fn merchant(id: &str) -> PartnerId {
		PartnerId::new(id).expect("Merchant fixture should be valid.")
	}

	#[test]
	fn first_party_contexts_never_carry_subject() {
		let profile = test_profile();

		for role in [PartnerRole::Merchant, PartnerRole::PaymentInstitution, PartnerRole::Isv] {
			let context = SigningContext::new(
				&test_identity("partner-1", role),
				Audience::Platform,
				&profile,
				None,
				Destination::Api,
			)
			.expect("First-party context should build for every role.");

			assert_eq!(context.audience(), TEST_PLATFORM_AUDIENCE);
			assert!(context.subject().is_none());
			assert!(!context.is_delegated());
		}
	}

	#[test]
	fn delegated_context_sets_merchant_audience_and_subject() {
		let context = SigningContext::new(
			&test_identity("isv001", PartnerRole::Isv),
			Audience::on_behalf_of(merchant("pm001"), "merchant-token"),
			&test_profile(),
			Some(serde_json::json!({ "a": 1 })),
			Destination::OAuth2,
		)
		.expect("Delegated context should build for an ISV.");

		assert_eq!(context.issuer().as_str(), "isv001");
		assert_eq!(context.audience(), "pm001");
		assert_eq!(context.subject().map(DelegatedToken::expose), Some("merchant-token"));
		assert!(context.is_oauth2_request());
		assert!(context.body().is_some());
	}

	#[test]
	fn delegation_is_restricted_to_isv() {
		for role in [PartnerRole::Merchant, PartnerRole::PaymentInstitution] {
			let err = SigningContext::new(
				&test_identity("partner-1", role),
				Audience::on_behalf_of(merchant("pm001"), "merchant-token"),
				&test_profile(),
				None,
				Destination::Api,
			)
			.expect_err("Non-ISV roles must not delegate.");

			assert!(matches!(err, ClaimError::DelegationRequiresIsv { role: r } if r == role));
		}
	}

	#[test]
	fn delegated_context_requires_subject_and_merchant_audience() {
		let identity = test_identity("isv001", PartnerRole::Isv);
		let err = SigningContext::new(
			&identity,
			Audience::on_behalf_of(merchant("pm001"), "   "),
			&test_profile(),
			None,
			Destination::Api,
		)
		.expect_err("Blank access token should fail.");

		assert!(matches!(err, ClaimError::MissingSubject { role: PartnerRole::Isv }));

		let err = SigningContext::new(
			&identity,
			Audience::on_behalf_of(merchant(TEST_PLATFORM_AUDIENCE), "merchant-token"),
			&test_profile(),
			None,
			Destination::Api,
		)
		.expect_err("Platform audience cannot be used for delegation.");

		assert!(matches!(err, ClaimError::AudienceIsPlatform { role: PartnerRole::Isv }));
	}

	#[test]
	fn blank_platform_audience_is_rejected() {
		let mut profile = test_profile();

		profile.audience = String::new();

		let err = SigningContext::new(
			&test_identity("pm001", PartnerRole::Merchant),
			Audience::Platform,
			&profile,
			None,
			Destination::Api,
		)
		.expect_err("Blank platform audience should fail.");

		assert!(matches!(err, ClaimError::MissingAudience { role: PartnerRole::Merchant }));
	}
}
