// crates.io
use serde_json::json;
use time::macros;
// self
use partner_auth::{
	_preludet::*,
	auth::PartnerRole,
	digest::{self, BodyDigest, ContentDigest},
	error::ClaimError,
	header::{API_VERSION, AUTHORIZATION, CONTENT_TYPE, Destination},
	key::{Environment, KeyAccessor, StaticKeyAccessor},
	platform::PlatformProfile,
	signer::{PartnerSigner, SignRequest},
	token::{TokenVerifier, VerifyError},
};

const PROFILE_JSON: &str = r#"{
	"audience": "platform",
	"api_base": "https://api.example.com/",
	"oauth2_base": "https://api.example.com/oauth2/"
}"#;

fn build_signer() -> PartnerSigner<StaticKeyAccessor> {
	PartnerSigner::new(test_accessor(), test_profile(), Environment::Sandbox)
}

fn verifier() -> TokenVerifier {
	TokenVerifier::from_public_key_pem(PARTNER_PUBLIC_PEM).expect("Public fixture should parse.")
}

#[test]
fn merchant_payment_round_trips_through_verification() {
	let signed = build_signer()
		.sign_at(
			PartnerRole::Merchant,
			SignRequest::platform(Destination::Api)
				.with_body(json!({ "trData": { "amount": "10.00" } })),
			macros::datetime!(2025-01-01 00:00 UTC),
		)
		.expect("Merchant signing should succeed.");
	let verified = verifier().verify(signed.token.compact.expose()).expect("Token should verify.");

	assert_eq!(verified.claims().iss, "pm001");
	assert_eq!(verified.claims().aud, TEST_PLATFORM_AUDIENCE);
	assert_eq!(verified.claims().iat, 1_735_689_600);
	assert_eq!(verified.claims().sub, None);
	assert_eq!(
		verified.header().digest.as_deref(),
		Some("Bcs91weaj8NkFwmgtftfQyHzPvk3t7D0NETrnhpLEGU=")
	);
	assert_eq!(
		verified.issued_at(),
		Some(macros::datetime!(2025-01-01 00:00 UTC))
	);

	let body = signed.body().expect("Signed request should carry a body.");

	assert_eq!(body, r#"{"trData":{"amount":"10.00"}}"#);
	assert_eq!(
		Some(&ContentDigest::compute(body.as_bytes())),
		signed.token.digest.digest()
	);

	verified.verify_body(Some(body)).expect("Transmitted body should match the digest.");
}

#[test]
fn key_order_in_caller_body_does_not_change_digest() {
	let signer = build_signer();
	let instant = macros::datetime!(2025-01-01 00:00 UTC);
	let first = signer
		.sign_at(
			PartnerRole::Merchant,
			SignRequest::platform(Destination::Api).with_body(json!({ "b": 1, "a": 2 })),
			instant,
		)
		.expect("First signing should succeed.");
	let second = signer
		.sign_at(
			PartnerRole::Merchant,
			SignRequest::platform(Destination::Api)
				.with_body(serde_json::from_str(r#"{"a":2,"b":1}"#).expect("Body should parse.")),
			instant,
		)
		.expect("Second signing should succeed.");

	assert_eq!(first.token.compact.expose(), second.token.compact.expose());
	assert_eq!(
		first.token.digest.digest().map(ContentDigest::to_base64).as_deref(),
		Some("02JqwwqH5vemQoIzs8aCmZdoZfpVCOQmfFQVx2r3p3I=")
	);
}

#[test]
fn tampered_body_fails_receiver_check() {
	let signed = build_signer()
		.sign(
			PartnerRole::Merchant,
			SignRequest::platform(Destination::Api)
				.with_body(json!({ "trData": { "amount": "10.00" } })),
		)
		.expect("Merchant signing should succeed.");
	let verified = verifier().verify(signed.token.compact.expose()).expect("Token should verify.");

	assert!(matches!(
		verified.verify_body(Some(r#"{"trData":{"amount":"10.01"}}"#)),
		Err(VerifyError::BodyMismatch)
	));
}

#[test]
fn header_sets_follow_destination() {
	let signer = build_signer();
	let api = signer
		.sign(PartnerRole::Merchant, SignRequest::platform(Destination::Api))
		.expect("API signing should succeed.");
	let oauth2_url =
		Url::parse("https://api.example.com/oauth2/token").expect("OAuth2 URL should parse.");
	let oauth2 = signer
		.sign(PartnerRole::Merchant, SignRequest::for_url(signer.profile(), &oauth2_url))
		.expect("OAuth2 signing should succeed.");

	assert_eq!(
		api.headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
		vec![AUTHORIZATION, CONTENT_TYPE, API_VERSION]
	);
	assert_eq!(
		oauth2.headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
		vec![AUTHORIZATION, CONTENT_TYPE]
	);
	assert!(api.token.digest.is_absent());
	assert!(api.headers.authorization().starts_with("Bearer "));
}

#[test]
fn isv_delegation_targets_merchant() {
	let signer = build_signer();
	let signed = signer
		.sign(
			PartnerRole::Isv,
			SignRequest::on_behalf_of("pm001", "merchant-issued-token", Destination::OAuth2)
				.expect("Merchant identifier should be valid.")
				.with_body(json!({ "scope": "payments" })),
		)
		.expect("Delegated signing should succeed.");
	let verified = verifier().verify(signed.token.compact.expose()).expect("Token should verify.");

	assert_eq!(verified.claims().iss, "isv001");
	assert_eq!(verified.claims().aud, "pm001");
	assert_eq!(verified.claims().sub.as_deref(), Some("merchant-issued-token"));
	assert_eq!(signed.headers.api_version(), None);

	let err = signer
		.sign(
			PartnerRole::Merchant,
			SignRequest::on_behalf_of("pm002", "merchant-issued-token", Destination::Api)
				.expect("Merchant identifier should be valid."),
		)
		.expect_err("Merchants cannot sign on behalf of others.");

	assert!(matches!(err, Error::Claim(ClaimError::DelegationRequiresIsv { .. })));
}

#[test]
fn empty_object_and_absent_body_are_distinct() {
	let (_, absent) = digest::digest_body(None).expect("Absent body should digest.");
	let (_, empty) = digest::digest_body(Some(&json!({}))).expect("Empty body should digest.");

	assert_eq!(absent, BodyDigest::Absent);
	assert_eq!(
		empty.digest().map(ContentDigest::to_base64).as_deref(),
		Some("RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=")
	);
}

#[test]
fn unknown_partner_is_reported_before_signing() {
	let accessor = StaticKeyAccessor::default();
	let err = accessor
		.resolve_identity(Environment::Sandbox, PartnerRole::PaymentInstitution)
		.expect_err("Unregistered partner should fail.");

	assert!(matches!(
		err,
		Error::Claim(ClaimError::MissingIssuer { role: PartnerRole::PaymentInstitution })
	));
}

#[test]
fn json_profile_matches_built_profile() {
	let profile =
		PlatformProfile::from_json_str(PROFILE_JSON).expect("Profile fixture should parse.");

	assert_eq!(profile, test_profile());
	assert_eq!(profile.api_version, "1.0");
}
