//! Demonstrates signing a merchant payment request and sending it through reqwest to a mock
//! platform endpoint, then checking the token the way the receiving side would.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use partner_auth::{
	auth::{PartnerId, PartnerRole, PrivateKeyPem},
	ext::{ReqwestRequestSigner, RequestSignerExt},
	header::Destination,
	key::{Environment, StaticKeyAccessor},
	platform::PlatformProfile,
	reqwest::Client,
	serde_json::json,
	signer::{PartnerSigner, SignRequest},
	token::TokenVerifier,
	url::Url,
};

const MERCHANT_KEY: &str = include_str!("../tests/fixtures/partner_rsa_pkcs1.pem");
const MERCHANT_PUBLIC_KEY: &str = include_str!("../tests/fixtures/partner_rsa_public.pem");

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let payment_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/payments").header("x-api-version", "1.0");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"status\":\"accepted\"}");
		})
		.await;
	let profile = PlatformProfile::builder("platform")
		.api_base(Url::parse("https://api.example.com/")?)
		.oauth2_base(Url::parse("https://api.example.com/oauth2/")?)
		.build()?;
	let accessor = StaticKeyAccessor::default()
		.with_partner(PartnerRole::Merchant, PartnerId::new("pm001")?)
		.with_key(Environment::Sandbox, PartnerRole::Merchant, PrivateKeyPem::new(MERCHANT_KEY));
	let signer = <PartnerSigner<StaticKeyAccessor>>::new(accessor, profile, Environment::Sandbox);
	let signed = signer.sign(
		PartnerRole::Merchant,
		SignRequest::platform(Destination::Api)
			.with_body(json!({ "trData": { "amount": "10.00", "currency": "USD" } })),
	)?;
	let response = ReqwestRequestSigner
		.attach(Client::new().post(server.url("/payments")), &signed)?
		.send()
		.await?;

	println!("Platform answered with status {}.", response.status());

	let verified = TokenVerifier::from_public_key_pem(MERCHANT_PUBLIC_KEY)?
		.verify(signed.token.compact.expose())?;

	verified.verify_body(signed.body())?;

	println!(
		"Token issued by {} for {} at {} verifies against the transmitted body.",
		verified.claims().iss,
		verified.claims().aud,
		verified.claims().iat
	);

	payment_mock.assert_async().await;

	Ok(())
}
