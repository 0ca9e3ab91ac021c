//! Request-signing core for payments partners: deterministic body digests and RS256 bearer tokens
//! with role-aware claims for first-party and delegated (ISV) flows.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod ext;
pub mod header;
pub mod key;
pub mod obs;
pub mod platform;
pub mod signer;
pub mod token;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{PartnerId, PartnerIdentity, PartnerRole, PrivateKeyPem},
		key::{Environment, StaticKeyAccessor},
		platform::PlatformProfile,
	};

	/// PKCS#1 encoded fixture key shared by unit and integration tests.
	pub const PARTNER_PKCS1_PEM: &str = include_str!("../tests/fixtures/partner_rsa_pkcs1.pem");
	/// Same key as [`PARTNER_PKCS1_PEM`] in PKCS#8 form.
	pub const PARTNER_PKCS8_PEM: &str = include_str!("../tests/fixtures/partner_rsa_pkcs8.pem");
	/// SPKI public half of the fixture key.
	pub const PARTNER_PUBLIC_PEM: &str = include_str!("../tests/fixtures/partner_rsa_public.pem");
	/// Unrelated key used to prove signatures do not verify across key pairs.
	pub const OTHER_PKCS8_PEM: &str = include_str!("../tests/fixtures/other_rsa_pkcs8.pem");

	/// Platform identity used as the first-party audience in tests.
	pub const TEST_PLATFORM_AUDIENCE: &str = "platform";

	/// Builds the profile used across tests.
	pub fn test_profile() -> PlatformProfile {
		PlatformProfile::builder(TEST_PLATFORM_AUDIENCE)
			.api_base(Url::parse("https://api.example.com/").expect("API base fixture should parse."))
			.oauth2_base(
				Url::parse("https://api.example.com/oauth2/")
					.expect("OAuth2 base fixture should parse."),
			)
			.build()
			.expect("Platform profile fixture should be valid.")
	}

	/// Builds an identity for `partner_id` backed by the PKCS#1 fixture key.
	pub fn test_identity(partner_id: &str, role: PartnerRole) -> PartnerIdentity {
		PartnerIdentity::new(
			PartnerId::new(partner_id).expect("Partner fixture should be valid."),
			role,
			PrivateKeyPem::new(PARTNER_PKCS1_PEM),
		)
	}

	/// Builds an accessor that knows the fixture key for every role in the sandbox.
	pub fn test_accessor() -> StaticKeyAccessor {
		let accessor = StaticKeyAccessor::default();

		for (role, id) in [
			(PartnerRole::Merchant, "pm001"),
			(PartnerRole::Isv, "isv001"),
			(PartnerRole::PaymentInstitution, "pi001"),
		] {
			accessor.insert_partner(
				role,
				PartnerId::new(id).expect("Partner fixture should be valid."),
			);
			accessor.insert_key(Environment::Sandbox, role, PrivateKeyPem::new(PARTNER_PKCS1_PEM));
		}

		accessor
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
