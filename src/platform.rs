//! Platform profile: the fully resolved values the signing core needs about the remote platform.
//!
//! The profile names the platform's own identity (the first-party `aud` claim), the API version
//! sent on versioned platform calls, and the base URLs used to tell platform API calls apart
//! from calls into the delegated-authorization (OAuth2) subsystem. Loading these values from the
//! environment is the caller's job.

/// Builder API for assembling platform profiles.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, header::Destination};

/// API version sent in the version header on platform calls.
pub const SUPPORTED_API_VERSION: &str = "1.0";

/// Immutable platform profile consumed by signers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
	/// Platform identity used as the audience in first-party flows.
	pub audience: String,
	/// Version carried by the API-version header.
	#[serde(default = "default_api_version")]
	pub api_version: String,
	/// Base URL of the versioned platform API.
	pub api_base: Url,
	/// Base URL of the delegated-authorization subsystem.
	pub oauth2_base: Url,
}
impl PlatformProfile {
	/// Creates a new builder for the provided platform audience.
	pub fn builder(audience: impl Into<String>) -> PlatformProfileBuilder {
		PlatformProfileBuilder::new(audience)
	}

	/// Parses and validates a JSON profile, reporting the failing path on malformed input.
	pub fn from_json_str(raw: &str) -> Result<Self, PlatformProfileError> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);
		let profile: Self = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| PlatformProfileError::Parse { source })?;

		profile.validate()?;

		Ok(profile)
	}

	/// Classifies a request URL: anything under the OAuth2 base targets the delegated-authorization
	/// subsystem, everything else is a versioned platform call.
	pub fn classify(&self, url: &Url) -> Destination {
		let under_oauth2 = url.scheme() == self.oauth2_base.scheme()
			&& url.host_str() == self.oauth2_base.host_str()
			&& url.port_or_known_default() == self.oauth2_base.port_or_known_default()
			&& path_has_prefix(url.path(), self.oauth2_base.path());

		if under_oauth2 { Destination::OAuth2 } else { Destination::Api }
	}
}

fn default_api_version() -> String {
	SUPPORTED_API_VERSION.into()
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
	let prefix = prefix.trim_end_matches('/');

	match path.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with('/'),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::test_profile;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse.")
	}

	#[test]
	fn classify_routes_oauth2_paths() {
		let profile = test_profile();

		assert_eq!(profile.classify(&url("https://api.example.com/oauth2/token")), Destination::OAuth2);
		assert_eq!(profile.classify(&url("https://api.example.com/oauth2")), Destination::OAuth2);
		assert_eq!(profile.classify(&url("https://api.example.com/oauth2x/token")), Destination::Api);
		assert_eq!(profile.classify(&url("https://api.example.com/v1/payments")), Destination::Api);
		assert_eq!(profile.classify(&url("https://other.example.com/oauth2/token")), Destination::Api);
	}

	#[test]
	fn json_profile_defaults_api_version() {
		let profile = PlatformProfile::from_json_str(
			r#"{"audience":"platform","api_base":"https://api.example.com/","oauth2_base":"https://api.example.com/oauth2/"}"#,
		)
		.expect("JSON profile should parse.");

		assert_eq!(profile.api_version, SUPPORTED_API_VERSION);
		assert_eq!(profile, test_profile());
	}

	#[test]
	fn json_profile_reports_failing_path() {
		let err = PlatformProfile::from_json_str(
			r#"{"audience":"platform","api_base":"not a url","oauth2_base":"https://api.example.com/oauth2/"}"#,
		)
		.expect_err("Malformed URL should fail.");

		match err {
			PlatformProfileError::Parse { source } => assert_eq!(source.path().to_string(), "api_base"),
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn json_profile_is_validated() {
		let err = PlatformProfile::from_json_str(
			r#"{"audience":" ","api_base":"https://api.example.com/","oauth2_base":"https://api.example.com/oauth2/"}"#,
		)
		.expect_err("Blank audience should fail validation.");

		assert!(matches!(err, PlatformProfileError::MissingAudience));
	}
}
