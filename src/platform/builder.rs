//! Builder and validation for [`PlatformProfile`] values.

// self
use crate::{
	_prelude::*,
	platform::{PlatformProfile, SUPPORTED_API_VERSION},
};

/// Errors raised while constructing or validating platform profiles.
#[derive(Debug, ThisError)]
pub enum PlatformProfileError {
	/// Platform audience is required for first-party flows.
	#[error("Missing platform audience.")]
	MissingAudience,
	/// API version must not be blank.
	#[error("Missing API version.")]
	MissingApiVersion,
	/// API base URL is mandatory.
	#[error("Missing API base URL.")]
	MissingApiBase,
	/// OAuth2 base URL is mandatory.
	#[error("Missing OAuth2 base URL.")]
	MissingOAuth2Base,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} base URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which base URL failed validation.
		endpoint: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// JSON profile could not be parsed.
	#[error("Platform profile JSON is malformed at `{}`.", .source.path())]
	Parse {
		/// Parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Builder for [`PlatformProfile`] values.
#[derive(Debug)]
pub struct PlatformProfileBuilder {
	/// Platform identity used as the first-party audience.
	pub audience: String,
	/// API version override.
	pub api_version: String,
	/// Base URL of the versioned platform API.
	pub api_base: Option<Url>,
	/// Base URL of the delegated-authorization subsystem.
	pub oauth2_base: Option<Url>,
}
impl PlatformProfileBuilder {
	/// Creates a new builder seeded with the platform audience.
	pub fn new(audience: impl Into<String>) -> Self {
		Self {
			audience: audience.into(),
			api_version: SUPPORTED_API_VERSION.into(),
			api_base: None,
			oauth2_base: None,
		}
	}

	/// Overrides the API version.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Sets the platform API base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Sets the delegated-authorization base URL.
	pub fn oauth2_base(mut self, url: Url) -> Self {
		self.oauth2_base = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting profile.
	pub fn build(self) -> Result<PlatformProfile, PlatformProfileError> {
		let api_base = self.api_base.ok_or(PlatformProfileError::MissingApiBase)?;
		let oauth2_base = self.oauth2_base.ok_or(PlatformProfileError::MissingOAuth2Base)?;
		let profile = PlatformProfile {
			audience: self.audience,
			api_version: self.api_version,
			api_base,
			oauth2_base,
		};

		profile.validate()?;

		Ok(profile)
	}
}

impl PlatformProfile {
	/// Validates invariants for the profile.
	pub(crate) fn validate(&self) -> Result<(), PlatformProfileError> {
		if self.audience.trim().is_empty() {
			return Err(PlatformProfileError::MissingAudience);
		}
		if self.api_version.trim().is_empty() {
			return Err(PlatformProfileError::MissingApiVersion);
		}

		validate_endpoint("api", &self.api_base)?;
		validate_endpoint("oauth2", &self.oauth2_base)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), PlatformProfileError> {
	if url.scheme() != "https" {
		Err(PlatformProfileError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
