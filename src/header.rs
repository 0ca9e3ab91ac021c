//! Composes the outgoing authentication header set for a signed token.
//!
//! Platform API calls carry the API-version header; calls into the delegated-authorization
//! subsystem must not. The subsystem rejects versioned calls as version-mismatched, and platform
//! calls without the header are routed to a stale unversioned path.

// self
use crate::{_prelude::*, token::SignedToken};

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// API-version header name.
pub const API_VERSION: &str = "X-Api-Version";
/// Content type sent with every signed call.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Which remote subsystem a request targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
	/// Versioned platform API.
	#[default]
	Api,
	/// Delegated-authorization (OAuth2) subsystem.
	#[serde(rename = "oauth2")]
	OAuth2,
}
impl Destination {
	/// Returns `true` for the delegated-authorization subsystem.
	pub const fn is_oauth2(self) -> bool {
		matches!(self, Destination::OAuth2)
	}

	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Destination::Api => "api",
			Destination::OAuth2 => "oauth2",
		}
	}
}
impl Display for Destination {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ready-to-attach header set for a signed request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeaders {
	authorization: String,
	api_version: Option<String>,
}
impl AuthHeaders {
	/// Returns the full `Authorization` value (`Bearer <token>`). Callers must avoid logging it.
	pub fn authorization(&self) -> &str {
		&self.authorization
	}

	/// Returns the content type, always `application/json`.
	pub fn content_type(&self) -> &'static str {
		JSON_CONTENT_TYPE
	}

	/// Returns the API version when the request targets the platform API.
	pub fn api_version(&self) -> Option<&str> {
		self.api_version.as_deref()
	}

	/// Looks up a header value by case-insensitive name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.iter().find(|(header, _)| header.eq_ignore_ascii_case(name)).map(|(_, value)| value)
	}

	/// Iterates over `(name, value)` pairs in a fixed order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		[
			Some((AUTHORIZATION, self.authorization.as_str())),
			Some((CONTENT_TYPE, JSON_CONTENT_TYPE)),
			self.api_version.as_deref().map(|version| (API_VERSION, version)),
		]
		.into_iter()
		.flatten()
	}

	/// Builds a reqwest header map; the authorization value is marked sensitive.
	#[cfg(feature = "reqwest")]
	pub fn to_header_map(&self) -> Result<reqwest::header::HeaderMap> {
		// crates.io
		use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

		let mut map = HeaderMap::new();
		let mut authorization = HeaderValue::from_str(&self.authorization)
			.map_err(|_| Error::Header { name: AUTHORIZATION })?;

		authorization.set_sensitive(true);
		map.insert(header::AUTHORIZATION, authorization);
		map.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

		if let Some(version) = self.api_version.as_deref() {
			let value =
				HeaderValue::from_str(version).map_err(|_| Error::Header { name: API_VERSION })?;

			map.insert(HeaderName::from_static("x-api-version"), value);
		}

		Ok(map)
	}
}
impl Debug for AuthHeaders {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthHeaders")
			.field("authorization", &"Bearer <redacted>")
			.field("content_type", &JSON_CONTENT_TYPE)
			.field("api_version", &self.api_version)
			.finish()
	}
}

/// Turns a signed token into the exact header set for `destination`.
pub fn compose_headers(
	token: &SignedToken,
	destination: Destination,
	api_version: &str,
) -> AuthHeaders {
	AuthHeaders {
		authorization: format!("Bearer {}", token.compact.expose()),
		api_version: (!destination.is_oauth2()).then(|| api_version.to_owned()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{auth::CompactToken, digest::BodyDigest};

	fn token() -> SignedToken {
		SignedToken {
			compact: CompactToken::new("aaa.bbb.ccc"),
			canonical_body: None,
			digest: BodyDigest::Absent,
			issued_at: 1_700_000_000,
		}
	}

	#[test]
	fn platform_calls_carry_version_header() {
		let headers = compose_headers(&token(), Destination::Api, "1.0");
		let pairs = headers.iter().collect::<Vec<_>>();

		assert_eq!(
			pairs,
			vec![
				(AUTHORIZATION, "Bearer aaa.bbb.ccc"),
				(CONTENT_TYPE, JSON_CONTENT_TYPE),
				(API_VERSION, "1.0"),
			]
		);
		assert_eq!(headers.get("x-api-version"), Some("1.0"));
	}

	#[test]
	fn oauth2_calls_never_carry_version_header() {
		let headers = compose_headers(&token(), Destination::OAuth2, "1.0");

		assert_eq!(headers.api_version(), None);
		assert_eq!(headers.get(API_VERSION), None);
		assert_eq!(headers.iter().count(), 2);
		assert_eq!(headers.get("authorization"), Some("Bearer aaa.bbb.ccc"));
		assert_eq!(headers.content_type(), "application/json");
	}

	#[test]
	fn debug_output_redacts_bearer() {
		let rendered = format!("{:?}", compose_headers(&token(), Destination::Api, "1.0"));

		assert!(!rendered.contains("aaa.bbb.ccc"));
	}

	#[test]
	fn destination_serde_labels() {
		assert_eq!(
			serde_json::to_string(&Destination::OAuth2).expect("Destination should serialize."),
			"\"oauth2\""
		);
		assert!(Destination::OAuth2.is_oauth2());
		assert!(!Destination::default().is_oauth2());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn header_map_marks_authorization_sensitive() {
		let map = compose_headers(&token(), Destination::Api, "1.0")
			.to_header_map()
			.expect("Header map should build.");

		assert!(map.get(reqwest::header::AUTHORIZATION).is_some_and(|value| value.is_sensitive()));
		assert_eq!(map.get("x-api-version").and_then(|value| value.to_str().ok()), Some("1.0"));
		assert_eq!(map.len(), 3);
	}
}
