//! Request signing contracts that attach a [`SignedRequest`] to arbitrary HTTP clients.

// self
#[cfg(feature = "reqwest")] use crate::_prelude::*;
use crate::signer::SignedRequest;

/// Describes how to attach a [`SignedRequest`] to an outbound request without constraining the
/// HTTP client type.
///
/// Implementations must send the canonical body from [`SignedRequest::body`] verbatim. Any
/// re-serialization may reorder keys or change escaping, and the receiver would then reject the
/// digest.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the request and injects the auth headers and body.
	fn attach(&self, request: Request, signed: &SignedRequest) -> Result<Request, Error>;
}

/// Attaches signed requests to [`reqwest::RequestBuilder`]s.
#[cfg(feature = "reqwest")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestRequestSigner;
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Error> for ReqwestRequestSigner {
	fn attach(
		&self,
		request: reqwest::RequestBuilder,
		signed: &SignedRequest,
	) -> Result<reqwest::RequestBuilder> {
		let request = request.headers(signed.headers.to_header_map()?);

		Ok(match signed.body() {
			Some(body) => request.body(body.to_owned()),
			None => request,
		})
	}
}
