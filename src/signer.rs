//! Signing orchestration: accessor → context → token → headers.
//!
//! [`PartnerSigner`] is the entry point most callers need. It resolves the partner identity for a
//! role through a [`KeyAccessor`], enforces the role rules, signs, and composes the header set,
//! recording a span and an outcome counter around every call. Parsed private keys are cached per
//! role and parsed again only when the accessor hands back different key material, so rotation
//! takes effect on the next call. Tokens themselves are never cached.

// self
use crate::{
	_prelude::*,
	auth::{PartnerId, PartnerIdentity, PartnerRole, PrivateKeyPem},
	error::{ClaimError, KeyError},
	header::{self, AuthHeaders, Destination},
	key::{Environment, KeyAccessor},
	obs::{self, SignKind, SignOutcome, SignSpan},
	platform::PlatformProfile,
	token::{Audience, SignedToken, SigningContext, TokenBuilder},
};

/// Per-call request description handed to [`PartnerSigner::sign`].
#[derive(Clone, Debug)]
pub struct SignRequest {
	/// Audience variant (first party or delegated).
	pub audience: Audience,
	/// Request body; `None` means the request has no body at all.
	pub body: Option<Value>,
	/// Target subsystem.
	pub destination: Destination,
}
impl SignRequest {
	/// First-party request addressed to the platform.
	pub fn platform(destination: Destination) -> Self {
		Self { audience: Audience::Platform, body: None, destination }
	}

	/// Delegated request: the ISV acts for `merchant` using the merchant-issued `access_token`.
	pub fn on_behalf_of(
		merchant: &str,
		access_token: impl Into<String>,
		destination: Destination,
	) -> Result<Self, ClaimError> {
		let merchant = PartnerId::new(merchant)
			.map_err(|source| ClaimError::InvalidIdentifier { claim: "aud", source })?;

		Ok(Self { audience: Audience::on_behalf_of(merchant, access_token), body: None, destination })
	}

	/// First-party request whose destination is derived from `url`.
	pub fn for_url(profile: &PlatformProfile, url: &Url) -> Self {
		Self::platform(profile.classify(url))
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}

	fn kind(&self) -> SignKind {
		if self.audience.is_delegated() { SignKind::Delegated } else { SignKind::FirstParty }
	}
}

/// Token plus the header set ready to attach to the outgoing request.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// Signed token and the canonical body it binds.
	pub token: SignedToken,
	/// Headers to attach.
	pub headers: AuthHeaders,
}
impl SignedRequest {
	/// Exact body text to transmit; re-serializing the original value would break the digest.
	pub fn body(&self) -> Option<&str> {
		self.token.body()
	}
}

#[derive(Debug)]
struct ParsedKey {
	pem: PrivateKeyPem,
	builder: Arc<TokenBuilder>,
}

/// Signs requests for the partner roles known to a key accessor.
///
/// Clones share the parsed-key cache. The cache is keyed by role alone because a signer is
/// bound to one environment.
pub struct PartnerSigner<K>
where
	K: ?Sized + KeyAccessor,
{
	accessor: Arc<K>,
	profile: PlatformProfile,
	environment: Environment,
	keys: Arc<RwLock<HashMap<PartnerRole, ParsedKey>>>,
}
impl<K> PartnerSigner<K>
where
	K: ?Sized + KeyAccessor,
{
	/// Creates a signer for `environment`.
	pub fn new(
		accessor: impl Into<Arc<K>>,
		profile: PlatformProfile,
		environment: Environment,
	) -> Self {
		Self { accessor: accessor.into(), profile, environment, keys: Default::default() }
	}

	/// Platform profile used for audiences and the API version header.
	pub fn profile(&self) -> &PlatformProfile {
		&self.profile
	}

	/// Environment keys are resolved for.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Signs `request` as `role`, stamping `iat` from the system clock.
	pub fn sign(&self, role: PartnerRole, request: SignRequest) -> Result<SignedRequest> {
		self.sign_at(role, request, OffsetDateTime::now_utc())
	}

	/// Signs `request` as `role` with an explicit issued-at instant.
	pub fn sign_at(
		&self,
		role: PartnerRole,
		request: SignRequest,
		issued_at: OffsetDateTime,
	) -> Result<SignedRequest> {
		let kind = request.kind();
		let _span = SignSpan::new(kind, role, request.destination).entered();

		obs::record_sign_outcome(kind, role, SignOutcome::Attempt);

		let result = self.sign_inner(role, request, issued_at);

		match &result {
			Ok(_) => obs::record_sign_outcome(kind, role, SignOutcome::Success),
			Err(_) => obs::record_sign_outcome(kind, role, SignOutcome::Failure),
		}

		result
	}

	fn sign_inner(
		&self,
		role: PartnerRole,
		request: SignRequest,
		issued_at: OffsetDateTime,
	) -> Result<SignedRequest> {
		let identity = self.accessor.resolve_identity(self.environment, role)?;
		let SignRequest { audience, body, destination } = request;
		let context = SigningContext::new(&identity, audience, &self.profile, body, destination)?;
		let token = self.builder_for(&identity)?.sign_at(&context, issued_at)?;
		let headers = header::compose_headers(&token, destination, &self.profile.api_version);

		Ok(SignedRequest { token, headers })
	}

	fn builder_for(&self, identity: &PartnerIdentity) -> Result<Arc<TokenBuilder>, KeyError> {
		if let Some(parsed) =
			self.keys.read().get(&identity.role).filter(|parsed| parsed.pem == identity.private_key)
		{
			return Ok(parsed.builder.clone());
		}

		let builder = Arc::new(TokenBuilder::for_identity(identity)?);

		self.keys.write().insert(
			identity.role,
			ParsedKey { pem: identity.private_key.clone(), builder: builder.clone() },
		);

		Ok(builder)
	}
}
impl<K> Clone for PartnerSigner<K>
where
	K: ?Sized + KeyAccessor,
{
	fn clone(&self) -> Self {
		Self {
			accessor: self.accessor.clone(),
			profile: self.profile.clone(),
			environment: self.environment,
			keys: self.keys.clone(),
		}
	}
}
impl<K> Debug for PartnerSigner<K>
where
	K: ?Sized + KeyAccessor,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PartnerSigner")
			.field("profile", &self.profile)
			.field("environment", &self.environment)
			.finish_non_exhaustive()
	}
}
