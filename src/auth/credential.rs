//! Stateless issuance and verification of signed, time-bounded identity credentials.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
// self
use crate::{_prelude::*, auth::UserId, config::CredentialConfig, error::AuthError};

/// Claims embedded in every issued credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Subject: the authenticated user's row identifier.
	pub sub: UserId,
	/// Absolute expiry as seconds since the Unix epoch.
	pub exp: i64,
}

/// Issues and verifies signed bearer credentials.
///
/// Stateless by design: no session record is kept and no revocation list exists, so compromise
/// recovery before expiry is unsupported. Exactly one symmetric algorithm (HS256) is accepted;
/// credentials presenting any other algorithm in their header are rejected outright.
pub struct CredentialService {
	encoding: EncodingKey,
	decoding: DecodingKey,
	validation: Validation,
	validity: Duration,
}
impl CredentialService {
	/// Creates a service from the configured secret and validity window.
	pub fn new(config: &CredentialConfig) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);

		// Expiry is a hard boundary; the default decoder leeway would admit stale credentials.
		validation.leeway = 0;

		Self {
			encoding: EncodingKey::from_secret(config.secret.expose()),
			decoding: DecodingKey::from_secret(config.secret.expose()),
			validation,
			validity: config.validity,
		}
	}

	/// Issues a credential whose expiry is the provided instant plus the validity window.
	pub fn issue_at(&self, subject: UserId, instant: OffsetDateTime) -> Result<String, AuthError> {
		let claims = Claims { sub: subject, exp: (instant + self.validity).unix_timestamp() };

		jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|source| AuthError::Signing { source })
	}

	/// Issues a credential against the current clock.
	pub fn issue(&self, subject: UserId) -> Result<String, AuthError> {
		self.issue_at(subject, OffsetDateTime::now_utc())
	}

	/// Verifies a credential and returns its strongly-typed subject.
	///
	/// The subject is extracted exactly once here; downstream code receives it as an explicit
	/// parameter instead of re-reading claims dynamically. Callers must treat every failure
	/// identically as "unauthenticated".
	pub fn verify(&self, credential: &str) -> Result<UserId, AuthError> {
		let data = jsonwebtoken::decode::<Claims>(credential, &self.decoding, &self.validation)
			.map_err(|source| {
				if matches!(source.kind(), ErrorKind::ExpiredSignature) {
					AuthError::Expired
				} else {
					AuthError::Malformed { source }
				}
			})?;

		Ok(data.claims.sub)
	}

	/// Validity window added to every issue instant.
	pub fn validity(&self) -> Duration {
		self.validity
	}
}
impl Debug for CredentialService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialService")
			.field("secret", &"<redacted>")
			.field("validity", &self.validity)
			.finish()
	}
}
