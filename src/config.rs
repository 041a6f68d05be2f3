//! Core configuration assembled once at service start.

// self
use crate::{_prelude::*, auth::SigningSecret};

/// Errors raised while constructing or validating the core configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ConfigError {
	/// Signing secret must carry at least one byte of material.
	#[error("Signing secret must not be empty.")]
	EmptySecret,
	/// Credential validity must be a positive duration.
	#[error("Credential validity must be positive.")]
	NonPositiveValidity,
	/// Buckets must hold at least one token, otherwise no request is ever admitted.
	#[error("Bucket capacity must be at least one token.")]
	ZeroCapacity,
	/// Refill rate must restore tokens over time.
	#[error("Refill rate must be a positive number of tokens per second.")]
	NonPositiveRefillRate,
}

/// Credential-service section: signing secret plus validity window.
#[derive(Clone, Debug)]
pub struct CredentialConfig {
	/// Symmetric signing secret shared by issuance and verification.
	pub secret: SigningSecret,
	/// Validity duration added to the issue instant to produce the expiry.
	pub validity: Duration,
}

/// Admission-controller section applied uniformly to every identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdmissionConfig {
	/// Maximum number of tokens a bucket can hold.
	pub capacity: u32,
	/// Tokens restored per second of elapsed time.
	pub refill_rate: f64,
}
impl Default for AdmissionConfig {
	fn default() -> Self {
		Self { capacity: DEFAULT_CAPACITY, refill_rate: DEFAULT_REFILL_RATE }
	}
}

/// Top-level configuration consumed by the core's constructors.
#[derive(Clone, Debug)]
pub struct CoreConfig {
	/// Credential-service section.
	pub credential: CredentialConfig,
	/// Admission-controller section.
	pub admission: AdmissionConfig,
}
impl CoreConfig {
	/// Returns a builder seeded with the deployment defaults.
	pub fn builder() -> CoreConfigBuilder {
		CoreConfigBuilder::new()
	}
}

const DEFAULT_CAPACITY: u32 = 100;
const DEFAULT_REFILL_RATE: f64 = 5.;
const DEFAULT_VALIDITY: Duration = Duration::hours(1);

/// Builder for [`CoreConfig`] values.
#[derive(Clone, Debug)]
pub struct CoreConfigBuilder {
	/// Signing secret; the only field without a default.
	pub secret: Option<SigningSecret>,
	/// Credential validity window.
	pub validity: Duration,
	/// Bucket capacity shared by every identity.
	pub capacity: u32,
	/// Bucket refill rate in tokens per second.
	pub refill_rate: f64,
}
impl CoreConfigBuilder {
	fn new() -> Self {
		Self {
			secret: None,
			validity: DEFAULT_VALIDITY,
			capacity: DEFAULT_CAPACITY,
			refill_rate: DEFAULT_REFILL_RATE,
		}
	}

	/// Sets the signing secret.
	pub fn secret(mut self, secret: impl Into<SigningSecret>) -> Self {
		self.secret = Some(secret.into());

		self
	}

	/// Overrides the credential validity window.
	pub fn validity(mut self, validity: Duration) -> Self {
		self.validity = validity;

		self
	}

	/// Overrides the bucket capacity.
	pub fn capacity(mut self, capacity: u32) -> Self {
		self.capacity = capacity;

		self
	}

	/// Overrides the bucket refill rate (tokens per second).
	pub fn refill_rate(mut self, refill_rate: f64) -> Self {
		self.refill_rate = refill_rate;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<CoreConfig, ConfigError> {
		let secret = self.secret.ok_or(ConfigError::EmptySecret)?;

		if secret.expose().is_empty() {
			return Err(ConfigError::EmptySecret);
		}
		if self.validity <= Duration::ZERO {
			return Err(ConfigError::NonPositiveValidity);
		}
		if self.capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if self.refill_rate.is_nan() || self.refill_rate <= 0. {
			return Err(ConfigError::NonPositiveRefillRate);
		}

		Ok(CoreConfig {
			credential: CredentialConfig { secret, validity: self.validity },
			admission: AdmissionConfig {
				capacity: self.capacity,
				refill_rate: self.refill_rate,
			},
		})
	}
}
