//! Continuous token-bucket state guarded by a per-identity mutex.

// self
use crate::{_prelude::*, config::AdmissionConfig};

/// Mutable token-bucket state for a single identity.
///
/// The level is continuous: refill accrues fractionally with elapsed time and a request is
/// admitted only while at least one whole token remains.
#[derive(Clone, Debug)]
pub(crate) struct Bucket {
	tokens: f64,
	last_refill: OffsetDateTime,
}
impl Bucket {
	/// Creates a bucket filled to capacity at the provided instant.
	pub(crate) fn full_at(config: &AdmissionConfig, instant: OffsetDateTime) -> Self {
		Self { tokens: f64::from(config.capacity), last_refill: instant }
	}

	/// Refill-and-consume step; callers execute it under the bucket lock.
	pub(crate) fn try_consume_at(
		&mut self,
		config: &AdmissionConfig,
		instant: OffsetDateTime,
	) -> bool {
		self.refill_at(config, instant);

		if self.tokens < 1. {
			return false;
		}

		self.tokens -= 1.;

		true
	}

	/// Instant of the most recent refill observation.
	pub(crate) fn last_refill(&self) -> OffsetDateTime {
		self.last_refill
	}

	// Accrues elapsed refill, saturating at capacity, then stamps the instant. Clock regressions
	// are ignored rather than draining the bucket.
	fn refill_at(&mut self, config: &AdmissionConfig, instant: OffsetDateTime) {
		let elapsed = (instant - self.last_refill).as_seconds_f64();

		if elapsed > 0. {
			self.tokens =
				f64::from(config.capacity).min(self.tokens + elapsed * config.refill_rate);
			self.last_refill = instant;
		}
	}
}
