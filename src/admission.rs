//! Per-identity admission control backed by continuous token buckets.
//!
//! One bucket exists per distinct [`IdentityKey`], created lazily on first sight and shared by
//! every concurrent request for that identity. The refill-and-consume step is atomic per bucket
//! and runs in bounded, lock-held time; requests for distinct identities never block one another.
//! Rejection is a routine, client-visible outcome ("too many requests"); it is never retried
//! internally and never escalated.

mod bucket;
mod metrics;

pub use metrics::AdmissionMetrics;

// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	admission::bucket::Bucket,
	auth::UserId,
	config::AdmissionConfig,
	error::AdmissionError,
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Value used to select a token bucket.
///
/// Authenticated traffic is keyed by subject id. Unauthenticated traffic is keyed by network
/// origin so a single noisy anonymous caller cannot starve every other anonymous caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKey {
	/// Authenticated subject.
	User(UserId),
	/// Unauthenticated caller identified by its network origin.
	Guest(IpAddr),
}
impl From<UserId> for IdentityKey {
	fn from(value: UserId) -> Self {
		Self::User(value)
	}
}
impl Display for IdentityKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::User(id) => write!(f, "user:{id}"),
			Self::Guest(origin) => write!(f, "guest:{origin}"),
		}
	}
}

type BucketHandle = Arc<Mutex<Bucket>>;

/// Registry of per-identity token buckets, created once at service start.
///
/// The registry lock is held only long enough to clone a bucket handle; the refill-and-consume
/// step runs under the per-bucket mutex. The registry grows with the set of identities seen and
/// is never torn down by the core itself; hosts that care about growth drive
/// [`AdmissionController::sweep_idle`] from their own schedule.
#[derive(Debug)]
pub struct AdmissionController {
	buckets: RwLock<HashMap<IdentityKey, BucketHandle>>,
	config: AdmissionConfig,
	metrics: AdmissionMetrics,
}
impl AdmissionController {
	/// Creates a controller applying the provided bucket parameters uniformly to all identities.
	pub fn new(config: AdmissionConfig) -> Self {
		Self {
			buckets: RwLock::new(HashMap::new()),
			config,
			metrics: AdmissionMetrics::default(),
		}
	}

	/// Admission counters for this controller.
	pub fn metrics(&self) -> &AdmissionMetrics {
		&self.metrics
	}

	/// Number of identities currently holding a bucket.
	pub fn tracked_identities(&self) -> usize {
		self.buckets.read().len()
	}

	/// Decides whether a request for the identity may proceed, evaluated at the given instant.
	pub fn allow_at(
		&self,
		key: IdentityKey,
		instant: OffsetDateTime,
	) -> Result<(), AdmissionError> {
		const KIND: OpKind = OpKind::Admission;

		let _guard = OpSpan::new(KIND, "allow").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let bucket = self.bucket(key, instant);
		let admitted = bucket.lock().try_consume_at(&self.config, instant);

		if admitted {
			self.metrics.record_admitted();
			obs::record_op_outcome(KIND, OpOutcome::Success);

			Ok(())
		} else {
			self.metrics.record_throttled();
			obs::record_op_outcome(KIND, OpOutcome::Failure);

			Err(AdmissionError::RateLimited)
		}
	}

	/// Decides against the current clock.
	pub fn allow(&self, key: IdentityKey) -> Result<(), AdmissionError> {
		self.allow_at(key, OffsetDateTime::now_utc())
	}

	/// Evicts buckets that saw no traffic for at least `idle_for` as of the instant, returning
	/// the number removed.
	///
	/// An evicted identity starts over with a full bucket on its next request, so `idle_for`
	/// should comfortably exceed the time a drained bucket needs to refill.
	pub fn sweep_idle_at(&self, idle_for: Duration, instant: OffsetDateTime) -> usize {
		let mut registry = self.buckets.write();
		let before = registry.len();

		registry.retain(|_, handle| instant - handle.lock().last_refill() < idle_for);

		before - registry.len()
	}

	/// Evicts idle buckets against the current clock.
	pub fn sweep_idle(&self, idle_for: Duration) -> usize {
		self.sweep_idle_at(idle_for, OffsetDateTime::now_utc())
	}

	// Two first requests for an unseen identity may race here; the entry API installs exactly
	// one bucket that both observe.
	fn bucket(&self, key: IdentityKey, instant: OffsetDateTime) -> BucketHandle {
		if let Some(handle) = self.buckets.read().get(&key) {
			return handle.clone();
		}

		self.buckets
			.write()
			.entry(key)
			.or_insert_with(|| Arc::new(Mutex::new(Bucket::full_at(&self.config, instant))))
			.clone()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn controller(capacity: u32, refill_rate: f64) -> AdmissionController {
		AdmissionController::new(AdmissionConfig { capacity, refill_rate })
	}

	#[test]
	fn lazy_insertion_installs_one_bucket_per_identity() {
		let controller = controller(3, 1.);
		let now = macros::datetime!(2025-06-01 00:00 UTC);

		controller.allow_at(UserId::new(1).into(), now).expect("First check should be admitted.");
		controller.allow_at(UserId::new(1).into(), now).expect("Second check should share the bucket.");
		controller
			.allow_at(IdentityKey::Guest("10.0.0.9".parse().expect("Fixture IP should parse.")), now)
			.expect("Guest traffic should get its own bucket.");

		assert_eq!(controller.tracked_identities(), 2);
	}

	#[test]
	fn counters_track_outcomes() {
		let controller = controller(1, 1.);
		let now = macros::datetime!(2025-06-01 00:00 UTC);
		let key = IdentityKey::from(UserId::new(9));

		assert!(controller.allow_at(key, now).is_ok());
		assert_eq!(controller.allow_at(key, now), Err(AdmissionError::RateLimited));
		assert_eq!(controller.metrics().admitted(), 1);
		assert_eq!(controller.metrics().throttled(), 1);
	}

	#[test]
	fn sweep_evicts_only_idle_identities() {
		let controller = controller(5, 1.);
		let start = macros::datetime!(2025-06-01 00:00 UTC);
		let later = start + Duration::minutes(30);
		let stale = IdentityKey::from(UserId::new(1));
		let fresh = IdentityKey::from(UserId::new(2));

		controller.allow_at(stale, start).expect("Stale identity should be admitted at start.");
		controller.allow_at(fresh, later).expect("Fresh identity should be admitted later.");

		assert_eq!(controller.sweep_idle_at(Duration::minutes(10), later), 1);
		assert_eq!(controller.tracked_identities(), 1);
	}

	#[test]
	fn identity_keys_format_for_host_logs() {
		assert_eq!(IdentityKey::from(UserId::new(3)).to_string(), "user:3");
		assert_eq!(
			IdentityKey::Guest("192.168.1.2".parse().expect("Fixture IP should parse."))
				.to_string(),
			"guest:192.168.1.2"
		);
	}
}
