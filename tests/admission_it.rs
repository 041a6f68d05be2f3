// crates.io
use time::{Duration, macros};
// self
use gallery_core::{
	admission::{AdmissionController, IdentityKey},
	auth::UserId,
	config::AdmissionConfig,
	error::AdmissionError,
};

fn controller(capacity: u32, refill_rate: f64) -> AdmissionController {
	AdmissionController::new(AdmissionConfig { capacity, refill_rate })
}

#[test]
fn capacity_admits_then_refill_restores_one_token_per_second() {
	let controller = controller(5, 1.);
	let key = IdentityKey::from(UserId::new(1));
	let start = macros::datetime!(2025-06-01 00:00 UTC);

	for _ in 0..5 {
		controller.allow_at(key, start).expect("Checks within capacity should be admitted.");
	}

	assert_eq!(controller.allow_at(key, start), Err(AdmissionError::RateLimited));

	let one_second_later = start + Duration::seconds(1);

	controller
		.allow_at(key, one_second_later)
		.expect("Exactly one more check should be admitted after one second of refill.");

	assert_eq!(controller.allow_at(key, one_second_later), Err(AdmissionError::RateLimited));
}

#[test]
fn long_idle_periods_never_overfill_the_bucket() {
	let controller = controller(3, 1.);
	let key = IdentityKey::from(UserId::new(2));
	let start = macros::datetime!(2025-06-01 00:00 UTC);

	for _ in 0..3 {
		controller.allow_at(key, start).expect("Initial checks should drain the full bucket.");
	}

	let much_later = start + Duration::seconds(1_000);

	for _ in 0..3 {
		controller
			.allow_at(key, much_later)
			.expect("Refill should restore no more than the capacity.");
	}

	assert_eq!(controller.allow_at(key, much_later), Err(AdmissionError::RateLimited));
}

#[test]
fn identities_never_affect_each_others_outcome() {
	let controller = controller(2, 1.);
	let now = macros::datetime!(2025-06-01 00:00 UTC);
	let noisy = IdentityKey::from(UserId::new(3));
	let quiet = IdentityKey::from(UserId::new(4));
	let guest = IdentityKey::Guest("203.0.113.9".parse().expect("Fixture IP should parse."));

	controller.allow_at(noisy, now).expect("First noisy check should be admitted.");
	controller.allow_at(noisy, now).expect("Second noisy check should be admitted.");

	assert_eq!(controller.allow_at(noisy, now), Err(AdmissionError::RateLimited));

	controller.allow_at(quiet, now).expect("Another user's bucket should be untouched.");
	controller.allow_at(guest, now).expect("Anonymous origins get buckets of their own.");
}

#[test]
fn concurrent_checks_for_one_identity_never_double_spend() {
	let controller = controller(50, 0.001);
	let key = IdentityKey::from(UserId::new(5));
	let instant = macros::datetime!(2025-06-01 00:00 UTC);
	let admitted = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| {
				scope.spawn(|| {
					(0..40).filter(|_| controller.allow_at(key, instant).is_ok()).count()
				})
			})
			.collect();

		handles
			.into_iter()
			.map(|handle| handle.join().expect("Admission worker thread should not panic."))
			.sum::<usize>()
	});

	assert_eq!(admitted, 50, "checks at one instant must spend each token exactly once");
}

#[test]
fn racing_first_requests_install_exactly_one_bucket() {
	let controller = controller(1, 1.);
	let key = IdentityKey::from(UserId::new(6));
	let instant = macros::datetime!(2025-06-01 00:00 UTC);
	let admitted = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| scope.spawn(|| controller.allow_at(key, instant).is_ok()))
			.collect();

		handles
			.into_iter()
			.map(|handle| handle.join().expect("Admission worker thread should not panic."))
			.filter(|admitted| *admitted)
			.count()
	});

	assert_eq!(admitted, 1, "a racing lazy insert must not hand out extra full buckets");
	assert_eq!(controller.tracked_identities(), 1);
}

#[test]
fn evicted_identities_start_over_with_a_full_bucket() {
	let controller = controller(1, 0.001);
	let key = IdentityKey::from(UserId::new(7));
	let start = macros::datetime!(2025-06-01 00:00 UTC);

	controller.allow_at(key, start).expect("First check should be admitted.");
	assert_eq!(controller.allow_at(key, start), Err(AdmissionError::RateLimited));

	let an_hour_later = start + Duration::hours(1);

	assert_eq!(controller.sweep_idle_at(Duration::minutes(30), an_hour_later), 1);
	assert_eq!(controller.tracked_identities(), 0);

	controller
		.allow_at(key, an_hour_later)
		.expect("An evicted identity should be re-admitted with a fresh bucket.");
}
