// crates.io
use time::{Duration, macros};
// self
use gallery_core::{
	auth::{PhotoId, SocialLinkId, UserId},
	resource::{PhotoPatch, PhotoRecord, SocialLinkPatch, SocialLinkRecord, VersionMarker},
	store::{ConditionalOutcome, DeleteOutcome, MemoryStore, ResourceStore, VersionedStore},
};

fn photo_fixture(id: u64, owner: u64, instant: time::OffsetDateTime) -> PhotoRecord {
	PhotoRecord::new(
		PhotoId::new(id),
		UserId::new(owner),
		PhotoPatch {
			title: "Sunrise".into(),
			caption: Some("over the bay".into()),
			url: "https://img.example/sunrise.jpg".into(),
		},
		instant,
	)
}

#[tokio::test]
async fn insert_and_fetch_round_trip() {
	let store = MemoryStore::default();
	let created = macros::datetime!(2025-03-01 08:00 UTC);
	let photo = photo_fixture(1, 7, created);

	store.insert(photo.clone()).await.expect("Inserting the fixture row should succeed.");

	let fetched = store
		.fetch(PhotoId::new(1))
		.await
		.expect("Fetching the fixture row should succeed.")
		.expect("The fixture row should remain present.");

	assert_eq!(fetched, photo);
	assert_eq!(fetched.marker, VersionMarker::new(created));
}

#[tokio::test]
async fn update_with_stale_marker_is_rejected_and_overwrites_nothing() {
	let store = MemoryStore::default();
	let t1 = macros::datetime!(2025-03-01 08:00 UTC);
	let t2 = t1 + Duration::minutes(5);
	let t3 = t1 + Duration::minutes(9);
	let marker_at_load = VersionMarker::new(t1);

	store
		.insert(photo_fixture(42, 7, t1))
		.await
		.expect("Inserting the contested row should succeed.");

	// Writer A wins: its conditional update advances the marker to t2.
	let winner = store
		.update_guarded(
			PhotoId::new(42),
			marker_at_load,
			PhotoPatch {
				title: "Writer A".into(),
				caption: None,
				url: "https://img.example/a.jpg".into(),
			},
			t2,
		)
		.await
		.expect("Writer A's conditional update should not error.");

	let ConditionalOutcome::Updated(row) = winner else {
		panic!("Writer A held the current marker and must win.");
	};

	assert_eq!(row.marker, VersionMarker::new(t2));

	// Writer B still holds the marker it loaded before A's write.
	let loser = store
		.update_guarded(
			PhotoId::new(42),
			marker_at_load,
			PhotoPatch {
				title: "Writer B".into(),
				caption: None,
				url: "https://img.example/b.jpg".into(),
			},
			t3,
		)
		.await
		.expect("Writer B's conditional update should not error.");

	assert!(matches!(loser, ConditionalOutcome::Stale));

	let surviving = store
		.fetch(PhotoId::new(42))
		.await
		.expect("Fetching the contested row should succeed.")
		.expect("The contested row should remain present.");

	assert_eq!(surviving.title, "Writer A");
	assert_eq!(surviving.marker, VersionMarker::new(t2));
}

#[tokio::test]
async fn update_of_a_missing_row_reports_missing() {
	let store = MemoryStore::<PhotoRecord>::default();
	let t1 = macros::datetime!(2025-03-01 08:00 UTC);
	let outcome = store
		.update_guarded(
			PhotoId::new(404),
			VersionMarker::new(t1),
			PhotoPatch { title: "ghost".into(), caption: None, url: "https://img.example/x.jpg".into() },
			t1,
		)
		.await
		.expect("A conditional update against an empty store should not error.");

	assert!(matches!(outcome, ConditionalOutcome::Missing));
}

#[tokio::test]
async fn delete_requires_both_id_and_owner_to_match() {
	let store = MemoryStore::default();
	let created = macros::datetime!(2025-03-01 08:00 UTC);

	store
		.insert(photo_fixture(9, 7, created))
		.await
		.expect("Inserting the delete fixture should succeed.");

	assert_eq!(
		store
			.delete_owned(PhotoId::new(9), UserId::new(8))
			.await
			.expect("A non-owner delete should not error."),
		DeleteOutcome::NotPermitted
	);
	assert!(
		store
			.fetch(PhotoId::new(9))
			.await
			.expect("Fetching after the refused delete should succeed.")
			.is_some(),
		"a refused delete must leave the row in place"
	);
	assert_eq!(
		store
			.delete_owned(PhotoId::new(9), UserId::new(7))
			.await
			.expect("The owner's delete should not error."),
		DeleteOutcome::Deleted
	);
	assert_eq!(
		store
			.delete_owned(PhotoId::new(9), UserId::new(7))
			.await
			.expect("Deleting a missing row should not error."),
		DeleteOutcome::NotPermitted
	);
}

#[tokio::test]
async fn concurrent_conditional_updates_admit_a_single_winner() {
	let store = MemoryStore::default();
	let created = macros::datetime!(2025-03-01 08:00 UTC);
	let link = SocialLinkRecord::new(
		SocialLinkId::new(1),
		UserId::new(7),
		SocialLinkPatch { name: "mastodon".into(), url: "https://soc.example/@ada".into() },
		created,
	);

	store.insert(link.clone()).await.expect("Inserting the link fixture should succeed.");

	let marker_at_load = link.marker;
	let store_a = store.clone();
	let store_b = store.clone();
	let task_a = tokio::spawn(async move {
		store_a
			.update_guarded(
				SocialLinkId::new(1),
				marker_at_load,
				SocialLinkPatch { name: "writer-a".into(), url: "https://soc.example/a".into() },
				created + Duration::seconds(1),
			)
			.await
			.expect("Writer A's task should complete.")
	});
	let task_b = tokio::spawn(async move {
		store_b
			.update_guarded(
				SocialLinkId::new(1),
				marker_at_load,
				SocialLinkPatch { name: "writer-b".into(), url: "https://soc.example/b".into() },
				created + Duration::seconds(2),
			)
			.await
			.expect("Writer B's task should complete.")
	});
	let (outcome_a, outcome_b) = tokio::join!(task_a, task_b);
	let outcomes = [
		outcome_a.expect("Writer A's task should not panic."),
		outcome_b.expect("Writer B's task should not panic."),
	];
	let winners = outcomes
		.iter()
		.filter(|outcome| matches!(outcome, ConditionalOutcome::Updated(_)))
		.count();

	assert_eq!(winners, 1, "only one conditional update may match the loaded marker");

	let surviving = store
		.fetch(SocialLinkId::new(1))
		.await
		.expect("Fetching the final row should succeed.")
		.expect("The final row should remain present.");

	assert!(matches!(surviving.name.as_str(), "writer-a" | "writer-b"));
}
