//! Like rows.
//!
//! Likes are created and deleted but never edited, so they participate in the owner-guarded
//! delete path without carrying a version marker.

// self
use crate::{
	_prelude::*,
	auth::{LikeId, PhotoId, UserId},
	resource::Owned,
};

/// Stored like row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
	/// Row identifier assigned by the storage collaborator.
	pub id: LikeId,
	/// Immutable owner.
	pub owner: UserId,
	/// Photo the like applies to.
	pub photo: PhotoId,
	/// Creation instant.
	pub created_at: OffsetDateTime,
}
impl LikeRecord {
	/// Creates a freshly-persisted row.
	pub fn new(id: LikeId, owner: UserId, photo: PhotoId, instant: OffsetDateTime) -> Self {
		Self { id, owner, photo, created_at: instant }
	}
}
impl Owned for LikeRecord {
	const KIND: &'static str = "like";

	type Id = LikeId;

	fn id(&self) -> LikeId {
		self.id
	}

	fn owner(&self) -> UserId {
		self.owner
	}
}
