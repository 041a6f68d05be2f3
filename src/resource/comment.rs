//! Comment rows and their conditional-update payloads.

// self
use crate::{
	_prelude::*,
	auth::{CommentId, PhotoId, UserId},
	resource::{Owned, VersionMarker, Versioned},
};

/// Stored comment row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
	/// Row identifier assigned by the storage collaborator.
	pub id: CommentId,
	/// Immutable owner.
	pub owner: UserId,
	/// Photo the comment was left on.
	pub photo: PhotoId,
	/// Comment body.
	pub message: String,
	/// Creation instant.
	pub created_at: OffsetDateTime,
	/// Last-modification marker consumed by conditional updates.
	pub marker: VersionMarker,
}
impl CommentRecord {
	/// Creates a freshly-persisted row whose marker equals its creation instant.
	pub fn new(
		id: CommentId,
		owner: UserId,
		photo: PhotoId,
		message: impl Into<String>,
		instant: OffsetDateTime,
	) -> Self {
		Self {
			id,
			owner,
			photo,
			message: message.into(),
			created_at: instant,
			marker: VersionMarker::new(instant),
		}
	}
}
impl Owned for CommentRecord {
	const KIND: &'static str = "comment";

	type Id = CommentId;

	fn id(&self) -> CommentId {
		self.id
	}

	fn owner(&self) -> UserId {
		self.owner
	}
}
impl Versioned for CommentRecord {
	type Patch = CommentPatch;

	fn marker(&self) -> VersionMarker {
		self.marker
	}

	fn apply(&mut self, patch: CommentPatch, instant: OffsetDateTime) {
		self.message = patch.message;
		self.marker = VersionMarker::new(instant);
	}
}

/// Mutable comment fields replaced by an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPatch {
	/// New comment body.
	pub message: String,
}
