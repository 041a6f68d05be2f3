//! Photo rows and their conditional-update payloads.

// self
use crate::{
	_prelude::*,
	auth::{PhotoId, UserId},
	resource::{Owned, VersionMarker, Versioned},
};

/// Stored photo row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
	/// Row identifier assigned by the storage collaborator.
	pub id: PhotoId,
	/// Immutable owner.
	pub owner: UserId,
	/// Display title.
	pub title: String,
	/// Optional caption.
	pub caption: Option<String>,
	/// Public URL of the stored image.
	pub url: String,
	/// Creation instant.
	pub created_at: OffsetDateTime,
	/// Last-modification marker consumed by conditional updates.
	pub marker: VersionMarker,
}
impl PhotoRecord {
	/// Creates a freshly-persisted row whose marker equals its creation instant.
	pub fn new(id: PhotoId, owner: UserId, fields: PhotoPatch, instant: OffsetDateTime) -> Self {
		Self {
			id,
			owner,
			title: fields.title,
			caption: fields.caption,
			url: fields.url,
			created_at: instant,
			marker: VersionMarker::new(instant),
		}
	}
}
impl Owned for PhotoRecord {
	const KIND: &'static str = "photo";

	type Id = PhotoId;

	fn id(&self) -> PhotoId {
		self.id
	}

	fn owner(&self) -> UserId {
		self.owner
	}
}
impl Versioned for PhotoRecord {
	type Patch = PhotoPatch;

	fn marker(&self) -> VersionMarker {
		self.marker
	}

	fn apply(&mut self, patch: PhotoPatch, instant: OffsetDateTime) {
		self.title = patch.title;
		self.caption = patch.caption;
		self.url = patch.url;
		self.marker = VersionMarker::new(instant);
	}
}

/// Mutable photo fields replaced wholesale by an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPatch {
	/// New title.
	pub title: String,
	/// New caption; `None` clears any existing caption.
	pub caption: Option<String>,
	/// New URL.
	pub url: String,
}
