//! Social-media link rows and their conditional-update payloads.

// self
use crate::{
	_prelude::*,
	auth::{SocialLinkId, UserId},
	resource::{Owned, VersionMarker, Versioned},
};

/// Stored social-media link row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinkRecord {
	/// Row identifier assigned by the storage collaborator.
	pub id: SocialLinkId,
	/// Immutable owner.
	pub owner: UserId,
	/// Display name of the linked profile.
	pub name: String,
	/// Profile URL.
	pub url: String,
	/// Creation instant.
	pub created_at: OffsetDateTime,
	/// Last-modification marker consumed by conditional updates.
	pub marker: VersionMarker,
}
impl SocialLinkRecord {
	/// Creates a freshly-persisted row whose marker equals its creation instant.
	pub fn new(
		id: SocialLinkId,
		owner: UserId,
		fields: SocialLinkPatch,
		instant: OffsetDateTime,
	) -> Self {
		Self {
			id,
			owner,
			name: fields.name,
			url: fields.url,
			created_at: instant,
			marker: VersionMarker::new(instant),
		}
	}
}
impl Owned for SocialLinkRecord {
	const KIND: &'static str = "social_link";

	type Id = SocialLinkId;

	fn id(&self) -> SocialLinkId {
		self.id
	}

	fn owner(&self) -> UserId {
		self.owner
	}
}
impl Versioned for SocialLinkRecord {
	type Patch = SocialLinkPatch;

	fn marker(&self) -> VersionMarker {
		self.marker
	}

	fn apply(&mut self, patch: SocialLinkPatch, instant: OffsetDateTime) {
		self.name = patch.name;
		self.url = patch.url;
		self.marker = VersionMarker::new(instant);
	}
}

/// Mutable social-media link fields replaced by an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinkPatch {
	/// New display name.
	pub name: String,
	/// New profile URL.
	pub url: String,
}
