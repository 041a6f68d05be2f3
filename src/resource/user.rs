//! User rows and their conditional-update payloads.

// self
use crate::{
	_prelude::*,
	auth::{PasswordHash, UserId},
	resource::{Owned, VersionMarker, Versioned},
};

/// Stored user row.
///
/// A user owns itself: profile updates and account deletion follow the same ownership-guarded
/// paths as every other resource, with the row's own id as the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	/// Row identifier assigned by the storage collaborator.
	pub id: UserId,
	/// Login email, unique per deployment.
	pub email: String,
	/// Public handle.
	pub username: String,
	/// At-rest password digest; never printed.
	pub password_hash: PasswordHash,
	/// Creation instant.
	pub created_at: OffsetDateTime,
	/// Last-modification marker consumed by conditional updates.
	pub marker: VersionMarker,
}
impl UserRecord {
	/// Creates a freshly-persisted row whose marker equals its creation instant.
	pub fn new(
		id: UserId,
		email: impl Into<String>,
		username: impl Into<String>,
		password_hash: PasswordHash,
		instant: OffsetDateTime,
	) -> Self {
		Self {
			id,
			email: email.into(),
			username: username.into(),
			password_hash,
			created_at: instant,
			marker: VersionMarker::new(instant),
		}
	}
}
impl Owned for UserRecord {
	const KIND: &'static str = "user";

	type Id = UserId;

	fn id(&self) -> UserId {
		self.id
	}

	fn owner(&self) -> UserId {
		self.id
	}
}
impl Versioned for UserRecord {
	type Patch = UserPatch;

	fn marker(&self) -> VersionMarker {
		self.marker
	}

	fn apply(&mut self, patch: UserPatch, instant: OffsetDateTime) {
		self.email = patch.email;
		self.username = patch.username;
		self.marker = VersionMarker::new(instant);
	}
}

/// Mutable user profile fields replaced by an update.
///
/// The password digest rotates through a dedicated pipeline path, not through profile updates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
	/// New login email.
	pub email: String,
	/// New public handle.
	pub username: String,
}
