//! Storage collaborator contracts for owned and versioned resources.
//!
//! The core holds no in-process lock over resource rows. Correctness under concurrent writers
//! rests entirely on the backend's conditional-write primitive: an update or delete whose
//! predicate still matches must be atomic with respect to other writers, and the affected-row
//! outcome is the only signal the protocol consumes.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::UserId,
	resource::{Owned, VersionMarker, Versioned},
};

/// Boxed future returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Point-lookup, insert, and owner-guarded delete contract for one resource kind.
pub trait ResourceStore<R>
where
	Self: Send + Sync,
	R: Owned,
{
	/// Persists a new row.
	fn insert(&self, record: R) -> StoreFuture<'_, R>;

	/// Fetches the row with the provided id, if present.
	fn fetch(&self, id: R::Id) -> StoreFuture<'_, Option<R>>;

	/// Deletes the row only while both the id and the owner still match.
	///
	/// Zero affected rows means the row is missing or owned by someone else; backends cannot and
	/// do not distinguish the two cases.
	fn delete_owned(&self, id: R::Id, owner: UserId) -> StoreFuture<'_, DeleteOutcome>;
}

/// Conditional-update contract layered on top of [`ResourceStore`].
pub trait VersionedStore<R>
where
	Self: ResourceStore<R>,
	R: Versioned,
{
	/// Applies the patch only while the stored marker still equals `expected`, advancing the
	/// marker to `instant` in the same atomic step and returning the fresh row.
	fn update_guarded(
		&self,
		id: R::Id,
		expected: VersionMarker,
		patch: R::Patch,
		instant: OffsetDateTime,
	) -> StoreFuture<'_, ConditionalOutcome<R>>;
}

/// Result of a version-guarded conditional update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionalOutcome<R> {
	/// The marker matched; the returned row carries the advanced marker.
	Updated(R),
	/// The row exists but its marker moved since the caller's read.
	Stale,
	/// No row matched the id.
	Missing,
}

/// Result of an owner-guarded conditional delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
	/// Exactly one row matched the id + owner predicate and was removed.
	Deleted,
	/// Zero rows matched: missing row or non-owner caller.
	NotPermitted,
}

/// Error type produced by store implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
