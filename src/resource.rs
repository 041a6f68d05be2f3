//! Versioned resource records shared with the storage collaborator.

pub mod comment;
pub mod like;
pub mod photo;
pub mod social;
pub mod user;

pub use comment::*;
pub use like::*;
pub use photo::*;
pub use social::*;
pub use user::*;

// self
use crate::{_prelude::*, auth::UserId};

/// Timestamp used as the optimistic-concurrency compare-and-swap token.
///
/// Markers compare exactly: a conditional update succeeds only while the stored marker still
/// equals the one the caller read, and every successful update advances the marker in the same
/// atomic step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionMarker(OffsetDateTime);
impl VersionMarker {
	/// Wraps a last-modification instant.
	pub const fn new(instant: OffsetDateTime) -> Self {
		Self(instant)
	}

	/// Returns the underlying instant.
	pub const fn instant(self) -> OffsetDateTime {
		self.0
	}
}
impl Display for VersionMarker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// Resource owned by a user and addressable by a typed row identifier.
pub trait Owned
where
	Self: 'static + Clone + Send + Sync,
{
	/// Stable resource-kind label used in error payloads and observability fields.
	const KIND: &'static str;

	/// Typed row identifier.
	type Id: 'static + Copy + Eq + Hash + Into<u64> + Debug + Send + Sync;

	/// Row identifier.
	fn id(&self) -> Self::Id;

	/// Owner recorded at creation time; immutable for the lifetime of the row, which is what
	/// makes read-time ownership checks race-free.
	fn owner(&self) -> UserId;
}

/// Mutable resource protected by the optimistic-concurrency protocol.
pub trait Versioned
where
	Self: Owned,
{
	/// Partial payload applied by a conditional update.
	type Patch: 'static + Clone + Debug + Send + Sync;

	/// Current version marker (last-modification timestamp).
	fn marker(&self) -> VersionMarker;

	/// Applies the patch and advances the marker to the instant.
	///
	/// Storage backends call this inside their row-level atomicity guarantee; the record itself
	/// carries no locking.
	fn apply(&mut self, patch: Self::Patch, instant: OffsetDateTime);
}
