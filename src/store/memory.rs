//! Thread-safe in-memory store implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::UserId,
	resource::{Owned, VersionMarker, Versioned},
	store::{
		ConditionalOutcome, DeleteOutcome, ResourceStore, StoreError, StoreFuture, VersionedStore,
	},
};

type Rows<R> = Arc<RwLock<HashMap<<R as Owned>::Id, R>>>;

/// Thread-safe storage backend that keeps rows in-process.
///
/// Conditional operations hold the write lock for the whole check-and-replace step, which is
/// what makes them atomic with respect to concurrent writers; a SQL backend provides the same
/// guarantee through its conditional `UPDATE ... WHERE` row locking.
#[derive(Debug)]
pub struct MemoryStore<R>
where
	R: Owned,
{
	rows: Rows<R>,
}
impl<R> MemoryStore<R>
where
	R: Owned,
{
	/// Number of live rows.
	pub fn len(&self) -> usize {
		self.rows.read().len()
	}

	/// Returns `true` while no rows are stored.
	pub fn is_empty(&self) -> bool {
		self.rows.read().is_empty()
	}

	fn insert_now(rows: Rows<R>, record: R) -> Result<R, StoreError> {
		let mut guard = rows.write();

		if guard.contains_key(&record.id()) {
			return Err(StoreError::Backend {
				message: format!("duplicate {} id {:?}", R::KIND, record.id()),
			});
		}

		guard.insert(record.id(), record.clone());

		Ok(record)
	}

	fn fetch_now(rows: Rows<R>, id: R::Id) -> Option<R> {
		rows.read().get(&id).cloned()
	}

	fn delete_now(rows: Rows<R>, id: R::Id, owner: UserId) -> DeleteOutcome {
		let mut guard = rows.write();
		let owned = guard.get(&id).is_some_and(|row| row.owner() == owner);

		if owned {
			guard.remove(&id);

			DeleteOutcome::Deleted
		} else {
			DeleteOutcome::NotPermitted
		}
	}
}
impl<R> MemoryStore<R>
where
	R: Versioned,
{
	fn update_now(
		rows: Rows<R>,
		id: R::Id,
		expected: VersionMarker,
		patch: R::Patch,
		instant: OffsetDateTime,
	) -> ConditionalOutcome<R> {
		let mut guard = rows.write();

		match guard.get_mut(&id) {
			Some(row) if row.marker() == expected => {
				row.apply(patch, instant);

				ConditionalOutcome::Updated(row.clone())
			},
			Some(_) => ConditionalOutcome::Stale,
			None => ConditionalOutcome::Missing,
		}
	}
}
impl<R> Clone for MemoryStore<R>
where
	R: Owned,
{
	fn clone(&self) -> Self {
		Self { rows: self.rows.clone() }
	}
}
impl<R> Default for MemoryStore<R>
where
	R: Owned,
{
	fn default() -> Self {
		Self { rows: Rows::<R>::default() }
	}
}
impl<R> ResourceStore<R> for MemoryStore<R>
where
	R: Owned,
{
	fn insert(&self, record: R) -> StoreFuture<'_, R> {
		let rows = self.rows.clone();

		Box::pin(async move { Self::insert_now(rows, record) })
	}

	fn fetch(&self, id: R::Id) -> StoreFuture<'_, Option<R>> {
		let rows = self.rows.clone();

		Box::pin(async move { Ok(Self::fetch_now(rows, id)) })
	}

	fn delete_owned(&self, id: R::Id, owner: UserId) -> StoreFuture<'_, DeleteOutcome> {
		let rows = self.rows.clone();

		Box::pin(async move { Ok(Self::delete_now(rows, id, owner)) })
	}
}
impl<R> VersionedStore<R> for MemoryStore<R>
where
	R: Versioned,
{
	fn update_guarded(
		&self,
		id: R::Id,
		expected: VersionMarker,
		patch: R::Patch,
		instant: OffsetDateTime,
	) -> StoreFuture<'_, ConditionalOutcome<R>> {
		let rows = self.rows.clone();

		Box::pin(async move { Ok(Self::update_now(rows, id, expected, patch, instant)) })
	}
}
