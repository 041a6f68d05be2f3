//! Ownership- and version-guarded mutation paths over a storage collaborator.
//!
//! Every mutable-resource handler funnels through [`Guarded`], which applies one protocol
//! uniformly: read the current row, authorize the caller as owner, then hand the storage
//! collaborator a conditional write keyed by the marker obtained in the read. Zero matched rows
//! means a concurrent writer won and the caller must re-read and retry; the guard itself never
//! retries. Deletes skip the read and rely on a conditional statement keyed by id + owner
//! instead, which deliberately folds "missing" and "not the owner" into one answer.

// self
use crate::{
	_prelude::*,
	auth::UserId,
	obs::{self, OpKind, OpOutcome, OpSpan},
	resource::{Owned, Versioned},
	store::{ConditionalOutcome, DeleteOutcome, ResourceStore, VersionedStore},
};

/// Applies the optimistic-concurrency protocol over a storage collaborator.
pub struct Guarded<S>
where
	S: ?Sized,
{
	store: Arc<S>,
}
impl<S> Clone for Guarded<S>
where
	S: ?Sized,
{
	fn clone(&self) -> Self {
		Self { store: self.store.clone() }
	}
}
impl<S> Debug for Guarded<S>
where
	S: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Guarded(..)")
	}
}
impl<S> Guarded<S>
where
	S: ?Sized,
{
	/// Wraps the storage collaborator.
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	/// Shared handle to the underlying store.
	pub fn store(&self) -> &Arc<S> {
		&self.store
	}

	/// Persists a new row.
	pub async fn create<R>(&self, record: R) -> Result<R>
	where
		S: ResourceStore<R>,
		R: Owned,
	{
		Ok(self.store.insert(record).await?)
	}

	/// Fetches a row, mapping absence to [`Error::NotFound`].
	pub async fn fetch<R>(&self, id: R::Id) -> Result<R>
	where
		S: ResourceStore<R>,
		R: Owned,
	{
		self.store
			.fetch(id)
			.await?
			.ok_or_else(|| Error::NotFound { resource: R::KIND, id: id.into() })
	}

	/// Updates a row under the optimistic-concurrency protocol, stamping the given instant as
	/// the new version marker on success.
	pub async fn update_at<R>(
		&self,
		caller: UserId,
		id: R::Id,
		patch: R::Patch,
		instant: OffsetDateTime,
	) -> Result<R>
	where
		S: VersionedStore<R>,
		R: Versioned,
	{
		const KIND: OpKind = OpKind::Update;

		let span = OpSpan::new(KIND, R::KIND);

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let current = self
					.store
					.fetch(id)
					.await?
					.ok_or_else(|| Error::NotFound { resource: R::KIND, id: id.into() })?;

				// Owner id is immutable, so this read-time comparison cannot race.
				if current.owner() != caller {
					return Err(Error::NotAllowed { resource: R::KIND, id: id.into() });
				}

				match self.store.update_guarded(id, current.marker(), patch, instant).await? {
					ConditionalOutcome::Updated(row) => Ok(row),
					// Zero matched rows: the marker moved (or the row vanished) between our
					// read and the conditional write. Either way a concurrent writer won.
					ConditionalOutcome::Stale | ConditionalOutcome::Missing =>
						Err(Error::Conflict { resource: R::KIND, id: id.into() }),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	/// Updates a row against the current clock.
	pub async fn update<R>(&self, caller: UserId, id: R::Id, patch: R::Patch) -> Result<R>
	where
		S: VersionedStore<R>,
		R: Versioned,
	{
		self.update_at(caller, id, patch, OffsetDateTime::now_utc()).await
	}

	/// Deletes a row owned by the caller.
	///
	/// Missing rows and non-owner callers are indistinguishable by design, so the existence of
	/// another user's resource is never leaked; both surface as [`Error::NotAllowed`].
	pub async fn delete<R>(&self, caller: UserId, id: R::Id) -> Result<()>
	where
		S: ResourceStore<R>,
		R: Owned,
	{
		const KIND: OpKind = OpKind::Delete;

		let span = OpSpan::new(KIND, R::KIND);

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				match self.store.delete_owned(id, caller).await? {
					DeleteOutcome::Deleted => Ok(()),
					DeleteOutcome::NotPermitted =>
						Err(Error::NotAllowed { resource: R::KIND, id: id.into() }),
				}
			})
			.await;

		match &result {
			Ok(()) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}
}
