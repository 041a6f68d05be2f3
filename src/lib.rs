//! Concurrency-safe core for a content-sharing backend—stateless bearer credentials,
//! per-identity admission control, and conflict-detecting resource stores in one crate built for
//! production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod admission;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod obs;
pub mod resource;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		admission::AdmissionController,
		auth::CredentialService,
		config::CoreConfig,
		guard::Guarded,
		resource::Owned,
		store::MemoryStore,
	};

	/// Builds a configuration fixture with the provided secret and deployment defaults.
	pub fn test_config(secret: &str) -> CoreConfig {
		CoreConfig::builder()
			.secret(secret)
			.build()
			.expect("Test configuration should be valid.")
	}

	/// Constructs the credential service + admission controller pair used across integration
	/// tests.
	pub fn build_test_core(secret: &str) -> (CredentialService, AdmissionController) {
		let config = test_config(secret);
		let credentials = CredentialService::new(&config.credential);
		let admission = AdmissionController::new(config.admission);

		(credentials, admission)
	}

	/// Wraps a fresh in-memory store for one resource kind in the guarded mutation protocol.
	pub fn guarded_memory<R>() -> (Guarded<MemoryStore<R>>, Arc<MemoryStore<R>>)
	where
		R: Owned,
	{
		let store = Arc::new(MemoryStore::default());

		(Guarded::new(store.clone()), store)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::Hash,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}
