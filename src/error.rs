//! Core-wide error taxonomy shared across credentials, admission, and guarded mutations.

// self
use crate::_prelude::*;

/// Core-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical core error exposed by public APIs.
///
/// The request pipeline translates each variant into one stable response category:
/// [`Error::Auth`] maps to 401, [`Error::Admission`] to 429, [`Error::Conflict`] to 409,
/// [`Error::NotAllowed`] to 403, and [`Error::NotFound`] to 404. [`Error::Storage`] is the only
/// category that warrants operational alerting; every other variant is a routine outcome of
/// concurrent multi-writer operation and must not be logged above warning.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential issuance or verification failure.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Admission controller rejected the request.
	#[error(transparent)]
	Admission(#[from] AdmissionError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::config::ConfigError),
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),

	/// A conditional update matched zero rows: a concurrent writer advanced the version marker
	/// first. Callers must re-read and retry; the core never retries on its own.
	#[error("{resource} {id} was modified concurrently; re-read and retry.")]
	Conflict {
		/// Stable resource-kind label.
		resource: &'static str,
		/// Raw row identifier of the contested resource.
		id: u64,
	},
	/// Caller does not own the resource, or (for delete) the row vanished concurrently. The two
	/// cases are indistinguishable and surfaced uniformly so the existence of another user's
	/// resource is never leaked.
	#[error("Caller is not permitted to modify {resource} {id}.")]
	NotAllowed {
		/// Stable resource-kind label.
		resource: &'static str,
		/// Raw row identifier of the guarded resource.
		id: u64,
	},
	/// Resource id does not exist at read time.
	#[error("{resource} {id} does not exist.")]
	NotFound {
		/// Stable resource-kind label.
		resource: &'static str,
		/// Raw row identifier that missed.
		id: u64,
	},
}

/// Credential failures raised by the credential service.
///
/// Callers must treat every verification failure identically as "unauthenticated"; the split
/// exists for diagnostics only and never changes the response category.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Credential could not be parsed, presented a disallowed signing algorithm, or its
	/// signature did not validate against the configured secret.
	#[error("Credential is malformed or its signature is invalid.")]
	Malformed {
		/// Underlying decoder failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Credential expiry has passed.
	#[error("Credential has expired.")]
	Expired,
	/// Credential could not be signed during issuance.
	#[error("Credential could not be signed.")]
	Signing {
		/// Underlying encoder failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

/// Admission failures raised by the admission controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum AdmissionError {
	/// The identity's bucket holds no whole token; the request must not proceed. Reported to the
	/// caller as a "too many requests" condition, never retried internally, never escalated.
	#[error("Too many requests for this identity.")]
	RateLimited,
}
