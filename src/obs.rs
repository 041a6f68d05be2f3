//! Optional observability helpers for core operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `gallery_core.op` with the `op` (operation)
//!   and `stage` (call site or resource kind) fields.
//! - Enable `metrics` to increment the `gallery_core_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.
//!
//! Routine rejections (rate limit, conflict, ownership) surface as `failure` outcomes here but
//! must never be logged above warning by hosts; they are expected products of concurrent
//! operation.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Core operations observed by spans and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Token-bucket admission checks.
	Admission,
	/// Version-guarded conditional updates.
	Update,
	/// Owner-guarded conditional deletes.
	Delete,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Admission => "admission",
			OpKind::Update => "update",
			OpKind::Delete => "delete",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a core operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
