//! Drift comparison engine.
//!
//! Matches observed instances to their Terraform declarations by id, compares
//! them field by field under a [`FieldFilter`], and fans the work out across a
//! bounded pool of tokio workers.

pub mod attribute;
pub mod cancel;
pub mod compare;
pub mod diff;
pub mod dispatch;
pub mod filter;

pub use cancel::CancellationSignal;
pub use compare::{compare, flatten_block_devices};
pub use diff::{Differences, DriftResult, FieldDiff, FieldValue, MISSING_DECLARED_FIELD};
pub use dispatch::{MAX_WORKERS, compare_all};
pub use filter::{DEFAULT_DRIFT_ATTRIBUTES, FieldFilter, SCHEMA_FIELDS};
