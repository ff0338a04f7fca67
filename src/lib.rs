//! drift-checker - Terraform drift detection for EC2
//!
//! A library for comparing live EC2 instances against their Terraform state
//! and reporting per-field drift.

pub mod engine;
pub mod output;
pub mod providers;
pub mod report;
pub mod resource;
pub mod terraform;

mod error;

pub use engine::{CancellationSignal, DriftResult, FieldDiff, FieldFilter, FieldValue, compare_all};
pub use error::DriftError;
pub use providers::aws::{AwsError, AwsProvider, Ec2Client};
pub use providers::{Provider, ProviderError};
pub use report::{ReportMode, render, render_summary};
pub use resource::{BlockDeviceMapping, FetchConfig, Resource};
pub use terraform::{StateError, TerraformState};
