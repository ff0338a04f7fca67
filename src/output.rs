use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::engine::DriftResult;
use crate::error::DriftError;
use crate::report::{ReportMode, render};

pub const DEFAULT_OUTPUT_DIR: &str = "results";

pub fn report_file_name(instance_id: &str, timestamp: i64) -> String {
    format!("drift_{instance_id}_{timestamp}.json")
}

/// Persists the structured report for one result under `dir`.
pub fn write_json_report(dir: &Path, result: &DriftResult) -> Result<PathBuf, DriftError> {
    fs::create_dir_all(dir)?;

    let path = dir.join(report_file_name(
        result.instance_id(),
        Utc::now().timestamp(),
    ));
    let mut body = render(result, ReportMode::Structured)?;
    body.push('\n');
    fs::write(&path, body)?;

    tracing::debug!(path = %path.display(), "drift report written");
    Ok(path)
}
