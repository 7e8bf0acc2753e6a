//! Report persistence - writes reports to and reads them back from JSON files.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::TrafficError;
use crate::models::Report;

/// File name for a report taken at `now`:
/// `github_traffic_{owner}_{repo}_{YYYYMMDD_HHMMSS}.json`.
pub fn report_file_name(owner: &str, repo: &str, now: DateTime<Local>) -> String {
    format!(
        "github_traffic_{}_{}_{}.json",
        owner,
        repo,
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Saves the report as 2-space indented JSON into `dir`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(TrafficError)` - Error if the file cannot be serialized or written
pub fn save_report(
    report: &Report,
    dir: &Path,
    owner: &str,
    repo: &str,
    now: DateTime<Local>,
) -> Result<PathBuf, TrafficError> {
    let path = dir.join(report_file_name(owner, repo, now));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, &json)?;
    debug!("Wrote {} bytes to {:?}", json.len(), path);
    Ok(path)
}

/// Loads a report previously written by [`save_report`].
///
/// # Errors
///
/// Returns `TrafficError::Io` if the file cannot be read.
/// Returns `TrafficError::JsonParse` if the JSON is malformed.
pub fn load_report(path: &Path) -> Result<Report, TrafficError> {
    let content = fs::read_to_string(path)?;
    let report: Report = serde_json::from_str(&content)?;
    Ok(report)
}
