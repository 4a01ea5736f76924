//! JSON rendering of statistics reports.
//!
//! Stdout gets compact JSON, files get pretty JSON; both go through
//! [`render`] so the two can never disagree on shape.

use super::schema::StatsResponse;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Serialize a report to a compact JSON string
///
/// **Public** - used when printing to stdout
pub fn report_to_string(report: &StatsResponse) -> Result<String, OutputError> {
    render(report, false)
}

/// Write a report as pretty JSON, creating parent directories
///
/// **Public** - used by the stats command for `--output`
///
/// # Returns
/// Number of bytes written
pub fn write_report(report: &StatsResponse, path: impl AsRef<Path>) -> Result<usize, OutputError> {
    let path = path.as_ref();
    validate_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = render(report, true)?;
    fs::write(path, &json)?;

    info!(
        "Wrote {} keys for {} to {} ({} bytes)",
        report.statistics.result.data.len(),
        describe_location(report),
        path.display(),
        json.len()
    );

    Ok(json.len())
}

/// Reject paths a report can never be written to
///
/// **Public** - the stats command checks this before fetching anything
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    let reason = if path.as_os_str().is_empty() {
        "path is empty"
    } else if path.is_dir() {
        "path is a directory"
    } else {
        return Ok(());
    };

    Err(OutputError::InvalidPath(format!("{} ({})", path.display(), reason)))
}

/// Load a report written by [`write_report`]
///
/// # Errors
/// * `OutputError::ReadFailed` - the file cannot be read
/// * `OutputError::SerializationFailed` - not a statistics report
pub fn read_report(path: impl AsRef<Path>) -> Result<StatsResponse, OutputError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| OutputError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let report: StatsResponse = serde_json::from_str(&json)?;
    debug!(
        "Loaded report for {} from {}",
        describe_location(&report),
        path.display()
    );

    Ok(report)
}

fn render(report: &StatsResponse, pretty: bool) -> Result<String, OutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

fn describe_location(report: &StatsResponse) -> String {
    match (&report.statistics.bucket, &report.statistics.prefix) {
        (Some(bucket), Some(prefix)) => format!("{}/{}", bucket, prefix),
        (Some(bucket), None) => bucket.clone(),
        _ => "local logs".to_string(),
    }
}
