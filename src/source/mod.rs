//! Where raw log text comes from.
//!
//! A [`LogSource`] hands the parser one [`SourceBlob`] per log object or
//! file. Sources own every I/O failure; the parser and aggregator only
//! ever see text.

pub mod http;
pub mod local;

pub use http::{parse_list_page, HttpObjectSource, ListPage};
pub use local::LocalDirSource;

use crate::utils::config::REPORT_DATE_FORMAT;
use crate::utils::error::SourceError;
use chrono::{DateTime, NaiveDate};

/// Raw contents of one log object or file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlob {
    /// Object key or file name, for diagnostics
    pub name: String,

    /// Log text, line-feed delimited
    pub contents: String,
}

impl SourceBlob {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Anything that can supply access-log text
pub trait LogSource {
    /// Short human-readable description (used in log output)
    fn describe(&self) -> String;

    /// Fetch every blob this source covers
    fn fetch_blobs(&self) -> Result<Vec<SourceBlob>, SourceError>;
}

/// In-memory source, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    blobs: Vec<SourceBlob>,
}

impl MemorySource {
    pub fn new(blobs: Vec<SourceBlob>) -> Self {
        Self { blobs }
    }

    pub fn push(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.blobs.push(SourceBlob::new(name, contents));
    }
}

impl LogSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory blob(s)", self.blobs.len())
    }

    fn fetch_blobs(&self) -> Result<Vec<SourceBlob>, SourceError> {
        Ok(self.blobs.clone())
    }
}

/// Build the object-key prefix for a run
///
/// **Public** - S3 log object keys start with the target prefix followed by
/// the delivery date, so a date narrows the listing to one day
///
/// # Arguments
/// * `prefix` - Configured log key prefix (may be empty)
/// * `date` - Optional date as `YYYY-MM-DD` or RFC 3339
///
/// # Errors
/// * `SourceError::InvalidDate` - `date` is in neither format
pub fn build_prefix(prefix: &str, date: Option<&str>) -> Result<String, SourceError> {
    let Some(date) = date else {
        return Ok(prefix.to_string());
    };

    let day = NaiveDate::parse_from_str(date, REPORT_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(date).map(|dt| dt.date_naive()))
        .map_err(|_| SourceError::InvalidDate(date.to_string()))?;

    Ok(format!("{}{}", prefix, day.format(REPORT_DATE_FORMAT)))
}
