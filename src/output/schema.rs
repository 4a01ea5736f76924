//! Output JSON schema for statistics reports.
//!
//! Shape:
//! `{"success": true, "statistics": {"bucket", "prefix", "data", "httpOperationCounts"}}`

use crate::aggregator::AggregateResult;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub statistics: Statistics,
}

/// Aggregated statistics plus the source metadata they came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Bucket name (remote runs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Full key prefix, including the date when one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(flatten)]
    pub result: AggregateResult,
}

impl StatsResponse {
    /// Wrap a successful run
    pub fn new(result: AggregateResult) -> Self {
        Self {
            success: true,
            statistics: Statistics {
                bucket: None,
                prefix: None,
                result,
            },
        }
    }

    /// Attach bucket/prefix metadata
    pub fn with_location(mut self, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.statistics.bucket = Some(bucket.into());
        self.statistics.prefix = Some(prefix.into());
        self
    }
}
