//! Per-key running totals and the aggregate result.
//!
//! Everything here merges point-wise: counters add, date sets union.
//! That makes merging associative and commutative, so per-source results
//! can be combined in any order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Operation token -> number of matched records
pub type OperationCounts = BTreeMap<String, u64>;

/// Download statistics for one object key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStatistics {
    /// Number of GET requests for the key
    pub downloads: u64,

    /// Sum of bytes sent
    pub bandwidth: u64,

    /// Sum of total request time, in milliseconds
    pub totaltime: u64,

    /// `totaltime` expressed in minutes
    #[serde(rename = "totalRequestTimeInMinutes")]
    pub total_request_time_in_minutes: f64,

    /// Distinct access dates (`YYYY-MM-DD`)
    pub dates: BTreeSet<String>,
}

impl KeyStatistics {
    /// Count one download
    ///
    /// Missing byte or time values contribute zero.
    pub fn record_download(
        &mut self,
        bytes_sent: Option<u64>,
        total_time_ms: Option<u64>,
        date: Option<String>,
    ) {
        self.downloads = self.downloads.saturating_add(1);

        if let Some(date) = date {
            self.dates.insert(date);
        }

        if let Some(bytes) = bytes_sent {
            self.bandwidth = self.bandwidth.saturating_add(bytes);
        }

        if let Some(ms) = total_time_ms {
            self.totaltime = self.totaltime.saturating_add(ms);
            self.refresh_minutes();
        }
    }

    /// Fold another key's totals into this one
    pub fn merge(&mut self, other: &KeyStatistics) {
        self.downloads = self.downloads.saturating_add(other.downloads);
        self.bandwidth = self.bandwidth.saturating_add(other.bandwidth);
        self.totaltime = self.totaltime.saturating_add(other.totaltime);
        self.dates.extend(other.dates.iter().cloned());
        self.refresh_minutes();
    }

    // Minutes derive from the integer millisecond sum so the float never
    // depends on accumulation order.
    fn refresh_minutes(&mut self) {
        self.total_request_time_in_minutes = self.totaltime as f64 / 1000.0 / 60.0;
    }
}

/// Output of one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Object key -> download statistics
    pub data: BTreeMap<String, KeyStatistics>,

    /// Operation token -> record count
    #[serde(rename = "httpOperationCounts")]
    pub http_operation_counts: OperationCounts,
}

impl AggregateResult {
    /// Statistics for a single key, if it was downloaded at all
    pub fn key(&self, key: &str) -> Option<&KeyStatistics> {
        self.data.get(key)
    }

    /// Count recorded for an operation token (zero if never seen)
    pub fn operation_count(&self, operation: &str) -> u64 {
        self.http_operation_counts.get(operation).copied().unwrap_or(0)
    }

    /// Total downloads across all keys
    pub fn total_downloads(&self) -> u64 {
        self.data.values().fold(0, |acc, s| acc.saturating_add(s.downloads))
    }

    /// Total bytes sent across all keys
    pub fn total_bandwidth(&self) -> u64 {
        self.data.values().fold(0, |acc, s| acc.saturating_add(s.bandwidth))
    }

    /// Fold another result into this one
    ///
    /// **Public** - combines per-source results; equivalent to having
    /// aggregated the concatenated record streams in a single pass
    pub fn merge(&mut self, other: &AggregateResult) {
        for (key, stats) in &other.data {
            self.data.entry(key.clone()).or_default().merge(stats);
        }

        for (operation, count) in &other.http_operation_counts {
            let total = self.http_operation_counts.entry(operation.clone()).or_insert(0);
            *total = total.saturating_add(*count);
        }
    }

    /// Consuming variant of [`AggregateResult::merge`]
    pub fn merged(mut self, other: &AggregateResult) -> Self {
        self.merge(other);
        self
    }
}
