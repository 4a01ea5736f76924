//! Aggregation of parsed access-log records into download statistics.
//!
//! This module transforms parsed records into:
//! - Per-key running totals (downloads, bandwidth, request time, dates)
//! - Per-operation request counts
//! - Merged results across several log sources

pub mod builder;
pub mod key_stats;

// Re-export main types and functions
pub use builder::{aggregate, Aggregator, OperationScope};
pub use key_stats::{AggregateResult, KeyStatistics, OperationCounts};
