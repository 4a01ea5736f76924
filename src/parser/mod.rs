//! Access-log parsing.
//!
//! This module handles:
//! - Splitting raw log text into lines
//! - Dropping lines that contain the exclusion substring
//! - Matching each line against the S3 server access-log grammar
//! - Reading dates and numeric fields out of matched records

pub mod access_log;
pub mod record;

// Re-export main types
pub use access_log::{parse_line, process_logs, should_exclude, split_into_lines, ProcessedLogs};
pub use record::{extract_date, LogRecord};
