//! Diagnostic side-channel for the parser and aggregator.
//!
//! The core never prints. Everything worth telling a user (skipped lines,
//! GET requests without a key, unreadable timestamps) goes through a
//! [`Reporter`], which the caller injects. Reporters observe; they never
//! influence the aggregated result.

use super::error::MalformedTimestamp;
use crate::parser::LogRecord;
use log::{debug, log, warn, Level};

/// Receiver for per-line and per-record diagnostics
///
/// All methods default to doing nothing, so implementors only
/// override the events they care about.
pub trait Reporter {
    /// A raw line contained the exclusion substring and was dropped
    fn excluded_line(&mut self, _line: &str) {}

    /// A raw line did not match the access-log grammar
    fn unmatched_line(&mut self, _line: &str) {}

    /// A GET record had no object key and was left out of per-key totals
    fn missing_key(&mut self, _record: &LogRecord) {}

    /// A GET record's timestamp could not be turned into a date
    fn malformed_timestamp(&mut self, _record: &LogRecord, _error: &MalformedTimestamp) {}

    /// A GET record was counted as a download of `key`
    fn object_download(&mut self, _key: &str, _record: &LogRecord) {}
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter backed by the `log` facade
///
/// Warnings are always emitted at warn level. Per-record chatter goes to
/// debug level, or to info level when `verbose` is set (`debug_mode`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter {
    verbose: bool,
}

impl LogReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn chatter_level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl Reporter for LogReporter {
    fn excluded_line(&mut self, line: &str) {
        warn!("Skipping excluded row: {}", line);
    }

    fn unmatched_line(&mut self, line: &str) {
        // The empty segment after a trailing newline is expected
        if !line.is_empty() {
            debug!("Line does not match access log format: {}", line);
        }
    }

    fn missing_key(&mut self, record: &LogRecord) {
        warn!(
            "Missing key in log line; skipping (request id {}, time {})",
            record.request_id, record.time
        );
    }

    fn malformed_timestamp(&mut self, record: &LogRecord, error: &MalformedTimestamp) {
        warn!("{} (key {}, request id {})", error, record.key, record.request_id);
    }

    fn object_download(&mut self, key: &str, record: &LogRecord) {
        log!(
            self.chatter_level(),
            "Object download: {} bytes from {} ({} ms)",
            record.bytes_sent,
            key,
            record.total_time
        );
    }
}
