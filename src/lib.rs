//! S3 Log Stats
//!
//! Per-object download statistics from Amazon S3 server access logs.
//!
//! The core is a line parser ([`parser`]) and a statistics aggregator
//! ([`aggregator`]). Both work on plain text and never touch the
//! filesystem or network; [`source`] and [`commands`] handle that.
//!
//! ## Getting Started
//!
//! ```bash
//! s3-log-stats stats --local-dir ./logs
//! s3-log-stats --help
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use s3_log_stats::aggregator::aggregate;
//! use s3_log_stats::parser::process_logs;
//! use s3_log_stats::utils::NullReporter;
//!
//! let processed = process_logs(&text, None, &mut NullReporter);
//! let stats = aggregate(&processed.records);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod source;
pub mod utils;
