//! Output writers for statistics reports.
//!
//! This module handles:
//! - The JSON response schema
//! - Writing reports to disk (pretty JSON)
//! - Reading reports back for validation

pub mod json;
pub mod schema;

// Re-export main functions
pub use json::{read_report, report_to_string, validate_path, write_report};
pub use schema::{Statistics, StatsResponse};
