//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod stats;
pub mod utils;

// Re-export main command functions
pub use models::StatsArgs;
pub use stats::{collect_statistics, execute_stats, validate_args};
pub use utils::{display_version, validate_report_file};
