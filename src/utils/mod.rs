//! Utility modules for configuration, error handling, and diagnostics.

pub mod config;
pub mod error;
pub mod reporter;

// Re-export commonly used types for convenience
pub use config::ParserConfig;
pub use error::{ConfigError, MalformedTimestamp, OutputError, SourceError};
pub use reporter::{LogReporter, NullReporter, Reporter};
