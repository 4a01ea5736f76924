//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// A log line matched the grammar but its timestamp could not be read as a date.
///
/// Scoped to a single record: the aggregator reports it and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed timestamp '{timestamp}': {reason}")]
pub struct MalformedTimestamp {
    /// The raw bracketed timestamp as it appeared in the log line
    pub timestamp: String,

    /// Why the date portion was rejected
    pub reason: String,
}

/// Errors raised while building a [`ParserConfig`](super::config::ParserConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("'{0}' is not a configuration parameter")]
    UnknownKey(String),

    #[error("'{0}' is not supported: remote requests are unsigned, so credentials and region are not used")]
    CredentialsUnsupported(String),

    #[error("Invalid value '{value}' for configuration parameter '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur while fetching raw log text
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0} is not a directory")]
    NotADirectory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Object request to {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("Invalid date '{0}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read report {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Report JSON error: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
