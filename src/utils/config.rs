//! Configuration and constants for the log parser and CLI.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for object downloads over HTTP
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The only operation that feeds per-key download statistics
pub const GET_OBJECT_OPERATION: &str = "REST.GET.OBJECT";

// Date layouts: the access log writes `31/Oct/2018`, reports use `2018-10-31`
pub const LOG_DATE_FORMAT: &str = "%d/%b/%Y";
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Keys accepted by [`ParserConfig::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "debug_mode",
    "local_log_dir",
    "exclude_lines_with_substring",
    "endpoint",
];

/// AWS client settings older configs carry; rejected with an explicit reason
pub const CREDENTIAL_KEYS: &[&str] = &["version", "region", "access_key", "secret_key"];

/// Run-time configuration for a statistics run
///
/// Unknown keys are rejected, both when loading from JSON and when
/// setting values one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Emit per-record diagnostics at info level instead of debug
    pub debug_mode: bool,

    /// Read log files from this directory instead of a remote endpoint
    pub local_log_dir: Option<PathBuf>,

    /// Drop raw lines containing this literal substring before parsing
    pub exclude_lines_with_substring: String,

    /// Base URL of the object endpoint serving the log bucket
    pub endpoint: Option<String>,
}

impl ParserConfig {
    /// Build a config from `(key, value)` pairs
    ///
    /// **Public** - mirrors repeated calls to [`ParserConfig::set`]
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.set(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    /// * `ConfigError::ReadFailed` - file cannot be read
    /// * `ConfigError::CredentialsUnsupported` - the file sets an AWS client key
    /// * `ConfigError::JsonError` - invalid JSON or an unknown key
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;

        if let Some(key) = value
            .as_object()
            .and_then(|fields| fields.keys().find(|k| CREDENTIAL_KEYS.contains(&k.as_str())))
        {
            return Err(ConfigError::CredentialsUnsupported(key.clone()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Set a single configuration value by name
    ///
    /// Empty values leave the current setting untouched.
    ///
    /// # Errors
    /// * `ConfigError::CredentialsUnsupported` - `key` is one of [`CREDENTIAL_KEYS`]
    /// * `ConfigError::UnknownKey` - `key` is not one of [`CONFIG_KEYS`]
    /// * `ConfigError::InvalidValue` - `debug_mode` is not a boolean word
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        if CREDENTIAL_KEYS.contains(&key) {
            return Err(ConfigError::CredentialsUnsupported(key.to_string()));
        }
        if !CONFIG_KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        if value.is_empty() {
            debug!("Ignoring empty value for '{}'", key);
            return Ok(());
        }

        match key {
            "debug_mode" => self.debug_mode = parse_flag(key, value)?,
            "local_log_dir" => self.local_log_dir = Some(PathBuf::from(value)),
            "exclude_lines_with_substring" => {
                self.exclude_lines_with_substring = value.to_string()
            }
            "endpoint" => self.endpoint = Some(value.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        Ok(())
    }

    /// The exclusion filter, or `None` when disabled
    pub fn exclusion_substring(&self) -> Option<&str> {
        if self.exclude_lines_with_substring.is_empty() {
            None
        } else {
            Some(&self.exclude_lines_with_substring)
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
