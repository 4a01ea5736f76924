use crate::aggregator::OperationScope;
use crate::utils::config::ParserConfig;
use std::path::PathBuf;

/// Arguments for the stats command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct StatsArgs {
    /// Parser configuration (local directory, endpoint, exclusion, debug)
    pub config: ParserConfig,

    /// Bucket holding the access logs (remote runs)
    pub bucket: Option<String>,

    /// Log object key prefix
    pub prefix: String,

    /// Optional day (`YYYY-MM-DD` or RFC 3339) appended to the prefix
    pub date: Option<String>,

    /// Log object keys to fetch instead of listing the bucket (remote runs)
    pub keys: Vec<String>,

    /// Write the JSON report here instead of returning it only
    pub output: Option<PathBuf>,

    /// Which records feed `httpOperationCounts`
    pub operation_scope: OperationScope,
}

impl StatsArgs {
    /// Whether logs come from a local directory rather than an endpoint
    pub fn is_local(&self) -> bool {
        self.config.local_log_dir.is_some()
    }
}
