//! S3 Log Stats CLI
//!
//! Reads Amazon S3 server access logs from a local directory or an HTTP
//! endpoint and reports per-object download statistics as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use s3_log_stats::aggregator::OperationScope;
use s3_log_stats::commands::{
    display_version, execute_stats, validate_args, validate_report_file, StatsArgs,
};
use s3_log_stats::output::report_to_string;
use s3_log_stats::utils::ParserConfig;

/// S3 Log Stats - download statistics from S3 access logs
#[derive(Parser, Debug)]
#[command(name = "s3-log-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Which operations to count in `httpOperationCounts`
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Ops {
    /// Every matched operation
    All,
    /// Only REST.GET.OBJECT
    Get,
}

impl From<Ops> for OperationScope {
    fn from(ops: Ops) -> Self {
        match ops {
            Ops::All => OperationScope::All,
            Ops::Get => OperationScope::GetOnly,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate download statistics from access logs
    Stats {
        /// Read log files from this directory
        #[arg(short, long, env = "S3_LOG_STATS_LOCAL_DIR")]
        local_dir: Option<PathBuf>,

        /// Base URL of the object endpoint serving the log bucket
        #[arg(short, long, env = "S3_LOG_STATS_ENDPOINT")]
        endpoint: Option<String>,

        /// Bucket holding the access logs
        #[arg(short, long)]
        bucket: Option<String>,

        /// Log object key prefix
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Restrict to one day (YYYY-MM-DD), appended to the prefix
        #[arg(short, long)]
        date: Option<String>,

        /// Fetch this log object key instead of listing the bucket (repeatable)
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Drop lines containing this substring before parsing
        #[arg(long)]
        exclude: Option<String>,

        /// Log every counted download
        #[arg(long)]
        debug: bool,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra config value as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        settings: Vec<String>,

        /// Write the JSON report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which operations to count
        #[arg(long, value_enum, default_value = "all")]
        ops: Ops,
    },

    /// Validate a statistics report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Stats {
            local_dir,
            endpoint,
            bucket,
            prefix,
            date,
            keys,
            exclude,
            debug,
            config,
            settings,
            output,
            ops,
        } => {
            let mut parser_config = match config {
                Some(path) => ParserConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ParserConfig::default(),
            };

            for setting in &settings {
                let (key, value) = setting
                    .split_once('=')
                    .with_context(|| format!("Expected KEY=VALUE, got '{}'", setting))?;
                parser_config.set(key, value)?;
            }

            // Explicit flags win over file and --set values
            if local_dir.is_some() {
                parser_config.local_log_dir = local_dir;
            }
            if endpoint.is_some() {
                parser_config.endpoint = endpoint;
            }
            if let Some(exclude) = exclude {
                parser_config.exclude_lines_with_substring = exclude;
            }
            if debug {
                parser_config.debug_mode = true;
            }

            let args = StatsArgs {
                config: parser_config,
                bucket,
                prefix,
                date,
                keys,
                output,
                operation_scope: ops.into(),
            };

            // Validate args first
            validate_args(&args)?;

            let report = execute_stats(&args)?;

            if args.output.is_none() {
                println!("{}", report_to_string(&report)?);
            }
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
