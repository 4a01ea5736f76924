//! Stats command implementation.
//!
//! The stats command:
//! 1. Fetches raw log text from a local directory or an HTTP endpoint
//! 2. Splits, filters and parses every blob
//! 3. Aggregates the records into per-key statistics
//! 4. Wraps the result with bucket/prefix metadata and writes it out

use super::models::StatsArgs;
use crate::aggregator::{AggregateResult, Aggregator, OperationScope};
use crate::output::{validate_path, write_report, StatsResponse};
use crate::parser::{process_logs, ProcessedLogs};
use crate::source::{build_prefix, HttpObjectSource, LocalDirSource, LogSource};
use crate::utils::config::ParserConfig;
use crate::utils::error::SourceError;
use crate::utils::reporter::{LogReporter, Reporter};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Bucket and full prefix attached to a report
type Location = Option<(String, String)>;

/// Execute the stats command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report, also written to `args.output` when set
///
/// # Errors
/// * Missing log directory or unreachable endpoint
/// * Invalid date
/// * File write errors
pub fn execute_stats(args: &StatsArgs) -> Result<StatsResponse> {
    let start_time = Instant::now();

    if let Some(output) = &args.output {
        validate_path(output).context("Invalid output path")?;
    }

    // Step 1: Pick the source
    let (source, location) = build_source(args)?;
    info!("Step 1/3: Collecting logs from {}", source.describe());

    // Step 2: Parse and aggregate
    info!("Step 2/3: Parsing and aggregating...");
    let mut reporter = LogReporter::new(args.config.debug_mode);
    let result = collect_statistics(
        source.as_ref(),
        &args.config,
        args.operation_scope,
        &mut reporter,
    )
    .context("Failed to read access logs")?;

    info!(
        "Found {} downloads of {} keys ({} bytes)",
        result.total_downloads(),
        result.data.len(),
        result.total_bandwidth()
    );

    // Step 3: Build and write the report
    info!("Step 3/3: Building report...");
    let mut report = StatsResponse::new(result);
    if let Some((bucket, prefix)) = location {
        report = report.with_location(bucket, prefix);
    }

    if let Some(output) = &args.output {
        let bytes =
            write_report(&report, output).context("Failed to write statistics report")?;
        info!("✓ Report written to: {} ({} bytes)", output.display(), bytes);
    }

    info!("Stats completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}

/// Fetch, parse and aggregate every blob from a source
///
/// **Public** - the pipeline without any CLI concerns
///
/// Blobs are processed independently and their records concatenated
/// before a single aggregation pass.
///
/// # Arguments
/// * `source` - Where the log text comes from
/// * `config` - Supplies the exclusion substring
/// * `scope` - Which records feed the operation counts
/// * `reporter` - Receives per-line and per-record diagnostics
pub fn collect_statistics(
    source: &dyn LogSource,
    config: &ParserConfig,
    scope: OperationScope,
    reporter: &mut dyn Reporter,
) -> Result<AggregateResult, SourceError> {
    let blobs = source.fetch_blobs()?;
    let exclude = config.exclusion_substring();

    let mut processed = ProcessedLogs::default();
    for blob in &blobs {
        let blob_logs = process_logs(&blob.contents, exclude, reporter);
        debug!("Read {} lines from {}", blob_logs.row_count, blob.name);
        processed.append(blob_logs);
    }

    info!(
        "Parsed {} records from {} source(s) ({} lines, {} excluded, {} unmatched)",
        processed.records.len(),
        blobs.len(),
        processed.row_count,
        processed.excluded_rows_count,
        processed.unmatched_rows_count
    );

    let mut aggregator = Aggregator::new(reporter).with_scope(scope);
    aggregator.extend(&processed.records);
    Ok(aggregator.finish())
}

/// Build the log source and report location for a run
///
/// **Private** - internal helper for execute_stats
fn build_source(args: &StatsArgs) -> Result<(Box<dyn LogSource>, Location)> {
    if let Some(dir) = &args.config.local_log_dir {
        if args.date.is_some() {
            warn!("Date parameter is not currently supported for local files; ignoring");
        }

        let source = LocalDirSource::new(dir)?;
        let location = args
            .bucket
            .clone()
            .map(|bucket| (bucket, args.prefix.clone()));

        return Ok((Box::new(source), location));
    }

    let bucket = args
        .bucket
        .as_deref()
        .filter(|b| !b.is_empty())
        .context("Bucket name not provided")?;

    let endpoint = args
        .config
        .endpoint
        .as_deref()
        .context("No endpoint configured for remote logs")?;

    let prefix = build_prefix(&args.prefix, args.date.as_deref())?;
    let source =
        HttpObjectSource::new(endpoint, bucket, prefix.clone())?.with_keys(args.keys.clone());

    Ok((Box::new(source), Some((bucket.to_string(), prefix))))
}

/// Validate stats arguments
///
/// **Public** - can be called before execute_stats for early validation
pub fn validate_args(args: &StatsArgs) -> Result<()> {
    if let Some(dir) = &args.config.local_log_dir {
        if !dir.is_dir() {
            anyhow::bail!("{} is not a directory", dir.display());
        }
        return Ok(());
    }

    match args.bucket.as_deref() {
        None | Some("") => anyhow::bail!("Bucket name cannot be empty"),
        Some(_) => {}
    }

    let endpoint = args.config.endpoint.as_deref().unwrap_or_default();
    if endpoint.is_empty() {
        anyhow::bail!("Endpoint URL cannot be empty when no local log directory is set");
    }

    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        anyhow::bail!("Endpoint URL must start with http:// or https://");
    }

    // Fail on a bad date before touching the network
    build_prefix(&args.prefix, args.date.as_deref())?;

    Ok(())
}
