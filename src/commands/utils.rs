use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a statistics report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;
    let stats = &report.statistics;

    println!("✓ Valid report JSON");
    println!("  Success: {}", report.success);
    if let Some(bucket) = &stats.bucket {
        println!("  Bucket: {}", bucket);
    }
    if let Some(prefix) = &stats.prefix {
        println!("  Prefix: {}", prefix);
    }
    println!("  Keys: {}", stats.result.data.len());
    println!("  Downloads: {}", stats.result.total_downloads());
    println!("  Bandwidth: {} bytes", stats.result.total_bandwidth());
    println!("  Operations: {}", stats.result.http_operation_counts.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("S3 Log Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-object download statistics from Amazon S3 server access logs.");
}
