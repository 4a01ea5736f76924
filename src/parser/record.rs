//! Parsed access-log record.
//!
//! Field layout follows
//! https://docs.aws.amazon.com/AmazonS3/latest/userguide/LogFormat.html

use crate::utils::config::{LOG_DATE_FORMAT, REPORT_DATE_FORMAT};
use crate::utils::error::MalformedTimestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One access-log line that matched the grammar
///
/// Every field is the raw token from the line. Absent values are logged
/// by S3 as `-` and kept as such; quoted fields keep their quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub owner: String,
    pub bucket: String,

    /// Bracketed timestamp, e.g. `[31/Oct/2018:10:00:00 +0000]`
    pub time: String,

    pub ip: String,
    pub requester: String,
    pub request_id: String,

    /// Operation token, e.g. `REST.GET.OBJECT`
    pub operation: String,

    /// Object key the request targeted
    pub key: String,

    pub request_uri: String,
    pub http_status: String,
    pub error_code: String,
    pub bytes_sent: String,
    pub object_size: String,

    /// Total request time in milliseconds
    pub total_time: String,

    pub turn_around_time: String,
    pub referrer: String,
    pub user_agent: String,
    pub version: String,
}

impl LogRecord {
    /// Bytes sent, or `None` when the field is `-` or not a number
    pub fn bytes_sent_value(&self) -> Option<u64> {
        self.bytes_sent.parse().ok()
    }

    /// Total request time in milliseconds, or `None` when not a number
    pub fn total_time_ms(&self) -> Option<u64> {
        self.total_time.parse().ok()
    }

    /// Calendar date of the request as `YYYY-MM-DD`
    pub fn access_date(&self) -> Result<String, MalformedTimestamp> {
        extract_date(&self.time)
    }
}

/// Extract the `YYYY-MM-DD` date from a bracketed log timestamp
///
/// **Public** - used by the aggregator for the per-key date set
///
/// Takes everything before the first space, strips the leading `[`,
/// keeps the part before the first `:` and reads it as `DD/Mon/YYYY`.
///
/// # Errors
/// * `MalformedTimestamp` - the date portion is not a valid `DD/Mon/YYYY`
pub fn extract_date(timestamp: &str) -> Result<String, MalformedTimestamp> {
    let stamp = timestamp.split(' ').next().unwrap_or_default();
    let stamp = stamp.trim_start_matches('[');
    let day = stamp.split(':').next().unwrap_or_default();

    NaiveDate::parse_from_str(day, LOG_DATE_FORMAT)
        .map(|date| date.format(REPORT_DATE_FORMAT).to_string())
        .map_err(|e| MalformedTimestamp {
            timestamp: timestamp.to_string(),
            reason: e.to_string(),
        })
}
