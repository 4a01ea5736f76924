//! S3 server access-log line parser.
//!
//! Turns a blob of log text into [`LogRecord`]s. Lines that do not match
//! the grammar are dropped, never reported as errors: the blank segment
//! after a trailing newline is the usual case.

use super::record::LogRecord;
use crate::utils::reporter::Reporter;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Access-log grammar: space-separated tokens, one bracketed timestamp and
/// three quoted free-text fields (request, referrer, user agent)
const ACCESS_LOG_PATTERN: &str = concat!(
    r#"(?P<owner>\S+) (?P<bucket>\S+) (?P<time>\[[^\]]*\]) (?P<ip>\S+) "#,
    r#"(?P<requester>\S+) (?P<reqid>\S+) (?P<operation>\S+) (?P<key>\S+) (?P<request>"[^"]*") "#,
    r#"(?P<status>\S+) (?P<error>\S+) (?P<bytes>\S+) (?P<size>\S+) (?P<totaltime>\S+) "#,
    r#"(?P<turnaround>\S+) (?P<referrer>"[^"]*") (?P<useragent>"[^"]*") (?P<version>\S)"#,
);

/// Token character: anything but ASCII whitespace. A bare `\S` would also
/// reject Unicode spaces such as U+00A0, which log writers treat as data.
const TOKEN_CHAR: &str = r"[^\t\n\x0B\x0C\r ]";

static ACCESS_LOG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&ACCESS_LOG_PATTERN.replace(r"\S", TOKEN_CHAR)).expect("Valid access log pattern")
});

/// Result of processing one blob of log text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedLogs {
    /// Records that matched the grammar, in line order
    pub records: Vec<LogRecord>,

    /// Number of line segments in the blob, including a trailing empty one
    pub row_count: usize,

    /// Lines dropped by the exclusion filter
    pub excluded_rows_count: usize,

    /// Lines that did not match the grammar
    pub unmatched_rows_count: usize,
}

impl ProcessedLogs {
    /// Append another blob's output, keeping record order
    pub fn append(&mut self, other: ProcessedLogs) {
        self.records.extend(other.records);
        self.row_count += other.row_count;
        self.excluded_rows_count += other.excluded_rows_count;
        self.unmatched_rows_count += other.unmatched_rows_count;
    }
}

/// Match a single line against the access-log grammar
///
/// **Public** - main entry point for line parsing
///
/// # Returns
/// The parsed record, or `None` if the line does not conform
pub fn parse_line(line: &str) -> Option<LogRecord> {
    ACCESS_LOG_REGEX.captures(line).map(|caps| to_record(&caps))
}

/// Split a blob on line feeds without trimming
///
/// A blob ending in `\n` yields a final empty segment.
pub fn split_into_lines(blob: &str) -> impl Iterator<Item = &str> {
    blob.split('\n')
}

/// Whether a raw line should be dropped before parsing
///
/// An empty `substring` disables the filter.
pub fn should_exclude(line: &str, substring: &str) -> bool {
    !substring.is_empty() && line.contains(substring)
}

/// Process a string containing 0-n lines of logs
///
/// **Public** - used by the stats command once per source blob
///
/// # Arguments
/// * `blob` - Raw log text
/// * `exclude` - Optional exclusion substring, applied before parsing
/// * `reporter` - Receives excluded and unmatched lines
pub fn process_logs(blob: &str, exclude: Option<&str>, reporter: &mut dyn Reporter) -> ProcessedLogs {
    let exclude = exclude.unwrap_or_default();
    let mut processed = ProcessedLogs::default();

    for line in split_into_lines(blob) {
        processed.row_count += 1;

        if should_exclude(line, exclude) {
            reporter.excluded_line(line);
            processed.excluded_rows_count += 1;
            continue;
        }

        match parse_line(line) {
            Some(record) => processed.records.push(record),
            None => {
                reporter.unmatched_line(line);
                processed.unmatched_rows_count += 1;
            }
        }
    }

    debug!(
        "Processed {} rows: {} records, {} excluded, {} unmatched",
        processed.row_count,
        processed.records.len(),
        processed.excluded_rows_count,
        processed.unmatched_rows_count
    );

    processed
}

/// Copy named captures into a record
///
/// **Private** - every group is mandatory, so a match populates all fields
fn to_record(caps: &Captures<'_>) -> LogRecord {
    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    LogRecord {
        owner: field("owner"),
        bucket: field("bucket"),
        time: field("time"),
        ip: field("ip"),
        requester: field("requester"),
        request_id: field("reqid"),
        operation: field("operation"),
        key: field("key"),
        request_uri: field("request"),
        http_status: field("status"),
        error_code: field("error"),
        bytes_sent: field("bytes"),
        object_size: field("size"),
        total_time: field("totaltime"),
        turn_around_time: field("turnaround"),
        referrer: field("referrer"),
        user_agent: field("useragent"),
        version: field("version"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::reporter::NullReporter;

    const VERSIONING_LINE: &str = concat!(
        "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be awsexamplebucket1 ",
        "[06/Feb/2019:00:00:38 +0000] 192.0.2.3 ",
        "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be 3E57427F3EXAMPLE ",
        "REST.GET.VERSIONING - \"GET /awsexamplebucket1?versioning HTTP/1.1\" 200 - 113 - 7 - ",
        "\"-\" \"S3Console/0.4\" - s9lzHYrFp76ZVxRcpX9+5cjAnEH2ROuNkd2BHfIa6UkFVdtjf5mKR3/eTPFvsiP/XV/VLi31234= ",
        "SigV2 ECDHE-RSA-AES128-GCM-SHA256 AuthHeader awsexamplebucket1.s3.us-west-1.amazonaws.com TLSV1.1"
    );

    #[test]
    fn test_parse_documented_line() {
        let record = parse_line(VERSIONING_LINE).unwrap();

        assert_eq!(record.bucket, "awsexamplebucket1");
        assert_eq!(record.time, "[06/Feb/2019:00:00:38 +0000]");
        assert_eq!(record.ip, "192.0.2.3");
        assert_eq!(record.request_id, "3E57427F3EXAMPLE");
        assert_eq!(record.operation, "REST.GET.VERSIONING");
        assert_eq!(record.key, "-");
        assert_eq!(record.request_uri, "\"GET /awsexamplebucket1?versioning HTTP/1.1\"");
        assert_eq!(record.http_status, "200");
        assert_eq!(record.bytes_sent, "113");
        assert_eq!(record.object_size, "-");
        assert_eq!(record.total_time, "7");
        assert_eq!(record.referrer, "\"-\"");
        assert_eq!(record.user_agent, "\"S3Console/0.4\"");
        assert_eq!(record.version, "-");
    }

    #[test]
    fn test_quoted_user_agent_keeps_spaces() {
        let line = concat!(
            "owner bucket [31/Oct/2018:10:00:00 +0000] 10.0.0.1 requester REQ1 ",
            "REST.GET.OBJECT photos/cat.png \"GET /bucket/photos/cat.png HTTP/1.1\" 200 - 2048 2048 ",
            "15 12 \"https://example.com/gallery\" \"Mozilla/5.0 (X11; Linux x86_64)\" -"
        );

        let record = parse_line(line).unwrap();
        assert_eq!(record.user_agent, "\"Mozilla/5.0 (X11; Linux x86_64)\"");
        assert_eq!(record.referrer, "\"https://example.com/gallery\"");
        assert_eq!(record.key, "photos/cat.png");
    }

    #[test]
    fn test_unicode_space_is_part_of_a_token() {
        let line = concat!(
            "owner bucket [31/Oct/2018:10:00:00 +0000] 10.0.0.1 requester REQ1 ",
            "REST.GET.OBJECT a\u{00A0}b.png \"GET /bucket/a HTTP/1.1\" 200 - 10 10 ",
            "15 12 \"-\" \"curl/8.0\" -"
        );

        let record = parse_line(line).unwrap();
        assert_eq!(record.key, "a\u{00A0}b.png");
        assert_eq!(record.operation, "REST.GET.OBJECT");
    }

    #[test]
    fn test_tab_still_splits_tokens() {
        let line = concat!(
            "owner bucket [31/Oct/2018:10:00:00 +0000] 10.0.0.1 requester REQ1 ",
            "REST.GET.OBJECT a\tb.png \"GET /bucket/a HTTP/1.1\" 200 - 10 10 ",
            "15 12 \"-\" \"curl/8.0\" -"
        );

        assert!(parse_line(line).is_none());
    }

    #[test]
    fn test_non_matching_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("not a log line").is_none());
        // Timestamp without brackets
        assert!(parse_line(
            "o b 31/Oct/2018:10:00:00 1.2.3.4 r q REST.GET.OBJECT k \"GET /\" 200 - 1 1 1 1 \"-\" \"ua\" -"
        )
        .is_none());
    }

    #[test]
    fn test_split_keeps_trailing_empty_segment() {
        let lines: Vec<&str> = split_into_lines("a\nb\n").collect();
        assert_eq!(lines, vec!["a", "b", ""]);
    }

    #[test]
    fn test_should_exclude() {
        assert!(should_exclude("foo HealthChecker bar", "HealthChecker"));
        assert!(!should_exclude("foo bar", "HealthChecker"));
        assert!(!should_exclude("anything", ""));
    }

    #[test]
    fn test_process_logs_counts() {
        let blob = format!("{}\ngarbage\n{} excluded-marker\n", VERSIONING_LINE, VERSIONING_LINE);
        let processed = process_logs(&blob, Some("excluded-marker"), &mut NullReporter);

        assert_eq!(processed.row_count, 4);
        assert_eq!(processed.records.len(), 1);
        assert_eq!(processed.excluded_rows_count, 1);
        assert_eq!(processed.unmatched_rows_count, 2);
    }

    #[test]
    fn test_append_processed_logs() {
        let mut first = process_logs(VERSIONING_LINE, None, &mut NullReporter);
        let second = process_logs("junk", None, &mut NullReporter);
        first.append(second);

        assert_eq!(first.row_count, 2);
        assert_eq!(first.records.len(), 1);
        assert_eq!(first.unmatched_rows_count, 1);
    }
}
