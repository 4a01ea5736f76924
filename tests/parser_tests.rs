mod common;

use common::{get_line, log_line};
use s3_log_stats::parser::{extract_date, parse_line, process_logs, should_exclude, split_into_lines};
use s3_log_stats::utils::{NullReporter, Reporter};

#[derive(Default)]
struct LineRecorder {
    excluded: Vec<String>,
    unmatched: Vec<String>,
}

impl Reporter for LineRecorder {
    fn excluded_line(&mut self, line: &str) {
        self.excluded.push(line.to_string());
    }

    fn unmatched_line(&mut self, line: &str) {
        self.unmatched.push(line.to_string());
    }
}

#[test]
fn test_parse_get_line() {
    let record = parse_line(&get_line("test.png", "1024")).unwrap();

    assert_eq!(record.bucket, "bn-test");
    assert_eq!(record.operation, "REST.GET.OBJECT");
    assert_eq!(record.key, "test.png");
    assert_eq!(record.time, "[31/Oct/2018:10:00:00 +0000]");
    assert_eq!(record.bytes_sent_value(), Some(1024));
    assert_eq!(record.total_time_ms(), Some(25));
    assert_eq!(record.object_size, "4096");
    assert_eq!(record.turn_around_time, "12");
    assert_eq!(
        record.user_agent,
        "\"Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_0)\""
    );
}

#[test]
fn test_dash_values_are_kept_raw() {
    let line = log_line("REST.GET.OBJECT", "test.png", "31/Oct/2018:10:00:00 +0000", "-", "-");
    let record = parse_line(&line).unwrap();

    assert_eq!(record.bytes_sent, "-");
    assert_eq!(record.bytes_sent_value(), None);
    assert_eq!(record.total_time_ms(), None);
}

#[test]
fn test_timestamp_extraction() {
    assert_eq!(extract_date("[31/Oct/2018:10:00:00 +0000]").unwrap(), "2018-10-31");
}

#[test]
fn test_blank_trailing_line_is_dropped_silently() {
    let blob = format!("{}\n", get_line("test.png", "1024"));
    assert_eq!(split_into_lines(&blob).count(), 2);

    let mut recorder = LineRecorder::default();
    let processed = process_logs(&blob, None, &mut recorder);

    assert_eq!(processed.records.len(), 1);
    assert_eq!(processed.unmatched_rows_count, 1);
    assert_eq!(recorder.unmatched, vec![String::new()]);
}

#[test]
fn test_exclusion_runs_before_parsing() {
    let health_check = log_line(
        "REST.HEAD.OBJECT",
        "health",
        "31/Oct/2018:10:00:00 +0000",
        "-",
        "1",
    )
    .replace("Mozilla/5.0", "ELB-HealthChecker/2.0");
    assert!(should_exclude(&health_check, "ELB-HealthChecker"));

    let blob = [get_line("test.png", "1024"), health_check.clone()].join("\n");

    let mut recorder = LineRecorder::default();
    let processed = process_logs(&blob, Some("ELB-HealthChecker"), &mut recorder);

    assert_eq!(processed.records.len(), 1);
    assert_eq!(processed.excluded_rows_count, 1);
    assert_eq!(processed.unmatched_rows_count, 0);
    assert_eq!(recorder.excluded, vec![health_check]);
}

#[test]
fn test_empty_exclusion_excludes_nothing() {
    let blob = [get_line("a", "1"), get_line("b", "2")].join("\n");
    let processed = process_logs(&blob, Some(""), &mut NullReporter);

    assert_eq!(processed.records.len(), 2);
    assert_eq!(processed.excluded_rows_count, 0);
}

#[test]
fn test_truncated_line_does_not_match() {
    let line = get_line("test.png", "1024");
    let truncated = &line[..line.find("\"Mozilla").unwrap()];
    assert!(parse_line(truncated).is_none());
}
