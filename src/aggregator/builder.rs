//! Fold parsed records into download statistics.
//!
//! Single pass, no ordering assumptions: every step is a commutative
//! update of the accumulator, so any permutation of the input yields the
//! same [`AggregateResult`].

use super::key_stats::AggregateResult;
use crate::parser::LogRecord;
use crate::utils::config::GET_OBJECT_OPERATION;
use crate::utils::reporter::{NullReporter, Reporter};
use log::debug;

/// Which records feed `httpOperationCounts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationScope {
    /// Count every matched record by its operation
    #[default]
    All,

    /// Count only `REST.GET.OBJECT` records
    GetOnly,
}

impl OperationScope {
    fn counts(self, operation: &str) -> bool {
        match self {
            Self::All => true,
            Self::GetOnly => operation == GET_OBJECT_OPERATION,
        }
    }
}

/// Incremental aggregator
///
/// **Public** - use this when records arrive in batches or when
/// diagnostics should go to a custom [`Reporter`]
pub struct Aggregator<'r> {
    scope: OperationScope,
    reporter: &'r mut dyn Reporter,
    result: AggregateResult,
}

impl<'r> Aggregator<'r> {
    /// Create an aggregator that reports through `reporter`
    pub fn new(reporter: &'r mut dyn Reporter) -> Self {
        Self {
            scope: OperationScope::default(),
            reporter,
            result: AggregateResult::default(),
        }
    }

    /// Set which records are counted per operation
    pub fn with_scope(mut self, scope: OperationScope) -> Self {
        self.scope = scope;
        self
    }

    /// Add one record to the running totals
    ///
    /// # Algorithm
    /// 1. Count the operation (subject to the scope)
    /// 2. Stop unless the operation is `REST.GET.OBJECT`
    /// 3. Stop if the key is empty
    /// 4. Count a download for the key, with date, bytes and time
    pub fn add(&mut self, record: &LogRecord) {
        let operation = record.operation.as_str();

        if !operation.is_empty() && self.scope.counts(operation) {
            let count = self
                .result
                .http_operation_counts
                .entry(operation.to_string())
                .or_insert(0);
            *count = count.saturating_add(1);
        }

        // Only GET requests get the extra processing around bytes, request time, etc.
        if operation != GET_OBJECT_OPERATION {
            return;
        }

        if record.key.is_empty() {
            self.reporter.missing_key(record);
            return;
        }

        let date = match record.access_date() {
            Ok(date) => Some(date),
            Err(e) => {
                self.reporter.malformed_timestamp(record, &e);
                None
            }
        };

        self.reporter.object_download(&record.key, record);

        self.result
            .data
            .entry(record.key.clone())
            .or_default()
            .record_download(record.bytes_sent_value(), record.total_time_ms(), date);
    }

    /// Add every record from an iterator
    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        for record in records {
            self.add(record);
        }
    }

    /// Finish the run and return the snapshot
    pub fn finish(self) -> AggregateResult {
        debug!(
            "Aggregated {} keys, {} operation types",
            self.result.data.len(),
            self.result.http_operation_counts.len()
        );
        self.result
    }
}

/// Aggregate records with default settings and no diagnostics
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - Parsed records, in any order
///
/// # Returns
/// Per-key download statistics plus counts for every operation
pub fn aggregate<'a, I>(records: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let mut reporter = NullReporter;
    let mut aggregator = Aggregator::new(&mut reporter);
    aggregator.extend(records);
    aggregator.finish()
}
