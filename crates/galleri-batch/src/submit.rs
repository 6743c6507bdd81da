// Sequential batch submission
//
// One batch in flight at a time. A failed batch is logged and recorded; with
// the default policy the run moves on to the next batch.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use galleri_core::WriteItem;

use crate::window::{window_count, windows, Batch, BatchSize};

/// Store that commits a group of items atomically.
#[async_trait]
pub trait TransactWriter: Send + Sync {
    /// Commit every item or none of them.
    async fn transact_write(&self, items: &[WriteItem]) -> Result<()>;
}

/// What to do after a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and attempt the remaining batches.
    #[default]
    Continue,
    /// Stop at the first failed batch.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub number: usize,
    pub offset: usize,
    pub items: usize,
    pub error: String,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batch {} (items {}..{}): {}",
            self.number,
            self.offset,
            self.offset + self.items,
            self.error
        )
    }
}

/// Tally of one submission run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Batches the sequence was split into.
    pub total: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Items in batches that committed.
    pub items_written: usize,
    pub failures: Vec<BatchFailure>,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.attempted == self.total
    }

    /// Batches never attempted because the run stopped early.
    pub fn not_attempted(&self) -> usize {
        self.total - self.attempted
    }
}

pub struct BatchSubmitter {
    writer: Arc<dyn TransactWriter>,
    batch_size: BatchSize,
    policy: FailurePolicy,
}

impl BatchSubmitter {
    pub fn new(writer: Arc<dyn TransactWriter>, batch_size: BatchSize) -> Self {
        Self {
            writer,
            batch_size,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Submit `items` in windows of `batch_size`, in order.
    ///
    /// Store errors never escape; they are counted in the result.
    pub async fn submit(&self, items: &[WriteItem]) -> SubmissionResult {
        let started = Instant::now();
        let mut result = SubmissionResult {
            total: window_count(items.len(), self.batch_size),
            ..SubmissionResult::default()
        };

        tracing::info!(
            items = items.len(),
            batches = result.total,
            batch_size = self.batch_size.get(),
            policy = ?self.policy,
            "Submitting items"
        );

        for batch in windows(items, self.batch_size) {
            result.attempted += 1;

            match self.writer.transact_write(batch.items).await {
                Ok(()) => {
                    result.succeeded += 1;
                    result.items_written += batch.len();
                    tracing::debug!(
                        batch = batch.number,
                        of = result.total,
                        items = batch.len(),
                        "Batch committed"
                    );
                }
                Err(err) => {
                    result.failed += 1;
                    tracing::warn!(
                        batch = batch.number,
                        of = result.total,
                        offset = batch.offset,
                        items = batch.len(),
                        error = %format!("{:#}", err),
                        "Batch failed"
                    );
                    result.failures.push(failure(&batch, &err));

                    if self.policy == FailurePolicy::Abort {
                        tracing::warn!(
                            remaining = result.not_attempted(),
                            "Aborting submission after failed batch"
                        );
                        break;
                    }
                }
            }
        }

        tracing::info!(
            attempted = result.attempted,
            succeeded = result.succeeded,
            failed = result.failed,
            items_written = result.items_written,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Submission finished"
        );

        result
    }
}

fn failure(batch: &Batch<'_>, err: &anyhow::Error) -> BatchFailure {
    BatchFailure {
        number: batch.number,
        offset: batch.offset,
        items: batch.len(),
        error: format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopWriter;

    #[async_trait]
    impl TransactWriter for NoopWriter {
        async fn transact_write(&self, _items: &[WriteItem]) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_input_submits_nothing() {
        let submitter = BatchSubmitter::new(Arc::new(NoopWriter), BatchSize::new(25).unwrap());
        let result = submitter.submit(&[]).await;
        assert_eq!(result, SubmissionResult::default());
        assert!(result.is_success());
    }

    #[test]
    fn failure_display_names_item_range() {
        let failure = BatchFailure {
            number: 3,
            offset: 50,
            items: 25,
            error: "TransactionCanceledException".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "batch 3 (items 50..75): TransactionCanceledException"
        );
    }
}
