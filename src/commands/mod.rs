// Subcommand implementations
//
// `load` and `generate-sites` share the submission path below: duplicate
// key check, writer selection, windowed submission, summary.

pub mod cleanup;
pub mod export;
pub mod generate;
pub mod load;

use std::sync::Arc;

use anyhow::{bail, Result};
use galleri_batch::{BatchSize, BatchSubmitter, FailurePolicy, SubmissionResult, TransactWriter};
use galleri_config::RuntimeConfig;
use galleri_core::{duplicate_keys, FormatOutcome, TableName, WriteItem};
use galleri_writer::{DynamoWriter, MemoryStore};
use tracing::{info, warn};

/// Most duplicate keys named in an error message.
const DUPLICATES_SHOWN: usize = 10;

/// `{environment}-{base}`, with `--table` replacing the base name.
pub(crate) fn table_name(config: &RuntimeConfig, table: Option<&str>, default: &str) -> TableName {
    TableName::namespaced(config.environment.as_deref(), table.unwrap_or(default))
}

/// Batch size from the flag, then config, then the dataset default.
pub(crate) fn batch_size(
    flag: Option<usize>,
    config: &RuntimeConfig,
    default: usize,
) -> Result<BatchSize> {
    BatchSize::new(flag.or(config.load.batch_size).unwrap_or(default))
}

pub(crate) fn batch_policy(policy: galleri_config::FailurePolicy) -> FailurePolicy {
    match policy {
        galleri_config::FailurePolicy::Continue => FailurePolicy::Continue,
        galleri_config::FailurePolicy::Abort => FailurePolicy::Abort,
    }
}

/// Log skipped rows and refuse the file when the config says to.
pub(crate) fn check_skipped(
    outcome: &FormatOutcome,
    config: &RuntimeConfig,
    source: &str,
) -> Result<()> {
    if outcome.skipped.is_empty() {
        return Ok(());
    }
    for skipped in &outcome.skipped {
        tracing::debug!(row = skipped.row, reason = %skipped.reason, "Skipped row");
    }
    warn!(
        source,
        skipped = outcome.skipped.len(),
        rows = outcome.rows_seen(),
        "Rows did not fit the schema"
    );

    if config.load.on_invalid_row == galleri_config::InvalidRowPolicy::Fail {
        let first = &outcome.skipped[0];
        bail!(
            "{} of {} rows in {} do not fit the schema (first: row {}: {})",
            outcome.skipped.len(),
            outcome.rows_seen(),
            source,
            first.row,
            first.reason
        );
    }
    Ok(())
}

/// Refuse (or warn about) items sharing a key value.
pub(crate) fn check_duplicates(items: &[WriteItem], key: &str, config: &RuntimeConfig) -> Result<()> {
    let duplicates = duplicate_keys(items, key);
    if duplicates.is_empty() {
        return Ok(());
    }

    let shown: Vec<&str> = duplicates
        .iter()
        .take(DUPLICATES_SHOWN)
        .map(|dup| dup.value.as_str())
        .collect();

    if config.load.reject_duplicate_keys {
        bail!(
            "{} {} values occur more than once: {}{}",
            duplicates.len(),
            key,
            shown.join(", "),
            if duplicates.len() > shown.len() { ", ..." } else { "" }
        );
    }

    warn!(
        key,
        duplicates = duplicates.len(),
        first = %shown.join(", "),
        "Duplicate keys; later items overwrite earlier ones"
    );
    Ok(())
}

/// Submit `items` to DynamoDB, or to an in-memory store on a dry run.
pub(crate) async fn submit(
    items: &[WriteItem],
    key: &str,
    batch_size: BatchSize,
    dry_run: bool,
    config: &RuntimeConfig,
) -> Result<SubmissionResult> {
    check_duplicates(items, key, config)?;

    let policy = batch_policy(config.load.failure_policy);

    if dry_run {
        let store = Arc::new(MemoryStore::new(key));
        let writer: Arc<dyn TransactWriter> = store.clone();
        let result = BatchSubmitter::new(writer, batch_size)
            .with_policy(policy)
            .submit(items)
            .await;
        info!(
            stored = store.len(),
            transactions = store.transactions(),
            "Dry run finished; nothing was written to DynamoDB"
        );
        return Ok(result);
    }

    let sdk_config = crate::aws::sdk_config(&config.aws).await;
    let writer: Arc<dyn TransactWriter> = Arc::new(DynamoWriter::new(&sdk_config));
    Ok(BatchSubmitter::new(writer, batch_size)
        .with_policy(policy)
        .submit(items)
        .await)
}

/// Print the tally; an error when any batch failed or was never attempted.
pub fn finish(result: &SubmissionResult) -> Result<()> {
    println!(
        "{} batches: {} attempted, {} succeeded, {} failed ({} items written)",
        result.total, result.attempted, result.succeeded, result.failed, result.items_written
    );
    for failure in &result.failures {
        println!("  {}", failure);
    }

    if !result.is_success() {
        bail!(
            "{} of {} batches failed, {} not attempted",
            result.failed,
            result.total,
            result.not_attempted()
        );
    }
    Ok(())
}
