//! `load` - format a CSV file and submit it in transactional batches

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use galleri_batch::SubmissionResult;
use galleri_config::RuntimeConfig;
use galleri_core::{format, reader, Dataset};
use tracing::info;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Dataset layout: icb, lsoa, unique-lsoa, population
    pub dataset: Dataset,

    /// CSV file to load
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Base table name (default depends on the dataset; namespaced by environment)
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,

    /// Items per transaction, 1-100 (default depends on the dataset)
    #[arg(short, long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Submit to an in-memory store instead of DynamoDB
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: LoadArgs, config: &RuntimeConfig) -> Result<SubmissionResult> {
    let schema = args.dataset.schema();
    let table = super::table_name(config, args.table.as_deref(), args.dataset.default_table());
    let batch_size = super::batch_size(args.batch_size, config, args.dataset.default_batch_size())?;

    let rows = reader::read_rows(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let outcome = format(&rows, schema, &table);

    info!(
        dataset = %args.dataset,
        table = %table,
        rows = outcome.rows_seen(),
        items = outcome.items.len(),
        skipped = outcome.skipped.len(),
        batch_size = batch_size.get(),
        "Formatted rows"
    );
    super::check_skipped(&outcome, config, &args.file.display().to_string())?;

    super::submit(&outcome.items, schema.key, batch_size, args.dry_run, config).await
}
