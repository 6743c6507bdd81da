//! `export` - legacy batch-load JSON document for a CSV file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use galleri_config::RuntimeConfig;
use galleri_core::{export, format, reader, Dataset};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset layout: icb, lsoa, unique-lsoa, population
    pub dataset: Dataset,

    /// CSV file to format
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// JSON document to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Base table name (default depends on the dataset; namespaced by environment)
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,
}

/// Returns the number of items written.
pub fn run(args: ExportArgs, config: &RuntimeConfig) -> Result<usize> {
    let table = super::table_name(config, args.table.as_deref(), args.dataset.default_table());

    let rows = reader::read_rows(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let outcome = format(&rows, args.dataset.schema(), &table);
    super::check_skipped(&outcome, config, &args.file.display().to_string())?;

    export::write_legacy_document(&args.output, &table, &outcome.items)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} items for {} to {}",
        outcome.items.len(),
        table,
        args.output.display()
    );
    Ok(outcome.items.len())
}
