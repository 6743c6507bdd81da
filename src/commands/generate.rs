//! `generate-sites` - synthetic phlebotomy sites for test environments

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use galleri_batch::SubmissionResult;
use galleri_config::RuntimeConfig;
use galleri_core::synthetic::{
    phlebotomy_sites, DEFAULT_SITE_BATCH_SIZE, DEFAULT_SITE_COUNT, DEFAULT_SITE_TABLE, SITE_KEY,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Args, Debug)]
pub struct GenerateSitesArgs {
    /// Number of sites to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_SITE_COUNT)]
    pub count: usize,

    /// Base table name (namespaced by environment)
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,

    /// Items per transaction, 1-100
    #[arg(short, long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Submit to an in-memory store instead of DynamoDB
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: GenerateSitesArgs, config: &RuntimeConfig) -> Result<SubmissionResult> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let table = super::table_name(config, args.table.as_deref(), DEFAULT_SITE_TABLE);
    let batch_size = super::batch_size(args.batch_size, config, DEFAULT_SITE_BATCH_SIZE)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let items = phlebotomy_sites(&mut rng, Utc::now(), args.count, &table);

    info!(
        table = %table,
        sites = items.len(),
        batch_size = batch_size.get(),
        "Generated phlebotomy sites"
    );

    super::submit(&items, SITE_KEY, batch_size, args.dry_run, config).await
}
