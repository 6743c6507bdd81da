use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use galleri_config::RuntimeConfig;
use galleri_ops::commands::{self, cleanup, export, generate, load};
use std::path::PathBuf;
use tracing::info;

/// Reference-data loaders and AWS cleanup for the Galleri pipeline
#[derive(Parser)]
#[command(name = "galleri-ops")]
#[command(version)]
#[command(about = "Reference-data loaders and AWS cleanup for the Galleri pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Environment name used to namespace tables (overrides config and ENVIRONMENT)
    #[arg(short, long, value_name = "NAME", global = true)]
    environment: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a CSV file and write it to DynamoDB in transactional batches
    Load(load::LoadArgs),
    /// Generate synthetic phlebotomy sites and write them to DynamoDB
    GenerateSites(generate::GenerateSitesArgs),
    /// Write the legacy batch-load JSON document for a CSV file
    Export(export::ExportArgs),
    /// Delete AWS resources matched by name
    Cleanup(cleanup::CleanupArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // One batch in flight at a time; a single-threaded runtime is enough.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Step 1: Load base configuration (file + environment)
    let mut config = if let Some(config_path) = &cli.config {
        RuntimeConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        RuntimeConfig::load().context("Failed to load configuration")?
    };

    // Step 2: Apply CLI overrides (highest priority) and re-check
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    // Step 3: Initialize tracing
    galleri_ops::init_tracing(&config);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.environment.as_deref().unwrap_or("<none>"),
        "galleri-ops starting"
    );

    match cli.command {
        Commands::Load(args) => {
            let result = load::run(args, &config).await?;
            commands::finish(&result)
        }
        Commands::GenerateSites(args) => {
            let result = generate::run(args, &config).await?;
            commands::finish(&result)
        }
        Commands::Export(args) => export::run(args, &config).map(|_| ()),
        Commands::Cleanup(args) => cleanup::run(args, &config).await.map(|_| ()),
    }
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) {
    if let Some(environment) = &cli.environment {
        config.environment = Some(environment.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
}
