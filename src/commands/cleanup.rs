//! `cleanup` - delete AWS resources whose names match a prefix

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;
use galleri_cleanup::aws::{AwsBackup, AwsEks, AwsIam, AwsLogs, AwsS3};
use galleri_cleanup::eks::EksCleaner;
use galleri_cleanup::iam::IamPolicyCleaner;
use galleri_cleanup::logs::LogGroupCleaner;
use galleri_cleanup::s3::BucketCleaner;
use galleri_cleanup::vaults::VaultCleaner;
use galleri_cleanup::{execute, plan, Cleaner, NameMatch, ResourceKind, WaitPolicy};
use galleri_config::RuntimeConfig;

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Resource kind: backup-vaults, log-groups, eks, iam-policies, s3-buckets
    pub kind: ResourceKind,

    /// Name prefix to match (log groups match it anywhere in the name)
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: String,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Returns the names deleted.
pub async fn run(args: CleanupArgs, config: &RuntimeConfig) -> Result<Vec<String>> {
    let sdk_config = crate::aws::sdk_config(&config.aws).await;
    let wait = WaitPolicy::new(
        config.cleanup.poll_interval(),
        config.cleanup.max_wait_attempts,
    );

    let cleaner: Box<dyn Cleaner> = match args.kind {
        ResourceKind::BackupVaults => Box::new(VaultCleaner::new(AwsBackup::new(&sdk_config), wait)),
        ResourceKind::LogGroups => Box::new(LogGroupCleaner::new(AwsLogs::new(&sdk_config))),
        ResourceKind::Eks => Box::new(EksCleaner::new(AwsEks::new(&sdk_config), wait)),
        ResourceKind::IamPolicies => Box::new(IamPolicyCleaner::new(AwsIam::new(&sdk_config))),
        ResourceKind::S3Buckets => Box::new(BucketCleaner::new(AwsS3::new(&sdk_config))),
    };

    let targets = plan(cleaner.as_ref(), &args.prefix).await?;
    let matching = match args.kind.name_match() {
        NameMatch::Prefix => "starting with",
        NameMatch::Contains => "containing",
    };
    if targets.is_empty() {
        println!("No {} {} '{}'", args.kind, matching, args.prefix);
        return Ok(Vec::new());
    }

    println!("{} {} {} '{}':", targets.len(), args.kind, matching, args.prefix);
    for target in &targets {
        println!("  {}", target);
    }

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt(format!("Delete these {} {}?", targets.len(), args.kind))
            .default(false)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(Vec::new());
        }
    }

    let removed = execute(cleaner.as_ref(), &args.prefix, &targets).await?;
    println!("Deleted {} {}", removed.len(), args.kind);
    Ok(removed)
}
