// Configuration validation
//
// Rejects values the loaders and cleaners cannot run with; warns on values
// that are legal but probably a mistake.

use super::*;
use anyhow::{bail, Result};
use tracing::warn;

const LONG_WAIT_SECS: u64 = 2 * 60 * 60;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    if let Some(ref environment) = config.environment {
        validate_environment(environment)?;
    }

    validate_load_config(&config.load)?;
    validate_aws_config(&config.aws)?;
    validate_cleanup_config(&config.cleanup)?;

    if config.log.level.trim().is_empty() {
        bail!("log.level must not be empty");
    }

    Ok(())
}

fn validate_environment(environment: &str) -> Result<()> {
    if environment.trim().is_empty() {
        bail!("environment must not be blank");
    }

    if environment.chars().any(char::is_whitespace) {
        bail!(
            "environment '{}' must not contain whitespace; it becomes part of every table name",
            environment
        );
    }

    Ok(())
}

fn validate_load_config(config: &LoadConfig) -> Result<()> {
    if let Some(batch_size) = config.batch_size {
        if batch_size == 0 {
            bail!("load.batch_size must be greater than 0");
        }

        if batch_size > TRANSACT_ITEM_LIMIT {
            bail!(
                "load.batch_size {} exceeds the {}-item transaction limit\n\n\
                How to fix:\n\
                  • Environment: export {}BATCH_SIZE=100\n\
                  • TOML: [load]\n              batch_size = 100\n",
                batch_size,
                TRANSACT_ITEM_LIMIT,
                ENV_PREFIX
            );
        }
    }

    if !config.reject_duplicate_keys {
        warn!("load.reject_duplicate_keys is off; repeated keys will overwrite earlier items");
    }

    Ok(())
}

fn validate_aws_config(config: &AwsConfig) -> Result<()> {
    if let Some(ref region) = config.region {
        if region.trim().is_empty() {
            bail!(
                "aws.region must not be empty\n\n\
                How to fix:\n\
                  • Environment: export AWS_REGION=eu-west-2\n\
                  • TOML: [aws]\n              region = \"eu-west-2\"\n"
            );
        }
    }

    if let Some(ref endpoint) = config.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!("aws.endpoint must be an http(s) URL, got '{}'", endpoint);
        }
    }

    Ok(())
}

fn validate_cleanup_config(config: &CleanupConfig) -> Result<()> {
    if config.poll_interval_secs == 0 {
        bail!("cleanup.poll_interval_secs must be greater than 0");
    }

    if config.max_wait_attempts == 0 {
        bail!("cleanup.max_wait_attempts must be greater than 0");
    }

    let Some(max_wait) = config.max_wait() else {
        bail!(
            "cleanup wait of {} attempts every {}s is too long",
            config.max_wait_attempts,
            config.poll_interval_secs
        );
    };
    if max_wait.as_secs() > LONG_WAIT_SECS {
        warn!(
            max_wait_secs = max_wait.as_secs(),
            "cleanup waits may run for more than two hours"
        );
    }

    Ok(())
}
