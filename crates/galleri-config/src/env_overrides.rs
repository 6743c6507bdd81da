use super::{FailurePolicy, InvalidRowPolicy, LogFormat, RuntimeConfig};
use anyhow::{anyhow, Context, Result};

pub const ENV_PREFIX: &str = "GALLERI_";

/// Abstraction over environment-variable lookups so tests and embedders can
/// supply their own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the GALLERI_ prefix.
    /// Used for names the older load scripts and the AWS tooling read.
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides to the runtime config.
///
/// Prefixed variables win over their unprefixed counterparts.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Environment namespace; the load scripts read `environment`
    if let Some(environment) = get_raw_env_string(env, "ENVIRONMENT")
        .or_else(|| get_raw_env_string(env, "environment"))
    {
        config.environment = Some(environment);
    }
    if let Some(environment) = get_env_string(env, "ENVIRONMENT") {
        config.environment = Some(environment);
    }

    // Load configuration
    if let Some(val) = get_env_usize(env, "BATCH_SIZE")? {
        config.load.batch_size = Some(val);
    }
    if let Some(policy) = get_env_string(env, "ON_INVALID_ROW") {
        config.load.on_invalid_row = policy
            .parse::<InvalidRowPolicy>()
            .context("Invalid GALLERI_ON_INVALID_ROW value")?;
    }
    if let Some(policy) = get_env_string(env, "FAILURE_POLICY") {
        config.load.failure_policy = policy
            .parse::<FailurePolicy>()
            .context("Invalid GALLERI_FAILURE_POLICY value")?;
    }
    if let Some(val) = get_env_bool(env, "REJECT_DUPLICATE_KEYS")? {
        config.load.reject_duplicate_keys = val;
    }

    // AWS standard variables (without GALLERI_ prefix for compatibility)
    if let Some(region) = get_raw_env_string(env, "AWS_REGION") {
        config.aws.region = Some(region);
    }
    if let Some(endpoint) = get_raw_env_string(env, "AWS_ENDPOINT_URL") {
        config.aws.endpoint = Some(endpoint);
    }
    if let Some(region) = get_env_string(env, "AWS_REGION") {
        config.aws.region = Some(region);
    }
    if let Some(endpoint) = get_env_string(env, "AWS_ENDPOINT") {
        config.aws.endpoint = Some(endpoint);
    }

    // Cleanup waits
    if let Some(val) = get_env_u64(env, "POLL_INTERVAL_SECS")? {
        config.cleanup.poll_interval_secs = val;
    }
    if let Some(val) = get_env_u32(env, "MAX_WAIT_ATTEMPTS")? {
        config.cleanup.max_wait_attempts = val;
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|val| !val.trim().is_empty())
}

fn get_raw_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get_raw(key).filter(|val| !val.trim().is_empty())
}

fn get_env_usize<E: EnvSource>(env: &E, key: &str) -> Result<Option<usize>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val
                .parse::<usize>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

fn get_env_u64<E: EnvSource>(env: &E, key: &str) -> Result<Option<u64>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val
                .parse::<u64>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

fn get_env_u32<E: EnvSource>(env: &E, key: &str) -> Result<Option<u32>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val
                .parse::<u32>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

fn get_env_bool<E: EnvSource>(env: &E, key: &str) -> Result<Option<bool>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val.to_lowercase().parse::<bool>().map_err(|e| {
                anyhow!(
                    "Failed to parse {}{} (expected bool): {}",
                    ENV_PREFIX,
                    key,
                    e
                )
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
