// galleri-config - Runtime configuration for galleri-ops
//
// Supports configuration from multiple sources:
// 1. Command-line flags (applied by the binary, highest priority)
// 2. Environment variables (GALLERI_* plus a few legacy unprefixed names)
// 3. Config file path from --config or GALLERI_CONFIG
// 4. Config file contents from GALLERI_CONFIG_CONTENT
// 5. Default config file locations (./galleri.toml, ./.galleri.toml)
// 6. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{EnvSource, ENV_PREFIX};

/// Largest batch a single DynamoDB transaction accepts.
pub const TRANSACT_ITEM_LIMIT: usize = 100;

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Deployment environment used to namespace table names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(default)]
    pub load: LoadConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Record loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Overrides the per-dataset default when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    pub on_invalid_row: InvalidRowPolicy,
    pub failure_policy: FailurePolicy,
    pub reject_duplicate_keys: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            batch_size: None,
            on_invalid_row: InvalidRowPolicy::Skip,
            failure_policy: FailurePolicy::Continue,
            reject_duplicate_keys: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Skip and count rows that do not fit the schema.
    Skip,
    /// Refuse to load a file containing any such row.
    Fail,
}

impl std::str::FromStr for InvalidRowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(InvalidRowPolicy::Skip),
            "fail" | "error" => Ok(InvalidRowPolicy::Fail),
            _ => anyhow::bail!("Unsupported invalid-row policy: {}. Supported: skip, fail", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Continue,
    Abort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" | "stop" => Ok(FailurePolicy::Abort),
            _ => anyhow::bail!("Unsupported failure policy: {}. Supported: continue, abort", s),
        }
    }
}

/// AWS client settings. Unset values fall back to the SDK's own resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Custom endpoint, e.g. LocalStack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Bounds for waiting on asynchronous deletes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub poll_interval_secs: u64,
    pub max_wait_attempts: u32,
}

impl CleanupConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Longest a single wait can take before it times out, or `None` when
    /// that does not fit in a `Duration`.
    pub fn max_wait(&self) -> Option<Duration> {
        self.poll_interval().checked_mul(self.max_wait_attempts)
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            max_wait_attempts: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl RuntimeConfig {
    /// Load configuration from all sources with priority
    pub fn load() -> Result<Self> {
        sources::load_config()
    }

    /// Load configuration from a specific file path (for CLI usage).
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Merge another config into this one (used for TOML layering).
    pub fn merge(&mut self, other: RuntimeConfig) {
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        self.load = other.load;
        self.cleanup = other.cleanup;
        self.log = other.log;

        if other.aws.region.is_some() {
            self.aws.region = other.aws.region;
        }
        if other.aws.endpoint.is_some() {
            self.aws.endpoint = other.aws.endpoint;
        }
    }

    /// Apply environment overrides from a custom source.
    pub fn apply_env_overrides_from<E: EnvSource>(&mut self, env: &E) -> Result<()> {
        env_overrides::apply_env_overrides(self, env)
    }

    /// Build a configuration from inline TOML plus overrides supplied by an
    /// `EnvSource`, without touching the host filesystem or environment.
    pub fn load_with_env<E: EnvSource>(inline_config: Option<&str>, env: &E) -> Result<Self> {
        let mut config = RuntimeConfig::default();

        if let Some(inline) = inline_config {
            let file_config: RuntimeConfig =
                toml::from_str(inline).context("Failed to parse inline config content")?;
            config.merge(file_config);
        }

        config.apply_env_overrides_from(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}
