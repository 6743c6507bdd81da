// Configuration source loading.
//
// Priority order:
// 1. Environment variables (GALLERI_* prefix, then legacy raw names)
// 2. Config file path from GALLERI_CONFIG
// 3. Inline config content from GALLERI_CONFIG_CONTENT
// 4. Default config files (./galleri.toml, ./.galleri.toml)
// 5. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::*;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

const DEFAULT_CONFIG_FILES: [&str; 2] = ["./galleri.toml", "./.galleri.toml"];

/// Load configuration using native environment/file access.
pub fn load_config() -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::default();

    if let Some(file_config) = load_from_file()? {
        config.merge(file_config);
    }

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_file() -> Result<Option<RuntimeConfig>> {
    if let Ok(path) = env::var("GALLERI_CONFIG") {
        return read_config_file(Path::new(&path)).map(Some);
    }

    if let Ok(content) = env::var("GALLERI_CONFIG_CONTENT") {
        let config: RuntimeConfig = toml::from_str(&content)
            .context("Failed to parse inline config from GALLERI_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    for path in DEFAULT_CONFIG_FILES {
        let path = Path::new(path);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Using default config file");
            return read_config_file(path).map(Some);
        }
    }

    Ok(None)
}

/// Load configuration from a specific file path (for CLI --config flag).
/// Returns error if file doesn't exist or can't be parsed.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<RuntimeConfig> {
    let file_config = read_config_file(path.as_ref())?;

    let mut config = RuntimeConfig::default();
    config.merge(file_config);

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;

    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[load]\nbatch_size = 25\non_invalid_row = \"fail\"\n\n[aws]\nendpoint = \"http://localhost:4566\""
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.load.batch_size, Some(25));
        assert_eq!(config.load.on_invalid_row, InvalidRowPolicy::Fail);
        assert_eq!(config.aws.endpoint.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_config_file(Path::new("/nonexistent/galleri.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/galleri.toml"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[load]\nbatch_size = \"many\"").unwrap();
        assert!(read_config_file(file.path()).is_err());
    }
}
