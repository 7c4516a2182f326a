// Configuration source loading
//
// Priority order:
// 1. Environment variables (CEILO2METRICS_* prefix)
// 2. Explicit config file path (--config), else CEILO2METRICS_CONFIG
// 3. Inline config content from CEILO2METRICS_CONFIG_CONTENT
// 4. Default config file (./ceilo2metrics.toml)
// 5. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::RuntimeConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "./ceilo2metrics.toml";

/// Load configuration from the process environment and default locations.
pub fn load_or_default() -> Result<RuntimeConfig> {
    load_with_env(&StdEnvSource, None)
}

/// Load configuration from a specific file path (for CLI --config flag).
/// Returns error if the file doesn't exist or can't be parsed.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<RuntimeConfig> {
    load_with_env(&StdEnvSource, Some(path.as_ref()))
}

pub fn load_with_env<E: EnvSource>(env: &E, path: Option<&Path>) -> Result<RuntimeConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => load_from_file(env)?.unwrap_or_default(),
    };

    env_overrides::apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

fn load_from_file<E: EnvSource>(env: &E) -> Result<Option<RuntimeConfig>> {
    if let Some(path) = env.get("CONFIG") {
        return read_config_file(Path::new(&path)).map(Some);
    }

    if let Some(content) = env.get("CONFIG_CONTENT") {
        let config: RuntimeConfig = toml::from_str(&content)
            .context("Failed to parse inline config from CEILO2METRICS_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return read_config_file(default_path).map(Some);
    }

    Ok(None)
}

fn read_config_file(path: &Path) -> Result<RuntimeConfig> {
    debug!("Loading config file: {}", path.display());
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
}
