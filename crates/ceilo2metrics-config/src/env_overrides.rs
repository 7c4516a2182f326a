use super::{FailureMode, LogFormat, RuntimeConfig};
use anyhow::{anyhow, Context, Result};

pub const ENV_PREFIX: &str = "CEILO2METRICS_";

/// Abstraction over environment-variable lookups so tests can supply their
/// own source of overrides.
pub trait EnvSource {
    /// Get a variable by its name WITHOUT the CEILO2METRICS_ prefix
    fn get(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the runtime config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .context("Invalid CEILO2METRICS_LOG_FORMAT value")?;
    }

    // Pipeline
    if let Some(policy) = get_env_string(env, "FAILURE_POLICY") {
        config.pipeline.failure_policy = policy
            .parse::<FailureMode>()
            .context("Invalid CEILO2METRICS_FAILURE_POLICY value")?;
    }

    // Output
    if let Some(pretty) = get_env_bool(env, "OUTPUT_PRETTY")? {
        config.output.pretty = pretty;
    }
    if let Some(field) = get_env_string(env, "RESULTS_FIELD") {
        config.output.results_field = field;
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key)
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
