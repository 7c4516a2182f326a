// Configuration validation
//
// Validates that values are usable before any fixture is processed

use crate::*;
use anyhow::{bail, Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    validate_log_config(&config.log)?;
    validate_output_config(&config.output)?;

    if config.pipeline.failure_policy == FailureMode::Partial {
        warn!("pipeline.failure_policy is 'partial'; invalid payload entries will be skipped");
    }

    Ok(())
}

fn validate_log_config(config: &LogConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        bail!("log.level must not be empty");
    }

    EnvFilter::try_new(&config.level)
        .with_context(|| format!("log.level '{}' is not a valid filter directive", config.level))?;

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<()> {
    if config.results_field.is_empty() {
        bail!("output.results_field must not be empty");
    }

    if config.results_field != DEFAULT_RESULTS_FIELD {
        warn!(
            results_field = %config.results_field,
            "output.results_field differs from '{}'; downstream fixture readers may not find results",
            DEFAULT_RESULTS_FIELD
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_log_config() {
        let valid = LogConfig {
            level: "ceilo2metrics_core=debug,info".to_string(),
            format: LogFormat::Json,
        };
        assert!(validate_log_config(&valid).is_ok());

        let empty = LogConfig {
            level: "  ".to_string(),
            format: LogFormat::Text,
        };
        assert!(validate_log_config(&empty).is_err());

        let garbage = LogConfig {
            level: "ceilo2metrics=verbose".to_string(),
            format: LogFormat::Text,
        };
        assert!(validate_log_config(&garbage).is_err());
    }

    #[test]
    fn test_validate_output_config() {
        assert!(validate_output_config(&OutputConfig::default()).is_ok());

        let renamed = OutputConfig {
            pretty: true,
            results_field: "actualResults".to_string(),
        };
        assert!(validate_output_config(&renamed).is_ok());

        let empty = OutputConfig {
            pretty: true,
            results_field: String::new(),
        };
        assert!(validate_output_config(&empty).is_err());
    }
}
