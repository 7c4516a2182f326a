// ceilo2metrics-config - Runtime configuration for the CLI
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority)
// 2. Config file path from --config or CEILO2METRICS_CONFIG
// 3. Config file contents from CEILO2METRICS_CONFIG_CONTENT
// 4. Default config file location (./ceilo2metrics.toml)
// 5. Built-in defaults (lowest priority)
//
// Command-line flags are applied on top by the binary.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, ENV_PREFIX};

pub use ceilo2metrics_core::DEFAULT_RESULTS_FIELD;

/// Main runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `ceilo2metrics_core=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Unsupported log format: {}. Supported: text, json", s),
        }
    }
}

/// Pipeline behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub failure_policy: FailureMode,
}

/// What to do with a payload entry that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Reject the whole test case
    #[default]
    AllOrNothing,
    /// Skip the entry and keep the records of the others
    Partial,
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureMode::AllOrNothing => write!(f, "all_or_nothing"),
            FailureMode::Partial => write!(f, "partial"),
        }
    }
}

impl std::str::FromStr for FailureMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all_or_nothing" | "strict" => Ok(FailureMode::AllOrNothing),
            "partial" | "lenient" => Ok(FailureMode::Partial),
            _ => anyhow::bail!(
                "Unsupported failure policy: {}. Supported: all_or_nothing, partial",
                s
            ),
        }
    }
}

/// Output rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_results_field")]
    pub results_field: String,
}

fn default_pretty() -> bool {
    true
}

fn default_results_field() -> String {
    DEFAULT_RESULTS_FIELD.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            results_field: default_results_field(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from default locations, falling back to built-in defaults
    pub fn load_or_default() -> Result<Self> {
        sources::load_or_default()
    }

    /// Load configuration from a specific file (for the CLI --config flag)
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Load configuration using a caller-supplied environment (useful for testing)
    pub fn load_with_env<E: EnvSource>(env: &E, path: Option<&Path>) -> Result<Self> {
        sources::load_with_env(env, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}
