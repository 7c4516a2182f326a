// ceilo2metrics - command-line front end
//
// Loads a fixture file, runs the selected test case(s) through the core
// pipeline, attaches the records under `validatedResults` and prints the
// whole document back out.

use anyhow::Context;
use ceilo2metrics_config::{FailureMode, RuntimeConfig};
use ceilo2metrics_core::{Error as PipelineError, FailurePolicy, MetricPipeline, TestFixture};
use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod error;
mod init;

pub use error::CliError;
pub use init::init_tracing;

/// Convert Ceilometer notifications in test fixtures into metric records
#[derive(Debug, Parser)]
#[command(name = "ceilo2metrics")]
#[command(version)]
#[command(about = "Convert Ceilometer notifications in test fixtures into metric records", long_about = None)]
#[command(group(ArgGroup::new("selection").required(true).args(["test", "all", "list"])))]
pub struct Cli {
    /// Fixture file mapping test names to test cases
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Name of the test case to convert
    #[arg(short = 't', long = "test", value_name = "TEST")]
    pub test: Option<String>,

    /// Convert every test case in the fixture
    #[arg(long)]
    pub all: bool,

    /// Print the fixture's test-case names and exit
    #[arg(long)]
    pub list: bool,

    /// Keep records of valid payload entries when others fail validation
    #[arg(long)]
    pub partial: bool,

    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub compact: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Parse `args` and run the command, writing the document to `out`.
pub fn run_from_args<I, T, W>(args: I, out: &mut W) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = Cli::try_parse_from(args)?;
    run(&cli, out)
}

/// Run an already parsed command.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    // Step 1: Load base configuration
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RuntimeConfig::load_or_default().context("Failed to load configuration")?,
    };

    // Step 2: Apply CLI overrides (highest priority)
    apply_cli_overrides(&mut config, cli);

    // Step 3: Initialize tracing early so validation logs show up
    init_tracing(&config);

    // Step 4: Validate the resolved configuration
    config.validate().context("Invalid configuration")?;

    let file_label = cli.file.display().to_string();
    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read fixture file: {}", file_label))?;
    let mut fixture = TestFixture::from_slice(&bytes)
        .with_context(|| format!("Failed to parse fixture file: {}", file_label))?;

    if cli.list {
        for name in fixture.case_names() {
            writeln!(out, "{}", name).context("Failed to write output")?;
        }
        return Ok(());
    }

    let names: Vec<String> = if cli.all {
        fixture.case_names().map(String::from).collect()
    } else {
        cli.test.iter().cloned().collect()
    };

    let pipeline = MetricPipeline::new(failure_policy(config.pipeline.failure_policy));
    debug!(policy = ?pipeline.policy(), tests = names.len(), "Converting fixture");

    for name in &names {
        let case = fixture.case(name).map_err(|_| CliError::TestCaseNotFound {
            name: name.clone(),
            file: file_label.clone(),
        })?;

        let outcome = pipeline.run(case).map_err(|source| pipeline_error(name, source))?;
        if !outcome.is_complete() {
            let indices: Vec<usize> = outcome.rejected.iter().map(|r| r.index).collect();
            warn!(test = %name, skipped = ?indices, "Test case only partially converted");
        }

        info!(test = %name, records = outcome.records.len(), "Validated test case");
        fixture
            .attach_results(name, &config.output.results_field, &outcome.records)
            .map_err(|source| pipeline_error(name, source))?;
    }

    let rendered = fixture
        .to_json_string(config.output.pretty)
        .context("Failed to render fixture")?;
    writeln!(out, "{}", rendered).context("Failed to write output")?;

    Ok(())
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if cli.partial {
        config.pipeline.failure_policy = FailureMode::Partial;
    }
    if cli.compact {
        config.output.pretty = false;
    }
}

fn failure_policy(mode: FailureMode) -> FailurePolicy {
    match mode {
        FailureMode::AllOrNothing => FailurePolicy::AllOrNothing,
        FailureMode::Partial => FailurePolicy::Partial,
    }
}

fn pipeline_error(test: &str, source: PipelineError) -> CliError {
    CliError::Pipeline {
        test: test.to_string(),
        source,
    }
}
