use anyhow::Result;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn testdata_path(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("testdata")
        .join(filename)
}

/// Run the binary from an empty directory so no stray ./ceilo2metrics.toml is picked up.
fn run_cli(args: &[&str]) -> Output {
    let workdir = TempDir::new().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_ceilo2metrics"))
        .args(args)
        .current_dir(workdir.path())
        .env_remove("CEILO2METRICS_CONFIG")
        .env_remove("CEILO2METRICS_CONFIG_CONTENT")
        .env_remove("CEILO2METRICS_LOG_LEVEL")
        .env_remove("CEILO2METRICS_FAILURE_POLICY")
        .env_remove("CEILO2METRICS_OUTPUT_PRETTY")
        .env_remove("CEILO2METRICS_RESULTS_FIELD")
        .output()
        .expect("Failed to run binary")
}

fn fixture_arg() -> String {
    testdata_path("ceilometer_fixtures.json")
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ceilometer"));
    assert!(stdout.contains("--file"));
    assert!(stdout.contains("--test"));
    assert!(stdout.contains("--partial"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_cli_version() {
    let output = run_cli(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ceilo2metrics"));
}

#[test]
fn test_cli_converts_real_sample() -> Result<()> {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "ceilometerDiskRead"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let document: JsonValue = serde_json::from_slice(&output.stdout)?;

    let results = document["ceilometerDiskRead"]["validatedResults"]
        .as_array()
        .expect("results should be attached");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["metric_name"], "ceilometer_disk_device_read");
    assert_eq!(results[0]["values"][0], 18872832);
    assert_eq!(results[0]["labels"]["unit"], "B");

    // Other cases are echoed untouched
    assert!(document["computeNodeSamples"].get("validatedResults").is_none());
    assert!(document["malformedOsloMessage"].is_object());
    Ok(())
}

#[test]
fn test_cli_all_or_nothing_failure() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "missingCounterVolume"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missingCounterVolume"));
    assert!(stderr.contains("counter_volume"));
}

#[test]
fn test_cli_partial_keeps_valid_entries() -> Result<()> {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "missingCounterVolume", "--partial", "--compact"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);

    let document: JsonValue = serde_json::from_str(&stdout)?;
    let results = document["missingCounterVolume"]["validatedResults"]
        .as_array()
        .expect("results should be attached");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["item_key"], "cpu_percent_instance-1_idle");
    Ok(())
}

#[test]
fn test_cli_malformed_message() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "malformedOsloMessage"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MalformedEnvelope"));
}

#[test]
fn test_cli_missing_test_case() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "doesNotExist"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not find test 'doesNotExist'"));
}

#[test]
fn test_cli_argument_errors() {
    let output = run_cli(&["-t", "ceilometerDiskRead"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_cli(&["-f", "fixture.json", "--bogus"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_list() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "--list"]);

    assert!(output.status.success());
    let names: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(
        names,
        vec![
            "ceilometerDiskRead",
            "computeNodeSamples",
            "missingCounterVolume",
            "malformedOsloMessage"
        ]
    );
}

#[test]
fn test_cli_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("ceilo2metrics.toml");
    std::fs::write(
        &config_path,
        "[output]\nresults_field = \"actualResults\"\npretty = false\n",
    )?;

    let fixture = fixture_arg();
    let output = run_cli(&[
        "-f",
        &fixture,
        "-t",
        "computeNodeSamples",
        "-c",
        &config_path.to_string_lossy(),
    ]);

    assert!(output.status.success());
    let document: JsonValue = serde_json::from_slice(&output.stdout)?;
    let results = document["computeNodeSamples"]["actualResults"]
        .as_array()
        .expect("results should be attached under the configured field");
    assert_eq!(results.len(), 2);
    assert_eq!(results[1]["values"][0], 512.5);
    assert_eq!(results[1]["labels"]["type"], "gauge");
    assert_eq!(results[0]["labels"]["type"], "base");
    Ok(())
}

#[test]
fn test_cli_all_stops_on_first_failure() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "--all"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_partial_policy_warning_reaches_stderr() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "computeNodeSamples", "--partial", "-v", "warn"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failure_policy is 'partial'"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_invalid_log_level() {
    let fixture = fixture_arg();
    let output = run_cli(&["-f", &fixture, "-t", "computeNodeSamples", "-v", "ceilo2metrics=verbose"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"));
}
