//! Integration tests for the modelhub command line surface.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn modelhub() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("modelhub"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("MODELHUB_API_KEY");
    cmd.env_remove("MODELHUB_PASSWORD");
    cmd
}

/// A command whose config file lives in a fresh temp dir.
fn isolated() -> (TempDir, Command) {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = modelhub();
    cmd.env("MODELHUB_CONFIG", dir.path().join("config.yaml"));
    (dir, cmd)
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    modelhub().assert().code(2).stderr(predicate::str::contains(
        "Drive the asynchronous model job service",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    modelhub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-app"))
        .stdout(predicate::str::contains("working-copy"))
        .stdout(predicate::str::contains("commit"))
        .stdout(predicate::str::contains("job-status"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command_shows_version() {
    modelhub()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "modelhub {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_no_color_env_with_any_value_is_accepted() {
    for value in ["1", "true", ""] {
        modelhub()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("modelhub"));
    }
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = modelhub()
        .args(["version", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

// --- Local validation (no network) ---

#[test]
fn test_commit_rejects_base_revision_below_minus_one() {
    let (_dir, mut cmd) = isolated();
    cmd.args([
        "commit",
        "--project",
        "P-99",
        "--working-copy",
        "WC-7",
        "--base-revision",
        "-2",
    ])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Error: Invalid base revision -2"));
}

#[test]
fn test_commit_rejection_in_json_mode_carries_code() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args([
            "commit",
            "--project",
            "P-99",
            "--working-copy",
            "WC-7",
            "--base-revision=-5",
            "--json",
        ])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["message"], "Invalid base revision -5");
    assert_eq!(value["code"], "validation_error");
}

#[test]
fn test_username_only_credentials_are_incomplete() {
    let (dir, mut cmd) = isolated();
    std::fs::write(
        dir.path().join("config.yaml"),
        "endpoints:\n  service_url: https://jobs.example.invalid\ncredentials:\n  username: ann\n",
    )
    .expect("write config");

    cmd.args(["create-app", "--name", "Foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Incomplete credentials"));
}

#[test]
fn test_missing_endpoint_is_reported() {
    let (dir, mut cmd) = isolated();
    std::fs::write(
        dir.path().join("config.yaml"),
        "credentials:\n  username: ann\n  api_key: k\n",
    )
    .expect("write config");

    cmd.args(["job-status", "J1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No job service endpoint configured",
        ));
}

#[test]
fn test_unreachable_service_is_connection_error() {
    let (dir, mut cmd) = isolated();
    std::fs::write(
        dir.path().join("config.yaml"),
        "endpoints:\n  service_url: http://127.0.0.1:9\ncredentials:\n  username: ann\n  api_key: k\n",
    )
    .expect("write config");

    cmd.args(["job-status", "J1", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""code": "connection_error""#));
}
