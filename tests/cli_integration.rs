//! CLI integration tests
//!
//! End-to-end tests for CLI commands using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the podesk binary for testing
fn podesk_cmd() -> Command {
    let mut cmd = Command::cargo_bin("podesk").unwrap();
    cmd.env_remove("PODESK_API_URL")
        .env_remove("PODESK_API_TIMEOUT")
        .env_remove("PODESK_LOG_LEVEL")
        .env_remove("PODESK_LOG_FORMAT")
        .env_remove("PODESK_STATE_DIR")
        .env_remove("PODESK_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_output() {
    podesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("podesk"));
}

#[test]
fn test_help_shows_all_commands() {
    podesk_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("orders"))
        .stdout(predicate::str::contains("company"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_orders_help() {
    podesk_cmd()
        .args(["orders", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("podesk.toml");

    podesk_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success();

    assert!(config_path.exists());
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[api]"));
    assert!(content.contains("[wake]"));
}

#[test]
fn test_config_init_no_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("podesk.toml");

    std::fs::write(&config_path, "existing content").unwrap();

    podesk_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_completions_bash() {
    podesk_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("podesk"));
}

#[test]
fn test_health_against_dead_backend() {
    let temp_dir = TempDir::new().unwrap();

    podesk_cmd()
        .args(["health", "--json"])
        .env("PODESK_API_URL", "http://127.0.0.1:1/api")
        .env("PODESK_STATE_DIR", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"unreachable\""));
}

#[test]
fn test_orders_list_against_dead_backend_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("podesk.toml");
    // Short retry delay so the single replay doesn't slow the suite.
    std::fs::write(
        &config_path,
        "[api]\nbase_url = \"http://127.0.0.1:1/api\"\n\n[wake]\nretry_delay_seconds = 1\n",
    )
    .unwrap();

    podesk_cmd()
        .args(["orders", "list", "-c", config_path.to_str().unwrap()])
        .env("PODESK_STATE_DIR", temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("podesk.toml");
    std::fs::write(&config_path, "[api]\nbase_url = \"\"\n").unwrap();

    podesk_cmd()
        .args(["health", "-c", config_path.to_str().unwrap()])
        .env("PODESK_STATE_DIR", temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.base_url"));
}
