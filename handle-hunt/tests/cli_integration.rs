// handle-hunt/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn handle_hunt() -> Command {
    let mut cmd = Command::cargo_bin("handle-hunt").unwrap();
    // Keep user config and env out of the run
    cmd.env_remove("HH_CONFIG")
        .env_remove("HH_TIMEOUT")
        .env_remove("HH_PLATFORMS")
        .env_remove("HH_BIND")
        .env_remove("HH_CONCURRENCY")
        .env_remove("HH_USER_AGENT");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    handle_hunt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("platforms"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_platforms_lists_builtin_ids() {
    handle_hunt()
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("instagram"))
        .stdout(predicate::str::contains("tiktok"))
        .stdout(predicate::str::contains("twitter"));
}

#[test]
fn test_platforms_json() {
    let output = handle_hunt().args(["platforms", "--json"]).output().unwrap();
    assert!(output.status.success());

    let platforms: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(platforms.len(), 8);
    assert_eq!(platforms[0], "github");
}

#[test]
fn test_invalid_handle_fails() {
    handle_hunt()
        .args(["check", "bad handle", "-P", "github"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid handle"));
}

#[test]
fn test_invalid_timeout_fails() {
    handle_hunt()
        .args(["--timeout", "soon", "platforms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_unsupported_platform_check_is_offline() {
    handle_hunt()
        .args(["check", "alice", "-P", "myspace", "--batch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("myspace"))
        .stdout(predicate::str::contains("UNSUPPORTED"))
        .stdout(predicate::str::contains("1 unknown"));
}

#[test]
fn test_unsupported_platform_json() {
    let output = handle_hunt()
        .args(["check", "alice", "-P", "myspace", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let verdicts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verdicts[0]["platform"], "myspace");
    assert_eq!(verdicts[0]["verified"], true);
    assert!(verdicts[0]["available"].is_null());
}

#[test]
fn test_explicit_config_file_is_validated() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "[defaults]\nconcurrency = 0\n").unwrap();

    handle_hunt()
        .args(["--config", file.path().to_str().unwrap(), "platforms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[test]
fn test_missing_config_file_fails() {
    handle_hunt()
        .args(["--config", "/nonexistent/handle-hunt.toml", "platforms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_env_value_fails() {
    handle_hunt()
        .env("HH_CONCURRENCY", "0")
        .arg("platforms")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("HH_CONCURRENCY"));
}
