//! Integration tests for the orglens CLI
//!
//! These never reach GitHub: every run either fails configuration checks
//! before any request or points the API at a closed local port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("orglens").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("ORGANIZATION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    get_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("collaborators"))
        .stdout(predicate::str::contains("forks"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_forks_help_mentions_shield() {
    get_cmd()
        .args(["forks", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--shield"));
}

#[test]
fn test_missing_organization_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .env("GITHUB_TOKEN", "test-token")
        .arg("collaborators")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Organization required"));
}

#[test]
fn test_missing_token_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["forks", "--organization", "acme"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("GITHUB_TOKEN missing from environment"));
}

#[test]
fn test_blank_token_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .env("GITHUB_TOKEN", "   ")
        .env("ORGANIZATION", "acme")
        .arg("collaborators")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_invalid_config_file_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".orglens.toml"), "[github\napi_url = ").unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .env("GITHUB_TOKEN", "test-token")
        .args(["collaborators", "-o", "acme"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to parse configuration"));
}

#[test]
fn test_unreachable_api_is_a_runtime_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".orglens.toml"),
        "[github]\napi_url = \"http://127.0.0.1:9\"\ntimeout_secs = 5\n",
    )
    .unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .env("GITHUB_TOKEN", "test-token")
        .args(["collaborators", "-o", "acme", "--no-cache"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_cache_clear_removes_directory() {
    let temp_dir = TempDir::new().unwrap();
    let cache_dir = temp_dir.path().join("orglens-cache");
    fs::create_dir_all(cache_dir.join("acme")).unwrap();
    fs::write(cache_dir.join("acme/organization_repos.json"), "[]").unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["cache", "clear", "--cache-dir"])
        .arg(&cache_dir)
        .assert()
        .success();

    assert!(!cache_dir.exists(), "Cache directory should be removed");
}

#[test]
fn test_cache_clear_without_cache_succeeds() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["cache", "clear"])
        .assert()
        .success();
}
