//! Tests for error handling, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn nexy(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nexy").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1");
    for (key, _) in std::env::vars() {
        if key.starts_with("NEXY_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

#[test]
fn test_error_with_suggestions_unsupported_database() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["new", "shop", "--database", "oracle", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported database option 'oracle'"))
        .stderr(predicate::str::contains("postgresql"))
        .stderr(predicate::str::contains("sqlite"));

    assert!(!temp.path().join("shop").exists());
}

#[test]
fn test_error_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["new", ".hidden", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn test_error_invalid_entity_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("requirements.txt"), "nexy\n").unwrap();

    nexy(temp.path())
        .args(["generate", "model", "1user"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid entity name"));
}

#[test]
fn test_generate_outside_project_is_not_found() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["generate", "controller", "user"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nexy new"));
}

#[test]
fn test_port_zero_is_rejected() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["port", "--start", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid port 0"));
}

#[test]
fn test_settings_without_config_script() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .arg("settings")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config.py"));
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["config", "get", "ports.begin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key 'ports.begin'"))
        .stderr(predicate::str::contains("nexy config list"));
}

#[test]
fn test_invalid_config_value_is_rejected() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["config", "set", "ports.start", "not-a-port"])
        .assert()
        .code(2);
}

#[test]
fn test_malformed_config_file_exits_with_config_code() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".nexy.toml"), "[ports\nstart = ").unwrap();

    nexy(temp.path())
        .args(["port", "--next"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path())
        .args(["--config", "absent.toml", "port"])
        .assert()
        .code(4);
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let temp = TempDir::new().unwrap();
    nexy(temp.path()).arg("deploy").assert().code(2);
}

#[test]
fn test_verbose_shows_error_chain() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".nexy.toml"), "[ports]\nstart = \"many\"\n").unwrap();

    nexy(temp.path())
        .args(["-v", "port"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
