//! End-to-end tests driving the `tabrules` binary through assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("tabrules.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(
        file,
        r#"
[[routes]]
pattern = "\\.csv$"
ruleset = "orders"
priority = 10

[rulesets]
orders = ["1C REQUIRED", "2C IS NUMERIC"]
"#
    )
    .unwrap();
    config_path
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn validate_reports_failures_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let input_path = write_input(&dir, "orders.csv", "alice,42\n,notanumber\n");

    Command::cargo_bin("tabrules")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("validate")
        .arg(&input_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("row 2"));
}

#[test]
fn validate_succeeds_on_clean_data() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let input_path = write_input(&dir, "orders.csv", "alice,42\nbob,17\n");

    Command::cargo_bin("tabrules")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("validate")
        .arg(&input_path)
        .assert()
        .success();
}

#[test]
fn check_rules_reports_syntax_errors() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tabrules.toml");
    std::fs::write(
        &config_path,
        r#"
[rulesets]
broken = ["1C REQUIRED", "2C"]
"#,
    )
    .unwrap();

    Command::cargo_bin("tabrules")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("check-rules")
        .arg("broken")
        .assert()
        .failure();
}

#[test]
fn unroutable_file_fails_with_no_route_message() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let input_path = write_input(&dir, "orders.xyz", "alice,42\n");

    Command::cargo_bin("tabrules")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("validate")
        .arg(&input_path)
        .assert()
        .failure();
}
