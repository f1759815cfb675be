//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("procedures").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("procedures").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Database URL"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let mut cmd = Command::cargo_bin("procedures").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("POSTGRES_URL")
        .arg("serve");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("POSTGRES_URL not set"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("procedures").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("procedures"));
}
