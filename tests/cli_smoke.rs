//! CLI smoke tests for the `chalk` binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_describes_the_tool() {
    Command::cargo_bin("chalk")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("whiteboard"))
        .stdout(predicate::str::contains("--no-tui"));
}

#[test]
fn test_version_prints() {
    Command::cargo_bin("chalk")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chalk"));
}

#[test]
fn test_headless_rejects_a_missing_prompt() {
    Command::cargo_bin("chalk")
        .unwrap()
        .arg("--no-tui")
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-blank prompt"));
}

#[test]
fn test_headless_rejects_a_blank_prompt() {
    // Must fail fast rather than wait on playback that never starts
    Command::cargo_bin("chalk")
        .unwrap()
        .args(["--no-tui", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-blank prompt"));
}

#[test]
fn test_unknown_flag_fails() {
    Command::cargo_bin("chalk")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
