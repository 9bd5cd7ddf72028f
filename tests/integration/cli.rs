//! CLI surface checks: help text, version, argument validation.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("depsync")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("sync")
                .and(predicate::str::contains("validate")),
        );
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("depsync")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("depsync"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    Command::cargo_bin("depsync")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    Command::cargo_bin("depsync")
        .unwrap()
        .args(["--verbose", "--quiet", "validate"])
        .assert()
        .failure();
}
