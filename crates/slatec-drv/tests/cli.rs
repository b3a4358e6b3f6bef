//! CLI end-to-end tests for the `slatec` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slatec() -> Command {
    Command::cargo_bin("slatec").expect("slatec binary")
}

fn write_source(dir: &TempDir, source: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.slt");
    fs::write(&path, source).expect("write source");
    path
}

#[test]
fn test_cli_help() {
    slatec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slatec"));
}

#[test]
fn test_cli_version() {
    slatec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slatec"));
}

#[test]
fn test_cli_success_exit_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "begin end");
    slatec()
        .arg(&input)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Compilation successful"));
    assert!(dir.path().join("output/tokens.txt").exists());
    assert!(dir.path().join("errors/lexical_errors.txt").exists());
}

#[test]
fn test_cli_failure_exit_one_with_banner() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "begin y as 1 end");
    slatec()
        .arg(&input)
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("Compilation failed due to the following errors:")
                .and(predicate::str::contains("Identifier y not declared")),
        );
}

#[test]
fn test_cli_quiet_suppresses_banner() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "begin end");
    slatec()
        .arg(&input)
        .arg("--quiet")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_custom_report_dirs() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "begin end");
    slatec()
        .arg(&input)
        .args(["--output-dir", "reports/out"])
        .args(["--errors-dir", "reports/errs"])
        .current_dir(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("reports/out/parse_tree.txt").exists());
    assert!(dir.path().join("reports/errs/syntax_errors.txt").exists());
}

#[test]
fn test_cli_missing_input_exit_two() {
    let dir = TempDir::new().unwrap();
    slatec()
        .arg("does-not-exist.slt")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot open source file"));
}
