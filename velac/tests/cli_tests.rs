//! CLI integration tests for the velac driver: exit codes and the shape of
//! diagnostic output on the happy and error paths.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn velac_bin() -> Command {
    Command::cargo_bin("velac").expect("velac binary should build")
}

fn write_source(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp source file");
    write!(file, "{}", contents).expect("failed to write temp source file");
    file
}

#[test]
fn test_cli_help() {
    let mut cmd = velac_bin();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("velac"));
}

#[test]
fn test_cli_version() {
    let mut cmd = velac_bin();
    cmd.arg("--version");

    cmd.assert().success();
}

#[test]
fn test_check_valid_source_exits_zero_with_no_output() {
    let file = write_source("i32 x = 1;");
    let mut cmd = velac_bin();
    cmd.arg("check").arg(file.path());

    cmd.assert().success().stderr(predicate::str::is_empty());
}

#[test]
fn test_check_invalid_source_exits_nonzero_with_diagnostic() {
    let file = write_source("i32 x; i32 x;");
    let mut cmd = velac_bin();
    cmd.arg("check").arg(file.path());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_ast_prints_tree_on_success() {
    let file = write_source("i32 x = 1;");
    let mut cmd = velac_bin();
    cmd.arg("ast").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Start"));
}

#[test]
fn test_check_missing_file_is_a_driver_error_not_a_diagnostic() {
    let mut cmd = velac_bin();
    cmd.arg("check").arg("/nonexistent/path/to/source.vela");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
