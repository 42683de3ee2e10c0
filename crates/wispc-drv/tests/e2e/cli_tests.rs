//! End-to-end tests that run the `wispc` binary as a subprocess against
//! fixture source files, checking stdout/stderr/exit code the way a
//! user invoking the CLI would observe them.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("e2e").join("fixtures")
}

fn wispc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wispc"))
}

#[test]
fn prints_program_output_to_stdout() {
    let input_path = fixtures_dir().join("hello.txt");

    Command::new(wispc_bin()).arg(&input_path).assert().success().stdout(predicate::str::contains("hello, world"));
}

#[test]
fn evaluates_arithmetic_and_prints_the_result() {
    let input_path = fixtures_dir().join("arithmetic.txt");

    Command::new(wispc_bin()).arg(&input_path).assert().success().stdout("14\n");
}

#[test]
fn undefined_name_exits_non_zero_with_a_stderr_message() {
    let input_path = fixtures_dir().join("name_error.txt");

    Command::new(wispc_bin())
        .arg(&input_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("NameError"));
}

#[test]
fn missing_file_exits_non_zero() {
    let dir = tempdir().unwrap();
    let missing_path = dir.path().join("does_not_exist.txt");

    Command::new(wispc_bin())
        .arg(&missing_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(missing_path.display().to_string()));
}
