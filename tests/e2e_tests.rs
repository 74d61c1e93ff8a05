//! End-to-end tests for the drvup CLI
//!
//! These tests run the compiled binary and verify:
//! - Help and version surfaces
//! - Argument validation exit codes
//! - Aborted cycles exit non-zero with a single summary line on stderr
//!
//! No test here touches the network or a real GPU: the query command
//! and feed URL are overridden to deterministic local failures.

use assert_cmd::Command;
use predicates::prelude::*;

fn drvup() -> Command {
    Command::cargo_bin("drvup").expect("binary builds")
}

#[test]
fn test_help_describes_the_tool() {
    drvup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("driver update checker"));
}

#[test]
fn test_version_flag() {
    drvup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("drvup"));
}

#[test]
fn test_zero_chunk_size_is_a_usage_error() {
    drvup()
        .args(["--chunk-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_invalid_chunk_size_suffix_is_a_usage_error() {
    drvup()
        .args(["--chunk-size", "10x"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_failed_version_query_aborts() {
    let dir = tempfile::tempdir().unwrap();

    // `false` exists but exits non-zero: a hard oracle failure that
    // aborts before any network activity
    drvup()
        .args([
            "--query-cmd",
            "false",
            "--dir",
            dir.path().to_str().unwrap(),
            "--no-color",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Update aborted:"))
        .stderr(predicate::str::contains("driver version query"));
}

#[test]
fn test_unreachable_feed_aborts_with_resolution_error() {
    let dir = tempfile::tempdir().unwrap();

    // Missing query tool is the legitimate "not installed" state, so
    // the cycle proceeds to resolution and fails on the dead feed URL
    drvup()
        .args([
            "--query-cmd",
            "drvup-e2e-no-such-query-tool",
            "--feed-url",
            "http://127.0.0.1:9/latest.json",
            "--timeout",
            "2",
            "--dir",
            dir.path().to_str().unwrap(),
            "--no-color",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Update aborted:"))
        .stderr(predicate::str::contains("resolve latest release"));
}
