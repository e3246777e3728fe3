//! Integration tests for the `footfall` binary.
//!
//! Argument parsing, help output, completions, the one-shot `count`
//! command, and config file handling. Nothing here opens a socket.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// `footfall` with `FOOTFALL_*` cleared and config dirs pointed at a
/// nonexistent path, so the user's real configuration is never read.
fn footfall_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("footfall");
    cmd.env("HOME", "/tmp/footfall-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/footfall-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("FOOTFALL_CONFIG")
        .env_remove("FOOTFALL_LOG_FILE")
        .env_remove("FOOTFALL_URL")
        .env_remove("FOOTFALL_DISPLAY__URL")
        .env_remove("FOOTFALL_SERVER__BIND");
    cmd
}

fn write_log(path: &Path) {
    std::fs::write(
        path,
        "2023-12-31,IN\n2024-01-01,IN\n2024-01-01,OUT\n2024-01-01,IN\n",
    )
    .unwrap();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = footfall_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in:\n{stderr}");
}

#[test]
fn test_help_lists_commands() {
    footfall_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("serve")
            .and(predicate::str::contains("display"))
            .and(predicate::str::contains("count"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    footfall_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("footfall"));
}

#[test]
fn test_completions_bash() {
    footfall_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("footfall"));
}

// ── count ───────────────────────────────────────────────────────────

#[test]
fn test_count_shared_log_prints_server_json() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("people_count.csv");
    write_log(&log);

    footfall_cmd()
        .args(["count", "--date", "2024-01-01", "--shared"])
        .arg(&log)
        .assert()
        .success()
        .stdout("{\"value\":2}\n");
}

#[test]
fn test_count_daily_log() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("2024-01-01.txt"), "08:00,IN\n08:10,IN\n08:20,IN\n").unwrap();

    footfall_cmd()
        .args(["count", "--date", "2024-01-01", "--extension", "txt", "--daily"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("{\"value\":3}\n");
}

#[test]
fn test_count_missing_log_exits_not_found() {
    let dir = tempfile::tempdir().unwrap();

    footfall_cmd()
        .args(["count", "--date", "2024-01-01", "--daily"])
        .arg(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No entry log"));
}

#[test]
fn test_count_rejects_bad_date() {
    footfall_cmd()
        .args(["count", "--date", "01/01/2024", "--shared", "people_count.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_shared_and_daily_conflict() {
    footfall_cmd()
        .args(["count", "--shared", "a.csv", "--daily", "logs"])
        .assert()
        .code(2);
}

// ── display ─────────────────────────────────────────────────────────

#[test]
fn test_display_rejects_non_http_url() {
    footfall_cmd()
        .args(["display", "--backend", "line", "--url", "ftp://192.168.0.100/count"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("display.url"));
}

#[test]
fn test_display_rejects_zero_interval() {
    footfall_cmd()
        .args(["display", "--backend", "line", "--interval", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("poll_interval_secs"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    footfall_cmd()
        .args(["config", "path", "--config", "/etc/footfall.toml"])
        .assert()
        .success()
        .stdout("/etc/footfall.toml\n");
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    footfall_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[display]"), "{written}");
    assert!(written.contains("CTH Daily"), "{written}");

    footfall_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("already exists"));

    footfall_cmd()
        .args(["config", "init", "--force", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_config_show_applies_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display]\npoll_interval_secs = 15\n").unwrap();

    footfall_cmd()
        .args(["config", "show", "--config"])
        .arg(&path)
        .env("FOOTFALL_DISPLAY__URL", "http://10.1.2.3:8000/count")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("poll_interval_secs = 15")
                .and(predicate::str::contains("http://10.1.2.3:8000/count")),
        );
}
