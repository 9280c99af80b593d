#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI integration tests
//!
//! These run the built binary with log output pointed at a temp file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn quill(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quill-cli"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn log_path(dir: &TempDir) -> PathBuf {
    dir.path().join("out.log")
}

fn read_entries(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_emit_writes_json_entry() {
    let dir = TempDir::new().unwrap();
    let path = log_path(&dir);

    let output = quill(&[
        "--log.paths",
        path.to_str().unwrap(),
        "--log.name",
        "cli",
        "emit",
        "--severity",
        "warn",
        "--message",
        "disk low",
        "--field",
        "free_mb=12",
        "--field",
        "mount=/var",
    ]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let entries = read_entries(&path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "WARN");
    assert_eq!(entries[0]["logger"], "cli");
    assert_eq!(entries[0]["message"], "disk low");
    assert_eq!(entries[0]["free_mb"], 12);
    assert_eq!(entries[0]["mount"], "/var");
}

#[test]
fn test_emit_verbosity_is_filtered_by_level() {
    let dir = TempDir::new().unwrap();
    let path = log_path(&dir);
    let paths = path.to_str().unwrap();

    let hidden = quill(&["--log.paths", paths, "emit", "-m", "v3", "--verbosity", "3"]);
    let shown = quill(&["--log.paths", paths, "emit", "-m", "v0", "--verbosity", "0"]);

    assert!(hidden.status.success());
    assert!(shown.status.success());
    let entries = read_entries(&path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "v0");
}

#[test]
fn test_emit_accepts_negative_verbosity() {
    let dir = TempDir::new().unwrap();
    let path = log_path(&dir);

    let output = quill(&[
        "--log.paths",
        path.to_str().unwrap(),
        "emit",
        "-m",
        "clamped",
        "--verbosity",
        "-5",
    ]);

    assert!(
        output.status.success(),
        "negative verbosity should parse. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let entries = read_entries(&path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "INFO");
    assert_eq!(entries[0]["message"], "clamped");
}

#[test]
fn test_pipe_strips_newlines_per_line() {
    let dir = TempDir::new().unwrap();
    let path = log_path(&dir);

    let mut child = Command::new(env!("CARGO_BIN_EXE_quill-cli"))
        .args(["--log.paths", path.to_str().unwrap(), "pipe", "--tier", "error"])
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"first line\nsecond line\n")
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    let entries = read_entries(&path);
    let messages: Vec<&str> = entries
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["first line", "second line"]);
    assert!(entries.iter().all(|e| e["level"] == "ERROR"));
}

#[test]
fn test_check_config_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("log.toml");
    fs::write(&config, "lvl = \"debug\"\nfmt = \"console\"\n").unwrap();

    let output = quill(&["check-config", config.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("level:   debug"));
    assert!(stdout.contains("format:  console"));
}

#[test]
fn test_check_config_rejects_unknown_level() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("log.toml");
    fs::write(&config, "level = \"chatty\"\n").unwrap();

    let output = quill(&["check-config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("chatty"));
}

#[test]
fn test_unopenable_output_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing/dir/out.log");

    let output = quill(&[
        "--log.paths",
        missing.to_str().unwrap(),
        "emit",
        "-m",
        "never written",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to build logger"));
}
