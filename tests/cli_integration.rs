//! Integration tests for the `tl` CLI.
//!
//! Each test creates a temp data directory, runs `tl` as a subprocess,
//! and verifies stdout and/or the stored files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `tl` binary.
fn tl_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tl");
    path
}

/// Run `tl` against the data dir `dir`, returning (stdout, stderr, success).
fn run_tl(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let data_dir = dir.join("data");
    let config = dir.join("config.toml");
    let output = Command::new(tl_bin())
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("TASKLIST_LOG")
        .output()
        .expect("failed to run tl");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tl` expecting success, return stdout.
fn run_tl_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tl(dir, args);
    if !success {
        panic!("tl {:?} failed:\nstdout: {}\nstderr: {}", args, stdout, stderr);
    }
    stdout
}

/// Add a task and return its id.
fn add(dir: &Path, title: &str) -> String {
    run_tl_ok(dir, &["add", title]).trim().to_string()
}

fn titles(dir: &Path, filter: &str) -> Vec<String> {
    let out = run_tl_ok(dir, &["list", "--filter", filter, "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    parsed["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0 items left\n");
}

#[test]
fn test_list_reads_stored_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("todo.tasks.v1"),
        r#"[{"id":"a","title":"Buy milk","completed":false},{"id":"b","title":"Walk dog","completed":true}]"#,
    )
    .unwrap();

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "[ ] a Buy milk\n[x] b Walk dog\n1 item left\n");

    let out = run_tl_ok(tmp.path(), &["list", "--filter", "completed"]);
    assert_eq!(out, "[x] b Walk dog\n1 item left\n");
}

#[test]
fn test_corrupt_data_lists_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("todo.tasks.v1"), "{not json").unwrap();

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0 items left\n");
}

#[test]
fn test_bad_filter_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_tl(tmp.path(), &["list", "--filter", "someday"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["add", "  Buy", "milk  "]);
    let id = out.trim();
    assert!(!id.is_empty());

    let stored = fs::read_to_string(tmp.path().join("data/todo.tasks.v1")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed[0]["id"], id);
    assert_eq!(parsed[0]["title"], "Buy milk");
    assert_eq!(parsed[0]["completed"], false);
}

#[test]
fn test_add_blank_is_silent() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["add", "   "]);
    assert_eq!(out, "");
    assert!(!tmp.path().join("data/todo.tasks.v1").exists());
}

#[test]
fn test_done_undo_and_clear() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "A");
    add(tmp.path(), "B");

    run_tl_ok(tmp.path(), &["done", &a]);
    assert_eq!(titles(tmp.path(), "completed"), vec!["A"]);
    assert_eq!(titles(tmp.path(), "active"), vec!["B"]);

    run_tl_ok(tmp.path(), &["undo", &a]);
    assert_eq!(titles(tmp.path(), "completed"), Vec::<String>::new());

    run_tl_ok(tmp.path(), &["done", &a]);
    run_tl_ok(tmp.path(), &["clear"]);
    assert_eq!(titles(tmp.path(), "all"), vec!["B"]);
}

#[test]
fn test_rename_and_rm() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "A");

    run_tl_ok(tmp.path(), &["rename", &a, "Renamed", "task"]);
    assert_eq!(titles(tmp.path(), "all"), vec!["Renamed task"]);

    // Blank rename keeps the old title
    run_tl_ok(tmp.path(), &["rename", &a, " "]);
    assert_eq!(titles(tmp.path(), "all"), vec!["Renamed task"]);

    run_tl_ok(tmp.path(), &["rm", &a]);
    assert_eq!(titles(tmp.path(), "all"), Vec::<String>::new());
}

#[test]
fn test_unknown_id_is_noop() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "A");

    let out = run_tl_ok(tmp.path(), &["done", "missing"]);
    assert_eq!(out, "");
    let out = run_tl_ok(tmp.path(), &["rm", "missing", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["changed"], false);
    assert_eq!(titles(tmp.path(), "all"), vec!["A"]);
}

#[test]
fn test_reorder_and_mv() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "A");
    let b = add(tmp.path(), "B");
    let c = add(tmp.path(), "C");

    run_tl_ok(tmp.path(), &["reorder", &b, &a]);
    assert_eq!(titles(tmp.path(), "all"), vec!["B", "A", "C"]);

    run_tl_ok(tmp.path(), &["mv", &c, "--before", &b]);
    assert_eq!(titles(tmp.path(), "all"), vec!["C", "B", "A"]);

    run_tl_ok(tmp.path(), &["mv", &c, "--end"]);
    assert_eq!(titles(tmp.path(), "all"), vec!["B", "A", "C"]);
}

#[test]
fn test_mv_requires_target() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_tl(tmp.path(), &["mv", "x"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Theme and config tests
// ---------------------------------------------------------------------------

#[test]
fn test_theme_toggle_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_tl_ok(tmp.path(), &["theme"]), "dark\n");
    assert_eq!(run_tl_ok(tmp.path(), &["theme", "toggle"]), "light\n");
    assert_eq!(run_tl_ok(tmp.path(), &["theme"]), "light\n");

    let stored = fs::read_to_string(tmp.path().join("data/todo.theme.v1")).unwrap();
    assert_eq!(stored, "\"light\"");
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[storage\n").unwrap();

    let (stdout, stderr, success) = run_tl(tmp.path(), &["list"]);
    assert!(success);
    assert_eq!(stdout, "0 items left\n");
    assert!(stderr.contains("using defaults"));
}
