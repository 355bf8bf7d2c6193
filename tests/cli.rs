//! CLI integration tests for the `history` binary
//!
//! Every test points `HISTORY_MAPPER_DATA_DIR` at a fresh temp directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn history(data_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("history");
    cmd.env("HISTORY_MAPPER_DATA_DIR", data_dir.path())
        .env_remove("HISTORY_MAPPER_USER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("diff"));
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("History table:  revision_history"))
        .stdout(predicate::str::contains("Path separator: \".\""));
}

#[test]
fn save_update_and_log() {
    let dir = TempDir::new().unwrap();

    history(&dir)
        .args(["--user", "editor", "save", "article", r#"{"title": "Draft"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved article 1"));

    history(&dir)
        .args(["save", "article", r#"{"id": 1, "title": "Final"}"#])
        .assert()
        .success();

    history(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("UPDATE"))
        .stdout(predicate::str::contains("editor"))
        .stdout(predicate::str::contains("unknown"));

    history(&dir)
        .args(["log", "--entity", "article", "--id", "1", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Final\""))
        .stdout(predicate::str::contains("\"Draft\""));
}

#[test]
fn save_reads_record_file() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("record.json");
    fs::write(&record, r#"{"title": "From file"}"#).unwrap();

    history(&dir)
        .args(["save", "note", &format!("@{}", record.display())])
        .assert()
        .success()
        .stdout(predicate::str::contains("From file"));

    history(&dir)
        .args(["show", "note", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From file"))
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn save_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .args(["save", "note", "[1, 2, 3]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn delete_records_removal() {
    let dir = TempDir::new().unwrap();

    history(&dir)
        .args(["save", "note", r#"{"title": "Legacy"}"#])
        .assert()
        .success();

    history(&dir)
        .args(["delete", "note", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted note 1"));

    history(&dir)
        .args(["log", "--entity", "note"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE"));

    history(&dir)
        .args(["show", "note", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_missing_fails() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .args(["delete", "note", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found: 42"));
}

#[test]
fn log_on_empty_history() {
    let dir = TempDir::new().unwrap();
    history(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history found."));
}

#[test]
fn diff_prints_payload() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");
    fs::write(&old, r#"{"name": "x", "tags": ["a"]}"#).unwrap();
    fs::write(&new, r#"{"name": "y", "tags": ["a"]}"#).unwrap();

    history(&dir)
        .args(["diff", old.to_str().unwrap(), new.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"added\""))
        .stdout(predicate::str::contains("\"y\""))
        .stdout(predicate::str::contains("\"removed\""))
        .stdout(predicate::str::contains("\"x\""))
        .stdout(predicate::str::contains("tags").not());
}
