//! JSON file helpers for the record and history stores
//!
//! Record tables are rewritten whole through a temp file and a rename, so a
//! crash leaves either the old table or the new one. History tables are JSON
//! lines that only ever grow.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::HistoryError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> HistoryError {
    HistoryError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn ensure_parent(path: &Path) -> Result<(), HistoryError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))
        }
        _ => Ok(()),
    }
}

/// Read a JSON table; a missing file reads as `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, HistoryError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace a JSON table atomically
///
/// The data goes to `<path>.tmp`, is synced, then renamed over `path`.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), HistoryError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", path, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| storage_error("flush", &temp_path, e.error()))?;
    file.sync_all()
        .map_err(|e| storage_error("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_error("replace", path, e)
    })
}

/// Append one value as a JSON line, flushing immediately
pub fn append_json_line<T, P>(path: P, data: &T) -> Result<(), HistoryError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    let line = serde_json::to_string(data)
        .map_err(|e| HistoryError::Encoding(format!("Failed to serialize row: {}", e)))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| storage_error("open", path, e))?;

    writeln!(file, "{}", line).map_err(|e| storage_error("append to", path, e))?;
    file.flush().map_err(|e| storage_error("flush", path, e))
}

/// Read every non-empty JSON line of a file; a missing file reads as empty
pub fn read_json_lines<T, P>(path: P) -> Result<Vec<T>, HistoryError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;

    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| storage_error("read", path, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let row = serde_json::from_str(&line).map_err(|e| {
            HistoryError::Storage(format!(
                "Failed to parse line {} of {}: {}",
                index + 1,
                path.display(),
                e
            ))
        })?;
        rows.push(row);
    }

    Ok(rows)
}
