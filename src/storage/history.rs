//! Append-only history tables
//!
//! Each history table is a JSON-lines file. Every appended row gets a
//! `revision_id` (starting at 1) and a `recorded_at` timestamp, the way a
//! database would fill those columns in on insert.
//!
//! The last revision of a table is read from disk on its first append and
//! counted in memory afterwards, so a directory must have a single writing
//! store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};
use crate::models::PrimaryKey;

use super::file_io::{append_json_line, read_json_lines};
use super::traits::HistoryStore;

/// A history row as stored, with the store-assigned columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredHistoryRow {
    /// Insertion order within the table
    pub revision_id: u64,

    /// When the row was appended (UTC)
    pub recorded_at: DateTime<Utc>,

    #[serde(flatten)]
    pub entry: HistoryEntry,
}

/// History tables kept as JSON-lines files in one directory
pub struct JsonlHistoryStore {
    dir: PathBuf,
    last_revisions: Mutex<HashMap<String, u64>>,
}

impl JsonlHistoryStore {
    /// Create a store keeping its tables in `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            last_revisions: Mutex::new(HashMap::new()),
        }
    }

    /// Path to the file backing `table`
    pub fn table_path(&self, table: &str) -> HistoryResult<PathBuf> {
        if table.is_empty()
            || table.contains(['/', '\\'])
            || table.starts_with('.')
        {
            return Err(HistoryError::Validation(format!(
                "Invalid history table name: '{}'",
                table
            )));
        }
        Ok(self.dir.join(format!("{}.jsonl", table)))
    }

    /// Read every row of a table in insertion order
    pub fn read_all(&self, table: &str) -> HistoryResult<Vec<StoredHistoryRow>> {
        read_json_lines(self.table_path(table)?)
    }

    /// Read the most recent `count` rows of a table
    pub fn read_recent(&self, table: &str, count: usize) -> HistoryResult<Vec<StoredHistoryRow>> {
        let all_rows = self.read_all(table)?;
        let start = all_rows.len().saturating_sub(count);
        Ok(all_rows[start..].to_vec())
    }

    /// Read the rows describing one object, oldest first
    pub fn read_for_object(
        &self,
        table: &str,
        object_type: &str,
        object_id: &PrimaryKey,
    ) -> HistoryResult<Vec<StoredHistoryRow>> {
        Ok(self
            .read_all(table)?
            .into_iter()
            .filter(|row| row.entry.object_type == object_type && &row.entry.object_id == object_id)
            .collect())
    }

    /// Number of rows in a table
    pub fn entry_count(&self, table: &str) -> HistoryResult<usize> {
        Ok(self.read_all(table)?.len())
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl HistoryStore for JsonlHistoryStore {
    fn insert_row(&self, table: &str, entry: &HistoryEntry) -> HistoryResult<bool> {
        let path = self.table_path(table)?;

        let mut last_revisions = self.last_revisions.lock().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire append lock: {}", e))
        })?;

        let last_revision = match last_revisions.get(table) {
            Some(last) => *last,
            None => last_revision_on_disk(&path)?,
        };

        let row = StoredHistoryRow {
            revision_id: last_revision + 1,
            recorded_at: Utc::now(),
            entry: entry.clone(),
        };
        append_json_line(&path, &row)?;
        last_revisions.insert(table.to_string(), row.revision_id);

        Ok(true)
    }
}

fn last_revision_on_disk(path: &Path) -> HistoryResult<u64> {
    Ok(read_json_lines::<StoredHistoryRow, _>(path)?
        .last()
        .map(|row| row.revision_id)
        .unwrap_or(0))
}
