//! Record repository for JSON storage
//!
//! Keeps one table of records in memory and persists the whole table to a JSON
//! file after every change. Records without a primary key are given the next
//! integer id, like an autoincrement column.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HistoryError, HistoryResult};
use crate::models::{PrimaryKey, Record};

use super::file_io::{read_json, write_json_atomic};
use super::traits::RecordStore;

/// Serializable table data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TableData {
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    records: Vec<Value>,
}

#[derive(Debug, Default)]
struct TableState {
    next_id: i64,
    records: BTreeMap<PrimaryKey, Value>,
}

/// Repository for one table of records
#[derive(Debug)]
pub struct JsonRecordStore<R> {
    path: PathBuf,
    primary_key: String,
    data: RwLock<TableState>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonRecordStore<R> {
    /// Create an empty repository backed by `path`
    pub fn new(path: PathBuf, primary_key: impl Into<String>) -> Self {
        Self {
            path,
            primary_key: primary_key.into(),
            data: RwLock::new(TableState::default()),
            _record: PhantomData,
        }
    }

    /// Create a repository and load whatever is already on disk
    pub fn open(path: PathBuf, primary_key: impl Into<String>) -> HistoryResult<Self> {
        let store = Self::new(path, primary_key);
        store.load_table()?;
        Ok(store)
    }

    /// Load the table from disk, replacing anything held in memory
    pub fn load_table(&self) -> HistoryResult<()> {
        let file_data: TableData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.records.clear();
        data.next_id = file_data.next_id;
        for record in file_data.records {
            let id = PrimaryKey::from_record(&record, &self.primary_key).ok_or_else(|| {
                HistoryError::Storage(format!(
                    "Record without {} in {}",
                    self.primary_key,
                    self.path.display()
                ))
            })?;
            if let Some(i) = id.as_int() {
                data.next_id = data.next_id.max(i);
            }
            data.records.insert(id, record);
        }

        Ok(())
    }

    fn persist(&self, state: &TableState) -> HistoryResult<()> {
        let file_data = TableData {
            next_id: state.next_id,
            records: state.records.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// All records, ordered by primary key
    pub fn get_all(&self) -> HistoryResult<Vec<R>> {
        let data = self.data.read().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        data.records.values().cloned().map(R::from_nested).collect()
    }

    /// Count records
    pub fn count(&self) -> HistoryResult<usize> {
        let data = self.data.read().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.records.len())
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

impl<R: Record> RecordStore<R> for JsonRecordStore<R> {
    fn load(&self, id: &PrimaryKey) -> HistoryResult<Option<R>> {
        let data = self.data.read().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        data.records.get(id).cloned().map(R::from_nested).transpose()
    }

    fn write(&self, record: R) -> HistoryResult<R> {
        let mut nested = record.to_nested()?;
        let Some(fields) = nested.as_object_mut() else {
            return Err(HistoryError::Validation(
                "Only records with named fields can be stored".into(),
            ));
        };

        let mut data = self.data.write().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let (id, next_id) = match fields.get(&self.primary_key).and_then(PrimaryKey::from_value) {
            Some(id) => {
                let next_id = id.as_int().map_or(data.next_id, |i| data.next_id.max(i));
                (id, next_id)
            }
            None => {
                let next_id = data.next_id + 1;
                fields.insert(self.primary_key.clone(), Value::from(next_id));
                (PrimaryKey::Int(next_id), next_id)
            }
        };

        // The record must decode before the table changes
        let persisted = R::from_nested(nested.clone())?;

        let previous_next_id = std::mem::replace(&mut data.next_id, next_id);
        let previous = data.records.insert(id.clone(), nested);

        if let Err(e) = self.persist(&data) {
            data.next_id = previous_next_id;
            match previous {
                Some(old) => data.records.insert(id, old),
                None => data.records.remove(&id),
            };
            return Err(e);
        }

        Ok(persisted)
    }

    fn remove(&self, id: &PrimaryKey) -> HistoryResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.records.remove(id).is_some();
        if removed {
            self.persist(&data)?;
        }

        Ok(removed)
    }
}
