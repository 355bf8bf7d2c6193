//! Storage layer for history-mapper
//!
//! Collaborator traits for primary records and history rows, plus JSON file
//! implementations of both with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod history;
pub mod records;
pub mod traits;

pub use file_io::{read_json, write_json_atomic};
pub use history::{JsonlHistoryStore, StoredHistoryRow};
pub use records::JsonRecordStore;
pub use traits::{HistoryStore, RecordStore};

use crate::config::{EntityConfig, HistoryPaths, Settings};
use crate::error::HistoryError;
use crate::models::Record;

/// Storage coordinator handing out record tables and the history store
pub struct Storage {
    paths: HistoryPaths,
    history: JsonlHistoryStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HistoryPaths, settings: &Settings) -> Result<Self, HistoryError> {
        paths.ensure_directories()?;

        let history_dir = paths.history_dir(settings.history_database.as_deref());
        Ok(Self {
            history: JsonlHistoryStore::new(history_dir),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &HistoryPaths {
        &self.paths
    }

    /// The history store
    pub fn history(&self) -> &JsonlHistoryStore {
        &self.history
    }

    /// Open the record table of an entity type
    pub fn records<R: Record>(
        &self,
        entity: &EntityConfig,
    ) -> Result<JsonRecordStore<R>, HistoryError> {
        JsonRecordStore::open(self.paths.table_file(entity.table()), &entity.primary_key)
    }
}
