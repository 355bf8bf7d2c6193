//! History recorder
//!
//! Appends one row per change to the history table through a `HistoryStore`.
//! A single insert attempt is made; there is no retry and no deduplication.

use crate::error::{HistoryError, HistoryResult};
use crate::storage::HistoryStore;

use super::entry::HistoryEntry;

/// Writes history entries to a history table
pub struct HistoryRecorder<H> {
    store: H,
    table: String,
}

impl<H: HistoryStore> HistoryRecorder<H> {
    /// Create a recorder that appends to `table` in `store`
    pub fn new(store: H, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Record an entry
    ///
    /// Store errors propagate unchanged; a store that reports the insert did
    /// not happen is turned into a storage error.
    pub fn record(&self, entry: &HistoryEntry) -> HistoryResult<()> {
        let inserted = self.store.insert_row(&self.table, entry)?;
        if !inserted {
            return Err(HistoryError::Storage(format!(
                "history insert reported failure for {} {} in table {}",
                entry.object_type, entry.object_id, self.table
            )));
        }

        tracing::info!(
            table = %self.table,
            object_type = %entry.object_type,
            object_id = %entry.object_id,
            status = entry.status.as_str(),
            user = %entry.user,
            "recorded history entry"
        );

        Ok(())
    }

    /// Name of the history table
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The underlying history store
    pub fn store(&self) -> &H {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{ChangePayload, Operation};
    use crate::models::PrimaryKey;
    use serde_json::json;
    use std::cell::RefCell;

    struct SpyStore {
        result: HistoryResult<bool>,
        calls: RefCell<Vec<(String, HistoryEntry)>>,
    }

    impl SpyStore {
        fn returning(result: HistoryResult<bool>) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl HistoryStore for SpyStore {
        fn insert_row(&self, table: &str, entry: &HistoryEntry) -> HistoryResult<bool> {
            self.calls
                .borrow_mut()
                .push((table.to_string(), entry.clone()));
            match &self.result {
                Ok(ok) => Ok(*ok),
                Err(e) => Err(HistoryError::Storage(e.to_string())),
            }
        }
    }

    fn entry() -> HistoryEntry {
        HistoryEntry::new(
            PrimaryKey::Int(1),
            "article",
            &ChangePayload::added(json!({"title": ""})),
            Operation::Create,
            "unknown",
        )
        .unwrap()
    }

    #[test]
    fn test_record_inserts_once() {
        let spy = SpyStore::returning(Ok(true));
        let recorder = HistoryRecorder::new(&spy, "history_table");

        recorder.record(&entry()).unwrap();

        let calls = spy.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "history_table");
        assert_eq!(calls[0].1, entry());
    }

    #[test]
    fn test_rejected_insert_is_an_error() {
        let spy = SpyStore::returning(Ok(false));
        let recorder = HistoryRecorder::new(&spy, "revision_history");

        let err = recorder.record(&entry()).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(spy.calls.borrow().len(), 1);
    }

    #[test]
    fn test_store_error_propagates_without_retry() {
        let spy = SpyStore::returning(Err(HistoryError::Storage("connection lost".into())));
        let recorder = HistoryRecorder::new(&spy, "revision_history");

        let err = recorder.record(&entry()).unwrap_err();
        assert!(err.to_string().contains("connection lost"));
        assert_eq!(spy.calls.borrow().len(), 1);
    }
}
