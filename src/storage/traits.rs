//! Storage collaborator traits
//!
//! The mapper never talks to files or databases directly. Primary records go
//! through a `RecordStore`, history rows through a `HistoryStore`. The two may
//! be backed by different resources and are never joined in a transaction.

use crate::audit::HistoryEntry;
use crate::error::HistoryResult;
use crate::models::{PrimaryKey, Record};

/// Persistence for one mapped record type
pub trait RecordStore<R: Record> {
    /// Load a record by primary key; `None` when no such record exists
    fn load(&self, id: &PrimaryKey) -> HistoryResult<Option<R>>;

    /// Insert or update a record, returning it as persisted
    ///
    /// A record without a primary key is assigned one.
    fn write(&self, record: R) -> HistoryResult<R>;

    /// Remove a record, returning whether anything was deleted
    fn remove(&self, id: &PrimaryKey) -> HistoryResult<bool>;
}

/// Append-only sink for history rows
pub trait HistoryStore {
    /// Insert one row into `table`, returning whether the insert succeeded
    fn insert_row(&self, table: &str, entry: &HistoryEntry) -> HistoryResult<bool>;
}

impl<R: Record, T: RecordStore<R> + ?Sized> RecordStore<R> for &T {
    fn load(&self, id: &PrimaryKey) -> HistoryResult<Option<R>> {
        (**self).load(id)
    }

    fn write(&self, record: R) -> HistoryResult<R> {
        (**self).write(record)
    }

    fn remove(&self, id: &PrimaryKey) -> HistoryResult<bool> {
        (**self).remove(id)
    }
}

impl<T: HistoryStore + ?Sized> HistoryStore for &T {
    fn insert_row(&self, table: &str, entry: &HistoryEntry) -> HistoryResult<bool> {
        (**self).insert_row(table, entry)
    }
}
