//! The Record capability
//!
//! Every mapped entity type exposes its full state as a nested JSON value.
//! The default implementation goes through serde, so most types only need
//! `impl Record for MyType {}`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{HistoryError, HistoryResult};

/// A domain entity that can be persisted and audited
pub trait Record: Serialize + DeserializeOwned + Default {
    /// Nested form of the record (maps, sequences and scalars)
    fn to_nested(&self) -> HistoryResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| HistoryError::Encoding(format!("Failed to encode record: {}", e)))
    }

    /// Rebuild a record from its nested form
    fn from_nested(value: Value) -> HistoryResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| HistoryError::Encoding(format!("Failed to decode record: {}", e)))
    }

    /// The empty template: every field at its default and no primary key
    fn template() -> Self {
        Self::default()
    }
}
