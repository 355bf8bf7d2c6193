//! Revision history data structures
//!
//! Defines the change status, the `{added, removed}` payload and the history
//! row written for every successful save or delete.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HistoryError, HistoryResult};
use crate::models::PrimaryKey;

/// Kind of change recorded in a history row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was created
    Create,
    /// Record was updated
    Update,
    /// Record was deleted
    Delete,
}

impl Operation {
    /// Storage form (`create`, `update`, `delete`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// The portions of a record that changed
///
/// Creates only carry `added`, deletes only carry `removed`, updates carry both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<Value>,
}

impl ChangePayload {
    pub fn added(value: Value) -> Self {
        Self {
            added: Some(value),
            removed: None,
        }
    }

    pub fn removed(value: Value) -> Self {
        Self {
            added: None,
            removed: Some(value),
        }
    }

    /// Encode to the string stored in the `object` column
    pub fn encode(&self) -> HistoryResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HistoryError::Encoding(format!("Failed to encode change payload: {}", e)))
    }

    /// Decode a stored `object` column
    pub fn decode(encoded: &str) -> HistoryResult<Self> {
        serde_json::from_str(encoded)
            .map_err(|e| HistoryError::Encoding(format!("Failed to decode change payload: {}", e)))
    }
}

/// One immutable revision history row
///
/// Field names match the history table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Primary key of the affected record
    pub object_id: PrimaryKey,

    /// Logical type name of the record
    pub object_type: String,

    /// Encoded change payload
    pub object: String,

    /// Kind of change
    pub status: Operation,

    /// Who made the change
    pub user: String,
}

impl HistoryEntry {
    /// Build a row, encoding the payload for storage
    pub fn new(
        object_id: PrimaryKey,
        object_type: impl Into<String>,
        payload: &ChangePayload,
        status: Operation,
        user: impl Into<String>,
    ) -> HistoryResult<Self> {
        Ok(Self {
            object_id,
            object_type: object_type.into(),
            object: payload.encode()?,
            status,
            user: user.into(),
        })
    }

    /// Decode the stored change payload
    pub fn payload(&self) -> HistoryResult<ChangePayload> {
        ChangePayload::decode(&self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_operation_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Operation::Delete).unwrap(), json!("delete"));
        assert_eq!(Operation::Update.as_str(), "update");
    }

    #[test]
    fn test_payload_omits_missing_side() {
        let created = ChangePayload::added(json!({"title": ""}));
        assert_eq!(created.encode().unwrap(), r#"{"added":{"title":""}}"#);

        let deleted = ChangePayload::removed(json!({"id": 42}));
        assert_eq!(deleted.encode().unwrap(), r#"{"removed":{"id":42}}"#);
    }

    #[test]
    fn test_entry_columns() {
        let entry = HistoryEntry::new(
            PrimaryKey::Int(42),
            "article",
            &ChangePayload::removed(json!({"title": "Legacy"})),
            Operation::Delete,
            "editor",
        )
        .unwrap();

        let row = serde_json::to_value(&entry).unwrap();
        assert_eq!(row["object_id"], json!(42));
        assert_eq!(row["object_type"], json!("article"));
        assert_eq!(row["status"], json!("delete"));
        assert_eq!(row["user"], json!("editor"));
        assert_eq!(
            entry.payload().unwrap(),
            ChangePayload::removed(json!({"title": "Legacy"}))
        );
    }

    #[test]
    fn test_decode_invalid_payload() {
        let err = ChangePayload::decode("not json").unwrap_err();
        assert!(matches!(err, HistoryError::Encoding(_)));
    }
}
