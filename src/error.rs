//! Custom error types for history-mapper
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for history-mapper operations
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Neither the old nor the new snapshot carries a primary key
    #[error("Object failed to save. History can not be saved.")]
    IdentityMissing,

    /// A storage collaborator failed (load, write, delete or history insert)
    #[error("Storage error: {0}")]
    Storage(String),

    /// The change payload or a record could not be encoded/decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },
}

impl HistoryError {
    /// Create a "not found" error for a record of the given type
    pub fn record_not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    /// Check if this is the missing-identity failure raised while recording history
    pub fn is_identity_missing(&self) -> bool {
        matches!(self, Self::IdentityMissing)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for history-mapper operations
pub type HistoryResult<T> = Result<T, HistoryError>;
