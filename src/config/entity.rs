//! Per-type mapping configuration
//!
//! Each mapped entity type carries a fixed set of names: where its records
//! live, which field is the primary key, and how its history rows are
//! labelled. They are plain values handed to a mapper when it is built.

use serde::{Deserialize, Serialize};

/// Default history table name
pub const DEFAULT_HISTORY_TABLE: &str = "revision_history";

/// Default primary-key field name
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Mapping constants for one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Primary table holding the records
    pub table: String,
    /// Field holding the primary key
    pub primary_key: String,
    /// Logical name of the mapped type
    pub mapped_type: String,
    /// Table that receives history rows
    pub history_table: String,
    /// Overrides `mapped_type` as the history `object_type` when non-empty
    pub history_name: Option<String>,
}

impl MapperConfig {
    pub fn new(mapped_type: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            mapped_type: mapped_type.into(),
            history_table: DEFAULT_HISTORY_TABLE.to_string(),
            history_name: None,
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn with_history_table(mut self, history_table: impl Into<String>) -> Self {
        self.history_table = history_table.into();
        self
    }

    pub fn with_history_name(mut self, history_name: impl Into<String>) -> Self {
        self.history_name = Some(history_name.into());
        self
    }

    /// Value written to the history `object_type` column
    pub fn object_type(&self) -> &str {
        match self.history_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.mapped_type,
        }
    }
}

/// An entity type as described in `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Name used on the command line and as the mapped type
    pub name: String,

    /// Primary table; defaults to the entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Primary-key field
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// History `object_type` override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_name: Option<String>,
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

impl EntityConfig {
    /// Configuration for an entity that only has a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            primary_key: default_primary_key(),
            history_name: None,
        }
    }

    pub fn table(&self) -> &str {
        self.table.as_deref().unwrap_or(&self.name)
    }

    /// Build the mapper configuration, writing history to `history_table`
    pub fn to_mapper_config(&self, history_table: &str) -> MapperConfig {
        let mut config = MapperConfig::new(&self.name, self.table())
            .with_primary_key(&self.primary_key)
            .with_history_table(history_table);
        config.history_name = self.history_name.clone();
        config
    }
}
