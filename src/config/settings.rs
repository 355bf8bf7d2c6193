//! User settings for history-mapper
//!
//! Path separator used for flattening, the default actor, where history rows
//! go, and the configured entity types.

use serde::{Deserialize, Serialize};

use super::entity::{EntityConfig, MapperConfig, DEFAULT_HISTORY_TABLE};
use super::paths::HistoryPaths;
use crate::audit::{Flattener, DEFAULT_SEPARATOR};
use crate::error::{HistoryError, HistoryResult};
use crate::storage::write_json_atomic;

/// User settings for history-mapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Separator joining path segments when records are flattened
    #[serde(default = "default_separator")]
    pub path_separator: String,

    /// Actor recorded when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_actor: Option<String>,

    /// Table receiving history rows
    #[serde(default = "default_history_table")]
    pub history_table: String,

    /// Separate history database (subdirectory), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_database: Option<String>,

    /// Configured entity types
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_history_table() -> String {
    DEFAULT_HISTORY_TABLE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            path_separator: default_separator(),
            default_actor: None,
            history_table: default_history_table(),
            history_database: None,
            entities: Vec::new(),
        }
    }
}

impl Settings {
    /// Load `config.json`, falling back to defaults when it does not exist
    ///
    /// Nothing is written here; `init` decides when settings are persisted.
    pub fn load_or_create(paths: &HistoryPaths) -> HistoryResult<Self> {
        let path = paths.settings_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| HistoryError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| HistoryError::Config(format!("Invalid {}: {}", path.display(), e)))?;
        settings.flattener()?;

        Ok(settings)
    }

    /// Write settings to `config.json`
    pub fn save(&self, paths: &HistoryPaths) -> HistoryResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Flattener using the configured separator
    pub fn flattener(&self) -> HistoryResult<Flattener> {
        Flattener::new(&self.path_separator)
    }

    /// Look up an entity type, falling back to defaults for unknown names
    pub fn entity(&self, name: &str) -> EntityConfig {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .unwrap_or_else(|| EntityConfig::named(name))
    }

    /// Mapper configuration for an entity type
    pub fn mapper_config(&self, name: &str) -> MapperConfig {
        self.entity(name).to_mapper_config(&self.history_table)
    }
}
