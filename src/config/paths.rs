//! Path management for history-mapper
//!
//! ## Path Resolution Order
//!
//! 1. `HISTORY_MAPPER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`directories::ProjectDirs`), e.g.
//!    `~/.config/history-mapper` on Linux

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HistoryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HISTORY_MAPPER_DATA_DIR";

/// Manages all paths used by history-mapper
#[derive(Debug, Clone)]
pub struct HistoryPaths {
    /// Base directory for all history-mapper data
    base_dir: PathBuf,
}

impl HistoryPaths {
    /// Create a new HistoryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HistoryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create HistoryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding primary record tables
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding history tables
    ///
    /// A named history database gets its own subdirectory, standing in for a
    /// separate history connection.
    pub fn history_dir(&self, database: Option<&str>) -> PathBuf {
        let dir = self.base_dir.join("history");
        match database {
            Some(name) if !name.is_empty() => dir.join(name),
            _ => dir,
        }
    }

    /// Path of the JSON file backing a primary table
    pub fn table_file(&self, table: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", table))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base, data and history directories exist
    pub fn ensure_directories(&self) -> Result<(), HistoryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HistoryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HistoryError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.history_dir(None))
            .map_err(|e| HistoryError::Io(format!("Failed to create history directory: {}", e)))?;

        Ok(())
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, HistoryError> {
    ProjectDirs::from("", "", "history-mapper")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HistoryError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HistoryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.history_dir(None), temp_dir.path().join("history"));
        assert_eq!(
            paths.history_dir(Some("audit_db")),
            temp_dir.path().join("history").join("audit_db")
        );
        assert_eq!(paths.history_dir(Some("")), temp_dir.path().join("history"));
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HistoryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.table_file("articles"),
            temp_dir.path().join("data").join("articles.json")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HistoryPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.history_dir(None).exists());
        assert!(!paths.is_initialized());
    }
}
