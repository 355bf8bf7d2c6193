//! Configuration module for history-mapper
//!
//! This module provides configuration management including:
//! - Path resolution for record and history files
//! - User settings persistence
//! - Per-type mapping constants

pub mod entity;
pub mod paths;
pub mod settings;

pub use entity::{EntityConfig, MapperConfig};
pub use paths::HistoryPaths;
pub use settings::Settings;
