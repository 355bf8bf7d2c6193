//! history-mapper - record persistence with automatic revision history
//!
//! Every save or delete routed through a [`HistoryMapper`] is compared with
//! the record's prior state and written to a history table as one row:
//! who made the change, what kind of change it was, and which leaf values
//! were added or removed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `audit`: Flattening, value diffing and change classification
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record trait, primary keys and schemaless documents
//! - `storage`: Record and history store traits with JSON file backends
//! - `services`: The history mapper and actor sources
//! - `cli`: Command handlers for the `history` binary
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use history_mapper::config::{HistoryPaths, Settings};
//! use history_mapper::storage::Storage;
//!
//! let paths = HistoryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{HistoryError, HistoryResult};
pub use models::{PrimaryKey, Record};
pub use services::HistoryMapper;
