//! CLI command handlers
//!
//! Subcommand definitions and the handlers that run them against storage.

pub mod history;
pub mod record;

pub use history::{handle_history_command, HistoryCommands};
pub use record::{handle_record_command, open_mapper, DocumentMapper, RecordCommands};
