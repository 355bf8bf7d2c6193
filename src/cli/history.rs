//! History CLI commands
//!
//! Browse recorded history rows and diff two JSON documents without touching
//! storage.

use std::path::Path;

use clap::Subcommand;
use serde_json::Value;

use crate::audit::generate_diff;
use crate::config::Settings;
use crate::display::{format_change_payload, format_history_details, format_history_list};
use crate::error::{HistoryError, HistoryResult};
use crate::storage::{StoredHistoryRow, Storage};

use super::record::parse_key;

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recorded history rows
    Log {
        /// Only rows for this entity type
        #[arg(short, long)]
        entity: Option<String>,
        /// Only rows for this primary key (requires --entity)
        #[arg(short, long, requires = "entity")]
        id: Option<String>,
        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Print every row with its change payload
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show what changed between two JSON documents
    Diff {
        /// The earlier document
        old: String,
        /// The later document
        new: String,
    },
}

/// Handle a history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HistoryCommands,
) -> HistoryResult<()> {
    match cmd {
        HistoryCommands::Log {
            entity,
            id,
            limit,
            verbose,
        } => {
            let rows = select_rows(storage, settings, entity.as_deref(), id.as_deref(), limit)?;

            if verbose && !rows.is_empty() {
                for row in &rows {
                    println!("{}", format_history_details(row));
                }
            } else {
                println!("{}", format_history_list(&rows));
            }
        }

        HistoryCommands::Diff { old, new } => {
            let old = read_json_file(&old)?;
            let new = read_json_file(&new)?;

            let payload = generate_diff(&new, &old, &settings.flattener()?);
            println!("{}", format_change_payload(&payload));
        }
    }

    Ok(())
}

/// Rows of the configured history table, filtered and limited to the most
/// recent `limit`
pub fn select_rows(
    storage: &Storage,
    settings: &Settings,
    entity: Option<&str>,
    id: Option<&str>,
    limit: usize,
) -> HistoryResult<Vec<StoredHistoryRow>> {
    let table = &settings.history_table;

    let rows = match entity {
        Some(entity) => {
            let config = settings.mapper_config(entity);
            let object_type = config.object_type();
            match id {
                Some(id) => {
                    storage
                        .history()
                        .read_for_object(table, object_type, &parse_key(id))?
                }
                None => storage
                    .history()
                    .read_all(table)?
                    .into_iter()
                    .filter(|row| row.entry.object_type == object_type)
                    .collect(),
            }
        }
        None => return storage.history().read_recent(table, limit),
    };

    let start = rows.len().saturating_sub(limit);
    Ok(rows[start..].to_vec())
}

fn read_json_file(path: &str) -> HistoryResult<Value> {
    let text = std::fs::read_to_string(Path::new(path))
        .map_err(|e| HistoryError::Io(format!("Failed to read {}: {}", path, e)))?;
    Ok(serde_json::from_str(&text)?)
}
