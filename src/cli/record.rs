//! Record CLI commands
//!
//! Save, delete and show records of any configured entity type. Every write
//! goes through a [`HistoryMapper`] so each change lands in the history table.

use std::path::Path;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_history_list;
use crate::error::{HistoryError, HistoryResult};
use crate::models::{Document, PrimaryKey};
use crate::services::{FixedActor, HistoryMapper};
use crate::storage::{JsonRecordStore, JsonlHistoryStore, Storage};

/// Mapper over schemaless records backed by the JSON file stores
pub type DocumentMapper<'a> =
    HistoryMapper<Document, JsonRecordStore<Document>, &'a JsonlHistoryStore, FixedActor>;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Create or update a record
    Save {
        /// Entity type name
        entity: String,
        /// Record as inline JSON, or @path to read it from a file
        record: String,
    },
    /// Delete a record
    Delete {
        /// Entity type name
        entity: String,
        /// Primary key of the record
        id: String,
    },
    /// Show a record and its history
    Show {
        /// Entity type name
        entity: String,
        /// Primary key of the record
        id: String,
    },
}

/// Build the mapper for one entity type
pub fn open_mapper<'a>(
    storage: &'a Storage,
    settings: &Settings,
    entity: &str,
    user: Option<&str>,
) -> HistoryResult<DocumentMapper<'a>> {
    let records = storage.records(&settings.entity(entity))?;
    let actor = FixedActor::or_unknown(user.or(settings.default_actor.as_deref()));

    Ok(HistoryMapper::new(
        settings.mapper_config(entity),
        records,
        storage.history(),
        actor,
    )
    .with_flattener(settings.flattener()?))
}

/// Read a record argument: inline JSON, or `@path` naming a file
pub fn read_record_arg(arg: &str) -> HistoryResult<Document> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(path)).map_err(|e| {
                HistoryError::Io(format!("Failed to read record file {}: {}", path, e))
            })?;
            Document::parse(&text)
        }
        None => Document::parse(arg),
    }
}

/// Handle a record command
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    user: Option<&str>,
    cmd: RecordCommands,
) -> HistoryResult<()> {
    match cmd {
        RecordCommands::Save { entity, record } => {
            let mapper = open_mapper(storage, settings, &entity, user)?;
            let document = read_record_arg(&record)?;

            let saved = mapper.save(document)?;
            let id = mapper
                .primary_key_of(&saved)?
                .map(|id| id.to_string())
                .unwrap_or_default();

            println!("Saved {} {}", mapper.config().object_type(), id);
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }

        RecordCommands::Delete { entity, id } => {
            let mapper = open_mapper(storage, settings, &entity, user)?;
            let key = parse_key(&id);

            if mapper.delete(&key)? {
                println!("Deleted {} {}", mapper.config().object_type(), key);
            } else {
                return Err(HistoryError::record_not_found(entity, id));
            }
        }

        RecordCommands::Show { entity, id } => {
            let mapper = open_mapper(storage, settings, &entity, user)?;
            let key = parse_key(&id);

            let record = mapper
                .load(&key)?
                .ok_or_else(|| HistoryError::record_not_found(entity.clone(), id.clone()))?;

            println!("{}", serde_json::to_string_pretty(&record)?);
            println!();

            let config = mapper.config();
            let rows = storage.history().read_for_object(
                &config.history_table,
                config.object_type(),
                &key,
            )?;
            println!("{}", format_history_list(&rows));
        }
    }

    Ok(())
}

/// Parse a primary key typed on the command line
pub(crate) fn parse_key(id: &str) -> PrimaryKey {
    match id.parse() {
        Ok(key) => key,
        Err(never) => match never {},
    }
}
