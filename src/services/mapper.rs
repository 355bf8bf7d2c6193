//! History-recording mapper
//!
//! The public save/delete surface. Each call loads the prior state, delegates
//! the write to the record store, then classifies the change and appends one
//! history row.
//!
//! The primary write and the history row are not atomic with respect to each
//! other: history is only attempted once the primary effect has succeeded, so
//! a failed history write leaves a committed record with no audit row. The
//! error is still returned to the caller. Concurrent saves of the same key
//! are not coordinated here; each may diff against a stale baseline.

use std::marker::PhantomData;

use serde_json::Value;

use crate::audit::{classify, generate_diff, ChangePayload, Flattener, HistoryEntry, HistoryRecorder};
use crate::config::MapperConfig;
use crate::error::HistoryResult;
use crate::models::{PrimaryKey, Record};
use crate::storage::{HistoryStore, RecordStore};

use super::actor::ActorSource;

/// Persists records of type `R` and records every change in history
pub struct HistoryMapper<R, S, H, A> {
    config: MapperConfig,
    records: S,
    recorder: HistoryRecorder<H>,
    actor: A,
    flattener: Flattener,
    _record: PhantomData<fn() -> R>,
}

impl<R, S, H, A> HistoryMapper<R, S, H, A>
where
    R: Record,
    S: RecordStore<R>,
    H: HistoryStore,
    A: ActorSource,
{
    /// Create a mapper writing records to `records` and history to `history`
    pub fn new(config: MapperConfig, records: S, history: H, actor: A) -> Self {
        let recorder = HistoryRecorder::new(history, config.history_table.clone());
        Self {
            config,
            records,
            recorder,
            actor,
            flattener: Flattener::default(),
            _record: PhantomData,
        }
    }

    /// Use a custom flattener (e.g. a different path separator)
    pub fn with_flattener(mut self, flattener: Flattener) -> Self {
        self.flattener = flattener;
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn records(&self) -> &S {
        &self.records
    }

    pub fn history(&self) -> &H {
        self.recorder.store()
    }

    /// Primary key of a record, `None` when it has no identity yet
    pub fn primary_key_of(&self, record: &R) -> HistoryResult<Option<PrimaryKey>> {
        Ok(PrimaryKey::from_record(
            &record.to_nested()?,
            &self.config.primary_key,
        ))
    }

    /// Load a record by primary key
    pub fn load(&self, id: &PrimaryKey) -> HistoryResult<Option<R>> {
        self.records.load(id)
    }

    /// Persist a record and record the change
    ///
    /// Returns the record as persisted, which may carry a newly assigned key.
    pub fn save(&self, record: R) -> HistoryResult<R> {
        let current = match self.primary_key_of(&record)? {
            Some(id) => {
                let prior = self.records.load(&id)?;
                tracing::debug!(
                    object_type = self.config.object_type(),
                    object_id = %id,
                    found = prior.is_some(),
                    "loaded prior state"
                );
                prior.unwrap_or_else(R::template)
            }
            None => R::template(),
        };

        let saved = self.records.write(record)?;
        self.record_after_write(&saved, &current)?;

        Ok(saved)
    }

    /// Delete a record by primary key and record the removal
    ///
    /// History is only written when the store reports that the delete
    /// happened; a failed delete returns `false` without history.
    pub fn delete(&self, id: &PrimaryKey) -> HistoryResult<bool> {
        let current = self.records.load(id)?.unwrap_or_else(R::template);

        let deleted = self.records.remove(id)?;
        tracing::debug!(
            object_type = self.config.object_type(),
            object_id = %id,
            deleted,
            "delete delegated to record store"
        );

        if deleted {
            self.record_after_write(&R::template(), &current)?;
        }

        Ok(deleted)
    }

    fn record_after_write(&self, new: &R, current: &R) -> HistoryResult<HistoryEntry> {
        self.save_history(new, current).map_err(|e| {
            tracing::warn!(
                object_type = self.config.object_type(),
                error = %e,
                "primary write committed but history was not recorded"
            );
            e
        })
    }

    /// Classify the change from `current` to `new` and append a history row
    pub fn save_history(&self, new: &R, current: &R) -> HistoryResult<HistoryEntry> {
        let new_nested = new.to_nested()?;
        let old_nested = current.to_nested()?;

        let change = classify(
            &new_nested,
            &old_nested,
            &self.config.primary_key,
            &self.flattener,
        )?;
        tracing::debug!(
            object_type = self.config.object_type(),
            object_id = %change.object_id,
            status = change.status.as_str(),
            "classified change"
        );

        let entry = HistoryEntry::new(
            change.object_id,
            self.config.object_type(),
            &change.payload,
            change.status,
            self.actor.current_actor(),
        )?;
        self.recorder.record(&entry)?;

        Ok(entry)
    }

    /// Diff two records without recording anything
    pub fn generate_diff(&self, new: &R, current: &R) -> HistoryResult<ChangePayload> {
        Ok(generate_diff(
            &new.to_nested()?,
            &current.to_nested()?,
            &self.flattener,
        ))
    }

    /// Diff two nested values with this mapper's flattener
    pub fn diff_values(&self, new: &Value, current: &Value) -> ChangePayload {
        generate_diff(new, current, &self.flattener)
    }
}
