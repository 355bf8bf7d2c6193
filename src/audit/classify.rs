//! Change classification
//!
//! Decides whether a before/after pair is a create, update or delete from the
//! presence of a primary key on each side, and builds the matching payload.
//!
//! | old id | new id | status | payload                          |
//! |--------|--------|--------|----------------------------------|
//! | empty  | empty  | error  | none                             |
//! | empty  | set    | create | `{added: old}`                   |
//! | set    | empty  | delete | `{removed: old}`                 |
//! | set    | set    | update | `generate_diff(new, old)`        |
//!
//! The create payload is built from the *old* snapshot (the template), not
//! from the freshly written record.

use serde_json::Value;

use super::diff::generate_diff;
use super::entry::{ChangePayload, Operation};
use super::flatten::Flattener;
use crate::error::{HistoryError, HistoryResult};
use crate::models::PrimaryKey;

/// Outcome of classifying one before/after pair
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub object_id: PrimaryKey,
    pub status: Operation,
    pub payload: ChangePayload,
}

/// Classify a change between two nested snapshots
///
/// `new` is the state after the operation (the template on delete), `old`
/// the state before it (the template on create).
pub fn classify(
    new: &Value,
    old: &Value,
    primary_key: &str,
    flattener: &Flattener,
) -> HistoryResult<Classification> {
    let new_id = PrimaryKey::from_record(new, primary_key);
    let old_id = PrimaryKey::from_record(old, primary_key);

    match (new_id, old_id) {
        (None, None) => Err(HistoryError::IdentityMissing),
        (None, Some(old_id)) => Ok(Classification {
            object_id: old_id,
            status: Operation::Delete,
            payload: ChangePayload::removed(old.clone()),
        }),
        (Some(new_id), None) => Ok(Classification {
            object_id: new_id,
            status: Operation::Create,
            payload: ChangePayload::added(old.clone()),
        }),
        (Some(new_id), Some(_)) => Ok(Classification {
            object_id: new_id,
            status: Operation::Update,
            payload: generate_diff(new, old, flattener),
        }),
    }
}
