//! Revision history for mapped records
//!
//! Every create, update and delete produces one immutable history row that
//! describes what changed.
//!
//! # Architecture
//!
//! - `Flattener`: converts nested records to path/leaf maps and back.
//! - `diff` / `generate_diff`: value-presence comparison of two snapshots,
//!   returned as a nested `{added, removed}` `ChangePayload`.
//! - `classify`: decides create/update/delete from primary-key presence.
//! - `HistoryEntry`: the row written to the history table.
//! - `HistoryRecorder`: appends rows through a `HistoryStore`.
//!
//! # Example
//!
//! ```rust
//! use history_mapper::audit::{generate_diff, Flattener};
//! use serde_json::json;
//!
//! let payload = generate_diff(
//!     &json!({"status": "published"}),
//!     &json!({"status": "draft"}),
//!     &Flattener::default(),
//! );
//! assert_eq!(payload.added, Some(json!({"status": "published"})));
//! assert_eq!(payload.removed, Some(json!({"status": "draft"})));
//! ```

mod classify;
mod diff;
mod entry;
mod flatten;
mod recorder;

pub use classify::{classify, Classification};
pub use diff::{canonical_scalar, diff, generate_diff};
pub use entry::{ChangePayload, HistoryEntry, Operation};
pub use flatten::{FlatSnapshot, Flattener, DEFAULT_SEPARATOR};
pub use recorder::HistoryRecorder;
