//! Core data models for history-mapper
//!
//! The `Record` capability every mapped entity implements, the primary-key
//! value type, and a schemaless `Document` record.

pub mod document;
pub mod key;
pub mod record;

pub use document::Document;
pub use key::PrimaryKey;
pub use record::Record;
