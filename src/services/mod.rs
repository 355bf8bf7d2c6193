//! Service layer for history-mapper
//!
//! The history-recording mapper and the actor sources it asks for the
//! identity of whoever is making a change.

pub mod actor;
pub mod mapper;

pub use actor::{ActorSource, FixedActor, UnknownActor, UNKNOWN_ACTOR};
pub use mapper::HistoryMapper;
