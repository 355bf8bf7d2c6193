//! Actor resolution
//!
//! The identity written to each history row is asked for on every change, so
//! it can follow whoever is currently logged in.

/// Actor recorded when nothing better is known
pub const UNKNOWN_ACTOR: &str = "unknown";

/// Supplies the identity of whoever is performing a change
pub trait ActorSource {
    fn current_actor(&self) -> String;
}

/// Always reports `"unknown"`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownActor;

impl ActorSource for UnknownActor {
    fn current_actor(&self) -> String {
        UNKNOWN_ACTOR.to_string()
    }
}

/// Always reports the same identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedActor(pub String);

impl FixedActor {
    pub fn new(actor: impl Into<String>) -> Self {
        Self(actor.into())
    }

    /// Use `actor` when given and non-empty, otherwise `"unknown"`
    pub fn or_unknown(actor: Option<&str>) -> Self {
        match actor {
            Some(name) if !name.trim().is_empty() => Self(name.trim().to_string()),
            _ => Self(UNKNOWN_ACTOR.to_string()),
        }
    }
}

impl ActorSource for FixedActor {
    fn current_actor(&self) -> String {
        self.0.clone()
    }
}

impl<F> ActorSource for F
where
    F: Fn() -> String,
{
    fn current_actor(&self) -> String {
        self()
    }
}
