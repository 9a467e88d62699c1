//! Error types
//!
//! Only configuration and persistence can fail. Tick handlers never return
//! errors: blocked moves, full lanes and taken homes are ordinary outcomes.

use thiserror::Error;

/// A broken level definition or settings file. Always fatal at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what}: expected {expected} lane definitions, got {actual}")]
    LaneCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("lane {lane}: start speed must be at least 1")]
    InvalidStartSpeed { lane: usize },

    #[error("lane {lane}: maximum actor count must be at least 1")]
    InvalidMaxActors { lane: usize },

    #[error("{what} lane {lane}: {kind:?} does not belong here")]
    WrongActorKind {
        what: &'static str,
        lane: usize,
        kind: crate::sim::ActorKind,
    },

    #[error("at least one level definition is required")]
    NoLevels,

    #[error("invalid setting `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure writing the high score board.
#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
