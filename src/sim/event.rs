//! Outward-facing game events
//!
//! The game manager queues these while handling ticks and moves; the
//! presentation layer drains them once per frame.

use serde::{Deserialize, Serialize};

use super::powerup::PowerupKind;

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Vehicle,
    /// Fell in, or was carried off the field
    Water,
    /// Reached the top without landing on an open home
    Wall,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeChange {
    Lost(DeathCause),
    /// Awarded on level-up
    BonusLife,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LivesChanged { lives: u32, change: LifeChange },
    ScoreChanged { score: u32 },
    LevelChanged { level: u32 },
    PowerUpTriggered(PowerupKind),
    SlowDownEnded,
    /// Traffic admitted new vehicles at the lane edges
    ActorAdded { count: usize },
    GameOver(Outcome),
}
