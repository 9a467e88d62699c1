//! Turtler - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (traffic, river, home slots, player, power-ups, level clock)
//! - `settings`: Data-driven game configuration and level definitions
//! - `highscores`: Score records handed off when a game ends
//! - `error`: Configuration and persistence failures

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, HighScoreError};
pub use highscores::{HighScores, ScoreRecord};
pub use settings::{GameSettings, LaneSettings, LevelSettings, PowerupSettings};

/// Game constants that are not part of a level definition
pub mod consts {
    /// Simulation clock period (milliseconds)
    pub const FAST_TICK_MS: u64 = 15;
    /// Death animation clock period (milliseconds)
    pub const DEATH_TICK_MS: u64 = 250;
    /// Level clock period (milliseconds)
    pub const LEVEL_TICK_MS: u64 = 1000;
    /// Maximum fast ticks run per scheduler advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vertical inset of an actor inside its lane
    pub const ACTOR_OFFSET: f32 = 5.0;
    /// Fast ticks between vehicle actions (spawn attempt + speed ramp)
    pub const VEHICLE_ACTION_TICKS: u32 = 150;
    /// Speed every actor drops to while a slow-down is in effect
    pub const SLOWED_SPEED: u32 = 1;

    /// Home slot match tolerance, as a fraction of the tile size
    pub const HOME_TOLERANCE_FACTOR: f32 = 0.2;
}
