//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-rate clocks only (fast, death animation, level)
//! - Seeded RNG only
//! - Stable iteration order (lane index, then actor order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod entity;
pub mod event;
pub mod game;
pub mod home;
pub mod lane;
pub mod player;
pub mod powerup;
pub mod river;
pub mod road;
pub mod schedule;
pub mod timer;

pub use actor::{Actor, ActorKind, Direction};
pub use entity::Entity;
pub use event::{DeathCause, GameEvent, LifeChange, Outcome};
pub use game::{GameManager, GamePhase, Move, SpriteView};
pub use home::{HomeManager, HomeSlot, HomeState};
pub use lane::Lane;
pub use player::{Facing, PlayerBounds, PlayerManager, PlayerState, SpriteFrame};
pub use powerup::{Powerup, PowerupKind, PowerupManager, RandomSource, SpawnArea};
pub use river::River;
pub use road::{Road, RoadTick};
pub use schedule::{TickCounts, TickScheduler};
pub use timer::LevelTimeManager;
