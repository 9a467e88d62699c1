//! Traffic and river actors
//!
//! One tagged type covers every vehicle and every piece of floating debris.
//! Size and visual id come from the kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Travel direction of a lane and everything in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Actor types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Car,
    Bus,
    TowingCar,
    SmallLog,
    LargeLog,
}

impl ActorKind {
    /// Width and height in field units
    pub fn size(self) -> Vec2 {
        match self {
            ActorKind::Car => Vec2::new(50.0, 40.0),
            ActorKind::Bus => Vec2::new(100.0, 40.0),
            ActorKind::TowingCar => Vec2::new(100.0, 40.0),
            ActorKind::SmallLog => Vec2::new(100.0, 40.0),
            ActorKind::LargeLog => Vec2::new(150.0, 40.0),
        }
    }

    /// Logs float on the river; everything else drives on the road
    pub fn is_debris(self) -> bool {
        matches!(self, ActorKind::SmallLog | ActorKind::LargeLog)
    }

    /// Sprite identifier for the presentation layer
    pub fn visual_id(self) -> &'static str {
        match self {
            ActorKind::Car => "car",
            ActorKind::Bus => "bus",
            ActorKind::TowingCar => "towing_car",
            ActorKind::SmallLog => "small_log",
            ActorKind::LargeLog => "large_log",
        }
    }
}

/// A moving vehicle or piece of debris
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub entity: Entity,
    pub kind: ActorKind,
    pub direction: Direction,
    speed: u32,
}

impl Actor {
    /// Build an actor of the given kind. Speed is clamped to at least 1.
    pub fn new(kind: ActorKind, speed: u32, direction: Direction) -> Self {
        let speed = speed.max(1);
        Self {
            entity: Entity::new(kind.size(), Vec2::new(speed as f32, 0.0)),
            kind,
            direction,
            speed,
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(1);
        self.entity.step.x = self.speed as f32;
    }

    /// Signed horizontal displacement of one forward move
    pub fn velocity(&self) -> f32 {
        self.direction.sign() * self.speed as f32
    }

    pub fn move_forward(&mut self) {
        match self.direction {
            Direction::Left => self.entity.move_left(),
            Direction::Right => self.entity.move_right(),
        }
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.entity.overlaps(other)
    }
}
