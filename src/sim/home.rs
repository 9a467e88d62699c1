//! Home slots along the top boundary
//!
//! First touch wins: a slot that has been reached stays taken until the next
//! level resets the row.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::HOME_TOLERANCE_FACTOR;

/// Occupancy of a home slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HomeState {
    #[default]
    Open,
    Taken,
}

/// One goal position on the home row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSlot {
    pub entity: Entity,
    state: HomeState,
}

impl HomeSlot {
    fn new(x: f32, y: f32, tile: f32) -> Self {
        let mut entity = Entity::new(Vec2::splat(tile), Vec2::ZERO);
        entity.set_position(x, y);
        Self {
            entity,
            state: HomeState::Open,
        }
    }

    pub fn state(&self) -> HomeState {
        self.state
    }

    pub fn is_taken(&self) -> bool {
        self.state == HomeState::Taken
    }

    /// Tight positional match, not a box overlap
    fn matches(&self, player: &Entity, tolerance: f32) -> bool {
        (player.x() - self.entity.x()).abs() < tolerance
            && (player.y() - self.entity.y()).abs() < tolerance
    }
}

/// The fixed row of home slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeManager {
    slots: Vec<HomeSlot>,
    tolerance: f32,
}

impl HomeManager {
    /// Lay `count` slots evenly across `wall_width` at height `y`, snapped to
    /// the tile grid. The first two slots shift one tile left and the last
    /// one tile right so the row stays centered on the grid.
    pub fn new(y: f32, wall_width: f32, count: usize, tile: f32) -> Self {
        let spacing = wall_width / count.max(1) as f32;
        let mut slots: Vec<HomeSlot> = (0..count)
            .map(|i| {
                let raw = wall_width - spacing * (i as f32 + 1.0) + tile;
                let x = (raw / tile).round() * tile;
                HomeSlot::new(x, y, tile)
            })
            .collect();

        if count >= 3 {
            slots[0].entity.pos.x -= tile;
            slots[1].entity.pos.x -= tile;
            slots[count - 1].entity.pos.x += tile;
        }

        Self {
            slots,
            tolerance: tile * HOME_TOLERANCE_FACTOR,
        }
    }

    pub fn slots(&self) -> &[HomeSlot] {
        &self.slots
    }

    pub fn taken_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_taken()).count()
    }

    /// Take the first open slot matching the player. Returns its index.
    pub fn check_collision(&mut self, player: &Entity) -> Option<usize> {
        let tolerance = self.tolerance;
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.is_taken() && slot.matches(player, tolerance))?;
        slot.state = HomeState::Taken;
        log::debug!("Home slot {} taken", index);
        Some(index)
    }

    /// Reopen every slot for the next level
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.state = HomeState::Open;
        }
    }
}
