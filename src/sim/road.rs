//! Road traffic simulation
//!
//! Owns an ordered stack of lanes built from lane settings. Lane 0 sits at the
//! bottom. Every `VEHICLE_ACTION_TICKS` ticks each lane tries to admit one more
//! actor and traffic permanently speeds up by the level's delta.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::entity::Entity;
use super::lane::Lane;
use crate::consts::{ACTOR_OFFSET, SLOWED_SPEED, VEHICLE_ACTION_TICKS};
use crate::error::ConfigError;
use crate::settings::{LaneSettings, check_lanes};

/// What happened during one road tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoadTick {
    /// Actors admitted at lane edges this tick
    pub actors_added: usize,
    /// A slow-down window closed and speeds were restored
    pub slow_down_ended: bool,
}

/// A stack of vehicle lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    lane_settings: Vec<LaneSettings>,
    lanes: Vec<Lane>,
    lane_height: f32,
    current_tick: u32,
    /// Ticks left before slowed traffic returns to start speeds
    slow_down_remaining: Option<u32>,
}

impl Road {
    /// Build a road of exactly `lane_count` lanes and lay it out
    pub fn new(
        lane_count: usize,
        lane_settings: &[LaneSettings],
        lane_height: f32,
        total_height: f32,
        lane_length: f32,
    ) -> Result<Self, ConfigError> {
        Self::build(
            "road",
            false,
            lane_count,
            lane_settings,
            lane_height,
            total_height,
            lane_length,
        )
    }

    pub(crate) fn build(
        what: &'static str,
        debris: bool,
        lane_count: usize,
        lane_settings: &[LaneSettings],
        lane_height: f32,
        total_height: f32,
        lane_length: f32,
    ) -> Result<Self, ConfigError> {
        check_lanes(what, lane_count, lane_settings, debris)?;

        let mut road = Self {
            lane_settings: lane_settings.to_vec(),
            lanes: Vec::with_capacity(lane_count),
            lane_height,
            current_tick: 0,
            slow_down_remaining: None,
        };
        road.set_up_lanes(total_height, lane_length);
        Ok(road)
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    /// Every actor, bottom lane first
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.lanes.iter().flat_map(|lane| lane.actors())
    }

    pub fn actor_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_down_remaining.is_some()
    }

    /// Top edge of the actors in lane `index`
    pub fn lane_y(&self, total_height: f32, index: usize) -> f32 {
        total_height - self.lane_height * (index as f32 + 1.0) + ACTOR_OFFSET
    }

    /// Rebuild every lane from its settings and lay the actors out
    pub fn set_up_lanes(&mut self, total_height: f32, lane_length: f32) {
        self.lanes = self.lane_settings.iter().copied().map(Lane::new).collect();
        for i in 0..self.lanes.len() {
            let y = self.lane_y(total_height, i);
            let lane = &mut self.lanes[i];
            lane.set_actor_ys(y);
            lane.place_all(lane_length);
        }
    }

    /// Advance traffic by one fast tick
    pub fn on_tick(&mut self, lane_length: f32, speed_delta: u32) -> RoadTick {
        let mut report = RoadTick::default();
        self.current_tick += 1;

        if let Some(remaining) = self.slow_down_remaining {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                report.slow_down_ended = self.reset_speeds();
            } else {
                self.slow_down_remaining = Some(remaining);
            }
        }

        if self.current_tick >= VEHICLE_ACTION_TICKS {
            report.actors_added = self
                .lanes
                .iter_mut()
                .map(|lane| lane.add_actor_at_edge(lane_length) as usize)
                .sum();
            // Slowed traffic stays slow until the window closes
            if self.slow_down_remaining.is_none() {
                self.increase_all_speeds_by(speed_delta);
            }
            self.current_tick = 0;
        }

        self.move_actors(lane_length);
        report
    }

    pub(crate) fn move_actors(&mut self, lane_length: f32) {
        for lane in &mut self.lanes {
            lane.move_actors(lane_length);
        }
    }

    /// Whether `other` overlaps any actor. Always false while disabled.
    pub fn check_collision(&self, other: &Entity, disabled: bool) -> bool {
        if disabled {
            return false;
        }
        self.lanes.iter().any(|lane| lane.check_collision(other))
    }

    /// Drop every actor to a crawl for `duration_ticks` ticks
    pub fn slow_down_vehicles(&mut self, duration_ticks: u32) {
        self.current_tick = 0;
        self.slow_down_remaining = Some(duration_ticks);
        for lane in &mut self.lanes {
            lane.set_all_speeds(SLOWED_SPEED);
        }
        log::debug!("Traffic slowed for {} ticks", duration_ticks);
    }

    pub fn increase_all_speeds_by(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        for lane in &mut self.lanes {
            lane.increase_speeds_by(amount);
        }
    }

    /// Raise start speeds; survives later lane rebuilds
    pub fn increase_start_speed_by(&mut self, amount: u32) {
        for settings in &mut self.lane_settings {
            settings.start_speed += amount;
        }
        for lane in &mut self.lanes {
            lane.increase_start_speed_by(amount);
        }
    }

    /// Raise lane capacity; survives later lane rebuilds
    pub fn increase_max_actors_by(&mut self, amount: usize) {
        for settings in &mut self.lane_settings {
            settings.max_actors += amount;
        }
        for lane in &mut self.lanes {
            lane.increase_max_actors_by(amount);
        }
    }

    /// Restore every lane's start speed. This also ends a running slow-down;
    /// returns whether one was cut short or expired.
    pub fn reset_speeds(&mut self) -> bool {
        for lane in &mut self.lanes {
            lane.reset_speeds();
        }
        let ended = self.slow_down_remaining.take().is_some();
        if ended {
            log::debug!("Slow-down ended");
        }
        ended
    }
}
