//! River simulation
//!
//! Same lane mechanics as the road, but every lane starts full and the player
//! rides the debris instead of dodging it.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::entity::Entity;
use super::lane::Lane;
use super::road::Road;
use crate::error::ConfigError;
use crate::settings::LaneSettings;

/// A stack of debris lanes above the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct River {
    road: Road,
    /// Bottom edge of the river band
    start_of_river: f32,
    /// Top edge of the river band
    end_of_river: f32,
}

impl River {
    pub fn new(
        lane_count: usize,
        lane_settings: &[LaneSettings],
        lane_height: f32,
        total_height: f32,
        lane_length: f32,
    ) -> Result<Self, ConfigError> {
        let road = Road::build(
            "river",
            true,
            lane_count,
            lane_settings,
            lane_height,
            total_height,
            lane_length,
        )?;

        let mut river = Self {
            road,
            start_of_river: total_height,
            end_of_river: total_height - lane_height * lane_count as f32,
        };
        river.fill_lanes(lane_length);
        Ok(river)
    }

    /// Debris must always be present, so every lane is filled to capacity
    fn fill_lanes(&mut self, lane_length: f32) {
        for lane in self.road.lanes_mut() {
            while lane.add_actor() {}
            lane.place_all(lane_length);
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        self.road.lanes()
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.road.actors()
    }

    pub fn start_of_river(&self) -> f32 {
        self.start_of_river
    }

    pub fn end_of_river(&self) -> f32 {
        self.end_of_river
    }

    /// Whether the player's row lies on the water
    pub fn contains(&self, player: &Entity) -> bool {
        player.y() < self.start_of_river && player.y() >= self.end_of_river
    }

    /// Whether the player stands on any debris
    pub fn is_riding(&self, player: &Entity) -> bool {
        self.road.check_collision(player, false)
    }

    /// Player on the water with nothing underneath
    pub fn is_drowning(&self, player: &Entity) -> bool {
        self.contains(player) && !self.is_riding(player)
    }

    /// Advance all debris. Returns the horizontal carry for a player standing
    /// on debris (sign follows the debris direction), or 0.
    pub fn move_river_objects(&mut self, lane_length: f32, player: &Entity) -> f32 {
        let carry = self
            .road
            .lanes()
            .iter()
            .find_map(|lane| lane.find_overlapping(player))
            .map(Actor::velocity)
            .unwrap_or(0.0);

        self.road.move_actors(lane_length);
        carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ActorKind, Direction};
    use glam::Vec2;

    fn river() -> River {
        let settings = [
            LaneSettings::new(2, Direction::Right, 3, ActorKind::LargeLog),
            LaneSettings::new(3, Direction::Left, 4, ActorKind::SmallLog),
        ];
        River::new(2, &settings, 50.0, 400.0, 650.0).unwrap()
    }

    fn player_at(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(Vec2::splat(50.0), Vec2::splat(50.0));
        e.set_position(x, y);
        e
    }

    #[test]
    fn test_lanes_start_full() {
        let river = river();
        assert_eq!(river.lanes()[0].len(), 3);
        assert_eq!(river.lanes()[1].len(), 4);
        assert_eq!(river.end_of_river(), 300.0);
    }

    #[test]
    fn test_road_kinds_rejected() {
        let settings = [LaneSettings::new(2, Direction::Right, 3, ActorKind::Car)];
        assert!(matches!(
            River::new(1, &settings, 50.0, 400.0, 650.0),
            Err(ConfigError::WrongActorKind { what: "river", .. })
        ));
    }

    #[test]
    fn test_carry_follows_debris_direction() {
        let mut river = river();
        // Lane 1 moves left; its first log starts at x=0, y=305
        let on_log = player_at(20.0, 300.0);
        assert!(river.is_riding(&on_log));
        assert_eq!(river.move_river_objects(650.0, &on_log), -3.0);

        // Lane 0 moves right; its first log starts at the far edge
        let lane0_x = river.lanes()[0].actors()[1].entity.x();
        let on_right_log = player_at(lane0_x + 10.0, 350.0);
        assert_eq!(river.move_river_objects(650.0, &on_right_log), 2.0);
    }

    #[test]
    fn test_no_carry_off_debris_but_debris_still_moves() {
        let mut river = river();
        let before: Vec<f32> = river.actors().map(|a| a.entity.x()).collect();
        let ashore = player_at(300.0, 500.0);
        assert_eq!(river.move_river_objects(650.0, &ashore), 0.0);
        let after: Vec<f32> = river.actors().map(|a| a.entity.x()).collect();
        assert!(before.iter().zip(&after).all(|(b, a)| b != a));
    }

    #[test]
    fn test_drowning_only_on_water() {
        let river = river();
        assert!(!river.is_drowning(&player_at(300.0, 400.0)));
        assert!(!river.contains(&player_at(300.0, 250.0)));
        let in_gap = player_at(106.0, 300.0);
        // Lane 1: 4 small logs of 100 in 650 => gap of 62.5 after each log
        assert!(river.is_drowning(&in_gap));
    }
}
