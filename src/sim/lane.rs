//! A single horizontal strip of same-typed actors
//!
//! Lanes are toroidal: an actor leaving one edge re-enters from the other,
//! so actors are recycled rather than despawned.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Direction};
use super::entity::Entity;
use crate::settings::LaneSettings;

/// A lane of actors sharing direction, kind and start speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    settings: LaneSettings,
    actors: Vec<Actor>,
    /// Uniform top edge of every actor in this lane
    y: f32,
}

impl Lane {
    /// Create a lane holding one actor at the lane's start speed
    pub fn new(settings: LaneSettings) -> Self {
        let mut lane = Self {
            settings,
            actors: Vec::with_capacity(settings.max_actors),
            y: 0.0,
        };
        lane.add_actor();
        lane
    }

    pub fn direction(&self) -> Direction {
        self.settings.direction
    }

    pub fn kind(&self) -> ActorKind {
        self.settings.kind
    }

    pub fn start_speed(&self) -> u32 {
        self.settings.start_speed
    }

    pub fn max_actors(&self) -> usize {
        self.settings.max_actors
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    fn make_actor(&self) -> Actor {
        let mut actor = Actor::new(
            self.settings.kind,
            self.settings.start_speed,
            self.settings.direction,
        );
        actor.entity.pos.y = self.y;
        actor
    }

    /// Append an actor if under capacity. Returns whether one was added.
    pub fn add_actor(&mut self) -> bool {
        if self.actors.len() >= self.settings.max_actors {
            return false;
        }
        let actor = self.make_actor();
        self.actors.push(actor);
        true
    }

    /// Append an actor just off-screen on the entry side, but only when
    /// every existing actor has cleared both lane ends.
    pub fn add_actor_at_edge(&mut self, lane_length: f32) -> bool {
        if self.actors.len() >= self.settings.max_actors
            || !self.has_space_at_edges(lane_length)
        {
            return false;
        }
        let mut actor = self.make_actor();
        let x = match self.settings.direction {
            Direction::Right => -actor.entity.width(),
            Direction::Left => lane_length,
        };
        actor.entity.pos.x = x;
        self.actors.push(actor);
        true
    }

    fn has_space_at_edges(&self, lane_length: f32) -> bool {
        self.actors.iter().all(|a| {
            let w = a.entity.width();
            a.entity.x() < lane_length - w && a.entity.x() > w
        })
    }

    /// Gap left between actors when spread evenly over the lane
    pub fn spacing(&self, lane_length: f32) -> f32 {
        if self.actors.is_empty() {
            return lane_length;
        }
        let total: f32 = self.actors.iter().map(|a| a.entity.width()).sum();
        (lane_length - total) / self.actors.len() as f32
    }

    /// Spread every actor evenly from one lane edge toward the other
    pub fn place_all(&mut self, lane_length: f32) {
        let space = self.spacing(lane_length);
        let direction = self.settings.direction;
        let mut cur_x = match direction {
            Direction::Left => 0.0,
            Direction::Right => lane_length,
        };

        for actor in &mut self.actors {
            actor.entity.pos.x = cur_x;
            let advance = actor.entity.width() + space;
            match direction {
                Direction::Left => cur_x += advance,
                Direction::Right => cur_x -= advance,
            }
        }
    }

    pub fn set_actor_ys(&mut self, y: f32) {
        self.y = y;
        for actor in &mut self.actors {
            actor.entity.pos.y = y;
        }
    }

    /// Advance every actor and wrap whatever left the lane through its exit
    /// side. An actor still approaching from the entry side keeps its course.
    pub fn move_actors(&mut self, lane_length: f32) {
        for actor in &mut self.actors {
            actor.move_forward();
            let x = actor.entity.x();
            let w = actor.entity.width();
            match actor.direction {
                Direction::Left if x < -w => actor.entity.pos.x = lane_length,
                Direction::Right if x > lane_length => actor.entity.pos.x = -w,
                _ => {}
            }
        }
    }

    pub fn check_collision(&self, other: &Entity) -> bool {
        self.actors.iter().any(|a| a.overlaps(other))
    }

    /// First actor overlapping `other`, if any
    pub fn find_overlapping(&self, other: &Entity) -> Option<&Actor> {
        self.actors.iter().find(|a| a.overlaps(other))
    }

    pub fn increase_speeds_by(&mut self, amount: u32) {
        for actor in &mut self.actors {
            actor.set_speed(actor.speed() + amount);
        }
    }

    pub fn set_all_speeds(&mut self, speed: u32) {
        for actor in &mut self.actors {
            actor.set_speed(speed);
        }
    }

    pub fn reset_speeds(&mut self) {
        self.set_all_speeds(self.settings.start_speed);
    }

    pub fn increase_start_speed_by(&mut self, amount: u32) {
        self.settings.start_speed += amount;
    }

    pub fn increase_max_actors_by(&mut self, amount: usize) {
        self.settings.max_actors += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn car_lane(direction: Direction, max: usize) -> Lane {
        Lane::new(LaneSettings::new(1, direction, max, ActorKind::Car))
    }

    #[test]
    fn test_new_lane_has_one_actor() {
        let lane = car_lane(Direction::Left, 3);
        assert_eq!(lane.len(), 1);
        assert_eq!(lane.actors()[0].speed(), 1);
    }

    #[test]
    fn test_capacity_is_a_ceiling() {
        let mut lane = car_lane(Direction::Left, 2);
        assert!(lane.add_actor());
        assert!(!lane.add_actor());
        assert_eq!(lane.len(), 2);
    }

    #[test]
    fn test_place_all_spaces_evenly() {
        let mut lane = car_lane(Direction::Left, 3);
        lane.add_actor();
        lane.add_actor();
        lane.place_all(500.0);

        let space = (500.0 - 3.0 * 50.0) / 3.0;
        let xs: Vec<f32> = lane.actors().iter().map(|a| a.entity.x()).collect();
        assert_eq!(xs[0], 0.0);
        assert!((xs[1] - (50.0 + space)).abs() < 1e-3);
        assert!((xs[2] - 2.0 * (50.0 + space)).abs() < 1e-3);
    }

    #[test]
    fn test_place_all_right_starts_at_far_edge() {
        let mut lane = car_lane(Direction::Right, 2);
        lane.add_actor();
        lane.place_all(400.0);
        assert_eq!(lane.actors()[0].entity.x(), 400.0);
        assert!(lane.actors()[1].entity.x() < 400.0);
    }

    #[test]
    fn test_spacing_guards_empty_lane() {
        let mut lane = car_lane(Direction::Left, 0);
        assert!(lane.is_empty());
        assert_eq!(lane.spacing(300.0), 300.0);
        lane.place_all(300.0);
    }

    #[test]
    fn test_edge_spawn_needs_clear_ends() {
        let mut lane = car_lane(Direction::Left, 3);
        lane.set_actor_ys(120.0);
        // The only actor sits at x=0, inside the entry clearance
        assert!(!lane.add_actor_at_edge(500.0));

        lane.actors[0].entity.pos.x = 200.0;
        assert!(lane.add_actor_at_edge(500.0));
        let added = &lane.actors()[1];
        assert_eq!(added.entity.x(), 500.0);
        assert_eq!(added.entity.y(), 120.0);
    }

    #[test]
    fn test_edge_spawn_right_enters_from_left() {
        let mut lane = car_lane(Direction::Right, 3);
        lane.actors[0].entity.pos.x = 200.0;
        assert!(lane.add_actor_at_edge(500.0));
        assert_eq!(lane.actors()[1].entity.x(), -50.0);
    }

    #[test]
    fn test_collision_overlap() {
        let mut lane = car_lane(Direction::Left, 1);
        lane.set_actor_ys(100.0);
        lane.actors[0].entity.pos.x = 100.0;

        let mut frog = Entity::new(glam::Vec2::splat(50.0), glam::Vec2::splat(50.0));
        frog.set_position(120.0, 95.0);
        assert!(lane.check_collision(&frog));
        frog.set_position(120.0, 145.0);
        assert!(!lane.check_collision(&frog));
    }

    #[test]
    fn test_actors_entering_from_off_screen_are_not_wrapped() {
        let mut lane = car_lane(Direction::Left, 1);
        lane.actors[0].entity.pos.x = 520.0;
        lane.move_actors(500.0);
        assert_eq!(lane.actors()[0].entity.x(), 519.0);

        let mut lane = car_lane(Direction::Right, 1);
        lane.actors[0].entity.pos.x = -55.0;
        lane.move_actors(500.0);
        assert_eq!(lane.actors()[0].entity.x(), -54.0);
    }

    #[test]
    fn test_speed_hooks() {
        let mut lane = car_lane(Direction::Left, 2);
        lane.add_actor();
        lane.increase_speeds_by(3);
        assert!(lane.actors().iter().all(|a| a.speed() == 4));
        lane.increase_start_speed_by(1);
        lane.reset_speeds();
        assert!(lane.actors().iter().all(|a| a.speed() == 2));
    }

    proptest! {
        #[test]
        fn prop_wraparound_keeps_actor_in_lane(
            start in -60.0f32..560.0,
            speed in 1u32..20,
            right in any::<bool>(),
        ) {
            let direction = if right { Direction::Right } else { Direction::Left };
            let mut lane = Lane::new(LaneSettings::new(speed, direction, 1, ActorKind::Car));
            lane.actors[0].entity.pos.x = start;
            let before = start + direction.sign() * speed as f32;

            lane.move_actors(500.0);
            let x = lane.actors()[0].entity.x();

            if !right && before < -50.0 {
                prop_assert_eq!(x, 500.0);
            } else if right && before > 500.0 {
                prop_assert_eq!(x, -50.0);
            } else {
                prop_assert_eq!(x, before);
            }
        }

        #[test]
        fn prop_capacity_holds(
            max in 1usize..8,
            ops in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut lane = car_lane(Direction::Left, max);
            lane.actors[0].entity.pos.x = 200.0;
            for edge in ops {
                if edge {
                    lane.add_actor_at_edge(500.0);
                } else {
                    lane.add_actor();
                }
                prop_assert!(lane.len() <= max);
            }
        }
    }
}
