//! Player state and movement
//!
//! Lives, scored crossings and the death animation are tracked here. Whether
//! a full set of crossings completes the level is decided by the game manager.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Normal,
    /// Moved during the current fast tick
    Moving,
    /// Death animation playing
    Dying,
    /// Input ignored (between levels)
    Disabled,
    /// Terminal death frame after the last life
    Dead,
}

/// Facing, for rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// Sprite frame the presentation layer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteFrame {
    Normal,
    Moving,
    Death1,
    Death2,
    Death3,
    Dead,
}

/// Frames cycled while dying. The cycle is complete when it wraps to index 0.
pub const DEATH_CYCLE: [SpriteFrame; 4] = [
    SpriteFrame::Normal,
    SpriteFrame::Death1,
    SpriteFrame::Death2,
    SpriteFrame::Death3,
];

/// Movable area for the player's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    pub max_right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerManager {
    pub entity: Entity,
    state: PlayerState,
    facing: Facing,
    death_frame: usize,
    lives: u32,
    scored: u32,
    win_target: u32,
    score: u32,
    base_score_award: u32,
    bounds: PlayerBounds,
}

impl PlayerManager {
    pub fn new(
        lives: u32,
        win_target: u32,
        base_score_award: u32,
        tile: f32,
        bounds: PlayerBounds,
    ) -> Self {
        Self {
            entity: Entity::new(Vec2::splat(tile), Vec2::splat(tile)),
            state: PlayerState::Normal,
            facing: Facing::Up,
            death_frame: 0,
            lives,
            scored: 0,
            win_target,
            score: 0,
            base_score_award,
            bounds,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn scored_count(&self) -> u32 {
        self.scored
    }

    pub fn sprite_frame(&self) -> SpriteFrame {
        match self.state {
            PlayerState::Dying => DEATH_CYCLE[self.death_frame],
            PlayerState::Dead => SpriteFrame::Dead,
            PlayerState::Moving => SpriteFrame::Moving,
            PlayerState::Normal | PlayerState::Disabled => SpriteFrame::Normal,
        }
    }

    /// Dying, between levels, or dead
    pub fn is_disabled(&self) -> bool {
        matches!(
            self.state,
            PlayerState::Dying | PlayerState::Disabled | PlayerState::Dead
        )
    }

    fn can_move(&self) -> bool {
        self.lives > 0
            && self.scored < self.win_target
            && matches!(self.state, PlayerState::Normal | PlayerState::Moving)
    }

    fn moved(&mut self, facing: Facing) {
        self.facing = facing;
        self.state = PlayerState::Moving;
    }

    /// Off-grid positions (after a ride) stop flush with the field edge
    pub fn move_left(&mut self) {
        if self.can_move() && self.entity.x() > 0.0 {
            self.entity.move_left();
            self.entity.pos.x = self.entity.x().max(0.0);
            self.moved(Facing::Left);
        }
    }

    pub fn move_right(&mut self) {
        if self.can_move() && self.entity.x() < self.bounds.max_right {
            self.entity.move_right();
            self.entity.pos.x = self.entity.x().min(self.bounds.max_right);
            self.moved(Facing::Right);
        }
    }

    pub fn move_up(&mut self) {
        if self.can_move() && self.entity.y() > self.bounds.top {
            self.entity.move_up();
            self.moved(Facing::Up);
        }
    }

    pub fn move_down(&mut self) {
        if self.can_move() && self.entity.y() < self.bounds.bottom {
            self.entity.move_down();
            self.moved(Facing::Down);
        }
    }

    /// Drop the transient moving state at the start of a fast tick
    pub fn settle(&mut self) {
        if self.state == PlayerState::Moving {
            self.state = PlayerState::Normal;
        }
    }

    pub fn set_location(&mut self, x: f32, y: f32) {
        self.entity.set_position(x, y);
    }

    /// Shift horizontally, e.g. when carried by debris
    pub fn carry(&mut self, dx: f32) {
        self.entity.pos.x += dx;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    /// Record a crossing; faster crossings score more
    pub fn has_scored(&mut self, time_left: u32) {
        self.scored += 1;
        self.score += self.base_score_award + time_left;
    }

    pub fn reset_scored(&mut self) {
        self.scored = 0;
    }

    pub fn begin_dying(&mut self) {
        self.state = PlayerState::Dying;
        self.death_frame = 0;
    }

    /// Step the death animation, wrapping after the last intermediate frame
    pub fn advance_death_frame(&mut self) {
        self.death_frame = (self.death_frame + 1) % DEATH_CYCLE.len();
    }

    pub fn death_cycle_complete(&self) -> bool {
        self.death_frame == 0
    }

    pub fn disable(&mut self) {
        if self.state != PlayerState::Dead {
            self.state = PlayerState::Disabled;
        }
    }

    pub fn enable(&mut self) {
        if self.state != PlayerState::Dead {
            self.state = PlayerState::Normal;
            self.facing = Facing::Up;
        }
    }

    pub fn force_dead(&mut self) {
        self.state = PlayerState::Dead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(lives: u32) -> PlayerManager {
        let bounds = PlayerBounds {
            max_right: 600.0,
            top: 100.0,
            bottom: 700.0,
        };
        let mut p = PlayerManager::new(lives, 5, 5, 50.0, bounds);
        p.set_location(300.0, 700.0);
        p
    }

    #[test]
    fn test_score_formula() {
        let mut p = player(4);
        p.has_scored(3);
        assert_eq!(p.score(), 8);
        assert_eq!(p.scored_count(), 1);
    }

    #[test]
    fn test_moves_one_tile_and_face() {
        let mut p = player(4);
        p.move_up();
        assert_eq!(p.entity.y(), 650.0);
        assert_eq!(p.state(), PlayerState::Moving);
        p.move_left();
        assert_eq!(p.entity.x(), 250.0);
        assert_eq!(p.facing(), Facing::Left);
        p.settle();
        assert_eq!(p.state(), PlayerState::Normal);
    }

    #[test]
    fn test_bounds_silently_block() {
        let mut p = player(4);
        p.move_down();
        assert_eq!(p.entity.y(), 700.0);
        p.set_location(0.0, 400.0);
        p.move_left();
        assert_eq!(p.entity.x(), 0.0);
        p.set_location(600.0, 400.0);
        p.move_right();
        assert_eq!(p.entity.x(), 600.0);
    }

    #[test]
    fn test_horizontal_moves_stay_on_field() {
        let mut p = player(4);
        p.set_location(590.0, 400.0);
        p.move_right();
        assert_eq!(p.entity.x(), 600.0);
        p.move_right();
        assert_eq!(p.entity.x(), 600.0);

        p.set_location(12.0, 400.0);
        p.move_left();
        assert_eq!(p.entity.x(), 0.0);
        assert_eq!(p.facing(), Facing::Left);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut p = player(4);
        p.begin_dying();
        p.move_up();
        assert_eq!(p.entity.y(), 700.0);
        p.enable();
        p.move_up();
        assert_eq!(p.entity.y(), 650.0);
    }

    #[test]
    fn test_win_target_blocks_movement() {
        let mut p = player(4);
        for _ in 0..5 {
            p.has_scored(0);
        }
        p.move_up();
        assert_eq!(p.entity.y(), 700.0);
        p.reset_scored();
        p.move_up();
        assert_eq!(p.entity.y(), 650.0);
    }

    #[test]
    fn test_death_cycle_wraps_to_start() {
        let mut p = player(1);
        p.begin_dying();
        let mut frames = vec![p.sprite_frame()];
        loop {
            p.advance_death_frame();
            if p.death_cycle_complete() {
                break;
            }
            frames.push(p.sprite_frame());
        }
        assert_eq!(frames, DEATH_CYCLE.to_vec());
    }

    #[test]
    fn test_lives_saturate_and_dead_is_terminal() {
        let mut p = player(1);
        p.lose_life();
        p.lose_life();
        assert_eq!(p.lives(), 0);
        p.force_dead();
        p.enable();
        assert_eq!(p.state(), PlayerState::Dead);
        assert_eq!(p.sprite_frame(), SpriteFrame::Dead);
    }
}
