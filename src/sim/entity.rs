//! Base moving object
//!
//! Every thing on the play field is an axis-aligned box anchored at its
//! top-left corner. Size is fixed at construction; only position changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A positioned, fixed-size box with a per-axis step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    size: Vec2,
    /// Distance covered by one move on each axis
    pub step: Vec2,
}

impl Entity {
    pub fn new(size: Vec2, step: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            step,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.step.x;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.step.x;
    }

    pub fn move_up(&mut self) {
        self.pos.y -= self.step.y;
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.step.y;
    }

    /// Strict axis-aligned overlap. Boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Horizontal center, used when deciding whether something left the field
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(Vec2::splat(50.0), Vec2::splat(50.0));
        e.set_position(x, y);
        e
    }

    #[test]
    fn test_overlap_both_axes() {
        let a = tile(0.0, 0.0);
        assert!(a.overlaps(&tile(25.0, 25.0)));
        assert!(tile(25.0, 25.0).overlaps(&a));
        // Overlapping on x only
        assert!(!a.overlaps(&tile(25.0, 60.0)));
        // Overlapping on y only
        assert!(!a.overlaps(&tile(60.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = tile(0.0, 0.0);
        assert!(!a.overlaps(&tile(50.0, 0.0)));
        assert!(!a.overlaps(&tile(0.0, 50.0)));
    }

    #[test]
    fn test_moves_use_step() {
        let mut e = Entity::new(Vec2::new(40.0, 40.0), Vec2::new(3.0, 7.0));
        e.set_position(100.0, 100.0);
        e.move_left();
        e.move_up();
        assert_eq!(e.pos, Vec2::new(97.0, 93.0));
        e.move_right();
        e.move_right();
        e.move_down();
        assert_eq!(e.pos, Vec2::new(103.0, 100.0));
        assert_eq!(e.width(), 40.0);
    }
}
