//! Fixed-rate clock driver
//!
//! Converts variable frame time into the three fixed clocks the game manager
//! expects. Each clock keeps its own accumulator.

use super::game::GameManager;
use crate::consts::{DEATH_TICK_MS, FAST_TICK_MS, LEVEL_TICK_MS, MAX_SUBSTEPS};

/// Longest frame accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

const FAST_DT: f32 = FAST_TICK_MS as f32 / 1000.0;
const DEATH_DT: f32 = DEATH_TICK_MS as f32 / 1000.0;
const LEVEL_DT: f32 = LEVEL_TICK_MS as f32 / 1000.0;

/// Ticks run by one [`TickScheduler::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    pub fast: u32,
    pub death: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    fast: f32,
    death: f32,
    level: f32,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every tick that fell due during `dt` seconds
    pub fn advance(&mut self, game: &mut GameManager, dt: f32) -> TickCounts {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.fast += dt;
        self.death += dt;
        self.level += dt;

        let mut counts = TickCounts::default();
        while self.fast >= FAST_DT && counts.fast < MAX_SUBSTEPS {
            game.fast_tick();
            self.fast -= FAST_DT;
            counts.fast += 1;
        }
        while self.death >= DEATH_DT {
            game.death_tick();
            self.death -= DEATH_DT;
            counts.death += 1;
        }
        while self.level >= LEVEL_DT {
            game.clock_tick();
            self.level -= LEVEL_DT;
            counts.level += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;

    #[test]
    fn test_clocks_run_at_their_rates() {
        let mut game = GameManager::new(GameSettings::default()).unwrap();
        let mut scheduler = TickScheduler::new();
        let mut total = TickCounts::default();
        for _ in 0..11 {
            let counts = scheduler.advance(&mut game, 0.1);
            total.fast += counts.fast;
            total.death += counts.death;
            total.level += counts.level;
        }
        // 1.1 s of frames
        assert!((72..=74).contains(&total.fast));
        assert_eq!(total.death, 4);
        assert_eq!(total.level, 1);
        assert_eq!(game.time_left(), 19);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut game = GameManager::new(GameSettings::default()).unwrap();
        let mut scheduler = TickScheduler::new();
        let counts = scheduler.advance(&mut game, 5.0);
        assert!(counts.fast <= MAX_SUBSTEPS);
        assert_eq!(counts.level, 0);
    }
}
