//! Per-crossing level clock

use serde::{Deserialize, Serialize};

/// Counts whole seconds toward a time limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTimeManager {
    max_time: u32,
    elapsed: u32,
    paused: bool,
}

impl LevelTimeManager {
    pub fn new(max_time: u32) -> Self {
        Self {
            max_time,
            elapsed: 0,
            paused: false,
        }
    }

    /// One-second tick. Returns true when time ran out; elapsed wraps to 0
    /// in the same step.
    pub fn on_second(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.max_time {
            self.elapsed = 0;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Hand back seconds. Elapsed never goes below zero.
    pub fn add_time(&mut self, seconds: u32) {
        self.elapsed = self.elapsed.saturating_sub(seconds);
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    pub fn time_left(&self) -> u32 {
        self.max_time.saturating_sub(self.elapsed)
    }
}
