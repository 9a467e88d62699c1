//! High score leaderboard system
//!
//! Persisted as a JSON file, tracks top 10 scores.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HighScoreError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished game, as handed off by the game manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    /// Levels fully completed
    pub level_completed: u32,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(player_name: &str, level_completed: u32, score: u32) -> Self {
        Self {
            player_name: player_name.to_string(),
            level_completed,
            score,
        }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Level {}, {} points",
            self.player_name, self.level_completed, self.score
        )
    }
}

/// Score descending, then name, then level descending
fn by_score(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.player_name.cmp(&b.player_name))
        .then_with(|| b.level_completed.cmp(&a.level_completed))
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .iter()
            .map(|e| e.score)
            .min()
            .map(|lowest| score > lowest)
            .unwrap_or(true)
    }

    /// Add a record to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }

        self.sort_by_score_name_level();
        let pos = self
            .entries
            .iter()
            .position(|e| by_score(&record, e) == Ordering::Less)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("New high score at rank {}", pos + 1);
        Some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.score).max()
    }

    pub fn sort_by_score_name_level(&mut self) {
        self.entries.sort_by(by_score);
    }

    pub fn sort_by_name_score_level(&mut self) {
        self.entries.sort_by(|a, b| {
            a.player_name
                .cmp(&b.player_name)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| b.level_completed.cmp(&a.level_completed))
        });
    }

    pub fn sort_by_level_score_name(&mut self) {
        self.entries.sort_by(|a, b| {
            b.level_completed
                .cmp(&a.level_completed)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.player_name.cmp(&b.player_name))
        });
    }

    /// Load high scores from a JSON file. A missing or unreadable file
    /// starts a fresh board.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.sort_by_score_name_level();
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save high scores as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
