//! Game settings and level definitions
//!
//! Loaded once at startup (JSON, every field optional) and handed to the
//! game manager, which never mutates them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{ActorKind, Direction};

/// Describes one lane: how fast, which way, how crowded, and with what
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSettings {
    pub start_speed: u32,
    pub direction: Direction,
    pub max_actors: usize,
    pub kind: ActorKind,
}

impl LaneSettings {
    pub fn new(start_speed: u32, direction: Direction, max_actors: usize, kind: ActorKind) -> Self {
        Self {
            start_speed,
            direction,
            max_actors,
            kind,
        }
    }

    fn validate(&self, lane: usize, what: &'static str, debris: bool) -> Result<(), ConfigError> {
        if self.start_speed < 1 {
            return Err(ConfigError::InvalidStartSpeed { lane });
        }
        if self.max_actors < 1 {
            return Err(ConfigError::InvalidMaxActors { lane });
        }
        if self.kind.is_debris() != debris {
            return Err(ConfigError::WrongActorKind {
                what,
                lane,
                kind: self.kind,
            });
        }
        Ok(())
    }
}

/// Difficulty bump applied when a level begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Speed added to every vehicle on each vehicle action during this level
    pub speed_delta: u32,
    /// Added to every road lane's start speed when the level starts
    pub start_speed_increase: u32,
    /// Added to every road lane's capacity when the level starts
    pub max_actors_increase: usize,
}

/// Power-up appearance odds and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupSettings {
    /// Per-tick chance the time bonus appears
    pub time_chance: f64,
    /// Per-tick chance the vehicle slow-down appears
    pub slowdown_chance: f64,
    /// Fast ticks a power-up stays on the field
    pub lifetime_ticks: u32,
}

impl Default for PowerupSettings {
    fn default() -> Self {
        Self {
            time_chance: 0.01,
            slowdown_chance: 0.005,
            lifetime_ticks: 200,
        }
    }
}

/// Everything the core needs to start a game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // === Rules ===
    pub player_lives: u32,
    /// Seconds allowed per crossing
    pub level_timer_seconds: u32,
    /// Homes to fill before the level is complete
    pub scores_to_win: u32,
    pub num_homes: usize,
    pub base_score_award: u32,
    /// Seconds handed back by the time power-up
    pub time_bonus_seconds: u32,
    /// Fast ticks the vehicle slow-down lasts
    pub slow_down_ticks: u32,
    /// Fast ticks of pause between levels
    pub round_transition_ticks: u32,

    // === Geometry ===
    pub tile_size: f32,
    /// Top edge of the home row
    pub top_offset: f32,
    /// Gap under the start row
    pub bottom_offset: f32,
    pub field_width: f32,
    pub field_height: f32,

    // === Lanes ===
    pub road_lane_count: usize,
    pub river_lane_count: usize,
    /// Bottom to top
    pub road_lanes: Vec<LaneSettings>,
    /// Bottom to top
    pub river_lanes: Vec<LaneSettings>,

    // === Progression ===
    pub levels: Vec<LevelSettings>,
    pub powerups: PowerupSettings,

    /// RNG seed; a fixed default keeps runs reproducible
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        use ActorKind::*;
        use Direction::*;

        Self {
            player_lives: 4,
            level_timer_seconds: 20,
            scores_to_win: 5,
            num_homes: 5,
            base_score_award: 5,
            time_bonus_seconds: 5,
            slow_down_ticks: 200,
            round_transition_ticks: 100,

            tile_size: 50.0,
            top_offset: 100.0,
            bottom_offset: 5.0,
            field_width: 650.0,
            field_height: 755.0,

            road_lane_count: 5,
            river_lane_count: 5,
            road_lanes: vec![
                LaneSettings::new(1, Left, 3, Car),
                LaneSettings::new(3, Right, 2, Bus),
                LaneSettings::new(5, Left, 4, Car),
                LaneSettings::new(7, Left, 3, TowingCar),
                LaneSettings::new(9, Right, 5, Car),
            ],
            river_lanes: vec![
                LaneSettings::new(2, Right, 3, LargeLog),
                LaneSettings::new(1, Left, 4, SmallLog),
                LaneSettings::new(2, Right, 3, SmallLog),
                LaneSettings::new(1, Left, 2, LargeLog),
                LaneSettings::new(3, Right, 3, LargeLog),
            ],

            levels: vec![
                LevelSettings::default(),
                LevelSettings {
                    speed_delta: 0,
                    start_speed_increase: 1,
                    max_actors_increase: 1,
                },
                LevelSettings {
                    speed_delta: 1,
                    start_speed_increase: 1,
                    max_actors_increase: 1,
                },
            ],
            powerups: PowerupSettings::default(),

            seed: None,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Row the player starts on (top edge)
    pub fn start_y(&self) -> f32 {
        self.field_height - self.bottom_offset - self.tile_size
    }

    /// Total height handed to the road layout
    pub fn road_height(&self) -> f32 {
        self.start_y()
    }

    /// Total height handed to the river layout: above the road and its median
    pub fn river_height(&self) -> f32 {
        self.road_height() - self.tile_size * (self.road_lane_count as f32 + 1.0)
    }

    /// Rows between the start row and the home row, home row included
    pub fn playable_rows(&self) -> usize {
        ((self.start_y() - self.top_offset) / self.tile_size).round() as usize
    }

    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Reject anything that would make a broken level
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player_lives", self.player_lives as f32)?;
        positive("level_timer_seconds", self.level_timer_seconds as f32)?;
        positive("scores_to_win", self.scores_to_win as f32)?;
        positive("num_homes", self.num_homes as f32)?;
        positive("tile_size", self.tile_size)?;
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;

        if self.scores_to_win as usize > self.num_homes {
            return Err(ConfigError::InvalidField {
                field: "scores_to_win",
                reason: format!("cannot exceed num_homes ({})", self.num_homes),
            });
        }

        for (field, chance) in [
            ("powerups.time_chance", self.powerups.time_chance),
            ("powerups.slowdown_chance", self.powerups.slowdown_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: format!("{chance} is not a probability"),
                });
            }
        }

        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }

        check_lanes("road", self.road_lane_count, &self.road_lanes, false)?;
        check_lanes("river", self.river_lane_count, &self.river_lanes, true)?;

        // Road lanes, the median, river lanes and the home row
        let needed = self.road_lane_count + self.river_lane_count + 2;
        let rows = self.playable_rows();
        if needed != rows {
            return Err(ConfigError::InvalidField {
                field: "field_height",
                reason: format!("{rows} rows between start and top, lanes need {needed}"),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidField {
            field,
            reason: "must be positive".to_string(),
        })
    }
}

/// Count and per-lane checks shared by the road and the river
pub(crate) fn check_lanes(
    what: &'static str,
    expected: usize,
    lanes: &[LaneSettings],
    debris: bool,
) -> Result<(), ConfigError> {
    if lanes.len() != expected {
        return Err(ConfigError::LaneCountMismatch {
            what,
            expected,
            actual: lanes.len(),
        });
    }
    for (i, lane) in lanes.iter().enumerate() {
        lane.validate(i, what, debris)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.start_y(), 700.0);
        assert_eq!(settings.river_height(), 400.0);
        assert_eq!(settings.playable_rows(), 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = GameSettings::from_json(r#"{ "player_lives": 2, "seed": 7 }"#).unwrap();
        assert_eq!(settings.player_lives, 2);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.road_lanes.len(), 5);
        assert_eq!(settings.powerups.lifetime_ticks, 200);
    }

    #[test]
    fn test_lane_count_mismatch_rejected() {
        let mut settings = GameSettings::default();
        settings.road_lanes.pop();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::LaneCountMismatch {
                expected: 5,
                actual: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_start_speed_rejected() {
        let mut settings = GameSettings::default();
        settings.river_lanes[2].start_speed = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidStartSpeed { lane: 2 })
        ));
    }

    #[test]
    fn test_debris_on_road_rejected() {
        let mut settings = GameSettings::default();
        settings.road_lanes[0].kind = ActorKind::SmallLog;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::WrongActorKind { what: "road", .. })
        ));
    }

    #[test]
    fn test_geometry_must_fit_lanes() {
        let mut settings = GameSettings::default();
        settings.field_height += settings.tile_size;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidField {
                field: "field_height",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            GameSettings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_no_levels_rejected() {
        let mut settings = GameSettings::default();
        settings.levels.clear();
        assert!(matches!(settings.validate(), Err(ConfigError::NoLevels)));
    }
}
