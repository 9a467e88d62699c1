//! Game orchestration
//!
//! Owns every simulation part and turns their collisions and signals into
//! phase transitions and outward events. Three external clocks drive it:
//! [`GameManager::fast_tick`], [`GameManager::death_tick`] and
//! [`GameManager::clock_tick`]. Movement arrives through
//! [`GameManager::move_player`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::{DeathCause, GameEvent, LifeChange, Outcome};
use super::home::HomeManager;
use super::player::{PlayerBounds, PlayerManager, SpriteFrame};
use super::powerup::{PowerupKind, PowerupManager, RandomSource, SpawnArea};
use super::river::River;
use super::road::Road;
use super::timer::LevelTimeManager;
use crate::error::ConfigError;
use crate::highscores::ScoreRecord;
use crate::settings::{GameSettings, LevelSettings};

/// Seed used when the settings do not name one
pub const DEFAULT_SEED: u64 = 0x7475_7274_6c65;

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Death animation running
    PlayerDying,
    /// Pause between levels
    RoundTransition { remaining: u32 },
    GameOver(Outcome),
}

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// Something the presentation layer should draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub visual_id: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug)]
pub struct GameManager {
    settings: GameSettings,
    road: Road,
    river: River,
    homes: HomeManager,
    player: PlayerManager,
    powerups: PowerupManager,
    timer: LevelTimeManager,
    phase: GamePhase,
    /// 1-based
    level: u32,
    /// Levels credited to the score record
    rounds: u32,
    fast_running: bool,
    death_running: bool,
    events: Vec<GameEvent>,
}

impl GameManager {
    /// Start a game with a PCG stream seeded from the settings
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        log::info!("Starting game with seed {}", seed);
        Self::with_random_source(settings, Box::new(Pcg32::seed_from_u64(seed)))
    }

    /// Start a game drawing power-up randomness from `rng`
    pub fn with_random_source(
        settings: GameSettings,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let tile = settings.tile_size;
        let width = settings.field_width;
        let road = Road::new(
            settings.road_lane_count,
            &settings.road_lanes,
            tile,
            settings.road_height(),
            width,
        )?;
        let river = River::new(
            settings.river_lane_count,
            &settings.river_lanes,
            tile,
            settings.river_height(),
            width,
        )?;
        let homes = HomeManager::new(settings.top_offset, width, settings.num_homes, tile);
        let bounds = PlayerBounds {
            max_right: width - tile,
            top: settings.top_offset,
            bottom: settings.start_y(),
        };
        let player = PlayerManager::new(
            settings.player_lives,
            settings.scores_to_win,
            settings.base_score_award,
            tile,
            bounds,
        );
        let powerups = PowerupManager::new(settings.powerups, tile, rng);
        let timer = LevelTimeManager::new(settings.level_timer_seconds);

        let mut game = Self {
            settings,
            road,
            river,
            homes,
            player,
            powerups,
            timer,
            phase: GamePhase::Playing,
            level: 1,
            rounds: 1,
            fast_running: true,
            death_running: false,
            events: Vec::new(),
        };
        let first = game.level_settings();
        game.apply_level_difficulty(first);
        game.road.set_up_lanes(game.settings.road_height(), game.settings.field_width);
        game.recenter_player();

        log::info!(
            "Game ready: {} lives, {} levels, {} road lanes, {} river lanes",
            game.player.lives(),
            game.settings.level_count(),
            game.road.lanes().len(),
            game.river.lanes().len()
        );
        Ok(game)
    }

    // === Readable state ===

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.player.lives()
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn time_left(&self) -> u32 {
        self.timer.time_left()
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn river(&self) -> &River {
        &self.river
    }

    pub fn homes(&self) -> &HomeManager {
        &self.homes
    }

    pub fn player(&self) -> &PlayerManager {
        &self.player
    }

    pub fn powerups(&self) -> &PowerupManager {
        &self.powerups
    }

    pub fn timer(&self) -> &LevelTimeManager {
        &self.timer
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record to hand to the high score board
    pub fn score_record(&self, player_name: &str) -> ScoreRecord {
        ScoreRecord::new(player_name, self.rounds, self.player.score())
    }

    /// Every visible object, back to front
    pub fn sprites(&self) -> Vec<SpriteView> {
        let mut views = Vec::new();
        for slot in self.homes.slots() {
            views.push(SpriteView {
                visual_id: if slot.is_taken() { "home_taken" } else { "home_open" },
                pos: slot.entity.pos,
                size: slot.entity.size(),
            });
        }
        for actor in self.river.actors().chain(self.road.actors()) {
            views.push(SpriteView {
                visual_id: actor.kind.visual_id(),
                pos: actor.entity.pos,
                size: actor.entity.size(),
            });
        }
        for powerup in self.powerups.powerups().iter().filter(|p| p.is_active()) {
            views.push(SpriteView {
                visual_id: powerup.kind.visual_id(),
                pos: powerup.entity.pos,
                size: powerup.entity.size(),
            });
        }
        let player_id = match self.player.sprite_frame() {
            SpriteFrame::Normal => "player",
            SpriteFrame::Moving => "player_moving",
            SpriteFrame::Death1 => "player_death_1",
            SpriteFrame::Death2 => "player_death_2",
            SpriteFrame::Death3 => "player_death_3",
            SpriteFrame::Dead => "player_dead",
        };
        views.push(SpriteView {
            visual_id: player_id,
            pos: self.player.entity.pos,
            size: self.player.entity.size(),
        });
        views
    }

    // === Clocks ===

    /// Simulation clock
    pub fn fast_tick(&mut self) {
        if !self.fast_running {
            return;
        }
        self.player.settle();

        if let GamePhase::RoundTransition { remaining } = self.phase {
            if remaining <= 1 {
                self.start_round();
            } else {
                self.phase = GamePhase::RoundTransition {
                    remaining: remaining - 1,
                };
            }
        }

        let width = self.settings.field_width;
        let speed_delta = self.level_settings().speed_delta;
        let road_tick = self.road.on_tick(width, speed_delta);
        if road_tick.actors_added > 0 {
            self.events.push(GameEvent::ActorAdded {
                count: road_tick.actors_added,
            });
        }
        if road_tick.slow_down_ended {
            self.events.push(GameEvent::SlowDownEnded);
        }

        // River carry first, then the vehicle check
        let carry = self.river.move_river_objects(width, &self.player.entity);
        if !self.player.is_disabled() {
            self.player.carry(carry);
            let on_river = self.river.contains(&self.player.entity);
            let center = self.player.entity.center_x();
            let carried_off = on_river && (center < 0.0 || center > width);
            if self.river.is_drowning(&self.player.entity) || carried_off {
                self.kill_player(DeathCause::Water);
                return;
            }
        }

        let area = self.spawn_area();
        self.powerups.on_tick(area);
        for kind in PowerupKind::ALL {
            let disabled = self.player.is_disabled();
            if self.powerups.check_pickup(kind, &self.player.entity, disabled) {
                self.apply_powerup(kind);
            }
        }

        if self.road.check_collision(&self.player.entity, self.player.is_disabled()) {
            self.kill_player(DeathCause::Vehicle);
        }
    }

    /// Death animation clock
    pub fn death_tick(&mut self) {
        if !self.death_running {
            return;
        }
        self.player.advance_death_frame();
        if !self.player.death_cycle_complete() {
            return;
        }

        self.death_running = false;
        if self.player.lives() > 0 {
            self.resume_play();
        } else {
            self.end_game(Outcome::Lost);
        }
    }

    /// One-second level clock
    pub fn clock_tick(&mut self) {
        if !self.fast_running {
            return;
        }
        if self.timer.on_second() {
            self.kill_player(DeathCause::Time);
        }
    }

    // === Input ===

    /// Forward a move; ignored whenever movement is not allowed
    pub fn move_player(&mut self, direction: Move) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let before = self.player.entity.pos;
        match direction {
            Move::Left => self.player.move_left(),
            Move::Right => self.player.move_right(),
            Move::Up => self.player.move_up(),
            Move::Down => self.player.move_down(),
        }
        let moved = self.player.entity.pos != before;
        if moved && direction == Move::Up && self.player.entity.y() <= self.settings.top_offset {
            self.reached_top();
        }
    }

    // === Transitions ===

    fn reached_top(&mut self) {
        // Home hit takes precedence over the wall
        if self.homes.check_collision(&self.player.entity).is_none() {
            self.kill_player(DeathCause::Wall);
            return;
        }

        self.player.has_scored(self.timer.time_left());
        self.events.push(GameEvent::ScoreChanged {
            score: self.player.score(),
        });
        self.recenter_player();
        self.timer.reset();

        if self.player.scored_count() >= self.settings.scores_to_win {
            self.complete_level();
        }
    }

    fn kill_player(&mut self, cause: DeathCause) {
        if self.player.is_disabled() {
            return;
        }
        self.player.begin_dying();
        self.timer.pause();
        self.death_running = true;
        self.player.lose_life();
        self.reset_traffic();
        self.timer.reset();
        self.phase = GamePhase::PlayerDying;

        log::info!("Player died ({:?}), {} lives left", cause, self.player.lives());
        self.events.push(GameEvent::LivesChanged {
            lives: self.player.lives(),
            change: LifeChange::Lost(cause),
        });
    }

    fn resume_play(&mut self) {
        self.recenter_player();
        self.timer.unpause();
        self.road.set_up_lanes(self.settings.road_height(), self.settings.field_width);
        self.player.enable();
        self.phase = GamePhase::Playing;
    }

    fn complete_level(&mut self) {
        if self.level >= self.settings.level_count() {
            self.end_game(Outcome::Won);
            return;
        }

        self.level += 1;
        self.rounds += 1;
        self.homes.reset();
        let next = self.level_settings();
        self.apply_level_difficulty(next);
        self.reset_traffic();

        self.player.add_life();
        self.events.push(GameEvent::LivesChanged {
            lives: self.player.lives(),
            change: LifeChange::BonusLife,
        });
        self.player.reset_scored();
        self.events.push(GameEvent::LevelChanged { level: self.level });
        log::info!("Level {} reached", self.level);

        self.player.disable();
        self.timer.pause();
        self.timer.reset();
        match self.settings.round_transition_ticks {
            0 => self.start_round(),
            remaining => self.phase = GamePhase::RoundTransition { remaining },
        }
    }

    fn start_round(&mut self) {
        self.recenter_player();
        self.player.enable();
        self.timer.unpause();
        self.road.set_up_lanes(self.settings.road_height(), self.settings.field_width);
        self.phase = GamePhase::Playing;
    }

    /// Stop the clocks and report the outcome
    pub fn end_game(&mut self, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.fast_running = false;
        self.death_running = false;
        self.timer.pause();
        if outcome == Outcome::Lost {
            self.player.force_dead();
            self.rounds = self.rounds.saturating_sub(1);
        }
        self.phase = GamePhase::GameOver(outcome);
        log::info!(
            "Game over ({:?}) at level {} with {} points",
            outcome,
            self.level,
            self.player.score()
        );
        self.events.push(GameEvent::GameOver(outcome));
    }

    fn apply_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Time => self.timer.add_time(self.settings.time_bonus_seconds),
            PowerupKind::VehicleSlowdown => {
                self.road.slow_down_vehicles(self.settings.slow_down_ticks)
            }
        }
        log::debug!("Power-up collected: {:?}", kind);
        self.events.push(GameEvent::PowerUpTriggered(kind));
    }

    // === Helpers ===

    fn level_settings(&self) -> LevelSettings {
        self.settings
            .levels
            .get(self.level.saturating_sub(1) as usize)
            .copied()
            .unwrap_or_default()
    }

    fn apply_level_difficulty(&mut self, level: LevelSettings) {
        self.road.increase_start_speed_by(level.start_speed_increase);
        self.road.increase_max_actors_by(level.max_actors_increase);
    }

    /// Back to start speeds; a running slow-down ends here
    fn reset_traffic(&mut self) {
        if self.road.reset_speeds() {
            self.events.push(GameEvent::SlowDownEnded);
        }
    }

    fn recenter_player(&mut self) {
        let x = self.settings.field_width / 2.0 - self.settings.tile_size / 2.0;
        self.player.set_location(x, self.settings.start_y());
    }

    fn spawn_area(&self) -> SpawnArea {
        SpawnArea {
            max_right: self.settings.field_width,
            min_down: self.settings.top_offset + self.settings.tile_size,
            max_down: self.settings.start_y(),
        }
    }
}
