//! Power-ups that appear at random on the field
//!
//! The manager only tracks appearance and pickup. Effects are applied by the
//! caller.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::settings::PowerupSettings;

/// Source of the draws the power-up manager needs
pub trait RandomSource {
    /// Uniform in [0, 1)
    fn unit(&mut self) -> f64;
    /// Uniform in [0, upper); 0 when `upper` is 0
    fn below(&mut self, upper: u32) -> u32;
    /// Uniform in [lo, hi); `lo` when the range is empty
    fn between(&mut self, lo: u32, hi: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.random_range(0..upper)
    }

    fn between(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Hands seconds back to the level clock
    Time,
    /// Temporarily slows all traffic
    VehicleSlowdown,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Time, PowerupKind::VehicleSlowdown];

    pub fn visual_id(self) -> &'static str {
        match self {
            PowerupKind::Time => "powerup_time",
            PowerupKind::VehicleSlowdown => "powerup_vehicle",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub entity: Entity,
    active: bool,
    alive_ticks: u32,
}

impl Powerup {
    fn new(kind: PowerupKind, tile: f32) -> Self {
        Self {
            kind,
            entity: Entity::new(Vec2::splat(tile), Vec2::ZERO),
            active: false,
            alive_ticks: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.alive_ticks = 0;
    }
}

/// Area power-ups may appear in, in field units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub max_right: f32,
    pub min_down: f32,
    pub max_down: f32,
}

pub struct PowerupManager {
    powerups: [Powerup; 2],
    settings: PowerupSettings,
    tile: f32,
    rng: Box<dyn RandomSource>,
}

impl PowerupManager {
    pub fn new(settings: PowerupSettings, tile: f32, rng: Box<dyn RandomSource>) -> Self {
        Self {
            powerups: PowerupKind::ALL.map(|kind| Powerup::new(kind, tile)),
            settings,
            tile,
            rng,
        }
    }

    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }

    pub fn get(&self, kind: PowerupKind) -> &Powerup {
        &self.powerups[kind as usize]
    }

    fn chance(&self, kind: PowerupKind) -> f64 {
        match kind {
            PowerupKind::Time => self.settings.time_chance,
            PowerupKind::VehicleSlowdown => self.settings.slowdown_chance,
        }
    }

    /// One fast tick: maybe spawn, then age and expire
    pub fn on_tick(&mut self, area: SpawnArea) {
        for kind in PowerupKind::ALL {
            let draw = self.rng.unit();
            let chance = self.chance(kind);
            let lifetime = self.settings.lifetime_ticks;
            let tile = self.tile;

            let spawn = if draw <= chance && !self.powerups[kind as usize].active {
                let x = snap(self.rng.below(area.max_right as u32), tile);
                let y = snap(
                    self.rng.between(area.min_down as u32, area.max_down as u32),
                    tile,
                );
                Some((x, y))
            } else {
                None
            };

            let powerup = &mut self.powerups[kind as usize];
            if powerup.active {
                powerup.alive_ticks += 1;
            }
            if let Some((x, y)) = spawn {
                powerup.entity.set_position(x, y);
                powerup.active = true;
                log::debug!("{:?} power-up appeared at ({}, {})", kind, x, y);
            }
            if powerup.alive_ticks >= lifetime {
                powerup.deactivate();
            }
        }
    }

    /// Collect the power-up if the enabled player is standing on it
    pub fn check_pickup(&mut self, kind: PowerupKind, player: &Entity, disabled: bool) -> bool {
        let powerup = &mut self.powerups[kind as usize];
        if disabled || !powerup.active || !powerup.entity.overlaps(player) {
            return false;
        }
        powerup.deactivate();
        true
    }
}

impl std::fmt::Debug for PowerupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerupManager")
            .field("powerups", &self.powerups)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn snap(value: u32, tile: f32) -> f32 {
    (value as f32 / tile).floor() * tile
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Always draws the same values
    struct Fixed {
        unit: f64,
        pick: u32,
    }

    impl RandomSource for Fixed {
        fn unit(&mut self) -> f64 {
            self.unit
        }

        fn below(&mut self, _upper: u32) -> u32 {
            self.pick
        }

        fn between(&mut self, lo: u32, _hi: u32) -> u32 {
            lo.max(self.pick)
        }
    }

    fn area() -> SpawnArea {
        SpawnArea {
            max_right: 650.0,
            min_down: 150.0,
            max_down: 700.0,
        }
    }

    fn manager(unit: f64, pick: u32) -> PowerupManager {
        PowerupManager::new(PowerupSettings::default(), 50.0, Box::new(Fixed { unit, pick }))
    }

    fn player_at(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(Vec2::splat(50.0), Vec2::splat(50.0));
        e.set_position(x, y);
        e
    }

    #[test]
    fn test_low_draw_activates_on_first_tick() {
        let mut powerups = manager(0.005, 333);
        powerups.on_tick(area());
        let time = powerups.get(PowerupKind::Time);
        assert!(time.is_active());
        // Snapped to the tile grid
        assert_eq!(time.entity.pos, Vec2::new(300.0, 300.0));
        // Same draw also meets the slow-down odds
        assert!(powerups.get(PowerupKind::VehicleSlowdown).is_active());
    }

    #[test]
    fn test_high_draw_never_activates() {
        let mut powerups = manager(0.5, 0);
        for _ in 0..50 {
            powerups.on_tick(area());
        }
        assert!(powerups.powerups().iter().all(|p| !p.is_active()));
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut powerups = manager(0.0, 200);
        powerups.on_tick(area());
        assert!(powerups.get(PowerupKind::Time).is_active());
        // Keep it from respawning once it expires
        powerups.rng = Box::new(Fixed { unit: 0.9, pick: 0 });
        for _ in 0..199 {
            powerups.on_tick(area());
        }
        assert!(powerups.get(PowerupKind::Time).is_active());
        powerups.on_tick(area());
        assert!(!powerups.get(PowerupKind::Time).is_active());
    }

    #[test]
    fn test_pickup_needs_enabled_player_on_it() {
        let mut powerups = manager(0.0, 200);
        powerups.on_tick(area());
        let on_it = player_at(210.0, 200.0);
        assert!(!powerups.check_pickup(PowerupKind::Time, &on_it, true));
        assert!(!powerups.check_pickup(PowerupKind::Time, &player_at(400.0, 400.0), false));
        assert!(powerups.check_pickup(PowerupKind::Time, &on_it, false));
        assert!(!powerups.get(PowerupKind::Time).is_active());
        // Already collected
        assert!(!powerups.check_pickup(PowerupKind::Time, &on_it, false));
    }

    #[test]
    fn test_seeded_source_stays_in_area() {
        let rng = Pcg32::seed_from_u64(7);
        let settings = PowerupSettings {
            time_chance: 1.0,
            slowdown_chance: 1.0,
            lifetime_ticks: 1,
        };
        let mut powerups = PowerupManager::new(settings, 50.0, Box::new(rng));
        for _ in 0..100 {
            powerups.on_tick(area());
            for p in powerups.powerups() {
                assert!(p.entity.x() >= 0.0 && p.entity.x() < 650.0);
                assert!(p.entity.y() >= 150.0 && p.entity.y() < 700.0);
                assert_eq!(p.entity.x() % 50.0, 0.0);
            }
        }
    }
}
