//! Turtler - headless runner
//!
//! Plays a game on autopilot against the real clocks' cadence, logs every
//! event and records the result on the high score board.

use std::path::PathBuf;

use clap::Parser;
use turtler::sim::{Entity, GameEvent, GameManager, GamePhase, Move, TickScheduler};
use turtler::{GameSettings, HighScores};

/// Frame time fed to the scheduler (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between autopilot decisions
const DECISION_FRAMES: u32 = 12;

#[derive(Parser, Debug)]
#[command(about = "Plays a game of Turtler on autopilot")]
struct Args {
    /// settings JSON file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// high score file to load and update
    #[arg(long)]
    scores: Option<PathBuf>,

    /// name on the score record
    #[arg(long, default_value = "autopilot")]
    name: String,

    /// simulated seconds before giving up
    #[arg(long = "seconds", default_value_t = 600)]
    max_seconds: u32,
}

fn main() {
    env_logger::init();
    log::info!("Turtler (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut game = GameManager::new(settings)?;
    let mut scheduler = TickScheduler::new();
    let max_frames = (args.max_seconds as f32 / FRAME_DT) as u64;

    let mut frame = 0u64;
    while !game.is_over() && frame < max_frames {
        if frame % DECISION_FRAMES as u64 == 0 {
            if let Some(mv) = autopilot(&game) {
                game.move_player(mv);
            }
        }
        scheduler.advance(&mut game, FRAME_DT);
        for event in game.drain_events() {
            log_event(&event);
        }
        frame += 1;
    }

    if !game.is_over() {
        log::warn!("Stopped after {} seconds without a result", args.max_seconds);
    }

    let record = game.score_record(&args.name);
    println!("{record}");

    let mut board = match &args.scores {
        Some(path) => HighScores::load(path),
        None => HighScores::new(),
    };
    if let Some(rank) = board.add(record) {
        println!("High score rank #{rank}");
    }
    if let Some(path) = &args.scores {
        board.save(path)?;
    }
    for entry in &board.entries {
        println!("  {entry}");
    }
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ActorAdded { count } => log::debug!("{} vehicles joined traffic", count),
        GameEvent::GameOver(outcome) => log::info!("Game over: {:?}", outcome),
        other => log::info!("{:?}", other),
    }
}

/// Idle-mode player: step up when the row ahead is safe, otherwise line up
/// with an open home or wait.
fn autopilot(game: &GameManager) -> Option<Move> {
    if game.phase() != GamePhase::Playing {
        return None;
    }

    let settings = game.settings();
    let tile = settings.tile_size;
    let player = &game.player().entity;
    let mut ahead = player.clone();
    ahead.move_up();

    if ahead.y() <= settings.top_offset {
        return line_up_with_home(game, player);
    }

    let safe = if game.river().contains(&ahead) {
        game.river().is_riding(&shrunk(&ahead, tile / 4.0))
    } else {
        !game.road().check_collision(&widened(&ahead, tile), false)
    };
    safe.then_some(Move::Up)
}

fn line_up_with_home(game: &GameManager, player: &Entity) -> Option<Move> {
    let tolerance = game.settings().tile_size * turtler::consts::HOME_TOLERANCE_FACTOR;
    let target = game
        .homes()
        .slots()
        .iter()
        .filter(|slot| !slot.is_taken())
        .map(|slot| slot.entity.x())
        .min_by(|a, b| (a - player.x()).abs().total_cmp(&(b - player.x()).abs()))?;

    let dx = target - player.x();
    if dx.abs() < tolerance {
        Some(Move::Up)
    } else if dx < 0.0 {
        Some(Move::Left)
    } else {
        Some(Move::Right)
    }
}

/// Box padded horizontally to leave room for oncoming traffic
fn widened(entity: &Entity, pad: f32) -> Entity {
    let mut area = Entity::new(entity.size() + glam::Vec2::new(pad * 2.0, 0.0), entity.step);
    area.set_position(entity.x() - pad, entity.y());
    area
}

/// Box narrowed so only a solid footing counts
fn shrunk(entity: &Entity, inset: f32) -> Entity {
    let mut area = Entity::new(entity.size() - glam::Vec2::new(inset * 2.0, 0.0), entity.step);
    area.set_position(entity.x() + inset, entity.y());
    area
}
