//! Headless demo session
//!
//! Drives the simulation with a scripted pointer that chases the nearest
//! uncollected star and then the goal, advancing levels until the run ends.
//! Events are logged as they drain; the final snapshot is printed as JSON.
//!
//! Usage: magnet-drift [seed] [tuning.json]

use std::process::ExitCode;

use glam::Vec2;

use magnet_drift::consts::TICKS_PER_SECOND;
use magnet_drift::sim::{GameEvent, GamePhase, World};
use magnet_drift::tuning::Tuning;

/// Wall-clock cap on the scripted session
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("seed must be an unsigned integer, got {:?}", raw);
                return ExitCode::FAILURE;
            }
        },
        None => 7,
    };
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("failed to load tuning from {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut world = match World::with_tuning(tuning, seed) {
        Ok(world) => world,
        Err(err) => {
            log::error!("invalid tuning: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("session start: seed {}", seed);

    let mut ticks: u64 = 0;
    while ticks < MAX_TICKS {
        let target = chase_target(&world);
        world.set_pointer(target.x, target.y, true);
        world.step(1);
        ticks += 1;

        for event in world.drain_events() {
            log::info!("[{:7.2}s] {:?}", ticks as f32 / TICKS_PER_SECOND, event);
            if let GameEvent::LevelComplete { .. } = event {
                world.advance_level();
            }
        }
        if matches!(world.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }
    log::info!(
        "session end: {:?} on level {} with score {}",
        world.phase,
        world.level_index,
        world.score
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("snapshot serialization failed: {}", err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let tuning: Tuning = serde_json::from_str(&raw)?;
    Ok(tuning)
}

/// Steer toward the nearest uncollected star, then the goal
fn chase_target(world: &World) -> Vec2 {
    let ball = world.ball.pos;
    world
        .level
        .stars
        .iter()
        .filter(|s| !s.collected)
        .map(|s| s.pos)
        .min_by(|a, b| {
            a.distance_squared(ball)
                .partial_cmp(&b.distance_squared(ball))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(world.level.goal.pos)
}
