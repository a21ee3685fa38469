//! Magnet Drift - a magnetic-attraction arcade game
//!
//! A deterministic 2D simulation core: the player never touches the ball
//! directly, they hold a pointer-projected magnet that pulls it across
//! procedurally generated levels full of stars, spikes and black holes.
//! The crate is headless. A presentation adapter feeds pointer input in,
//! advances the fixed-rate tick, and reads snapshots and events back out.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (forces, collisions, game state, levels)
//! - `tuning`: Data-driven game balance with fail-fast validation

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, Snapshot, World};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game timing constants
pub mod consts {
    /// Fixed logical tick rate. All velocities are in units per tick.
    pub const TICKS_PER_SECOND: f32 = 60.0;
}

/// Clamp a vector's magnitude to `max`, preserving direction
#[inline]
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max { v * (max / len) } else { v }
}

/// Step `value` toward `target` by at most `step`, without overshoot
#[inline]
pub fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}
