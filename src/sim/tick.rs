//! Fixed timestep simulation tick
//!
//! One tick, in order: forces on the sampled pointer, position integration,
//! collision pass, trail, timer decrements. Only `Playing` advances; the
//! other phases freeze the world until the adapter acts.

use super::collision::resolve_collisions;
use super::forces::resolve_forces;
use super::state::{GamePhase, World};

/// Advance the world by one fixed tick
pub fn tick(world: &mut World) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.level_ticks += 1;

    resolve_forces(world);
    world.ball.pos += world.ball.vel;

    let invulnerable_at_entry = world.ball.invulnerable;
    resolve_collisions(world);
    world.ball.record_trail();

    // A window granted during this tick starts counting down next tick,
    // so the tick that took the hit still reports the full window
    if invulnerable_at_entry > 0 {
        world.ball.invulnerable -= 1;
    }

    if let Some(mut active) = world.power_up {
        active.remaining = active.remaining.saturating_sub(1);
        world.power_up = (active.remaining > 0).then_some(active);
    }
}
