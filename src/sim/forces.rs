//! Per-tick force resolution
//!
//! Velocity adjustments from the pointer magnet, black holes and wall
//! fields, then friction and the speed cap. Positions never change here;
//! integration happens in the tick after all forces are in.
//!
//! Every field uses the same inverse-distance falloff `k / (d * c + 1)`,
//! so force stays finite at zero distance.

use super::level::WallKind;
use super::state::{GLOW_DECAY, GLOW_RISE, PowerUpKind, World};
use crate::{approach, clamp_magnitude};

/// Apply all force fields plus friction and the speed cap for one tick
pub fn resolve_forces(world: &mut World) {
    apply_magnet(world);
    apply_black_holes(world);
    apply_wall_fields(world);

    let cap = world.speed_cap();
    world.ball.vel *= world.tuning.friction;
    world.ball.vel = clamp_magnitude(world.ball.vel, cap);
}

/// Pointer attraction while the pointer is held and energy remains.
///
/// Inside the dead zone the magnet holds: no pull, no drain, no regen.
/// With the pointer released (or energy empty) the meter regenerates and
/// the glow decays.
fn apply_magnet(world: &mut World) {
    let t = &world.tuning;
    if world.pointer.active && world.energy > 0.0 {
        let delta = world.pointer.pos - world.ball.pos;
        let distance = delta.length();
        if distance > t.magnet_dead_zone {
            let force =
                (t.magnet_strength / (distance * t.magnet_falloff + 1.0)).min(t.magnet_force_cap);
            let boost = if world.has_power_up(PowerUpKind::MagnetBoost) {
                t.magnet_boost_factor
            } else {
                1.0
            };
            world.ball.vel += delta / distance * force * boost;
            world.ball.magnetized = true;
            world.ball.glow = approach(world.ball.glow, 1.0, GLOW_RISE);

            let drain = if world.has_power_up(PowerUpKind::Energy) {
                t.energy_drain_reduced
            } else {
                t.energy_drain
            };
            world.energy = (world.energy - drain).max(0.0);
        }
    } else {
        world.ball.magnetized = false;
        world.ball.glow = approach(world.ball.glow, 0.0, GLOW_DECAY);
        world.energy = approach(world.energy, t.max_energy, t.energy_regen);
    }
}

/// Superposed pull from every black hole in range
fn apply_black_holes(world: &mut World) {
    let t = &world.tuning;
    for hole in &world.level.black_holes {
        let delta = hole.pos - world.ball.pos;
        let distance = delta.length();
        if distance < t.black_hole_influence && distance > 0.0 {
            let force = hole.strength / (distance * t.magnet_falloff + 1.0);
            world.ball.vel += delta / distance * force * t.field_damping;
        }
    }
}

/// Attraction and repulsion from field walls, measured from the nearest
/// wall point. Contact is the collision resolver's business, so the field
/// cuts out once the ball touches.
fn apply_wall_fields(world: &mut World) {
    let t = &world.tuning;
    for wall in &world.level.walls {
        let toward = match wall.kind {
            WallKind::Normal => continue,
            WallKind::Magnetic => 1.0,
            WallKind::Repulsive => -1.0,
        };
        let closest = wall.rect.closest_point(world.ball.pos);
        let delta = closest - world.ball.pos;
        let distance = delta.length();
        if distance <= world.ball.radius || distance >= t.wall_field_influence {
            continue;
        }
        let force = t.wall_field_strength / (distance * t.magnet_falloff + 1.0);
        world.ball.vel += delta / distance * force * t.field_damping * toward;
    }
}
