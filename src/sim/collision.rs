//! Collision detection and response
//!
//! One pass per tick, after integration: the arena boundary first, then the
//! entity categories in fixed priority order (walls, spikes, black holes,
//! teleporters, stars, goal, power-ups). Categories are independent; a hit
//! in one never suppresses the later ones within the same tick, so a damage
//! respawn still lands on whatever occupies the entry point.

use glam::Vec2;

use super::level::{POWER_UP_RADIUS, Rect, STAR_RADIUS, Wall, WallKind};
use super::state::{Ball, GameEvent, GamePhase, PowerUpKind, World};
use crate::tuning::Tuning;

/// Separation margin added on push-out; keeps the resolved position
/// strictly clear of the surface despite float rounding
const CONTACT_SLOP: f32 = 1e-3;

/// Result of a circle-vs-rectangle check
#[derive(Debug, Clone, Copy)]
pub struct RectHit {
    /// Resolution normal, axis-aligned, pointing toward the ball center
    pub normal: Vec2,
    /// Overlap along the resolution axis (for position correction)
    pub penetration: f32,
}

/// Exact circle-vs-rectangle test.
///
/// Detection uses the closest point of the rectangle, so a ball brushing
/// past a corner at diagonal distance beyond its radius is a miss even
/// though the bounding boxes overlap. The resolution axis is the one with
/// the least penetration.
pub fn circle_rect_hit(pos: Vec2, radius: f32, rect: &Rect) -> Option<RectHit> {
    let closest = rect.closest_point(pos);
    if pos.distance_squared(closest) >= radius * radius {
        return None;
    }
    let half = rect.size * 0.5;
    let delta = pos - rect.center();
    let pen_x = half.x + radius - delta.x.abs();
    let pen_y = half.y + radius - delta.y.abs();
    if pen_x < pen_y {
        Some(RectHit {
            normal: Vec2::new(delta.x.signum(), 0.0),
            penetration: pen_x,
        })
    } else {
        Some(RectHit {
            normal: Vec2::new(0.0, delta.y.signum()),
            penetration: pen_y,
        })
    }
}

/// Strict circle overlap test; exact tangency is a miss
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Bounce off one wall: kind-specific restitution on the hit axis, outward
/// kick for repulsive walls, then a push-out just clear of the face.
/// Returns whether the wall was hit.
pub fn resolve_wall_hit(ball: &mut Ball, wall: &Wall, tuning: &Tuning) -> bool {
    let Some(hit) = circle_rect_hit(ball.pos, ball.radius, &wall.rect) else {
        return false;
    };
    let restitution = match wall.kind {
        WallKind::Magnetic => tuning.magnetic_wall_restitution,
        _ => tuning.wall_restitution,
    };
    if hit.normal.x != 0.0 {
        ball.vel.x = -ball.vel.x * restitution;
    } else {
        ball.vel.y = -ball.vel.y * restitution;
    }
    if wall.kind == WallKind::Repulsive {
        ball.vel += hit.normal * tuning.repulse_impulse;
    }
    ball.pos += hit.normal * (hit.penetration + CONTACT_SLOP);
    true
}

/// Reflect off the arena edges, repositioning to just inside
fn resolve_boundary(ball: &mut Ball, width: f32, height: f32, restitution: f32) {
    if ball.pos.x <= ball.radius {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs() * restitution;
    }
    if ball.pos.x >= width - ball.radius {
        ball.pos.x = width - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * restitution;
    }
    if ball.pos.y <= ball.radius {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs() * restitution;
    }
    if ball.pos.y >= height - ball.radius {
        ball.pos.y = height - ball.radius;
        ball.vel.y = -ball.vel.y.abs() * restitution;
    }
}

/// One full collision pass for the tick
pub fn resolve_collisions(world: &mut World) {
    resolve_boundary(
        &mut world.ball,
        world.level.width,
        world.level.height,
        world.tuning.boundary_restitution,
    );

    for wall in &world.level.walls {
        if resolve_wall_hit(&mut world.ball, wall, &world.tuning) {
            world.events.push(GameEvent::WallBounce { kind: wall.kind });
        }
    }

    // Lethal contacts, skipped for the whole tick while protected
    let protected = world.ball.invulnerable > 0 || world.has_power_up(PowerUpKind::Shield);
    if !protected {
        let ball = &world.ball;
        let spiked = world
            .level
            .spikes
            .iter()
            .any(|s| circles_overlap(ball.pos, ball.radius, s.pos, s.radius));
        // Event horizons test the ball center, not its rim
        let swallowed = !spiked
            && world
                .level
                .black_holes
                .iter()
                .any(|h| ball.pos.distance_squared(h.pos) < h.radius * h.radius);
        if spiked || swallowed {
            world.apply_damage();
        }
    }

    // First overlapping teleporter wins; the exit pad fires next tick
    for teleporter in &world.level.teleporters {
        if circles_overlap(
            world.ball.pos,
            world.ball.radius,
            teleporter.pos,
            teleporter.radius,
        ) {
            world.ball.pos = teleporter.target;
            world.ball.vel *= world.tuning.teleport_damping;
            world.events.push(GameEvent::Teleported);
            break;
        }
    }

    let star_value = world.tuning.star_score * world.level_index as u64;
    let mut granted: Vec<PowerUpKind> = Vec::new();
    for star in &mut world.level.stars {
        if star.collected
            || !circles_overlap(world.ball.pos, world.ball.radius, star.pos, STAR_RADIUS)
        {
            continue;
        }
        star.collected = true;
        world.score += star_value;
        world.events.push(GameEvent::StarCollected);
        if let Some(kind) = star.power_up {
            granted.push(kind);
        }
    }
    for kind in granted {
        world.activate_power_up(kind);
    }
    if !world.level.goal.active && world.level.stars_remaining() == 0 {
        world.level.goal.active = true;
        world.events.push(GameEvent::GoalActivated);
    }

    if world.phase == GamePhase::Playing
        && world.level.goal.active
        && circles_overlap(
            world.ball.pos,
            world.ball.radius,
            world.level.goal.pos,
            world.level.goal.radius,
        )
    {
        world.complete_level();
    }

    let mut picked: Vec<PowerUpKind> = Vec::new();
    for pickup in &mut world.level.power_ups {
        if pickup.active
            && circles_overlap(world.ball.pos, world.ball.radius, pickup.pos, POWER_UP_RADIUS)
        {
            pickup.active = false;
            picked.push(pickup.kind);
        }
    }
    for kind in picked {
        world.activate_power_up(kind);
    }
}
