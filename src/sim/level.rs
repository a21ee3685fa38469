//! Level geometry and the seeded generator
//!
//! A [`Level`] is immutable after generation except for pickup flags
//! (`Star::collected`, `PowerUpPickup::active`, `Goal::active`). Generation
//! draws from an explicit RNG so the same seed always rebuilds the same
//! level; entity counts and hazard mix ramp with the level number.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;
use crate::tuning::Tuning;

/// Ball spawn point, identical in every level
pub const SPAWN: Vec2 = Vec2::new(80.0, 80.0);
/// Distance of the goal center from the far arena corner
pub const GOAL_MARGIN: f32 = 100.0;
/// Collision radius of a star
pub const STAR_RADIUS: f32 = 15.0;
/// Collision radius of a power-up pickup
pub const POWER_UP_RADIUS: f32 = 20.0;
/// Radius of a teleporter pad
pub const TELEPORTER_RADIUS: f32 = 25.0;
/// Radius of the level goal
pub const GOAL_RADIUS: f32 = 35.0;
/// Event horizon radius of a black hole
pub const BLACK_HOLE_RADIUS: f32 = 40.0;
/// Placement retries before an entity is dropped from the level
const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Closest point of the rectangle (surface or interior) to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.pos, self.pos + self.size)
    }
}

/// Wall behavior, both at range and on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    Normal,
    /// Pulls the ball in at range, bounces it back harder than it came
    Magnetic,
    /// Pushes the ball away at range and kicks it outward on contact
    Repulsive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
    pub kind: WallKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub collected: bool,
    /// Effect granted on collection, if the star carries one
    pub power_up: Option<PowerUpKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub pos: Vec2,
    /// Event horizon; lethal once the ball center crosses it
    pub radius: f32,
    /// Pull strength for the force pass
    pub strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teleporter {
    pub pos: Vec2,
    pub radius: f32,
    /// Exit point; the twin pad sits exactly here
    pub target: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPickup {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Cleared on pickup; never respawns within the level
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub radius: f32,
    /// Armed once every star in the level is collected
    pub active: bool,
}

/// One level's geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    pub stars: Vec<Star>,
    pub walls: Vec<Wall>,
    pub spikes: Vec<Spike>,
    pub black_holes: Vec<BlackHole>,
    pub teleporters: Vec<Teleporter>,
    pub power_ups: Vec<PowerUpPickup>,
    pub goal: Goal,
}

impl Level {
    /// Goal center for an arena of the given size
    pub fn goal_pos(width: f32, height: f32) -> Vec2 {
        Vec2::new(width - GOAL_MARGIN, height - GOAL_MARGIN)
    }

    /// Bare arena with no entities; the goal arms immediately
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stars: Vec::new(),
            walls: Vec::new(),
            spikes: Vec::new(),
            black_holes: Vec::new(),
            teleporters: Vec::new(),
            power_ups: Vec::new(),
            goal: Goal {
                pos: Self::goal_pos(width, height),
                radius: GOAL_RADIUS,
                active: true,
            },
        }
    }

    /// Stars still uncollected
    pub fn stars_remaining(&self) -> usize {
        self.stars.iter().filter(|s| !s.collected).count()
    }
}

/// Difficulty ramp: 0.3 per level, capped at 3.0
fn difficulty(level: u32) -> f32 {
    (level as f32 * 0.3).min(3.0)
}

/// True when `pos` keeps `clearance` distance from both spawn and goal
fn is_clear(pos: Vec2, clearance: f32, goal_pos: Vec2) -> bool {
    pos.distance(SPAWN) > clearance && pos.distance(goal_pos) > clearance
}

/// Draw positions inside the `margin` band until one clears both the spawn
/// and the goal; gives up after [`MAX_PLACEMENT_ATTEMPTS`]
fn place(
    rng: &mut Pcg32,
    width: f32,
    height: f32,
    margin: f32,
    clearance: f32,
    goal_pos: Vec2,
) -> Option<Vec2> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(
            margin + rng.random_range(0.0..width - 2.0 * margin),
            margin + rng.random_range(0.0..height - 2.0 * margin),
        );
        if is_clear(pos, clearance, goal_pos) {
            return Some(pos);
        }
    }
    None
}

fn random_power_up(rng: &mut Pcg32) -> PowerUpKind {
    match rng.random_range(0..4) {
        0 => PowerUpKind::Energy,
        1 => PowerUpKind::Speed,
        2 => PowerUpKind::Shield,
        _ => PowerUpKind::MagnetBoost,
    }
}

/// Roughly 70% normal, 20% magnetic, 10% repulsive; repulsive walls are
/// held back until level 4
fn random_wall_kind(rng: &mut Pcg32, level: u32) -> WallKind {
    let roll: f32 = rng.random();
    if roll < 0.7 {
        WallKind::Normal
    } else if roll < 0.9 || level < 4 {
        WallKind::Magnetic
    } else {
        WallKind::Repulsive
    }
}

/// Generate the geometry for `level` from an explicit generation stream
pub fn generate_level(level: u32, tuning: &Tuning, rng: &mut Pcg32) -> Level {
    let (width, height) = (tuning.arena_width, tuning.arena_height);
    let goal_pos = Level::goal_pos(width, height);
    let diff = difficulty(level);
    let mut out = Level::empty(width, height);
    out.goal.active = false;

    let star_count = (5 + level / 3).min(8);
    for _ in 0..star_count {
        if let Some(pos) = place(rng, width, height, 150.0, 50.0, goal_pos) {
            // Bonus stars show up from level 2
            let power_up = if level >= 2 && rng.random_bool(0.15) {
                Some(random_power_up(rng))
            } else {
                None
            };
            out.stars.push(Star {
                pos,
                collected: false,
                power_up,
            });
        }
    }

    let wall_count = 4 + (diff * 2.0) as u32;
    for _ in 0..wall_count {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let vertical = rng.random_bool(0.5);
            let span = 80.0 + rng.random_range(0.0..120.0);
            let (w, h) = if vertical { (25.0, span) } else { (span, 25.0) };
            let rect = Rect::new(
                100.0 + rng.random_range(0.0..width - 400.0),
                100.0 + rng.random_range(0.0..height - 400.0),
                w,
                h,
            );
            if is_clear(rect.center(), 60.0, goal_pos) {
                out.walls.push(Wall {
                    rect,
                    kind: random_wall_kind(rng, level),
                });
                break;
            }
        }
    }

    let spike_count = (2.0 + diff * 2.0) as u32;
    for _ in 0..spike_count {
        if let Some(pos) = place(rng, width, height, 200.0, 80.0, goal_pos) {
            out.spikes.push(Spike {
                pos,
                radius: 18.0 + rng.random_range(0.0..8.0),
            });
        }
    }

    let power_up_count = (1 + level / 4).min(3);
    for _ in 0..power_up_count {
        if let Some(pos) = place(rng, width, height, 150.0, 60.0, goal_pos) {
            out.power_ups.push(PowerUpPickup {
                pos,
                kind: random_power_up(rng),
                active: true,
            });
        }
    }

    // A linked teleporter pair near opposite corners, sometimes, from level 4
    if level > 3 && rng.random_bool(0.4) {
        let a = Vec2::new(
            120.0 + rng.random_range(0.0..200.0),
            120.0 + rng.random_range(0.0..200.0),
        );
        let b = Vec2::new(
            width - 320.0 + rng.random_range(0.0..200.0),
            height - 320.0 + rng.random_range(0.0..200.0),
        );
        out.teleporters.push(Teleporter {
            pos: a,
            radius: TELEPORTER_RADIUS,
            target: b,
        });
        out.teleporters.push(Teleporter {
            pos: b,
            radius: TELEPORTER_RADIUS,
            target: a,
        });
    }

    if level > 5 {
        let hole_count = (diff / 2.0) as u32;
        for _ in 0..hole_count {
            if let Some(pos) = place(rng, width, height, 250.0, 120.0, goal_pos) {
                out.black_holes.push(BlackHole {
                    pos,
                    radius: BLACK_HOLE_RADIUS,
                    strength: 0.3 + diff * 0.1,
                });
            }
        }
    }

    out.goal.active = out.stars.is_empty();

    log::info!(
        "Level {}: {} stars, {} walls, {} spikes, {} black holes, {} teleporters, {} power-ups",
        level,
        out.stars.len(),
        out.walls.len(),
        out.spikes.len(),
        out.black_holes.len(),
        out.teleporters.len(),
        out.power_ups.len(),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn make(level: u32, seed: u64) -> Level {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_level(level, &Tuning::default(), &mut rng)
    }

    #[test]
    fn test_generation_is_reproducible() {
        for level in [1, 4, 8, 15] {
            assert_eq!(make(level, 99), make(level, 99));
        }
    }

    #[test]
    fn test_star_count_schedule() {
        assert_eq!(make(1, 0).stars.len(), 5);
        assert_eq!(make(9, 0).stars.len(), 8);
        assert_eq!(make(15, 0).stars.len(), 8);
    }

    #[test]
    fn test_entities_clear_spawn_and_goal() {
        let goal_pos = Level::goal_pos(1280.0, 800.0);
        for seed in 0..10 {
            for level in 1..=15 {
                let lvl = make(level, seed);
                for star in &lvl.stars {
                    assert!(is_clear(star.pos, 50.0, goal_pos));
                }
                for spike in &lvl.spikes {
                    assert!(is_clear(spike.pos, 80.0, goal_pos));
                }
                for hole in &lvl.black_holes {
                    assert!(is_clear(hole.pos, 120.0, goal_pos));
                }
                for wall in &lvl.walls {
                    assert!(is_clear(wall.rect.center(), 60.0, goal_pos));
                }
            }
        }
    }

    #[test]
    fn test_goal_starts_inactive_and_in_far_corner() {
        let lvl = make(3, 7);
        assert!(!lvl.goal.active);
        assert_eq!(lvl.goal.pos, Vec2::new(1180.0, 700.0));
        assert_eq!(lvl.goal.radius, GOAL_RADIUS);
    }

    #[test]
    fn test_hazards_gated_by_level() {
        for seed in 0..10 {
            assert!(make(3, seed).teleporters.is_empty());
            assert!(make(5, seed).black_holes.is_empty());
        }
    }

    #[test]
    fn test_teleporters_are_linked_pairs() {
        let mut seen = 0;
        for seed in 0..30 {
            let lvl = make(10, seed);
            if lvl.teleporters.is_empty() {
                continue;
            }
            seen += 1;
            assert_eq!(lvl.teleporters.len(), 2);
            assert_eq!(lvl.teleporters[0].target, lvl.teleporters[1].pos);
            assert_eq!(lvl.teleporters[1].target, lvl.teleporters[0].pos);
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_black_hole_strength_ramps() {
        // Difficulty caps at 3.0, so late strengths settle at 0.6
        for seed in 0..20 {
            for hole in &make(12, seed).black_holes {
                assert!((hole.strength - 0.6).abs() < 1e-6);
                assert_eq!(hole.radius, BLACK_HOLE_RADIUS);
            }
        }
    }

    #[test]
    fn test_no_repulsive_walls_before_level_four() {
        for seed in 0..20 {
            for wall in &make(3, seed).walls {
                assert_ne!(wall.kind, WallKind::Repulsive);
            }
        }
    }

    #[test]
    fn test_empty_level_goal_is_armed() {
        let lvl = Level::empty(1280.0, 800.0);
        assert!(lvl.goal.active);
        assert_eq!(lvl.stars_remaining(), 0);
    }

    #[test]
    fn test_rect_closest_point() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        assert_eq!(
            rect.closest_point(Vec2::new(0.0, 0.0)),
            Vec2::new(100.0, 100.0)
        );
        assert_eq!(
            rect.closest_point(Vec2::new(125.0, 400.0)),
            Vec2::new(125.0, 120.0)
        );
        // Interior points are their own closest point
        assert_eq!(
            rect.closest_point(Vec2::new(120.0, 110.0)),
            Vec2::new(120.0, 110.0)
        );
        assert_eq!(rect.center(), Vec2::new(125.0, 110.0));
    }
}
