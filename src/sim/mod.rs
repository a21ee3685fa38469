//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Identical inputs on identical seeds replay identical runs
//! - No rendering or platform dependencies

pub mod collision;
pub mod forces;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{RectHit, circle_rect_hit, circles_overlap, resolve_wall_hit};
pub use level::{
    BlackHole, Goal, Level, PowerUpPickup, Rect, Spike, Star, Teleporter, Wall, WallKind,
    generate_level, BLACK_HOLE_RADIUS, GOAL_RADIUS, POWER_UP_RADIUS, SPAWN, STAR_RADIUS,
    TELEPORTER_RADIUS,
};
pub use state::{
    ActivePowerUp, Ball, GameEvent, GamePhase, PointerInput, PowerUpKind, Snapshot, World,
    TRAIL_LENGTH,
};
pub use tick::tick;
