//! Game state and core simulation types
//!
//! All state that must be persisted for replay/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{self, Level, WallKind};
use crate::consts::TICKS_PER_SECOND;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Goal reached; frozen until the adapter advances the level
    LevelComplete,
    /// Lives exhausted; terminal until restart
    GameOver,
    /// Final level cleared; terminal until restart
    Victory,
}

/// Power-up kinds; at most one effect is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Instant refill of the energy meter
    Energy,
    /// Raised speed cap
    Speed,
    /// Immunity to spikes and event horizons
    Shield,
    /// Multiplied magnet force
    MagnetBoost,
}

impl PowerUpKind {
    /// Effect duration in ticks; zero means the effect is instantaneous
    pub fn duration_ticks(self, tuning: &Tuning) -> u32 {
        match self {
            PowerUpKind::Energy => 0,
            PowerUpKind::Speed => tuning.speed_duration,
            PowerUpKind::Shield => tuning.shield_duration,
            PowerUpKind::MagnetBoost => tuning.magnet_boost_duration,
        }
    }
}

/// The single active power-up effect, replaced on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Ticks until the effect expires
    pub remaining: u32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 25;

/// Glow gain per magnetized tick
pub const GLOW_RISE: f32 = 0.1;
/// Glow decay per idle tick
pub const GLOW_DECAY: f32 = 0.05;

/// The player-steered ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in units per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Trail history for rendering (newest first)
    pub trail: Vec<Vec2>,
    /// True while the pointer magnet pulled this tick
    pub magnetized: bool,
    /// Charge glow in [0, 1]; rises while magnetized, decays otherwise
    pub glow: f32,
    /// Damage immunity ticks remaining
    pub invulnerable: u32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: level::SPAWN,
            vel: Vec2::ZERO,
            radius,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            magnetized: false,
            glow: 0.0,
            invulnerable: 0,
        }
    }

    /// Record current position to trail (call each tick, after collisions)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    /// Fresh ball at the spawn point (on level load)
    pub fn reset(&mut self) {
        self.pos = level::SPAWN;
        self.vel = Vec2::ZERO;
        self.trail.clear();
        self.magnetized = false;
        self.glow = 0.0;
        self.invulnerable = 0;
    }
}

/// Pointer state sampled at the start of each tick; last write wins
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PointerInput {
    pub pos: Vec2,
    /// True while the pointer is pressed inside the arena
    pub active: bool,
}

/// State-change notifications, drained by the presentation adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { level: u32 },
    WallBounce { kind: WallKind },
    StarCollected,
    /// Every star collected; the goal is now active
    GoalActivated,
    GoalReached,
    Teleported,
    PowerUpCollected { kind: PowerUpKind },
    /// Life lost to a spike or an event horizon
    Damage,
    LevelComplete { bonus: u64 },
    GameOver,
    Victory,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed; each level derives its own generation stream from it
    pub seed: u64,
    pub tuning: Tuning,
    /// Current level number, 1-based
    pub level_index: u32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Magnet energy meter in [0, max_energy]
    pub energy: f32,
    /// Active power-up effect, if any
    pub power_up: Option<ActivePowerUp>,
    pub ball: Ball,
    pub level: Level,
    pub pointer: PointerInput,
    /// Ticks elapsed in the current level
    pub level_ticks: u64,
    /// Pending notifications since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

/// Per-level generation stream derived from the run seed
fn level_rng(seed: u64, level: u32) -> Pcg32 {
    let level_seed = (level as u64).wrapping_mul(2654435761).wrapping_add(seed);
    Pcg32::seed_from_u64(level_seed)
}

impl World {
    /// New run with default tuning, starting at level 1
    pub fn new(seed: u64) -> Self {
        Self::from_parts(Tuning::default(), seed)
    }

    /// New run with custom tuning, validated fail-fast
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_parts(tuning, seed))
    }

    fn from_parts(tuning: Tuning, seed: u64) -> Self {
        let mut world = Self {
            seed,
            level_index: 1,
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.lives,
            energy: tuning.max_energy,
            power_up: None,
            ball: Ball::new(tuning.ball_radius),
            level: Level::empty(tuning.arena_width, tuning.arena_height),
            pointer: PointerInput::default(),
            level_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        world.load_level(1);
        world
    }

    /// Update pointer state; takes effect from the next tick
    pub fn set_pointer(&mut self, x: f32, y: f32, active: bool) {
        self.pointer = PointerInput {
            pos: Vec2::new(x, y),
            active,
        };
    }

    /// Advance the simulation by `ticks` fixed steps
    pub fn step(&mut self, ticks: u32) {
        for _ in 0..ticks {
            super::tick::tick(self);
        }
    }

    /// Load `level`, regenerating its geometry from the run seed.
    ///
    /// Resets the ball and the level timer; energy and any active power-up
    /// carry over. A level outside `1..=max_level` is an adapter bug.
    pub fn load_level(&mut self, level: u32) {
        assert!(
            level >= 1 && level <= self.tuning.max_level,
            "level {} out of range 1..={}",
            level,
            self.tuning.max_level
        );
        let mut rng = level_rng(self.seed, level);
        self.level = level::generate_level(level, &self.tuning, &mut rng);
        self.level_index = level;
        self.level_ticks = 0;
        self.ball.reset();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelLoaded { level });
    }

    /// Move on after a completed level; past the last level this is victory
    pub fn advance_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        if self.level_index >= self.tuning.max_level {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory);
        } else {
            self.load_level(self.level_index + 1);
        }
    }

    /// Start the run over from level 1; only valid from a terminal phase
    pub fn restart(&mut self) {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Victory) {
            return;
        }
        self.score = 0;
        self.lives = self.tuning.lives;
        self.energy = self.tuning.max_energy;
        self.power_up = None;
        self.load_level(1);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation adapter
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.level_index,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            energy: self.energy,
            power_up: self.power_up,
            ball: &self.ball,
            layout: &self.level,
            level_ticks: self.level_ticks,
        }
    }

    /// Whether a power-up of `kind` is currently in effect
    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.power_up.is_some_and(|p| p.kind == kind)
    }

    /// Speed cap currently in force
    pub fn speed_cap(&self) -> f32 {
        if self.has_power_up(PowerUpKind::Speed) {
            self.tuning.boosted_max_speed
        } else {
            self.tuning.max_speed
        }
    }

    /// Grant `kind`, replacing any active effect
    pub(crate) fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.power_up = Some(ActivePowerUp {
            kind,
            remaining: kind.duration_ticks(&self.tuning),
        });
        if kind == PowerUpKind::Energy {
            self.energy = self.tuning.max_energy;
        }
        self.events.push(GameEvent::PowerUpCollected { kind });
    }

    /// Life loss: respawn at the entry point with an immunity window,
    /// effects cleared and energy refilled
    pub(crate) fn apply_damage(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.ball.pos = level::SPAWN;
        self.ball.vel = Vec2::ZERO;
        self.ball.invulnerable = self.tuning.invulnerability_ticks;
        self.power_up = None;
        self.energy = self.tuning.max_energy;
        self.events.push(GameEvent::Damage);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Goal reached: award the completion bonus and freeze for the adapter
    pub(crate) fn complete_level(&mut self) {
        self.phase = GamePhase::LevelComplete;
        let energy_bonus = (self.energy * self.tuning.energy_bonus_rate).floor();
        let elapsed_secs = self.level_ticks as f32 / TICKS_PER_SECOND;
        let time_bonus =
            (self.tuning.time_bonus_base - elapsed_secs).max(0.0) * self.tuning.time_bonus_rate;
        let bonus = (energy_bonus + time_bonus) as u64;
        self.score += bonus;
        self.events.push(GameEvent::GoalReached);
        self.events.push(GameEvent::LevelComplete { bonus });
    }
}

/// Render-facing view of one frame of state
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub energy: f32,
    pub power_up: Option<ActivePowerUp>,
    pub ball: &'a Ball,
    pub layout: &'a Level,
    pub level_ticks: u64,
}
