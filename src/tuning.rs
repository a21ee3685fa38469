//! Data-driven game balance
//!
//! Every gameplay constant that designers iterate on lives in [`Tuning`].
//! A `Tuning` is plain data (serde round-trips cleanly for external balance
//! files) and is validated once, fail-fast, before a world is built from it.
//! Geometry constants that are part of level structure rather than balance
//! (entity radii, spawn point, placement bands) live in `sim::level`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum arena size that keeps the generator's placement bands non-empty
pub const MIN_ARENA_WIDTH: f32 = 800.0;
pub const MIN_ARENA_HEIGHT: f32 = 600.0;

/// Validation failure for a [`Tuning`] value
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A single field is outside its allowed range
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
    /// The arena cannot hold the generator's placement bands
    ArenaTooSmall { width: f32, height: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::OutOfRange {
                name,
                value,
                expected,
            } => {
                write!(f, "tuning field {} = {} out of range ({})", name, value, expected)
            }
            TuningError::ArenaTooSmall { width, height } => {
                write!(
                    f,
                    "arena {}x{} too small (minimum {}x{})",
                    width, height, MIN_ARENA_WIDTH, MIN_ARENA_HEIGHT
                )
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// All gameplay balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Arena width in units
    pub arena_width: f32,
    /// Arena height in units
    pub arena_height: f32,
    /// Ball collision radius
    pub ball_radius: f32,
    /// Lives at the start of a run
    pub lives: u8,
    /// Levels in a full run; clearing the last one is victory
    pub max_level: u32,

    /// Energy meter capacity
    pub max_energy: f32,
    /// Energy cost per magnetized tick
    pub energy_drain: f32,
    /// Drain while an energy power-up effect is active
    pub energy_drain_reduced: f32,
    /// Energy recovered per idle tick
    pub energy_regen: f32,

    /// Base strength of the pointer magnet
    pub magnet_strength: f32,
    /// Inverse-distance falloff coefficient, shared by all force fields
    pub magnet_falloff: f32,
    /// Hard cap on magnet force per tick
    pub magnet_force_cap: f32,
    /// Pointer distance below which the magnet stops pulling
    pub magnet_dead_zone: f32,
    /// Force multiplier while magnet-boost is active
    pub magnet_boost_factor: f32,

    /// Scale applied to black hole and wall field forces
    pub field_damping: f32,
    /// Black hole pull range
    pub black_hole_influence: f32,
    /// Base strength of magnetic and repulsive wall fields
    pub wall_field_strength: f32,
    /// Wall field range, measured from the nearest wall surface
    pub wall_field_influence: f32,

    /// Velocity retained per tick
    pub friction: f32,
    /// Speed cap in units per tick
    pub max_speed: f32,
    /// Speed cap while a speed power-up is active
    pub boosted_max_speed: f32,

    /// Velocity retained on arena boundary bounces
    pub boundary_restitution: f32,
    /// Velocity retained on normal and repulsive wall bounces
    pub wall_restitution: f32,
    /// Magnetic walls bounce harder than the incoming speed
    pub magnetic_wall_restitution: f32,
    /// Outward kick added by repulsive wall contact
    pub repulse_impulse: f32,
    /// Velocity retained through a teleport
    pub teleport_damping: f32,

    /// Damage immunity window in ticks
    pub invulnerability_ticks: u32,
    /// Speed power-up duration in ticks
    pub speed_duration: u32,
    /// Shield power-up duration in ticks
    pub shield_duration: u32,
    /// Magnet-boost power-up duration in ticks
    pub magnet_boost_duration: u32,

    /// Points per star, multiplied by the level number
    pub star_score: u64,
    /// Completion bonus points per remaining energy unit
    pub energy_bonus_rate: f32,
    /// Time bonus starts from this many points worth of seconds
    pub time_bonus_base: f32,
    /// Time bonus points per second under the base
    pub time_bonus_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 1280.0,
            arena_height: 800.0,
            ball_radius: 14.0,
            lives: 3,
            max_level: 15,

            max_energy: 100.0,
            energy_drain: 0.8,
            energy_drain_reduced: 0.4,
            energy_regen: 0.5,

            magnet_strength: 0.6,
            magnet_falloff: 0.01,
            magnet_force_cap: 3.0,
            magnet_dead_zone: 5.0,
            magnet_boost_factor: 1.8,

            field_damping: 0.3,
            black_hole_influence: 200.0,
            wall_field_strength: 0.25,
            wall_field_influence: 150.0,

            friction: 0.994,
            max_speed: 10.0,
            boosted_max_speed: 15.0,

            boundary_restitution: 0.7,
            wall_restitution: 0.8,
            magnetic_wall_restitution: 1.1,
            repulse_impulse: 3.0,
            teleport_damping: 0.6,

            invulnerability_ticks: 180,
            speed_duration: 900,
            shield_duration: 600,
            magnet_boost_duration: 750,

            star_score: 200,
            energy_bonus_rate: 5.0,
            time_bonus_base: 1000.0,
            time_bonus_rate: 2.0,
        }
    }
}

fn require(
    ok: bool,
    name: &'static str,
    value: f32,
    expected: &'static str,
) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

impl Tuning {
    /// Check every field once; worlds are only built from validated tunings
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.arena_width < MIN_ARENA_WIDTH || self.arena_height < MIN_ARENA_HEIGHT {
            return Err(TuningError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        require(self.ball_radius > 0.0, "ball_radius", self.ball_radius, "> 0")?;
        require(self.lives >= 1, "lives", self.lives as f32, ">= 1")?;
        require(self.max_level >= 1, "max_level", self.max_level as f32, ">= 1")?;
        require(self.max_energy > 0.0, "max_energy", self.max_energy, "> 0")?;
        require(self.energy_drain >= 0.0, "energy_drain", self.energy_drain, ">= 0")?;
        require(
            self.energy_drain_reduced >= 0.0,
            "energy_drain_reduced",
            self.energy_drain_reduced,
            ">= 0",
        )?;
        require(self.energy_regen > 0.0, "energy_regen", self.energy_regen, "> 0")?;
        require(
            self.magnet_strength >= 0.0,
            "magnet_strength",
            self.magnet_strength,
            ">= 0",
        )?;
        require(
            self.magnet_falloff >= 0.0,
            "magnet_falloff",
            self.magnet_falloff,
            ">= 0",
        )?;
        require(
            self.magnet_force_cap >= 0.0,
            "magnet_force_cap",
            self.magnet_force_cap,
            ">= 0",
        )?;
        require(
            self.magnet_dead_zone >= 0.0,
            "magnet_dead_zone",
            self.magnet_dead_zone,
            ">= 0",
        )?;
        require(
            self.friction > 0.0 && self.friction <= 1.0,
            "friction",
            self.friction,
            "in (0, 1]",
        )?;
        require(self.max_speed > 0.0, "max_speed", self.max_speed, "> 0")?;
        require(
            self.boosted_max_speed >= self.max_speed,
            "boosted_max_speed",
            self.boosted_max_speed,
            ">= max_speed",
        )?;
        require(
            self.boundary_restitution >= 0.0,
            "boundary_restitution",
            self.boundary_restitution,
            ">= 0",
        )?;
        require(
            self.wall_restitution >= 0.0,
            "wall_restitution",
            self.wall_restitution,
            ">= 0",
        )?;
        require(
            self.magnetic_wall_restitution >= 0.0,
            "magnetic_wall_restitution",
            self.magnetic_wall_restitution,
            ">= 0",
        )?;
        require(
            self.teleport_damping >= 0.0 && self.teleport_damping <= 1.0,
            "teleport_damping",
            self.teleport_damping,
            "in [0, 1]",
        )?;
        require(
            self.invulnerability_ticks >= 1,
            "invulnerability_ticks",
            self.invulnerability_ticks as f32,
            ">= 1",
        )?;
        Ok(())
    }
}
