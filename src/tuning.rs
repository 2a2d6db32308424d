//! Data-driven game balance
//!
//! Loaded once at startup (usually from JSON) and shared read-only by every
//! level. Per-level physics (gravity, terminal velocity) live in the level
//! descriptor instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

/// Balance values for the hero, enemies and items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// World units per map cell; every entity is one cell square
    pub grid_size: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Horizontal distance from the hero within which enemies are simulated
    pub activation_radius: f32,
    /// Hero dies when falling below the level's bottom edge
    pub fall_death: bool,

    // === Hero ===
    pub hero_speed: f32,
    pub hero_jump_power: f32,
    pub hero_max_hearts: u32,
    pub hero_starting_lives: u32,
    /// Immunity window after a hit, in seconds
    pub invincibility_seconds: f32,
    /// Downward offset for the pre-jump ground probe
    pub ground_probe: f32,

    // === Enemies ===
    pub bear_speed: f32,
    pub monster_speed: f32,

    // === Items ===
    pub coin_value: u64,
    /// Heart pickups never raise hearts above `hero_max_hearts` (off: hearts stack)
    pub cap_hearts_at_max: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_rate: TICK_RATE,
            activation_radius: SCREEN_WIDTH,
            fall_death: true,

            hero_speed: HERO_SPEED,
            hero_jump_power: HERO_JUMP_POWER,
            hero_max_hearts: HERO_MAX_HEARTS,
            hero_starting_lives: HERO_STARTING_LIVES,
            invincibility_seconds: INVINCIBILITY_SECONDS,
            ground_probe: GROUND_PROBE,

            bear_speed: BEAR_SPEED,
            monster_speed: MONSTER_SPEED,

            coin_value: COIN_VALUE,
            cap_hearts_at_max: false,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of ticks the hero stays invincible after a hit (rounded down)
    pub fn invincibility_ticks(&self) -> u32 {
        (self.invincibility_seconds * self.tick_rate as f32).floor() as u32
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("grid_size", self.grid_size),
            ("activation_radius", self.activation_radius),
            ("hero_speed", self.hero_speed),
            ("hero_jump_power", self.hero_jump_power),
            ("ground_probe", self.ground_probe),
            ("bear_speed", self.bear_speed),
            ("monster_speed", self.monster_speed),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.invincibility_seconds < 0.0 || self.invincibility_seconds.is_nan() {
            return Err(TuningError::NotPositive {
                field: "invincibility_seconds",
                value: self.invincibility_seconds,
            });
        }
        if self.tick_rate == 0 {
            return Err(TuningError::Zero { field: "tick_rate" });
        }
        if self.hero_max_hearts == 0 {
            return Err(TuningError::Zero {
                field: "hero_max_hearts",
            });
        }
        if self.hero_starting_lives == 0 {
            return Err(TuningError::Zero {
                field: "hero_starting_lives",
            });
        }
        Ok(())
    }
}
