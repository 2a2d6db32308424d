//! Tilehop - a tile-map platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, entities, levels, scenes)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Size of one map cell in world units (pixels)
    pub const GRID_SIZE: f32 = 64.0;
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Visible screen width; doubles as the default enemy activation radius
    pub const SCREEN_WIDTH: f32 = 960.0;
    /// Visible screen height
    pub const SCREEN_HEIGHT: f32 = 640.0;

    /// Downward offset used to probe for ground before a jump
    pub const GROUND_PROBE: f32 = 2.0;
    /// Extra reach below a body when looking for resting contact
    pub const CONTACT_EPSILON: f32 = 0.01;

    /// Hero defaults
    pub const HERO_SPEED: f32 = 8.0;
    pub const HERO_JUMP_POWER: f32 = 24.0;
    pub const HERO_MAX_HEARTS: u32 = 3;
    pub const HERO_STARTING_LIVES: u32 = 3;
    /// Seconds of immunity after taking a hit
    pub const INVINCIBILITY_SECONDS: f32 = 0.75;

    /// Enemy patrol speeds
    pub const BEAR_SPEED: f32 = 2.0;
    pub const MONSTER_SPEED: f32 = 2.0;

    /// Score awarded per coin
    pub const COIN_VALUE: u64 = 1;
}
