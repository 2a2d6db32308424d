//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `tick` call
//! - Stable iteration order (spawn order from the level descriptor)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod body;
pub mod collision;
pub mod descriptor;
pub mod enemy;
pub mod entity;
pub mod hero;
pub mod level;
pub mod scene;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use body::{Body, apply_gravity};
pub use collision::{MotionReport, probe_overlap, resolve_motion, resolve_x, resolve_y};
pub use descriptor::{LevelDescriptor, LevelError, LevelLayout};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Block, BlockKind, Flag, Item, ItemKind};
pub use hero::{Hero, HeroOutcome};
pub use level::{Level, LevelStatus};
pub use scene::{Game, Scene, Transition};
pub use snapshot::{EntityKind, EntityView, HeroView, Snapshot};
pub use state::{Facing, GameEvent, SceneKind};
pub use tick::{MoveIntent, TickInput, tick};
