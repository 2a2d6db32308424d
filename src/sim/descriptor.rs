//! Level descriptors and their validation
//!
//! A descriptor is the already-decoded level record handed over by whatever
//! loads level files. `compile` checks every kind string and physics value
//! once, up front, producing a typed `LevelLayout` that levels can be built
//! from without any further failure modes.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enemy::EnemyKind;
use super::entity::{BlockKind, ItemKind};
use crate::tuning::TuningError;

/// Errors raised while loading levels
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unknown block kind {kind:?} at ({x}, {y})")]
    UnknownBlockKind { kind: String, x: f32, y: f32 },
    #[error("unknown item kind {kind:?} at ({x}, {y})")]
    UnknownItemKind { kind: String, x: f32, y: f32 },
    #[error("unknown enemy kind {kind:?} at ({x}, {y})")]
    UnknownEnemyKind { kind: String, x: f32, y: f32 },
    #[error("level dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("invalid physics: gravity {gravity}, terminal velocity {terminal_velocity}")]
    InvalidPhysics { gravity: f32, terminal_velocity: f32 },
    #[error("no levels to play")]
    NoLevels,
    #[error("level index {index} out of range ({count} levels)")]
    LevelIndexOutOfRange { index: usize, count: usize },
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// Raw level record. Coordinates are in grid cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub width: f32,
    pub height: f32,
    pub start: (f32, f32),
    pub gravity: f32,
    pub terminal_velocity: f32,
    #[serde(default)]
    pub blocks: Vec<(f32, f32, String)>,
    #[serde(default)]
    pub items: Vec<(f32, f32, String)>,
    #[serde(default)]
    pub enemies: Vec<(f32, f32, String)>,
}

/// Validated level contents, still in grid cells
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub width: f32,
    pub height: f32,
    pub start: Vec2,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub blocks: Vec<(Vec2, BlockKind)>,
    pub items: Vec<(Vec2, ItemKind)>,
    pub enemies: Vec<(Vec2, EnemyKind)>,
}

impl LevelDescriptor {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate kinds and physics; fails on the first problem found
    pub fn compile(&self) -> Result<LevelLayout, LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.gravity > 0.0 && self.terminal_velocity >= self.gravity) {
            return Err(LevelError::InvalidPhysics {
                gravity: self.gravity,
                terminal_velocity: self.terminal_velocity,
            });
        }

        let blocks = self
            .blocks
            .iter()
            .map(|(x, y, kind)| {
                kind.parse::<BlockKind>()
                    .map(|k| (Vec2::new(*x, *y), k))
                    .map_err(|_| LevelError::UnknownBlockKind {
                        kind: kind.clone(),
                        x: *x,
                        y: *y,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let items = self
            .items
            .iter()
            .map(|(x, y, kind)| {
                kind.parse::<ItemKind>()
                    .map(|k| (Vec2::new(*x, *y), k))
                    .map_err(|_| LevelError::UnknownItemKind {
                        kind: kind.clone(),
                        x: *x,
                        y: *y,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let enemies = self
            .enemies
            .iter()
            .map(|(x, y, kind)| {
                kind.parse::<EnemyKind>()
                    .map(|k| (Vec2::new(*x, *y), k))
                    .map_err(|_| LevelError::UnknownEnemyKind {
                        kind: kind.clone(),
                        x: *x,
                        y: *y,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LevelLayout {
            width: self.width,
            height: self.height,
            start: Vec2::new(self.start.0, self.start.1),
            gravity: self.gravity,
            terminal_velocity: self.terminal_velocity,
            blocks,
            items,
            enemies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "width": 12, "height": 8,
        "start": [1, 3],
        "gravity": 1.0, "terminal_velocity": 24.0,
        "blocks": [[0, 6, "TL"], [1, 6, "TM"], [2, 6, "TR"]],
        "items": [[2, 5, "Coin"], [11, 5, "Flag"]],
        "enemies": [[5, 5, "Monster"]]
    }"#;

    #[test]
    fn test_compile_valid_level() {
        let layout = LevelDescriptor::from_json(LEVEL).unwrap().compile().unwrap();
        assert_eq!(layout.start, Vec2::new(1.0, 3.0));
        assert_eq!(layout.blocks.len(), 3);
        assert_eq!(layout.blocks[1], (Vec2::new(1.0, 6.0), BlockKind::TopMiddle));
        assert_eq!(layout.items[1].1, ItemKind::Flag);
        assert_eq!(layout.enemies, vec![(Vec2::new(5.0, 5.0), EnemyKind::Monster)]);
    }

    #[test]
    fn test_unknown_kinds_fail_fast() {
        let mut desc = LevelDescriptor::from_json(LEVEL).unwrap();
        desc.blocks.push((4.0, 6.0, "ZZ".to_string()));
        match desc.compile() {
            Err(LevelError::UnknownBlockKind { kind, x, y }) => {
                assert_eq!(kind, "ZZ");
                assert_eq!((x, y), (4.0, 6.0));
            }
            other => panic!("expected unknown block kind, got {:?}", other),
        }

        let mut desc = LevelDescriptor::from_json(LEVEL).unwrap();
        desc.enemies.push((1.0, 1.0, "Dragon".to_string()));
        assert!(matches!(desc.compile(), Err(LevelError::UnknownEnemyKind { .. })));

        let mut desc = LevelDescriptor::from_json(LEVEL).unwrap();
        desc.items.push((1.0, 1.0, "Gem".to_string()));
        assert!(matches!(desc.compile(), Err(LevelError::UnknownItemKind { .. })));
    }

    #[test]
    fn test_invalid_physics_and_dimensions() {
        let mut desc = LevelDescriptor::from_json(LEVEL).unwrap();
        desc.terminal_velocity = 0.5;
        assert!(matches!(desc.compile(), Err(LevelError::InvalidPhysics { .. })));

        let mut desc = LevelDescriptor::from_json(LEVEL).unwrap();
        desc.width = 0.0;
        assert!(matches!(desc.compile(), Err(LevelError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LevelDescriptor::from_json("{ \"width\": 3 }"),
            Err(LevelError::Json(_))
        ));
    }
}
