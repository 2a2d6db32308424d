//! Shared simulation types: events, facing, scene kinds

use serde::{Deserialize, Serialize};

use super::entity::ItemKind;

/// Which way a moving entity is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity; `None` when standing still
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Discriminant of the active scene, for renderers and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    Title,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    Victory,
}

/// Something that happened during a tick that the audio/render side may want
/// to react to. Emitted in order, drained by the driver each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    /// Hero's head hit a block while rising
    HeadBump,
    ItemCollected(ItemKind),
    Hurt,
    Death,
    LevelComplete,
    GameOver,
    Victory,
    Paused,
    Resumed,
    SceneChanged(SceneKind),
}
