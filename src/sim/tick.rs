//! Fixed timestep simulation tick
//!
//! One call = one step: apply input intent, advance the active scene,
//! then perform any scene transition it asked for.

use serde::{Deserialize, Serialize};

use super::scene::Game;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    #[default]
    None,
    Left,
    Right,
}

/// Input intent for a single tick. All flags except `movement` are
/// edge-triggered: set for exactly one tick per key press.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Held direction
    pub movement: MoveIntent,
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start / continue / restart
    pub confirm: bool,
    /// Leave the game from any scene
    pub quit: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput) {
    if !game.is_running() {
        return;
    }
    if input.quit {
        game.quit();
        return;
    }

    // A transition requested by input replaces the scene before it updates
    if let Some(transition) = game.process_input(input) {
        game.apply(transition);
        return;
    }
    if let Some(transition) = game.update() {
        game.apply(transition);
    }
}
