//! Minimal physical state shared by every moving entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Position, velocity and a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Size never changes after creation
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    #[inline]
    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    #[inline]
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }
}

/// Accelerate downward, capping fall speed at `terminal_velocity` (inclusive)
#[inline]
pub fn apply_gravity(body: &mut Body, gravity: f32, terminal_velocity: f32) {
    body.vel.y = (body.vel.y + gravity).min(terminal_velocity);
}
