//! Axis-aligned bounding boxes for tile-map collision
//!
//! Screen convention: +x is right, +y is down. A box is stored as its
//! top-left corner plus a size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of a map cell at grid coordinates
    pub fn cell(gx: f32, gy: f32, grid_size: f32) -> Self {
        Self::new(Vec2::new(gx, gy) * grid_size, Vec2::splat(grid_size))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.min.x + self.size.x / 2.0
    }

    /// Boxes with a non-positive or non-finite extent cannot take part in collision
    pub fn is_valid(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0 && self.min.is_finite() && self.size.is_finite()
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Copy of this box moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.min + offset, self.size)
    }

    /// Copy of this box with its bottom edge pushed down by `amount`
    #[inline]
    pub fn extended_down(&self, amount: f32) -> Aabb {
        Aabb::new(self.min, self.size + Vec2::new(0.0, amount))
    }

    /// Horizontal distance between the two box centers
    #[inline]
    pub fn horizontal_distance(&self, other: &Aabb) -> f32 {
        (self.center_x() - other.center_x()).abs()
    }
}
