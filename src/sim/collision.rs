//! Axis-separated collision resolution against static obstacles
//!
//! A body first moves along X and is pushed out of whatever it ran into,
//! then moves along Y against the already-corrected X position. Resolving
//! one axis at a time keeps diagonal motion from slipping between two
//! grid-aligned blocks.
//!
//! Obstacles are visited in slice order. When several overlap at once each
//! one clamps the body independently, so the last obstacle applied decides
//! the final coordinate.

use glam::Vec2;

use super::aabb::Aabb;
use super::body::Body;
use crate::consts::CONTACT_EPSILON;

/// What a body ran into while moving for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionReport {
    /// Stopped by an obstacle while moving horizontally
    pub blocked_x: bool,
    /// Stopped by an obstacle while rising
    pub hit_ceiling: bool,
    /// Obstacles the body is standing on after the vertical pass
    pub supports: Vec<Aabb>,
}

impl MotionReport {
    pub fn grounded(&self) -> bool {
        !self.supports.is_empty()
    }
}

/// Move `body` by its velocity, X first then Y, resolving overlaps with `obstacles`
pub fn resolve_motion(body: &mut Body, obstacles: &[Aabb]) -> MotionReport {
    let blocked_x = resolve_x(body, obstacles);
    let (supports, hit_ceiling) = resolve_y(body, obstacles);
    MotionReport {
        blocked_x,
        hit_ceiling,
        supports,
    }
}

/// Horizontal pass. Returns true if any obstacle stopped the body.
///
/// On a hit the right edge is clamped to the obstacle's left edge (moving
/// right) or the left edge to the obstacle's right edge (moving left), and
/// `vel.x` is zeroed.
pub fn resolve_x(body: &mut Body, obstacles: &[Aabb]) -> bool {
    let vx = body.vel.x;
    if vx == 0.0 {
        return false;
    }

    let before = body.aabb();
    body.pos.x += vx;
    let moved = body.aabb();

    let mut blocked = false;
    for obstacle in obstacles.iter().filter(|o| moved.overlaps(o)) {
        if !resolvable(&before, obstacle) {
            continue;
        }
        if vx > 0.0 {
            body.set_right(obstacle.left());
        } else {
            body.set_left(obstacle.right());
        }
        body.vel.x = 0.0;
        blocked = true;
    }
    blocked
}

/// Vertical pass. Returns the supporting obstacles and whether a ceiling was hit.
///
/// While falling or at rest the search box reaches `CONTACT_EPSILON` below
/// the body, so a body sitting exactly on a block still registers it as
/// support without sinking into it.
pub fn resolve_y(body: &mut Body, obstacles: &[Aabb]) -> (Vec<Aabb>, bool) {
    let vy = body.vel.y;

    let before = body.aabb();
    body.pos.y += vy;
    let probe = if vy >= 0.0 {
        body.aabb().extended_down(CONTACT_EPSILON)
    } else {
        body.aabb()
    };

    let mut supports = Vec::new();
    let mut hit_ceiling = false;
    for obstacle in obstacles.iter().filter(|o| probe.overlaps(o)) {
        if !resolvable(&before, obstacle) {
            continue;
        }
        if vy >= 0.0 {
            body.set_bottom(obstacle.top());
            supports.push(*obstacle);
        } else {
            body.set_top(obstacle.bottom());
            hit_ceiling = true;
        }
        body.vel.y = 0.0;
    }
    (supports, hit_ceiling)
}

/// True if any obstacle overlaps `aabb` moved by `offset`
pub fn probe_overlap(aabb: &Aabb, offset: Vec2, obstacles: &[Aabb]) -> bool {
    let probe = aabb.translated(offset);
    obstacles.iter().any(|o| o.is_valid() && probe.overlaps(o))
}

/// Skip obstacles that cannot be resolved by pushing along the current axis:
/// degenerate boxes, and boxes the body was already embedded in before moving.
fn resolvable(before: &Aabb, obstacle: &Aabb) -> bool {
    if !obstacle.is_valid() {
        log::warn!("Skipping degenerate obstacle {:?}", obstacle);
        return false;
    }
    if before.overlaps(obstacle) {
        log::warn!(
            "Body at {:?} already embedded in obstacle at {:?}, skipping",
            before.min,
            obstacle.min
        );
        return false;
    }
    true
}
