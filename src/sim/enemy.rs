//! Patrolling enemies
//!
//! Bears walk until they bump into a block or the edge of the world.
//! Monsters also turn around at the end of the platform they stand on.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::{Body, apply_gravity};
use super::collision::{MotionReport, resolve_motion};
use super::state::Facing;

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Bear,
    Monster,
}

impl FromStr for EnemyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bear" => Ok(EnemyKind::Bear),
            "Monster" => Ok(EnemyKind::Monster),
            _ => Err(()),
        }
    }
}

/// Level data an enemy moves against
pub struct EnemyWorld<'a> {
    pub solid: &'a [Aabb],
    pub width: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub facing: Facing,
    /// Ticks spent active; drives the walk animation only
    pub anim_ticks: u32,
    spawn_pos: Vec2,
    spawn_vel: Vec2,
}

impl Enemy {
    /// New enemy walking left at `speed`
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        let mut body = Body::new(pos, size);
        body.vel = Vec2::new(-speed, 0.0);
        Self {
            id,
            kind,
            body,
            facing: Facing::Left,
            anim_ticks: 0,
            spawn_pos: body.pos,
            spawn_vel: body.vel,
        }
    }

    /// Return to the spawn position and velocity
    pub fn reset(&mut self) {
        self.body.pos = self.spawn_pos;
        self.body.vel = self.spawn_vel;
        self.anim_ticks = 0;
        self.update_facing();
    }

    pub fn reverse(&mut self) {
        self.body.vel.x = -self.body.vel.x;
        self.update_facing();
    }

    /// Within `radius` horizontally of `target` (center to center)
    pub fn is_near(&self, target: &Aabb, radius: f32) -> bool {
        self.body.aabb().horizontal_distance(target) < radius
    }

    /// Advance one tick
    pub fn update(&mut self, world: &EnemyWorld<'_>) {
        self.anim_ticks = self.anim_ticks.wrapping_add(1);
        apply_gravity(&mut self.body, world.gravity, world.terminal_velocity);
        self.move_and_process_blocks(world.solid);
        self.check_world_boundaries(world.width);
        self.update_facing();
    }

    fn move_and_process_blocks(&mut self, solid: &[Aabb]) {
        let vx = self.body.vel.x;
        let report = resolve_motion(&mut self.body, solid);
        if report.blocked_x {
            // Resolver zeroes vx on a hit; walk back the other way instead
            self.body.vel.x = -vx;
            log::debug!("{:?} {} reversed at wall", self.kind, self.id);
        }

        if self.kind == EnemyKind::Monster && self.walking_off(&report) {
            self.reverse();
            log::debug!("Monster {} reversed at platform edge", self.id);
        }
    }

    /// Leading edge has passed every supporting block's matching edge.
    /// Airborne (no supports) never counts as walking off.
    fn walking_off(&self, report: &MotionReport) -> bool {
        let vx = self.body.vel.x;
        if !report.grounded() || vx == 0.0 {
            return false;
        }
        !report.supports.iter().any(|block| {
            if vx > 0.0 {
                self.body.right() <= block.right()
            } else {
                self.body.left() >= block.left()
            }
        })
    }

    fn check_world_boundaries(&mut self, width: f32) {
        if self.body.left() < 0.0 {
            self.body.set_left(0.0);
            self.body.vel.x = self.body.vel.x.abs();
        } else if self.body.right() > width {
            self.body.set_right(width);
            self.body.vel.x = -self.body.vel.x.abs();
        }
    }

    fn update_facing(&mut self) {
        if let Some(facing) = Facing::from_velocity(self.body.vel.x) {
            self.facing = facing;
        }
    }
}
