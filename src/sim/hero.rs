//! The player-controlled hero
//!
//! Per-tick order is fixed: gravity, world-edge clamp, block collision,
//! then either the living steps (items, enemy contact, invincibility
//! countdown, goal) or, once hearts are gone, the death step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::{Body, apply_gravity};
use super::collision::{probe_overlap, resolve_motion};
use super::enemy::Enemy;
use super::entity::{Flag, Item, ItemKind};
use super::state::{Facing, GameEvent};
use crate::tuning::Tuning;

/// Everything in the level the hero interacts with during a tick
pub struct HeroWorld<'a> {
    pub solid: &'a [Aabb],
    pub items: &'a mut Vec<Item>,
    pub enemies: &'a [Enemy],
    pub flags: &'a [Flag],
    pub width: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub tuning: &'a Tuning,
}

/// What the hero's update means for the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroOutcome {
    Continue,
    ReachedGoal,
    /// A life was lost and some remain; the level must reset
    LostLife,
    /// The last life was lost
    OutOfLives,
}

/// Player character. Score and lives survive level transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub body: Body,
    pub speed: f32,
    pub jump_power: f32,
    pub score: u64,
    pub lives: u32,
    pub hearts: u32,
    pub max_hearts: u32,
    /// Ticks of immunity left after a hit
    pub invincibility: u32,
    pub facing: Facing,
}

impl Hero {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: Body::new(Vec2::ZERO, Vec2::splat(tuning.grid_size)),
            speed: tuning.hero_speed,
            jump_power: tuning.hero_jump_power,
            score: 0,
            lives: tuning.hero_starting_lives,
            hearts: tuning.hero_max_hearts,
            max_hearts: tuning.hero_max_hearts,
            invincibility: 0,
            facing: Facing::Right,
        }
    }

    /// Place at `pos` at rest with full hearts and no immunity
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.hearts = self.max_hearts;
        self.invincibility = 0;
        self.facing = Facing::Right;
    }

    pub fn is_alive(&self) -> bool {
        self.hearts > 0
    }

    pub fn move_left(&mut self) {
        self.body.vel.x = -self.speed;
        self.facing = Facing::Left;
    }

    pub fn move_right(&mut self) {
        self.body.vel.x = self.speed;
        self.facing = Facing::Right;
    }

    pub fn stop(&mut self) {
        self.body.vel.x = 0.0;
    }

    /// Jump if a block lies within `probe` units below the hero's feet.
    ///
    /// The ground test is a temporary offset of the hitbox rather than a
    /// stored grounded flag, so it cannot fire again once airborne.
    pub fn jump(&mut self, solid: &[Aabb], probe: f32) -> bool {
        if probe_overlap(&self.body.aabb(), Vec2::new(0.0, probe), solid) {
            self.body.vel.y = -self.jump_power;
            true
        } else {
            false
        }
    }

    /// Advance one tick
    pub fn update(&mut self, world: &mut HeroWorld<'_>, events: &mut Vec<GameEvent>) -> HeroOutcome {
        apply_gravity(&mut self.body, world.gravity, world.terminal_velocity);
        self.check_world_boundaries(world.width);
        if resolve_motion(&mut self.body, world.solid).hit_ceiling {
            events.push(GameEvent::HeadBump);
        }

        if self.hearts > 0 {
            self.process_items(world.items, world.tuning, events);
            self.process_enemies(world.enemies, world.tuning, events);
            if self.invincibility > 0 {
                self.invincibility -= 1;
            }
            if self.touching_flag(world.flags) {
                return HeroOutcome::ReachedGoal;
            }
            HeroOutcome::Continue
        } else {
            self.die(events)
        }
    }

    /// Keep the hero horizontally inside the level. No vertical clamp.
    fn check_world_boundaries(&mut self, width: f32) {
        if self.body.left() < 0.0 {
            self.body.set_left(0.0);
        } else if self.body.right() > width {
            self.body.set_right(width);
        }
    }

    /// Consume every overlapping item exactly once
    fn process_items(&mut self, items: &mut Vec<Item>, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        let hitbox = self.body.aabb();
        let mut collected = Vec::new();
        items.retain(|item| {
            if item.aabb.overlaps(&hitbox) {
                collected.push(item.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            self.apply_item(kind, tuning);
            log::debug!("Collected {:?}, score={} hearts={} lives={}", kind, self.score, self.hearts, self.lives);
            events.push(GameEvent::ItemCollected(kind));
        }
    }

    /// Item effect on the hero
    pub fn apply_item(&mut self, kind: ItemKind, tuning: &Tuning) {
        match kind {
            ItemKind::Coin => self.score += tuning.coin_value,
            ItemKind::Heart => {
                self.hearts += 1;
                if tuning.cap_hearts_at_max {
                    self.hearts = self.hearts.min(self.max_hearts);
                }
            }
            ItemKind::OneUp => self.lives += 1,
            // Goal is checked against the flag list, not consumed
            ItemKind::Flag => {}
        }
    }

    /// One heart lost per tick at most, however many enemies overlap
    fn process_enemies(&mut self, enemies: &[Enemy], tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.invincibility > 0 {
            return;
        }
        let hitbox = self.body.aabb();
        if enemies.iter().any(|e| e.body.aabb().overlaps(&hitbox)) {
            self.hearts = self.hearts.saturating_sub(1);
            self.invincibility = tuning.invincibility_ticks();
            log::debug!("Hero hurt, hearts={}", self.hearts);
            events.push(GameEvent::Hurt);
        }
    }

    fn touching_flag(&self, flags: &[Flag]) -> bool {
        let hitbox = self.body.aabb();
        flags.iter().any(|f| f.aabb.overlaps(&hitbox))
    }

    fn die(&mut self, events: &mut Vec<GameEvent>) -> HeroOutcome {
        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::Death);
        if self.lives > 0 {
            log::info!("Hero died, {} lives left", self.lives);
            HeroOutcome::LostLife
        } else {
            log::info!("Hero out of lives, final score {}", self.score);
            HeroOutcome::OutOfLives
        }
    }
}
