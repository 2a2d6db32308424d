//! One stage of the game: static blocks, items, enemies and the hero
//!
//! Within a tick the hero updates first and then the enemies, so the hero's
//! contact check sees enemy positions as of the start of the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::descriptor::LevelLayout;
use super::enemy::{Enemy, EnemyKind, EnemyWorld};
use super::entity::{Block, Flag, Item, ItemKind};
use super::hero::{Hero, HeroOutcome, HeroWorld};
use super::state::GameEvent;
use super::tick::{MoveIntent, TickInput};
use crate::tuning::Tuning;

/// Where the level stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Running,
    Completed,
    /// Hero has no lives left
    GameOver,
}

/// A loaded stage, in world units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Position in the level list
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub spawn: Vec2,
    pub blocks: Vec<Block>,
    pub items: Vec<Item>,
    pub flags: Vec<Flag>,
    pub enemies: Vec<Enemy>,
    pub hero: Hero,
    pub completed: bool,
    pub paused: bool,
    /// Ticks simulated in this level (paused/completed ticks excluded)
    pub time_ticks: u64,
    /// Block boxes, cached for the resolver
    solid: Vec<Aabb>,
    game_over: bool,
    tuning: Tuning,
}

impl Level {
    /// Build a fresh level and place `hero` at its spawn point
    pub fn new(index: usize, layout: &LevelLayout, mut hero: Hero, tuning: &Tuning) -> Self {
        let grid = tuning.grid_size;
        let spawn = layout.start * grid;

        let blocks: Vec<Block> = layout
            .blocks
            .iter()
            .map(|(pos, kind)| Block {
                kind: *kind,
                aabb: Aabb::cell(pos.x, pos.y, grid),
            })
            .collect();
        let solid = blocks.iter().map(|b| b.aabb).collect();

        let mut items = Vec::new();
        let mut flags = Vec::new();
        for (id, (pos, kind)) in layout.items.iter().enumerate() {
            let aabb = Aabb::cell(pos.x, pos.y, grid);
            if *kind == ItemKind::Flag {
                flags.push(Flag { aabb });
            } else {
                items.push(Item {
                    id: id as u32,
                    kind: *kind,
                    aabb,
                });
            }
        }

        let enemies = layout
            .enemies
            .iter()
            .enumerate()
            .map(|(id, (pos, kind))| {
                let speed = match kind {
                    EnemyKind::Bear => tuning.bear_speed,
                    EnemyKind::Monster => tuning.monster_speed,
                };
                Enemy::new(id as u32, *kind, *pos * grid, Vec2::splat(grid), speed)
            })
            .collect();

        hero.respawn(spawn);

        let level = Self {
            index,
            width: layout.width * grid,
            height: layout.height * grid,
            gravity: layout.gravity,
            terminal_velocity: layout.terminal_velocity,
            spawn,
            blocks,
            items,
            flags,
            enemies,
            hero,
            completed: false,
            paused: false,
            time_ticks: 0,
            solid,
            game_over: false,
            tuning: tuning.clone(),
        };
        log::info!(
            "Loaded level {}: {} blocks, {} items, {} enemies, {} flags",
            index,
            level.blocks.len(),
            level.items.len(),
            level.enemies.len(),
            level.flags.len()
        );
        level
    }

    /// Static obstacle boxes
    pub fn solid(&self) -> &[Aabb] {
        &self.solid
    }

    pub fn status(&self) -> LevelStatus {
        if self.game_over {
            LevelStatus::GameOver
        } else if self.completed {
            LevelStatus::Completed
        } else {
            LevelStatus::Running
        }
    }

    /// Only simulated when neither paused nor completed
    pub fn is_active(&self) -> bool {
        !(self.paused || self.completed || self.game_over)
    }

    /// Turn the tick's movement intent into hero velocity
    pub fn apply_input(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        if !self.is_active() {
            return;
        }
        match input.movement {
            MoveIntent::Left => self.hero.move_left(),
            MoveIntent::Right => self.hero.move_right(),
            MoveIntent::None => self.hero.stop(),
        }
        if input.jump && self.hero.jump(&self.solid, self.tuning.ground_probe) {
            events.push(GameEvent::Jump);
        }
    }

    /// Advance the hero and every nearby enemy by one tick
    pub fn update(&mut self, events: &mut Vec<GameEvent>) -> LevelStatus {
        if !self.is_active() {
            return self.status();
        }
        self.time_ticks += 1;

        let mut world = HeroWorld {
            solid: &self.solid,
            items: &mut self.items,
            enemies: &self.enemies,
            flags: &self.flags,
            width: self.width,
            gravity: self.gravity,
            terminal_velocity: self.terminal_velocity,
            tuning: &self.tuning,
        };
        match self.hero.update(&mut world, events) {
            HeroOutcome::Continue => {}
            HeroOutcome::ReachedGoal => {
                self.completed = true;
                log::info!("Level {} complete, score {}", self.index, self.hero.score);
                events.push(GameEvent::LevelComplete);
            }
            HeroOutcome::LostLife => {
                self.reset();
                return self.status();
            }
            HeroOutcome::OutOfLives => {
                self.game_over = true;
                return self.status();
            }
        }

        let world = EnemyWorld {
            solid: &self.solid,
            width: self.width,
            gravity: self.gravity,
            terminal_velocity: self.terminal_velocity,
        };
        let hero_box = self.hero.body.aabb();
        let radius = self.tuning.activation_radius;
        for enemy in self.enemies.iter_mut().filter(|e| e.is_near(&hero_box, radius)) {
            enemy.update(&world);
        }

        if self.tuning.fall_death && self.hero.is_alive() && self.hero.body.top() > self.height {
            log::debug!("Hero fell out of level {}", self.index);
            self.hero.hearts = 0;
        }

        self.status()
    }

    /// Put the hero and enemies back at their spawn points. Collected items
    /// stay collected.
    pub fn reset(&mut self) {
        log::debug!("Resetting level {}", self.index);
        self.hero.respawn(self.spawn);
        for enemy in &mut self.enemies {
            enemy.reset();
        }
    }

    /// Hand the hero over to the next scene
    pub fn into_hero(self) -> Hero {
        self.hero
    }
}
