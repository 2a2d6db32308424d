//! Read-only view of the world handed to the renderer each frame

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::enemy::EnemyKind;
use super::entity::{BlockKind, ItemKind};
use super::scene::Scene;
use super::state::{Facing, SceneKind};

/// What a drawable thing is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Block(BlockKind),
    Item(ItemKind),
    Flag,
    Enemy(EnemyKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub aabb: Aabb,
    pub facing: Option<Facing>,
    /// Animation clock for moving entities
    pub anim_ticks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroView {
    pub aabb: Aabb,
    pub facing: Facing,
    pub score: u64,
    pub lives: u32,
    pub hearts: u32,
    pub max_hearts: u32,
    /// Renderers blink the hero while this is non-zero
    pub invincibility: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub scene: SceneKind,
    pub level_index: Option<usize>,
    /// Level size in world units
    pub level_size: Option<(f32, f32)>,
    /// Simulated ticks spent in the level, for the HUD clock
    pub level_ticks: Option<u64>,
    pub hero: Option<HeroView>,
    /// Blocks, then items, flags and enemies
    pub entities: Vec<EntityView>,
    /// Final score on the game-over and victory screens
    pub final_score: Option<u64>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        let mut snapshot = Snapshot {
            scene: scene.kind(),
            level_index: None,
            level_size: None,
            level_ticks: None,
            hero: None,
            entities: Vec::new(),
            final_score: None,
        };

        match scene {
            Scene::Title => {}
            Scene::GameOver { score } | Scene::Victory { score } => {
                snapshot.final_score = Some(*score);
            }
            Scene::Playing(level) => {
                snapshot.level_index = Some(level.index);
                snapshot.level_size = Some((level.width, level.height));
                snapshot.level_ticks = Some(level.time_ticks);
                let hero = &level.hero;
                snapshot.hero = Some(HeroView {
                    aabb: hero.body.aabb(),
                    facing: hero.facing,
                    score: hero.score,
                    lives: hero.lives,
                    hearts: hero.hearts,
                    max_hearts: hero.max_hearts,
                    invincibility: hero.invincibility,
                });

                let still = |kind, aabb| EntityView {
                    kind,
                    aabb,
                    facing: None,
                    anim_ticks: 0,
                };
                let entities = &mut snapshot.entities;
                entities.extend(level.blocks.iter().map(|b| still(EntityKind::Block(b.kind), b.aabb)));
                entities.extend(level.items.iter().map(|i| still(EntityKind::Item(i.kind), i.aabb)));
                entities.extend(level.flags.iter().map(|f| still(EntityKind::Flag, f.aabb)));
                entities.extend(level.enemies.iter().map(|e| EntityView {
                    kind: EntityKind::Enemy(e.kind),
                    aabb: e.body.aabb(),
                    facing: Some(e.facing),
                    anim_ticks: e.anim_ticks,
                }));
            }
        }
        snapshot
    }
}
