//! Scene state machine and the top-level game driver
//!
//! Title -> Playing(0) -> Playing(n + 1) ... -> Victory, with GameOver
//! reachable from any level. Paused and level-complete are sub-states of
//! Playing held on the `Level` itself. Scenes never change themselves: they
//! return a `Transition` and the `Game` performs the replacement.

use super::descriptor::{LevelDescriptor, LevelError, LevelLayout};
use super::hero::Hero;
use super::level::{Level, LevelStatus};
use super::snapshot::Snapshot;
use super::state::{GameEvent, SceneKind};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// The active scene. Exactly one exists at a time.
#[derive(Debug, Clone)]
pub enum Scene {
    Title,
    Playing(Box<Level>),
    GameOver { score: u64 },
    Victory { score: u64 },
}

/// A scene change requested by the current scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Begin a new run at the first level
    Start,
    /// Move on from a completed level
    Advance,
    GameOver,
    /// Back to the title screen; the next run gets a fresh hero
    Restart,
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Title => SceneKind::Title,
            Scene::Playing(level) if level.completed => SceneKind::LevelComplete,
            Scene::Playing(level) if level.paused => SceneKind::Paused,
            Scene::Playing(_) => SceneKind::Playing,
            Scene::GameOver { .. } => SceneKind::GameOver,
            Scene::Victory { .. } => SceneKind::Victory,
        }
    }

    /// React to edge-triggered input
    pub fn process_input(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) -> Option<Transition> {
        match self {
            Scene::Title => input.confirm.then_some(Transition::Start),
            Scene::Playing(level) => {
                if level.completed {
                    return input.confirm.then_some(Transition::Advance);
                }
                if input.pause {
                    level.paused = !level.paused;
                    events.push(if level.paused {
                        GameEvent::Paused
                    } else {
                        GameEvent::Resumed
                    });
                }
                level.apply_input(input, events);
                None
            }
            Scene::GameOver { .. } | Scene::Victory { .. } => {
                input.confirm.then_some(Transition::Restart)
            }
        }
    }

    /// Per-tick simulation; only Playing does anything
    pub fn update(&mut self, events: &mut Vec<GameEvent>) -> Option<Transition> {
        match self {
            Scene::Playing(level) => match level.update(events) {
                LevelStatus::GameOver => Some(Transition::GameOver),
                LevelStatus::Running | LevelStatus::Completed => None,
            },
            _ => None,
        }
    }
}

/// Owns the current scene, the level list and the run's tuning
#[derive(Debug, Clone)]
pub struct Game {
    scene: Scene,
    layouts: Vec<LevelLayout>,
    tuning: Tuning,
    running: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl Game {
    /// Validate tuning and every level up front; starts at the title screen
    pub fn new(descriptors: &[LevelDescriptor], tuning: Tuning) -> Result<Self, LevelError> {
        tuning.validate()?;
        if descriptors.is_empty() {
            return Err(LevelError::NoLevels);
        }
        let layouts = descriptors
            .iter()
            .map(LevelDescriptor::compile)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Game ready with {} levels", layouts.len());
        Ok(Self {
            scene: Scene::Title,
            layouts,
            tuning,
            running: true,
            events: Vec::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    /// The level being played, if any
    pub fn level(&self) -> Option<&Level> {
        match &self.scene {
            Scene::Playing(level) => Some(level),
            _ => None,
        }
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        match &mut self.scene {
            Scene::Playing(level) => Some(level),
            _ => None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// False once the player quit
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.scene)
    }

    pub(crate) fn process_input(&mut self, input: &TickInput) -> Option<Transition> {
        self.scene.process_input(input, &mut self.events)
    }

    pub(crate) fn update(&mut self) -> Option<Transition> {
        self.scene.update(&mut self.events)
    }

    /// Replace the current scene
    pub fn apply(&mut self, transition: Transition) {
        let previous = std::mem::replace(&mut self.scene, Scene::Title);
        let next = match (transition, previous) {
            (Transition::Start, _) => self.load_level_or_title(0, Hero::new(&self.tuning)),
            (Transition::Advance, Scene::Playing(level)) => {
                let next_index = level.index + 1;
                let hero = level.into_hero();
                if next_index < self.layouts.len() {
                    self.load_level_or_title(next_index, hero)
                } else {
                    log::info!("All levels cleared, final score {}", hero.score);
                    self.events.push(GameEvent::Victory);
                    Scene::Victory { score: hero.score }
                }
            }
            (Transition::GameOver, Scene::Playing(level)) => {
                let score = level.hero.score;
                log::info!("Game over on level {}, score {}", level.index, score);
                self.events.push(GameEvent::GameOver);
                Scene::GameOver { score }
            }
            (Transition::Restart, _) => Scene::Title,
            (transition, previous) => {
                log::warn!("Ignoring {:?} from {:?}", transition, previous.kind());
                self.scene = previous;
                return;
            }
        };
        self.scene = next;
        log::info!("Scene -> {:?}", self.scene.kind());
        self.events.push(GameEvent::SceneChanged(self.scene.kind()));
    }

    /// Build the Playing scene for level `index`, handing it `hero`
    pub fn load_level(&self, index: usize, hero: Hero) -> Result<Scene, LevelError> {
        let layout = self.layouts.get(index).ok_or(LevelError::LevelIndexOutOfRange {
            index,
            count: self.layouts.len(),
        })?;
        Ok(Scene::Playing(Box::new(Level::new(index, layout, hero, &self.tuning))))
    }

    /// Transitions cannot fail; a missing level falls back to the title screen
    fn load_level_or_title(&self, index: usize, hero: Hero) -> Scene {
        self.load_level(index, hero).unwrap_or_else(|e| {
            log::error!("Cannot load level: {}", e);
            Scene::Title
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> LevelDescriptor {
        LevelDescriptor::from_json(
            r#"{ "width": 10, "height": 6, "start": [1, 3], "gravity": 1, "terminal_velocity": 10,
                 "blocks": [[0, 5, "TM"], [1, 5, "TM"], [2, 5, "TM"], [3, 5, "TM"]],
                 "items": [[3, 4, "Flag"]] }"#,
        )
        .unwrap()
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_empty_level_list() {
        assert!(matches!(Game::new(&[], Tuning::default()), Err(LevelError::NoLevels)));
    }

    #[test]
    fn test_new_rejects_bad_tuning() {
        let tuning = Tuning {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(Game::new(&[descriptor()], tuning), Err(LevelError::Tuning(_))));
    }

    #[test]
    fn test_title_starts_first_level() {
        let mut game = Game::new(&[descriptor(), descriptor()], Tuning::default()).unwrap();
        let mut events = Vec::new();
        assert_eq!(game.scene.process_input(&TickInput::default(), &mut events), None);
        let transition = game.scene.process_input(&confirm(), &mut events);
        assert_eq!(transition, Some(Transition::Start));
        game.apply(Transition::Start);
        assert_eq!(game.scene_kind(), SceneKind::Playing);
        assert_eq!(game.level().map(|l| l.index), Some(0));
    }

    #[test]
    fn test_advance_carries_hero_and_ends_in_victory() {
        let mut game = Game::new(&[descriptor(), descriptor()], Tuning::default()).unwrap();
        game.apply(Transition::Start);
        if let Some(level) = game.level_mut() {
            level.hero.score = 7;
            level.hero.lives = 1;
            level.completed = true;
        }
        game.apply(Transition::Advance);
        let level = game.level().unwrap();
        assert_eq!(level.index, 1);
        assert_eq!(level.hero.score, 7);
        assert_eq!(level.hero.lives, 1);

        game.level_mut().unwrap().completed = true;
        game.apply(Transition::Advance);
        assert!(matches!(game.scene(), Scene::Victory { score: 7 }));
        assert!(game.events.contains(&GameEvent::Victory));
    }

    #[test]
    fn test_restart_gives_fresh_hero() {
        let mut game = Game::new(&[descriptor()], Tuning::default()).unwrap();
        game.apply(Transition::Start);
        game.level_mut().unwrap().hero.score = 42;
        game.apply(Transition::GameOver);
        assert!(matches!(game.scene(), Scene::GameOver { score: 42 }));
        game.apply(Transition::Restart);
        assert_eq!(game.scene_kind(), SceneKind::Title);
        game.apply(Transition::Start);
        assert_eq!(game.level().unwrap().hero.score, 0);
        assert_eq!(game.level().unwrap().hero.lives, 3);
    }

    #[test]
    fn test_load_level_out_of_range() {
        let game = Game::new(&[descriptor()], Tuning::default()).unwrap();
        let hero = Hero::new(game.tuning());
        assert!(matches!(game.load_level(0, hero.clone()), Ok(Scene::Playing(_))));
        match game.load_level(3, hero) {
            Err(LevelError::LevelIndexOutOfRange { index, count }) => {
                assert_eq!((index, count), (3, 1));
            }
            other => panic!("expected out of range, got {:?}", other.map(|s| s.kind())),
        }
    }

    #[test]
    fn test_invalid_transition_is_ignored() {
        let mut game = Game::new(&[descriptor()], Tuning::default()).unwrap();
        game.apply(Transition::Advance);
        assert_eq!(game.scene_kind(), SceneKind::Title);
    }

    #[test]
    fn test_pause_toggle_and_frozen_input() {
        let mut game = Game::new(&[descriptor()], Tuning::default()).unwrap();
        game.apply(Transition::Start);
        let mut events = Vec::new();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        game.scene.process_input(&pause, &mut events);
        assert_eq!(game.scene_kind(), SceneKind::Paused);
        assert_eq!(events, vec![GameEvent::Paused]);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        game.scene.process_input(&jump, &mut events);
        assert_eq!(game.level().unwrap().hero.body.vel.y, 0.0);

        game.scene.process_input(&pause, &mut events);
        assert_eq!(game.scene_kind(), SceneKind::Playing);
        assert_eq!(events.last(), Some(&GameEvent::Resumed));
    }
}
