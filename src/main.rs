//! Tilehop headless driver
//!
//! Loads level files, then lets a simple autopilot play through them at the
//! fixed tick rate without rendering. Useful for smoke-testing level data.
//!
//! Usage: `tilehop [--tuning tuning.json] [level.json ...]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tilehop::Tuning;
use tilehop::sim::{Game, GameEvent, LevelDescriptor, LevelError, MoveIntent, SceneKind, TickInput, tick};

/// Levels played when none are given on the command line
const DEFAULT_LEVELS: [&str; 3] = ["levels/world-1.json", "levels/world-2.json", "levels/world-3.json"];

/// Give up after this many simulated minutes
const MAX_MINUTES: u64 = 10;

/// Play level files headless with a simple autopilot
#[derive(Parser, Debug)]
#[command(name = "tilehop")]
#[command(about = "Headless tile-map platformer runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Balance overrides as JSON; missing fields use defaults
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Level descriptors to play in order
    #[arg(value_name = "LEVEL", default_values_t = DEFAULT_LEVELS.map(String::from))]
    levels: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let game = load_tuning(cli.tuning.as_deref()).and_then(|tuning| {
        let levels = cli
            .levels
            .iter()
            .map(|p| load_level(Path::new(p)))
            .collect::<Result<Vec<_>, _>>()?;
        Game::new(&levels, tuning)
    });

    let mut game = match game {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to load game: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Tilehop (headless) starting with {} levels", game.level_count());
    let max_ticks = MAX_MINUTES * 60 * game.tuning().tick_rate as u64;
    let mut autopilot = Autopilot::default();

    for tick_index in 0..max_ticks {
        let input = autopilot.next_input(&game);
        tick(&mut game, &input);

        for event in game.drain_events() {
            match event {
                GameEvent::SceneChanged(kind) => log::info!("[{}] scene {:?}", tick_index, kind),
                other => log::debug!("[{}] {:?}", tick_index, other),
            }
        }

        if !game.is_running() {
            break;
        }
    }

    let snapshot = game.snapshot();
    println!("Finished in scene {:?}", snapshot.scene);
    if let Some(score) = snapshot.final_score {
        println!("Final score: {}", score);
    }
    ExitCode::SUCCESS
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning, LevelError> {
    match path {
        Some(path) => {
            let json = read(path)?;
            Ok(Tuning::from_json(&json)?)
        }
        None => Ok(Tuning::default()),
    }
}

fn load_level(path: &Path) -> Result<LevelDescriptor, LevelError> {
    log::debug!("Reading {}", path.display());
    LevelDescriptor::from_json(&read(path)?)
}

fn read(path: &Path) -> Result<String, LevelError> {
    std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Walks right, hops over walls and enemies, presses confirm on menus
#[derive(Default)]
struct Autopilot {
    last_x: Option<f32>,
}

impl Autopilot {
    fn next_input(&mut self, game: &Game) -> TickInput {
        match game.scene_kind() {
            SceneKind::Title | SceneKind::LevelComplete => {
                self.last_x = None;
                TickInput {
                    confirm: true,
                    ..Default::default()
                }
            }
            SceneKind::GameOver | SceneKind::Victory => TickInput {
                quit: true,
                ..Default::default()
            },
            SceneKind::Paused => TickInput {
                pause: true,
                ..Default::default()
            },
            SceneKind::Playing => {
                let Some(level) = game.level() else {
                    return TickInput::default();
                };
                let hero = level.hero.body.aabb();
                let x = hero.left();
                let stuck = self.last_x.is_some_and(|last| (last - x).abs() < f32::EPSILON);
                self.last_x = Some(x);

                let lookahead = 2.0 * game.tuning().grid_size;
                let enemy_ahead = level.enemies.iter().any(|e| {
                    let ex = e.body.left();
                    ex > x && ex - x < lookahead && (e.body.top() - hero.top()).abs() < hero.size.y
                });

                TickInput {
                    movement: MoveIntent::Right,
                    jump: stuck || enemy_ahead,
                    ..Default::default()
                }
            }
        }
    }
}
