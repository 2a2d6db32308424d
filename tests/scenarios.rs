use glam::Vec2;
use proptest::prelude::*;
use tilehop::Tuning;
use tilehop::sim::{
    BlockKind, EnemyKind, Game, GameEvent, Hero, ItemKind, Level, LevelDescriptor, LevelLayout, LevelStatus,
    MoveIntent, Scene, SceneKind, TickInput, tick,
};

fn floor(x0: u32, x1: u32, y: f32) -> Vec<(Vec2, BlockKind)> {
    (x0..x1).map(|x| (Vec2::new(x as f32, y), BlockKind::TopMiddle)).collect()
}

fn layout(blocks: Vec<(Vec2, BlockKind)>, start: Vec2) -> LevelLayout {
    LevelLayout {
        width: 20.0,
        height: 8.0,
        start,
        gravity: 1.0,
        terminal_velocity: 10.0,
        blocks,
        items: Vec::new(),
        enemies: Vec::new(),
    }
}

fn build(layout: &LevelLayout) -> Level {
    let tuning = Tuning::default();
    Level::new(0, layout, Hero::new(&tuning), &tuning)
}

fn input(confirm: bool, movement: MoveIntent) -> TickInput {
    TickInput {
        confirm,
        movement,
        ..Default::default()
    }
}

#[test]
fn hero_falls_and_rests_on_block_row() {
    let mut layout = layout(floor(0, 10, 5.0), Vec2::new(2.0, 0.0));
    layout.width = 10.0;
    let mut level = build(&layout);
    let mut events = Vec::new();

    for _ in 0..60 {
        level.update(&mut events);
    }
    assert_eq!(level.hero.body.bottom(), 320.0);
    assert_eq!(level.hero.body.vel.y, 0.0);
    assert_eq!(level.hero.body.pos.x, 128.0);

    // Resting is stable
    for _ in 0..30 {
        level.update(&mut events);
        assert_eq!(level.hero.body.bottom(), 320.0);
    }
}

#[test]
fn last_heart_lost_then_life_lost() {
    let mut layout = layout(floor(0, 20, 5.0), Vec2::new(1.0, 4.0));
    layout.enemies.push((Vec2::new(1.0, 4.0), EnemyKind::Bear));
    let mut level = build(&layout);
    level.hero.hearts = 1;
    level.hero.lives = 2;
    let mut events = Vec::new();

    level.update(&mut events);
    assert_eq!(level.hero.hearts, 0);
    assert_eq!(level.hero.lives, 2);
    assert!(events.contains(&GameEvent::Hurt));

    assert_eq!(level.update(&mut events), LevelStatus::Running);
    assert_eq!(level.hero.lives, 1);
    assert_eq!(level.hero.hearts, level.hero.max_hearts);
    assert_eq!(level.hero.invincibility, 0);
    assert_eq!(level.hero.body.pos, level.spawn);
    assert_eq!(level.enemies[0].body.pos, Vec2::new(64.0, 256.0));
    assert!(events.contains(&GameEvent::Death));
}

#[test]
fn monster_patrols_three_tile_platform() {
    let mut blocks = floor(0, 2, 5.0);
    blocks.extend(floor(4, 7, 5.0));
    let mut layout = layout(blocks, Vec2::new(0.0, 4.0));
    layout.enemies.push((Vec2::new(5.0, 4.0), EnemyKind::Monster));
    let mut level = build(&layout);
    let mut events = Vec::new();
    let speed = Tuning::default().monster_speed;

    // Walks left from x=320 until the leading edge leaves the platform at 256
    for _ in 0..40 {
        level.update(&mut events);
    }
    assert!(level.enemies[0].body.vel.x > 0.0);

    for _ in 0..300 {
        level.update(&mut events);
        let body = &level.enemies[0].body;
        assert!(body.left() >= 256.0 - speed);
        assert!(body.right() <= 448.0 + speed);
        assert_eq!(body.bottom(), 320.0);
    }
}

#[test]
fn coin_is_collected_once() {
    let mut layout = layout(floor(0, 20, 5.0), Vec2::new(1.0, 4.0));
    layout.items.push((Vec2::new(1.0, 4.0), ItemKind::Coin));
    let mut level = build(&layout);
    let mut events = Vec::new();

    for _ in 0..10 {
        level.update(&mut events);
    }
    assert_eq!(level.hero.score, 1);
    assert!(level.items.is_empty());
    let collected = events
        .iter()
        .filter(|e| **e == GameEvent::ItemCollected(ItemKind::Coin))
        .count();
    assert_eq!(collected, 1);

    // Still gone after a reset
    level.reset();
    level.update(&mut events);
    assert_eq!(level.hero.score, 1);
}

#[test]
fn one_up_survives_a_death() {
    let mut layout = layout(floor(0, 20, 5.0), Vec2::new(1.0, 4.0));
    layout.items.push((Vec2::new(2.0, 4.0), ItemKind::OneUp));
    let mut level = build(&layout);
    let mut events = Vec::new();

    // Walk right into the pickup
    level.hero.move_right();
    for _ in 0..10 {
        level.update(&mut events);
    }
    assert_eq!(level.hero.lives, 4);
    assert!(level.items.is_empty());

    level.hero.hearts = 0;
    level.update(&mut events);
    assert_eq!(level.hero.lives, 3);
    assert_eq!(level.hero.body.pos, level.spawn);
    assert!(level.items.is_empty());
}

proptest! {
    #[test]
    fn at_most_one_heart_per_tick(
        offsets in prop::collection::vec(-0.9f32..0.9, 1..6),
        ticks in 1usize..200,
    ) {
        let mut layout = layout(floor(0, 20, 5.0), Vec2::new(6.0, 4.0));
        layout.enemies = offsets
            .iter()
            .map(|dx| (Vec2::new(6.0 + dx, 4.0), EnemyKind::Bear))
            .collect();
        let mut level = build(&layout);
        let mut events = Vec::new();

        for _ in 0..ticks {
            let (hearts, lives, invincibility) = (level.hero.hearts, level.hero.lives, level.hero.invincibility);
            if level.update(&mut events) == LevelStatus::GameOver {
                break;
            }
            if level.hero.lives == lives {
                prop_assert!(level.hero.hearts <= hearts);
                prop_assert!(hearts - level.hero.hearts <= 1);
                if invincibility > 0 {
                    prop_assert_eq!(level.hero.hearts, hearts);
                }
            } else {
                prop_assert_eq!(level.hero.hearts, level.hero.max_hearts);
            }
        }
    }
}

fn flow_level() -> LevelDescriptor {
    LevelDescriptor::from_json(
        r#"{ "width": 8, "height": 6, "start": [1, 3], "gravity": 1, "terminal_velocity": 10,
             "blocks": [[0, 5, "TL"], [1, 5, "TM"], [2, 5, "TM"], [3, 5, "TM"],
                        [4, 5, "TM"], [5, 5, "TM"], [6, 5, "TM"], [7, 5, "TR"]],
             "items": [[2, 4, "Coin"], [6, 4, "Flag"]] }"#,
    )
    .unwrap()
}

fn walk_to_flag(game: &mut Game) {
    for _ in 0..200 {
        tick(game, &input(false, MoveIntent::Right));
        if game.scene_kind() == SceneKind::LevelComplete {
            return;
        }
    }
    panic!("never reached the flag");
}

#[test]
fn full_run_through_scenes() {
    let mut game = Game::new(&[flow_level(), flow_level()], Tuning::default()).unwrap();
    assert_eq!(game.scene_kind(), SceneKind::Title);

    tick(&mut game, &input(true, MoveIntent::None));
    assert_eq!(game.level().map(|l| l.index), Some(0));

    walk_to_flag(&mut game);
    assert_eq!(game.level().unwrap().hero.score, 1);

    tick(&mut game, &input(true, MoveIntent::None));
    let level = game.level().unwrap();
    assert_eq!(level.index, 1);
    assert_eq!(level.hero.score, 1);
    assert_eq!(level.hero.body.pos, level.spawn);

    // Lose the last life on the second level
    let hero = &mut game.level_mut().unwrap().hero;
    hero.lives = 1;
    hero.hearts = 0;
    tick(&mut game, &TickInput::default());
    assert!(matches!(game.scene(), Scene::GameOver { score: 1 }));

    let snapshot = game.snapshot();
    assert_eq!(snapshot.final_score, Some(1));
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("GameOver"));

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LevelComplete));
    assert!(events.contains(&GameEvent::GameOver));
    assert!(events.contains(&GameEvent::SceneChanged(SceneKind::GameOver)));

    tick(&mut game, &input(true, MoveIntent::None));
    assert_eq!(game.scene_kind(), SceneKind::Title);
    tick(&mut game, &input(true, MoveIntent::None));
    let level = game.level().unwrap();
    assert_eq!(level.index, 0);
    assert_eq!(level.hero.score, 0);
    assert_eq!(level.hero.lives, 3);
}

#[test]
fn shipped_levels_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    let levels = ["world-1.json", "world-2.json", "world-3.json"]
        .iter()
        .map(|name| {
            let json = std::fs::read_to_string(dir.join(name)).unwrap();
            LevelDescriptor::from_json(&json).unwrap()
        })
        .collect::<Vec<_>>();
    let game = Game::new(&levels, Tuning::default()).unwrap();
    assert_eq!(game.level_count(), 3);
}
