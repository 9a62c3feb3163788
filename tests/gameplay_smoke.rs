//! Headless runs of the full game plugin with the fixed tick driven by hand.

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use tank_skirmish::core::components::{
    Bullet, EnemyTank, Faction, GameEntity, ItemDrop, PlayerTank, Wrecked,
};
use tank_skirmish::core::events::PlayerDestroyed;
use tank_skirmish::core::inventory::{Inventory, ItemKind};
use tank_skirmish::core::resources::{PlayerDown, RunStats};
use tank_skirmish::core::tank_code::PartSlot;
use tank_skirmish::gameplay::bullet::{despawn_spent_bullets, spawn_bullet};
use tank_skirmish::gameplay::drops::spawn_drop;
use tank_skirmish::gameplay::combat::{
    collect_drops, enemy_contact_kills_player, player_bullets_hit_enemies, replace_wrecked_enemies,
};
use tank_skirmish::{AppState, GameConfig, GamePlugin};

fn headless_app(seed: u64) -> App {
    let mut app = App::new();
    let mut cfg = GameConfig::default();
    cfg.sim.seed = Some(seed);
    app.insert_resource(cfg);
    app.add_plugins((MinimalPlugins, StatesPlugin, GamePlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.update();
    app
}

fn go_to(app: &mut App, state: AppState) {
    app.world_mut().resource_mut::<NextState<AppState>>().set(state);
    app.update();
}

fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

fn entities<F: QueryFilter>(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut q = world.query_filtered::<Entity, F>();
    q.iter(world).collect()
}

fn position(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<Transform>(entity).unwrap().translation.truncate()
}

fn move_to(app: &mut App, entity: Entity, to: Vec2) {
    let mut tf = app.world_mut().get_mut::<Transform>(entity).unwrap();
    tf.translation.x = to.x;
    tf.translation.y = to.y;
}

fn run<M>(app: &mut App, system: impl IntoSystem<(), (), M>) {
    app.world_mut().run_system_once(system).unwrap();
}

#[test]
fn entering_game_spawns_player_and_one_enemy() {
    let mut app = headless_app(1);
    assert_eq!(state(&app), AppState::SelectTank);
    assert!(entities::<With<PlayerTank>>(&mut app).is_empty());

    go_to(&mut app, AppState::Game);
    assert_eq!(state(&app), AppState::Game);
    let player = entities::<With<PlayerTank>>(&mut app);
    let enemies = entities::<With<EnemyTank>>(&mut app);
    assert_eq!(player.len(), 1);
    assert_eq!(enemies.len(), 1);
    assert_eq!(position(&app, player[0]), Vec2::ZERO);
    assert!(position(&app, enemies[0]).length() > 100.0);
}

#[test]
fn shot_enemy_leaves_part_that_player_can_collect() {
    let mut app = headless_app(2);
    go_to(&mut app, AppState::Game);
    let enemy = entities::<With<EnemyTank>>(&mut app)[0];
    let target = position(&app, enemy);

    {
        let world = app.world_mut();
        let cfg = world.resource::<GameConfig>().clone();
        spawn_bullet(&mut world.commands(), &cfg, Faction::Player, target, 0.0);
        world.flush();
    }
    run(&mut app, player_bullets_hit_enemies);
    assert_eq!(app.world().resource::<RunStats>().kills, 1);
    assert_eq!(entities::<With<Wrecked>>(&mut app), vec![enemy]);
    let drops = entities::<With<ItemDrop>>(&mut app);
    assert_eq!(drops.len(), 1);
    assert_eq!(position(&app, drops[0]), target);

    run(&mut app, despawn_spent_bullets);
    assert!(entities::<With<Bullet>>(&mut app).is_empty());

    run(&mut app, replace_wrecked_enemies);
    let enemies = entities::<With<EnemyTank>>(&mut app);
    assert_eq!(enemies.len(), 1);
    assert_ne!(enemies[0], enemy);

    let player = entities::<With<PlayerTank>>(&mut app)[0];
    move_to(&mut app, player, target);
    run(&mut app, collect_drops);
    assert!(entities::<With<ItemDrop>>(&mut app).is_empty());
    assert_eq!(app.world().resource::<Inventory>().len(), 1);
    assert_eq!(app.world().resource::<RunStats>().items_collected, 1);
}

#[test]
fn ramming_an_enemy_ends_the_run_and_clears_the_field() {
    let mut app = headless_app(3);
    go_to(&mut app, AppState::Game);
    let player = entities::<With<PlayerTank>>(&mut app)[0];
    let enemy = entities::<With<EnemyTank>>(&mut app)[0];
    let target = position(&app, player) + Vec2::new(20.0, 0.0);
    move_to(&mut app, enemy, target);

    run(&mut app, enemy_contact_kills_player);
    app.update();
    assert_eq!(state(&app), AppState::GameOver);
    assert!(entities::<With<GameEntity>>(&mut app).is_empty());

    go_to(&mut app, AppState::Game);
    assert_eq!(entities::<With<PlayerTank>>(&mut app).len(), 1);
    assert_eq!(entities::<With<EnemyTank>>(&mut app).len(), 1);
}

#[test]
fn nothing_is_simulated_after_the_fatal_tick() {
    let mut app = headless_app(5);
    go_to(&mut app, AppState::Game);
    let player = entities::<With<PlayerTank>>(&mut app)[0];
    let enemy = entities::<With<EnemyTank>>(&mut app)[0];
    move_to(&mut app, enemy, Vec2::new(20.0, 0.0));
    {
        let world = app.world_mut();
        let cfg = world.resource::<GameConfig>().clone();
        spawn_drop(&mut world.commands(), &cfg, ItemKind::new(PartSlot::Body, 2), Vec2::ZERO);
        world.flush();
    }
    assert_eq!(position(&app, player), Vec2::ZERO);
    let ticks_before = app.world().resource::<RunStats>().ticks_survived;

    // 100ms of frame time is several fixed ticks in a single update.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app.update();

    assert!(app.world().resource::<PlayerDown>().0);
    assert_eq!(app.world().resource::<Events<PlayerDestroyed>>().len(), 1);
    assert_eq!(app.world().resource::<RunStats>().ticks_survived, ticks_before + 1);
    assert!(app.world().resource::<Inventory>().is_empty());
    assert_eq!(entities::<With<ItemDrop>>(&mut app).len(), 1);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.update();
    assert_eq!(state(&app), AppState::GameOver);

    go_to(&mut app, AppState::Game);
    assert!(!app.world().resource::<PlayerDown>().0);
}

#[test]
fn inventory_trip_restarts_scene_but_keeps_tallies() {
    let mut app = headless_app(4);
    go_to(&mut app, AppState::Game);
    app.world_mut().resource_mut::<RunStats>().kills = 3;
    let first_player = entities::<With<PlayerTank>>(&mut app)[0];

    go_to(&mut app, AppState::Inventory);
    assert!(entities::<With<PlayerTank>>(&mut app).is_empty());
    go_to(&mut app, AppState::Game);

    let player = entities::<With<PlayerTank>>(&mut app);
    assert_eq!(player.len(), 1);
    assert_ne!(player[0], first_player);
    assert_eq!(app.world().resource::<RunStats>().kills, 3);
}

#[test]
fn fixed_seed_places_first_enemy_identically() {
    let mut a = headless_app(42);
    let mut b = headless_app(42);
    go_to(&mut a, AppState::Game);
    go_to(&mut b, AppState::Game);
    let ea = entities::<With<EnemyTank>>(&mut a)[0];
    let eb = entities::<With<EnemyTank>>(&mut b)[0];
    assert_eq!(position(&a, ea), position(&b, eb));
}
