//! Shared helpers для integration тестов
//!
//! Every app runs on a manual clock: after `game_app()` returns (Startup done),
//! each `tick()` is exactly one 60 Hz fixed step.

#![allow(dead_code)]

use bevy::prelude::*;
use parkour_simulation::*;

pub const DT: f32 = 1.0 / 60.0;

/// Full game with default config, level already built
pub fn game_app() -> App {
    game_app_with(GameConfig::default())
}

pub fn game_app_with(config: GameConfig) -> App {
    set_log_level(LogLevel::Warning);
    let mut app = create_game_app(config);
    // First update: Startup only, zero delta
    app.update();
    app
}

pub fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn state(app: &App) -> &GameState {
    app.world().resource::<GameState>()
}

pub fn player(app: &App) -> Entity {
    state(app).player
}

pub fn player_position(app: &App) -> Vec3 {
    app.world().get::<Transform>(player(app)).unwrap().translation
}

pub fn set_player_position(app: &mut App, position: Vec3) {
    let entity = player(app);
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = position;
}

pub fn player_health(app: &App) -> u32 {
    app.world().get::<Health>(player(app)).unwrap().current
}

pub fn press(app: &mut App, action: PlayerAction) {
    app.world_mut().send_event(action);
}

pub fn crates(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<DynamicBody>>();
    let mut entities: Vec<Entity> = query.iter(world).collect();
    entities.sort();
    entities
}

pub fn projectiles(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Projectile>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    entities
}

pub fn spawner(app: &App, slot: usize) -> Entity {
    state(app).spawners[slot]
}

pub fn spawner_body(app: &App, slot: usize) -> Option<Entity> {
    app.world().get::<Spawner>(spawner(app, slot)).unwrap().body
}

pub fn button_of(app: &mut App, spawner_entity: Entity) -> Entity {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &SpawnButton)>();
    let button = query
        .iter(world)
        .find(|(_, button)| button.spawner == spawner_entity)
        .map(|(entity, _)| entity);
    button.unwrap()
}

/// Events written during the last tick
pub fn last_events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

/// Lets the player drop from the start position onto the ground
pub fn settle(app: &mut App) {
    tick(app, 60);
    assert!(
        app.world()
            .get::<KinematicController>(player(app))
            .unwrap()
            .grounded,
        "player should be standing after settling"
    );
}
