//! Headless parkour simulation
//!
//! Runs a scripted session without a renderer: the player walks toward the
//! first platform, shoots, rocket-jumps and presses a spawner button.
//!
//! Usage: `parkour_simulation [config.json]`

use bevy::prelude::*;
use parkour_simulation::{
    create_game_app, init_logger, log_error, log_info, DynamicBody, GameConfig, GameState, HoveredEntity, Hud,
    MovementInput, PlayerAction, Projectile, SpawnButton,
};

const TICKS: u32 = 600;

fn load_config() -> Result<GameConfig, parkour_simulation::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}

fn main() {
    init_logger();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config error: {}", err));
            std::process::exit(1);
        }
    };

    log_info(&format!(
        "Starting parkour headless simulation (seed: {}, {} Hz)",
        config.seed, config.tick_hz
    ));

    let mut app = create_game_app(config);

    // Startup: build the level
    app.update();

    let player = app.world().resource::<GameState>().player;
    let first_button = {
        let world = app.world_mut();
        let mut buttons = world.query_filtered::<Entity, With<SpawnButton>>();
        let first = buttons.iter(world).next();
        first
    };

    for tick in 0..TICKS {
        match tick {
            // Walk toward the first platform
            30 => set_direction(&mut app, player, Vec3::NEG_Z),
            90 => set_direction(&mut app, player, Vec3::ZERO),
            120 | 150 | 180 => {
                app.world_mut().send_event(PlayerAction::Primary);
            }
            240 => {
                app.world_mut().send_event(PlayerAction::Secondary);
            }
            300 => {
                app.world_mut().resource_mut::<HoveredEntity>().0 = first_button;
                app.world_mut().send_event(PlayerAction::Primary);
            }
            301 => {
                app.world_mut().resource_mut::<HoveredEntity>().0 = None;
            }
            _ => {}
        }

        app.update();

        if tick % 100 == 0 {
            report(&mut app, tick);
        }
    }

    report(&mut app, TICKS);
    log_info("Simulation complete!");
}

fn set_direction(app: &mut App, player: Entity, direction: Vec3) {
    if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
        input.direction = direction;
    }
}

fn report(app: &mut App, tick: u32) {
    let world = app.world_mut();
    let crates = world.query::<&DynamicBody>().iter(world).count();
    let projectiles = world.query::<&Projectile>().iter(world).count();

    let state = world.resource::<GameState>();
    let position = world
        .get::<Transform>(state.player)
        .map(|transform| transform.translation)
        .unwrap_or_default();

    log_info(&format!(
        "Tick {}: {:?}, {}, player at {:.2?}, {} crates, {} projectiles",
        tick,
        state.phase,
        world.resource::<Hud>().health_text,
        position,
        crates,
        projectiles
    ));
}
