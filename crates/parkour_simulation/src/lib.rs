//! Parkour Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: a first-person platforming course with
//! pushable crates, crate spawners, a push-gun and rocket jumps.
//!
//! Rendering, audio playback and raw input belong to the host. The core
//! consumes `PlayerAction` / `HoveredEntity` / `MovementInput` and exposes
//! its results as components (`Transform`, `MuzzleFlash`, `ButtonTint`),
//! resources (`Hud`, `GameState`) and events (`SoundCue`, `ProjectileHit`, ...).
//!
//! Frame order (FixedUpdate, one pass per tick):
//! Prepare → Input → Lifecycle → Physics → Director

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod audio;
pub mod components;
pub mod config;
pub mod director;
pub mod input;
pub mod level;
pub mod logger;
pub mod physics;
pub mod schedules;
pub mod shooting;
pub mod spawner;

// Re-export базовых типов для удобства
pub use audio::{Cue, SoundCue};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use director::{
    DirectorPlugin, GameOver, GamePhase, GameRestarted, GameState, GameWon, Hud, PlayerFell,
};
pub use input::{HoveredEntity, PlayerAction, RestartRequested};
pub use level::{setup_level, LevelLayout, PlatformSpec};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, ConsoleLogger,
    LogLevel, LogPrinter,
};
pub use physics::{CollisionSnapshot, KinematicController, MovementInput, PhysicsPlugin, RayHit};
pub use schedules::{DeferredAction, DeferredTasks, DeferredTasksPlugin};
pub use shooting::{Projectile, ProjectileHit, ShootingPlugin};
pub use spawner::{SpawnRequest, SpawnerPlugin};

/// Ordered phases of one simulation tick
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Collision snapshot, deferred tasks
    Prepare,
    /// Player actions, button hover
    Input,
    /// Restart, crate spawns
    Lifecycle,
    /// Player controller, crates, projectiles
    Physics,
    /// Goal spin, fall-death, win
    Director,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Uses the `GameConfig` already present in the app, or the defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>();
        let config = app.world().resource::<GameConfig>().clone();

        // Детерминистичный RNG (seed из конфига, unless the host brought its own)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .init_resource::<HoveredEntity>()
            .init_resource::<LevelLayout>()
            .add_event::<PlayerAction>()
            .add_event::<RestartRequested>()
            .add_event::<SoundCue>();

        // Nothing ticks until the level has built GameState
        app.configure_sets(
            FixedUpdate,
            (
                GameSet::Prepare,
                GameSet::Input,
                GameSet::Lifecycle,
                GameSet::Physics,
                GameSet::Director,
            )
                .chain()
                .run_if(resource_exists::<GameState>),
        );

        app.add_systems(Startup, setup_level);

        // Подсистемы
        app.add_plugins((
            PhysicsPlugin,
            DeferredTasksPlugin,
            ShootingPlugin,
            SpawnerPlugin,
            DirectorPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (no gameplay plugins)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Full headless game with a manual clock
///
/// Every `app.update()` after the first advances exactly one fixed tick.
/// The first update only runs Startup (level construction).
pub fn create_game_app(config: GameConfig) -> App {
    let mut app = create_headless_app(config.seed);
    let tick = Duration::from_secs_f64(1.0 / config.tick_hz);

    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Components are sorted by entity index and rendered through `Debug`, so two
/// runs with the same seed and inputs must produce identical bytes.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
