//! Game Director — state machine, HUD state, per-frame game rules
//!
//! ECS ответственность:
//! - GameState: phase (Playing / Dead / Won) + handles of the key entities
//! - Hud: what the host UI should display
//! - Frame rules: goal spin → fall-death → win, in that order
//! - Input routing: fire / button press / rocket jump / restart
//!
//! Host ответственность: rendering the HUD, reading `SoundCue`s, mapping
//! mouse buttons to `PlayerAction`.

use bevy::prelude::*;

use crate::GameSet;

pub mod input;
pub mod systems;


pub use input::handle_player_actions;
pub use systems::{check_fall_death, check_win, restart_game, spin_goal};

pub const HUD_GAME_OVER_TEXT: &str = "GAME OVER";
pub const HUD_WIN_TEXT: &str = "YOU WIN!";
pub const HUD_RESTART_HINT: &str = "Click to Restart";

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Out of health; terminal until restart
    Dead,
    /// Reached the goal; terminal until restart
    Won,
}

/// Session state owned by the Director
///
/// Created by level setup, lives for the whole program.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Entity,
    pub goal: Entity,
    /// Every crate slot, ground slot first
    pub spawners: Vec<Entity>,
}

impl GameState {
    pub fn new(player: Entity, goal: Entity, spawners: Vec<Entity>) -> Self {
        Self {
            phase: GamePhase::Playing,
            player,
            goal,
            spawners,
        }
    }
}

/// HUD state mirrored by the host UI
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub health_text: String,
    pub win_panel_visible: bool,
    pub game_over_visible: bool,
}

impl Hud {
    pub fn new(health: u32) -> Self {
        Self {
            health_text: Self::health_label(health),
            win_panel_visible: false,
            game_over_visible: false,
        }
    }

    pub fn health_label(health: u32) -> String {
        format!("Health: {}", health)
    }

    pub fn set_health(&mut self, health: u32) {
        self.health_text = Self::health_label(health);
    }
}

/// Event: player fell below the death plane and was sent back to start
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerFell {
    pub remaining_health: u32,
}

/// Event: health ran out
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameOver;

/// Event: player touched the goal
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameWon;

/// Event: session was reset
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameRestarted;

/// Director Plugin
///
/// Порядок выполнения:
/// 1. Input: handle_player_actions (fire / button / rocket jump / restart request)
/// 2. Lifecycle: restart_game → (process_spawn_requests, SpawnerPlugin)
/// 3. Director: spin_goal → check_fall_death → check_win
pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerFell>()
            .add_event::<GameOver>()
            .add_event::<GameWon>()
            .add_event::<GameRestarted>();

        app.add_systems(FixedUpdate, handle_player_actions.in_set(GameSet::Input));

        app.add_systems(
            FixedUpdate,
            restart_game
                .in_set(GameSet::Lifecycle)
                .before(crate::spawner::process_spawn_requests),
        );

        app.add_systems(
            FixedUpdate,
            (spin_goal, check_fall_death, check_win)
                .chain()
                .in_set(GameSet::Director),
        );
    }
}
