//! Director frame rules and restart

use bevy::prelude::*;

use super::{GamePhase, GameOver, GameRestarted, GameState, GameWon, Hud, PlayerFell};
use crate::components::{BoxCollider, Health, PhysicsBody, Player, SpawnPoint, Spin};
use crate::config::GameConfig;
use crate::input::RestartRequested;
use crate::physics::movement::KinematicController;
use crate::physics::probe::colliders_intersect;
use crate::spawner::SpawnRequest;

/// System: cosmetic goal rotation
///
/// Keeps spinning while dead; a win freezes the whole Director frame.
pub fn spin_goal(state: Res<GameState>, time: Res<Time>, mut spinners: Query<(&mut Spin, &mut Transform)>) {
    if state.phase == GamePhase::Won {
        return;
    }

    let delta = time.delta_secs();
    for (mut spin, mut transform) in spinners.iter_mut() {
        spin.advance(delta);
        transform.rotation = spin.rotation();
    }
}

/// System: below the death plane → lose a life, back to start
///
/// Runs only while `Playing`, so health stops at 0 and a win is never
/// followed by a fall penalty.
pub fn check_fall_death(
    mut state: ResMut<GameState>,
    mut hud: ResMut<Hud>,
    config: Res<GameConfig>,
    mut players: Query<
        (
            &mut Transform,
            &mut Health,
            &SpawnPoint,
            &mut PhysicsBody,
            &mut KinematicController,
        ),
        With<Player>,
    >,
    mut fell_events: EventWriter<PlayerFell>,
    mut game_over_events: EventWriter<GameOver>,
) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let Ok((mut transform, mut health, spawn_point, mut body, mut controller)) =
        players.get_mut(state.player)
    else {
        return;
    };

    if transform.translation.y >= config.player_death_height {
        return;
    }

    health.take_damage(1);
    hud.set_health(health.current);

    transform.translation = spawn_point.0;
    body.velocity = Vec3::ZERO;

    fell_events.write(PlayerFell {
        remaining_health: health.current,
    });

    crate::logger::log_info(&format!(
        "Player fell below {} → respawn at {:?}, health {}/{}",
        config.player_death_height, spawn_point.0, health.current, health.max
    ));

    if !health.is_alive() {
        state.phase = GamePhase::Dead;
        controller.move_speed = 0.0;
        hud.game_over_visible = true;
        game_over_events.write(GameOver);

        crate::logger::log_info("GAME OVER");
    }
}

/// System: player volume touches the goal volume → Won
pub fn check_win(
    mut state: ResMut<GameState>,
    mut hud: ResMut<Hud>,
    colliders: Query<(&Transform, &BoxCollider)>,
    mut won_events: EventWriter<GameWon>,
) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Current-frame volumes: the player has already moved this tick
    let (Ok(player), Ok(goal)) = (colliders.get(state.player), colliders.get(state.goal)) else {
        return;
    };

    if !colliders_intersect(player, goal) {
        return;
    }

    state.phase = GamePhase::Won;
    hud.win_panel_visible = true;
    won_events.write(GameWon);

    crate::logger::log_info("Goal reached: YOU WIN!");
}

/// System: full session reset
///
/// Honoured from any phase. Several requests in one tick reset once.
/// Every spawner gets a forced request, so the board ends up with exactly one
/// fresh crate per slot no matter what was alive before.
pub fn restart_game(
    mut requests: EventReader<RestartRequested>,
    mut state: ResMut<GameState>,
    mut hud: ResMut<Hud>,
    config: Res<GameConfig>,
    mut players: Query<
        (
            &mut Transform,
            &mut Health,
            &SpawnPoint,
            &mut PhysicsBody,
            &mut KinematicController,
        ),
        With<Player>,
    >,
    mut spawn_requests: EventWriter<SpawnRequest>,
    mut restarted_events: EventWriter<GameRestarted>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Ok((mut transform, mut health, spawn_point, mut body, mut controller)) =
        players.get_mut(state.player)
    else {
        crate::logger::log_error("Restart requested but the player entity is missing");
        return;
    };

    let previous = state.phase;

    transform.translation = spawn_point.0;
    body.velocity = Vec3::ZERO;
    health.restore();
    controller.move_speed = config.player_move_speed;

    state.phase = GamePhase::Playing;
    *hud = Hud::new(health.current);

    spawn_requests.write_batch(state.spawners.iter().copied().map(SpawnRequest::forced));
    restarted_events.write(GameRestarted);

    crate::logger::log_info(&format!(
        "Game restarted (was {:?}), {} spawners reset",
        previous,
        state.spawners.len()
    ));
}
