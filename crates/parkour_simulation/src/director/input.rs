//! Player action routing (primary / secondary)

use bevy::prelude::*;
use std::time::Duration;

use super::{GamePhase, GameState};
use crate::audio::SoundCue;
use crate::components::{CameraPivot, MuzzleFlash, PhysicsBody, Player, SpawnButton};
use crate::config::GameConfig;
use crate::input::{HoveredEntity, PlayerAction, RestartRequested};
use crate::physics::probe::CollisionSnapshot;
use crate::schedules::{DeferredAction, DeferredTasks};
use crate::shooting::{fire_projectile, try_rocket_jump};
use crate::spawner::SpawnRequest;

/// Shows the flash now and queues the hide
fn flash_muzzle(
    flashes: &mut Query<(Entity, &mut MuzzleFlash)>,
    tasks: &mut DeferredTasks,
    now: Duration,
    config: &GameConfig,
) {
    for (flash, mut muzzle) in flashes.iter_mut() {
        let generation = muzzle.show();
        tasks.schedule_secs(
            now,
            config.muzzle_flash_duration,
            DeferredAction::HideMuzzleFlash { flash, generation },
        );
    }
}

/// System: turn `PlayerAction`s into gameplay
///
/// - Won: primary → restart request, everything else ignored
/// - Dead: everything ignored (restart only via `RestartRequested`)
/// - Playing, primary: hovered button → its spawner, otherwise fire
/// - Playing, secondary: rocket jump
#[allow(clippy::too_many_arguments)]
pub fn handle_player_actions(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    state: Res<GameState>,
    hovered: Res<HoveredEntity>,
    config: Res<GameConfig>,
    time: Res<Time>,
    snapshot: Res<CollisionSnapshot>,
    mut tasks: ResMut<DeferredTasks>,
    buttons: Query<&SpawnButton>,
    mut players: Query<(&Transform, &CameraPivot, &mut PhysicsBody), With<Player>>,
    mut flashes: Query<(Entity, &mut MuzzleFlash)>,
    mut restart_requests: EventWriter<RestartRequested>,
    mut spawn_requests: EventWriter<SpawnRequest>,
    mut cues: EventWriter<SoundCue>,
) {
    let now = time.elapsed();

    for action in actions.read() {
        match (state.phase, action) {
            (GamePhase::Won, PlayerAction::Primary) => {
                restart_requests.write(RestartRequested);
                continue;
            }
            (GamePhase::Won | GamePhase::Dead, _) => continue,
            (GamePhase::Playing, _) => {}
        }

        let Ok((transform, pivot, mut body)) = players.get_mut(state.player) else {
            continue;
        };

        match action {
            PlayerAction::Primary => {
                if let Some(button) = hovered.0.and_then(|entity| buttons.get(entity).ok()) {
                    spawn_requests.write(SpawnRequest::button(button.spawner));
                    continue;
                }

                let direction = pivot.forward(transform);
                let origin = pivot.world_position(transform) + direction * config.muzzle_offset;
                let projectile =
                    fire_projectile(&mut commands, &mut tasks, now, &config, origin, direction);

                flash_muzzle(&mut flashes, &mut tasks, now, &config);
                cues.write(SoundCue::fire(&config));

                crate::logger::log(&format!(
                    "Fired projectile {:?} from {:?} toward {:?}",
                    projectile, origin, direction
                ));
            }
            PlayerAction::Secondary => {
                let launched = try_rocket_jump(
                    &snapshot,
                    state.player,
                    transform.translation,
                    &mut body,
                    config.rocket_jump_force,
                    config.rocket_jump_probe_distance,
                );
                if !launched {
                    continue;
                }

                flash_muzzle(&mut flashes, &mut tasks, now, &config);
                cues.write(SoundCue::jump(&config));

                crate::logger::log(&format!(
                    "Rocket jump from {:?}",
                    transform.translation
                ));
            }
        }
    }
}
