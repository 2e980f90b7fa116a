//! Crate spawners — slot lifecycle and console buttons
//!
//! Every slot owns zero or one live crate. All spawns go through
//! `SpawnRequest` events so button presses, restarts and the host share one
//! code path with one guard.

use bevy::prelude::*;

use crate::audio::SoundCue;
use crate::components::{BoxCollider, ButtonTint, DynamicBody, SpawnButton, SpawnPlan, Spawner};
use crate::config::GameConfig;
use crate::input::HoveredEntity;
use crate::{DeterministicRng, GameSet};

/// Event: ask a spawner for a crate
///
/// `force: false` is the button path (no-op while a live crate exists).
/// `force: true` replaces whatever is there (full restart).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRequest {
    pub spawner: Entity,
    pub force: bool,
}

impl SpawnRequest {
    pub fn button(spawner: Entity) -> Self {
        Self {
            spawner,
            force: false,
        }
    }

    pub fn forced(spawner: Entity) -> Self {
        Self {
            spawner,
            force: true,
        }
    }
}

/// Creates a crate at `position`, owned by `spawner`
///
/// Crates are unit cubes scaled by `config.crate_scale`.
pub fn spawn_crate(
    commands: &mut Commands,
    spawner: Entity,
    position: Vec3,
    config: &GameConfig,
) -> Entity {
    let scale = config.crate_scale;

    commands
        .spawn((
            Name::new("Crate"),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            DynamicBody::from_scale(scale, config.crate_friction, Some(spawner)),
            BoxCollider::cube(scale),
        ))
        .id()
}

/// System: resolve spawn requests against the one-crate-per-slot guard
///
/// Crates created earlier in this same tick are not queryable yet, so they
/// are tracked in `pending` and count as live.
pub fn process_spawn_requests(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut requests: EventReader<SpawnRequest>,
    mut spawners: Query<&mut Spawner>,
    bodies: Query<(), With<DynamicBody>>,
    mut cues: EventWriter<SoundCue>,
) {
    let mut pending: Vec<Entity> = Vec::new();

    for request in requests.read() {
        let Ok(mut spawner) = spawners.get_mut(request.spawner) else {
            crate::logger::log_warning(&format!(
                "Spawn request for unknown spawner {:?}",
                request.spawner
            ));
            continue;
        };

        let exists = |entity: Entity| bodies.contains(entity) || pending.contains(&entity);
        let body_alive = spawner.body.is_some_and(exists);

        let stale = match spawner.plan_spawn(body_alive, request.force) {
            SpawnPlan::Keep => {
                crate::logger::log(&format!(
                    "Spawner {} already has a live crate, ignoring",
                    spawner.slot
                ));
                continue;
            }
            SpawnPlan::Replace { stale } => stale,
        };

        if let Some(stale) = stale.filter(|stale| exists(*stale)) {
            commands.entity(stale).despawn();
            pending.retain(|entity| *entity != stale);
        }

        let body = spawn_crate(&mut commands, request.spawner, spawner.position, &config);
        spawner.body = Some(body);
        pending.push(body);

        cues.write(SoundCue::spawn(&mut rng.rng, &config));

        crate::logger::log(&format!(
            "Spawner {} spawned crate {:?} at {:?}",
            spawner.slot, body, spawner.position
        ));
    }
}

/// System: hover highlight for console buttons
pub fn update_button_highlight(
    hovered: Res<HoveredEntity>,
    mut buttons: Query<(Entity, &mut ButtonTint), With<SpawnButton>>,
) {
    for (entity, mut tint) in buttons.iter_mut() {
        let target = if hovered.0 == Some(entity) {
            ButtonTint::Highlighted
        } else {
            ButtonTint::Normal
        };
        tint.set_if_neq(target);
    }
}

/// Spawner Plugin
///
/// Highlight follows the pointer in Input; requests resolve in Lifecycle
/// (after restart has queued its forced requests).
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnRequest>();

        app.add_systems(FixedUpdate, update_button_highlight.in_set(GameSet::Input));
        app.add_systems(
            FixedUpdate,
            process_spawn_requests.in_set(GameSet::Lifecycle),
        );
    }
}
