//! Projectile — straight-line bullet with push impulse
//!
//! Architecture:
//! - Fixed speed, fixed direction, no gravity
//! - Each tick: ray from the current position along `direction` for
//!   `speed × dt` (sweep, so fast bullets cannot tunnel through thin crates)
//! - First hit resolves the push and destroys the projectile, pushable or not
//! - Lifetime cap is a deferred `DespawnProjectile` task scheduled at fire time

use bevy::prelude::*;
use std::time::Duration;

use crate::components::{PhysicsBody, Pushable};
use crate::config::GameConfig;
use crate::director::GameState;
use crate::physics::probe::CollisionSnapshot;
use crate::schedules::{DeferredAction, DeferredTasks};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub direction: Dir3,
    /// Units per second
    pub speed: f32,
    /// Impulse magnitude added to pushable targets
    pub push_force: f32,
}

/// Event: projectile hit something (before it was destroyed)
///
/// `impulse` is the velocity added to the target (None for static geometry).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub point: Vec3,
    pub impulse: Option<Vec3>,
}

/// Horizontal push along the projectile's heading
///
/// The vertical component is dropped and the rest renormalized, so a shot
/// fired downward at a crate still shoves it sideways at full strength.
/// A perfectly vertical shot has no heading and pushes nothing.
pub fn push_impulse(direction: Dir3, force: f32) -> Option<Vec3> {
    Vec3::new(direction.x, 0.0, direction.z)
        .try_normalize()
        .map(|heading| heading * force)
}

/// Spawns a projectile and schedules its lifetime cap
pub fn fire_projectile(
    commands: &mut Commands,
    tasks: &mut DeferredTasks,
    now: Duration,
    config: &GameConfig,
    origin: Vec3,
    direction: Dir3,
) -> Entity {
    let projectile = commands
        .spawn((
            Name::new("Projectile"),
            Transform::from_translation(origin).looking_to(direction, Vec3::Y),
            Projectile {
                direction,
                speed: config.projectile_speed,
                push_force: config.projectile_push_force,
            },
        ))
        .id();

    tasks.schedule_secs(
        now,
        config.projectile_lifetime,
        DeferredAction::DespawnProjectile(projectile),
    );

    projectile
}

/// System: sweep every projectile forward, resolve first hits
pub fn advance_projectiles(
    mut commands: Commands,
    snapshot: Res<CollisionSnapshot>,
    state: Res<GameState>,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &Projectile, &mut Transform)>,
    mut pushables: Query<&mut PhysicsBody, With<Pushable>>,
    mut hit_events: EventWriter<ProjectileHit>,
) {
    let delta = time.delta_secs();

    for (entity, projectile, mut transform) in projectiles.iter_mut() {
        let step = projectile.speed * delta;

        let Some(hit) = snapshot.cast_ray(
            transform.translation,
            projectile.direction,
            step,
            &[entity, state.player],
        ) else {
            transform.translation += projectile.direction * step;
            continue;
        };

        let impulse = match pushables.get_mut(hit.entity) {
            Ok(mut body) => {
                let impulse = push_impulse(projectile.direction, projectile.push_force);
                if let Some(impulse) = impulse {
                    // Accumulates: repeated hits stack momentum
                    body.velocity += impulse;
                }
                impulse
            }
            Err(_) => None,
        };

        hit_events.write(ProjectileHit {
            projectile: entity,
            target: hit.entity,
            point: hit.point,
            impulse,
        });

        commands.entity(entity).despawn();

        crate::logger::log(&format!(
            "Projectile {:?} hit {:?} at {:?} (impulse: {:?})",
            entity, hit.entity, hit.point, impulse
        ));
    }
}
