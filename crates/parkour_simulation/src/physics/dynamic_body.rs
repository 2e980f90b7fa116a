//! Pushable crate physics
//!
//! Per tick, for every `DynamicBody`:
//! 1. Ground probe straight down (half-height + epsilon, excluding self)
//! 2. Airborne → gravity accumulates; grounded → kill downward velocity,
//!    damp horizontal velocity by friction
//! 3. Integrate position (always, grounded or not)
//! 4. Below the crate death plane → free the Spawner slot, despawn

use bevy::prelude::*;

use crate::components::{DynamicBody, PhysicsBody, Spawner};
use crate::config::GameConfig;
use crate::physics::probe::CollisionSnapshot;

/// One integration step for a crate
///
/// `grounded` comes from the probe; pending upward velocity (a bounce from a
/// push) survives ground contact, downward velocity does not.
pub fn integrate_dynamic_body(
    body: &DynamicBody,
    physics: &mut PhysicsBody,
    translation: &mut Vec3,
    grounded: bool,
    gravity: f32,
    delta: f32,
) {
    if grounded {
        physics.velocity.y = physics.velocity.y.max(0.0);

        // Exponential decay toward rest; clamp so a huge delta cannot flip direction
        let damping = (1.0 - body.friction * delta).max(0.0);
        physics.velocity.x *= damping;
        physics.velocity.z *= damping;
    } else {
        physics.velocity.y -= gravity * delta;
    }

    *translation += physics.velocity * delta;
}

/// System: step every crate, despawn the ones that fell out of the world
pub fn update_dynamic_bodies(
    mut commands: Commands,
    snapshot: Res<CollisionSnapshot>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut bodies: Query<(Entity, &DynamicBody, &mut PhysicsBody, &mut Transform)>,
    mut spawners: Query<&mut Spawner>,
) {
    let delta = time.delta_secs();

    for (entity, body, mut physics, mut transform) in bodies.iter_mut() {
        let reach = body.half_height + config.crate_probe_epsilon;
        let grounded = snapshot
            .probe_ground(transform.translation, reach, &[entity])
            .is_some();

        integrate_dynamic_body(
            body,
            &mut physics,
            &mut transform.translation,
            grounded,
            config.gravity,
            delta,
        );

        if transform.translation.y < config.crate_death_height {
            if let Some(owner) = body.owner {
                if let Ok(mut spawner) = spawners.get_mut(owner) {
                    spawner.release(entity);
                }
            }

            commands.entity(entity).despawn();

            crate::logger::log(&format!(
                "Crate {:?} fell below {} and was removed (owner: {:?})",
                entity, config.crate_death_height, body.owner
            ));
        }
    }
}
