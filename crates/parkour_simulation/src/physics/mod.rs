//! Physics simulation module
//!
//! Custom kinematic physics, no rigid-body solver:
//! - probe: per-tick collision snapshot + ray / volume queries
//! - dynamic_body: pushable crates (gravity, friction, death plane)
//! - movement: minimal player controller (ground check, gravity, jump)

use bevy::prelude::*;

use crate::GameSet;

pub mod dynamic_body;
pub mod movement;
pub mod probe;


// Re-export основных типов
pub use dynamic_body::{integrate_dynamic_body, update_dynamic_bodies};
pub use movement::{KinematicController, MovementInput};
pub use probe::{colliders_intersect, world_aabb, CollisionSnapshot, RayHit};

/// Physics Plugin
///
/// Порядок выполнения:
/// 1. Prepare: rebuild_collision_snapshot (before anything queries it)
/// 2. Physics: player controller chain, then crates
///    (projectiles run after crates, see ShootingPlugin)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionSnapshot>();

        app.add_systems(
            FixedUpdate,
            probe::rebuild_collision_snapshot.in_set(GameSet::Prepare),
        );

        app.add_systems(
            FixedUpdate,
            (
                movement::ground_detection,
                movement::apply_movement_input,
                movement::apply_gravity,
                movement::integrate_velocity_to_transform,
                dynamic_body::update_dynamic_bodies,
            )
                .chain()
                .in_set(GameSet::Physics),
        );
    }
}
