//! Kinematic контроллер для игрока
//!
//! Архитектура:
//! - Custom velocity integration (no external solver forces)
//! - Ground check through the Physics Probe, not a hard-coded floor height
//! - Gravity + jump + movement input, snapped to the ground when landing
//!
//! The real first-person controller (mouse look, head bob, wall sliding)
//! belongs to the host; this is the minimal version the core needs to run
//! headless: feet position, vertical velocity, grounded flag.

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::director::{GamePhase, GameState};
use crate::physics::probe::CollisionSnapshot;

/// How far above the feet the ground probe starts
pub const GROUND_PROBE_LIFT: f32 = 0.5;
/// Tolerance below the feet still counted as standing
pub const GROUND_PROBE_EPSILON: f32 = 0.1;

/// Kinematic контроллер компонент
///
/// `Transform::translation` is the player's feet.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Horizontal speed (units/s); forced to 0 on game over
    pub move_speed: f32,
    /// Downward acceleration magnitude (units/s²)
    pub gravity: f32,
    /// Initial upward speed of a regular jump
    pub jump_speed: f32,
    pub grounded: bool,
    /// Height of the surface under the feet, when grounded
    pub ground_height: Option<f32>,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            gravity: 9.8,
            jump_speed: 6.26,
            grounded: false,
            ground_height: None,
        }
    }
}

/// Movement intent written by the host (WASD + space)
///
/// Для headless тестов — mock input через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// World-space horizontal direction (Y ignored, normalized internally)
    pub direction: Vec3,
    /// Jump pressed this tick (consumed by `apply_gravity`)
    pub jump: bool,
}

/// System: ground detection через Physics Probe
pub fn ground_detection(
    snapshot: Res<CollisionSnapshot>,
    mut query: Query<(Entity, &Transform, &mut KinematicController)>,
) {
    for (entity, transform, mut controller) in query.iter_mut() {
        let origin = transform.translation + Vec3::Y * GROUND_PROBE_LIFT;
        let hit = snapshot.probe_ground(
            origin,
            GROUND_PROBE_LIFT + GROUND_PROBE_EPSILON,
            &[entity],
        );

        controller.grounded = hit.is_some();
        controller.ground_height = hit.map(|hit| hit.point.y);
    }
}

/// System: horizontal velocity from MovementInput
///
/// Input is frozen outside `Playing` (dead players also have `move_speed == 0`).
pub fn apply_movement_input(
    state: Res<GameState>,
    mut query: Query<(&KinematicController, &mut MovementInput, &mut PhysicsBody)>,
) {
    let accepts_input = state.phase == GamePhase::Playing;

    for (controller, mut input, mut body) in query.iter_mut() {
        if !accepts_input {
            input.jump = false;
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
            continue;
        }

        let planar = Vec3::new(input.direction.x, 0.0, input.direction.z);
        if planar.length_squared() > 0.01 {
            let direction = planar.normalize();
            body.velocity.x = direction.x * controller.move_speed;
            body.velocity.z = direction.z * controller.move_speed;
        } else {
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }
    }
}

/// System: gravity while airborne, landing clamp + jump while grounded
pub fn apply_gravity(
    time: Res<Time>,
    mut query: Query<(&KinematicController, &mut MovementInput, &mut PhysicsBody)>,
) {
    let delta = time.delta_secs();

    for (controller, mut input, mut body) in query.iter_mut() {
        if controller.grounded {
            body.velocity.y = body.velocity.y.max(0.0);
            if input.jump {
                body.velocity.y = controller.jump_speed;
            }
        } else {
            body.velocity.y -= controller.gravity * delta;
        }

        input.jump = false;
    }
}

/// System: position += velocity × dt, snap feet onto the ground when landing
pub fn integrate_velocity_to_transform(
    time: Res<Time>,
    mut query: Query<(&KinematicController, &PhysicsBody, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (controller, body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;

        if controller.grounded && body.velocity.y <= 0.0 {
            if let Some(ground) = controller.ground_height {
                transform.translation.y = ground;
            }
        }
    }
}
