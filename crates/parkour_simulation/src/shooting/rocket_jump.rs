//! Rocket jump — shoot the floor, get launched
//!
//! Only works with ground under the feet (probe straight down), so it can't
//! be chained mid-air for unlimited height.

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::physics::movement::GROUND_PROBE_LIFT;
use crate::physics::probe::CollisionSnapshot;

/// Launches the player if there is ground within `probe_distance` below the feet
///
/// Vertical velocity is overwritten, not added: a player falling onto a
/// ledge gets the same launch as one standing still.
///
/// Returns `true` when the launch happened.
pub fn try_rocket_jump(
    snapshot: &CollisionSnapshot,
    player: Entity,
    feet: Vec3,
    body: &mut PhysicsBody,
    force: f32,
    probe_distance: f32,
) -> bool {
    let origin = feet + Vec3::Y * GROUND_PROBE_LIFT;
    if snapshot
        .probe_ground(origin, probe_distance + GROUND_PROBE_LIFT, &[player])
        .is_none()
    {
        return false;
    }

    body.velocity.y = force;
    true
}
