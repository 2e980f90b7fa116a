//! Physics body компоненты: velocity carrier + pushable crates

use bevy::prelude::*;

/// Velocity integrated by our own systems (no external solver)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

/// Capability flag: projectiles may push this entity
///
/// Projectiles check for this component, never for a concrete type.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Pushable;

/// Gravity-affected, friction-damped crate
///
/// Invariant: `velocity.y >= 0` right after a ground contact is detected.
///
/// `owner` is a non-owning handle to the Spawner slot that produced the body.
/// The body only uses it to free that slot when it falls out of the world.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(PhysicsBody, Pushable)]
pub struct DynamicBody {
    /// Horizontal damping per second while grounded
    pub friction: f32,
    pub half_height: f32,
    pub owner: Option<Entity>,
}

impl Default for DynamicBody {
    fn default() -> Self {
        Self {
            friction: 4.0,
            half_height: 0.5,
            owner: None,
        }
    }
}

impl DynamicBody {
    /// Crates are unit cubes scaled uniformly
    pub fn from_scale(scale: f32, friction: f32, owner: Option<Entity>) -> Self {
        Self {
            friction,
            half_height: scale * 0.5,
            owner,
        }
    }
}
