//! Shooting domain — projectiles and the rocket jump
//!
//! Содержит:
//! - Projectile (straight-line sweep, push impulse, lifetime cap)
//! - ProjectileHit (event for hosts: impact VFX, hit sounds)
//! - try_rocket_jump (ground-gated vertical launch)

use bevy::prelude::*;

use crate::GameSet;

pub mod projectile;
pub mod rocket_jump;

pub use projectile::{advance_projectiles, fire_projectile, push_impulse, Projectile, ProjectileHit};
pub use rocket_jump::try_rocket_jump;

/// Shooting Plugin
///
/// Projectiles sweep after crates have integrated, so a push lands on top of
/// this tick's friction instead of being damped before anyone sees it.
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileHit>();

        app.add_systems(
            FixedUpdate,
            advance_projectiles
                .in_set(GameSet::Physics)
                .after(crate::physics::update_dynamic_bodies),
        );
    }
}
