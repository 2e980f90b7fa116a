//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - body: velocity + crate physics (PhysicsBody, DynamicBody, Pushable)
//! - player: player marker, lives, respawn point, camera pivot
//! - world: colliders and static level pieces (BoxCollider, Ground, Platform, Goal, Spin)
//! - spawner: crate slots and console buttons (Spawner, SpawnButton, ButtonTint)
//! - effects: visual toggles (MuzzleFlash)

pub mod body;
pub mod effects;
pub mod player;
pub mod spawner;
pub mod world;

// Re-exports для удобного импорта
pub use body::*;
pub use effects::*;
pub use player::*;
pub use spawner::*;
pub use world::*;
