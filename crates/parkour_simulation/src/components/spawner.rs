//! Spawner компоненты: crate slots and their console buttons

use bevy::prelude::*;

/// Fixed slot that owns at most one live crate
///
/// Инвариант: `body` points at zero or one live `DynamicBody`. It is written
/// only by `spawn()` (spawn request processing) and by the body's own
/// fall-out-of-world path.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Spawner {
    /// 0 = ground slot, then one per platform
    pub slot: usize,
    pub position: Vec3,
    pub body: Option<Entity>,
}

/// What a spawn call should do with the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPlan {
    /// A live body exists; leave it alone
    Keep,
    /// Create a new body, first removing `stale` if it still exists
    Replace { stale: Option<Entity> },
}

impl Spawner {
    pub fn new(slot: usize, position: Vec3) -> Self {
        Self {
            slot,
            position,
            body: None,
        }
    }

    /// `force` bypasses the live-body guard (full restart)
    pub fn plan_spawn(&self, body_alive: bool, force: bool) -> SpawnPlan {
        match self.body {
            Some(_) if body_alive && !force => SpawnPlan::Keep,
            stale => SpawnPlan::Replace { stale },
        }
    }

    /// Clears the slot only if it still refers to `body`
    pub fn release(&mut self, body: Entity) -> bool {
        if self.body == Some(body) {
            self.body = None;
            true
        } else {
            false
        }
    }
}

/// Capability flag: clicking this entity (re)spawns the crate of `spawner`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct SpawnButton {
    pub spawner: Entity,
}

/// Hover feedback colour (purely visual)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum ButtonTint {
    #[default]
    Normal,
    Highlighted,
}
