//! Player intents coming from the host's input layer
//!
//! The host maps raw devices (mouse buttons, pointer picking) onto these
//! events/resources before the tick; the simulation never sees key codes.

use bevy::prelude::*;

/// Discrete button presses ("primary action down", "secondary action down")
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Fire / press hovered button / restart after a win
    Primary,
    /// Rocket jump
    Secondary,
}

/// Explicit restart request (menu, test harness)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRequested;

/// Entity currently under the pointer, if any
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoveredEntity(pub Option<Entity>);
