//! Player компоненты: marker, health, respawn point, camera pivot

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Single-player: exactly one entity carries it (see `GameState::player`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Lives counter
///
/// Инвариант: 0 ≤ current ≤ max. Never wraps below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Where the player reappears after falling (immutable per session)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnPoint(pub Vec3);

/// First-person camera mount
///
/// Yaw lives on the player's `Transform::rotation`; the pivot only adds height
/// and pitch (radians, positive looks up).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraPivot {
    pub height: f32,
    pub pitch: f32,
}

impl Default for CameraPivot {
    fn default() -> Self {
        Self {
            height: 2.0,
            pitch: 0.0,
        }
    }
}

impl CameraPivot {
    pub fn world_position(&self, player: &Transform) -> Vec3 {
        player.translation + Vec3::Y * self.height
    }

    /// Look direction (-Z forward, Bevy convention)
    pub fn forward(&self, player: &Transform) -> Dir3 {
        let rotation = player.rotation * Quat::from_rotation_x(self.pitch);
        rotation * Dir3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_saturates_at_zero() {
        let mut health = Health::new(3);
        health.take_damage(1);
        assert_eq!(health.current, 2);

        health.take_damage(5);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());

        health.restore();
        assert_eq!(health.current, 3);
    }

    #[test]
    fn test_pivot_forward_default() {
        let pivot = CameraPivot::default();
        let forward = pivot.forward(&Transform::IDENTITY);
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_pivot_pitch_up() {
        let pivot = CameraPivot {
            height: 2.0,
            pitch: std::f32::consts::FRAC_PI_2,
        };
        let forward = pivot.forward(&Transform::IDENTITY);
        assert!(forward.abs_diff_eq(Vec3::Y, 1e-5), "forward = {:?}", forward);
    }

    #[test]
    fn test_pivot_position() {
        let pivot = CameraPivot::default();
        let player = Transform::from_xyz(1.0, 0.0, -2.0);
        assert_eq!(pivot.world_position(&player), Vec3::new(1.0, 2.0, -2.0));
    }
}
