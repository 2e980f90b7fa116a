//! World geometry компоненты: colliders, static level pieces, goal

use bevy::prelude::*;

/// Axis-aligned box in world units, centred on `translation + offset`
///
/// Anything carrying this component is visible to ray probes and volume
/// tests. Rotation is ignored (level pieces are axis-aligned, the goal only
/// spins around Y).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Collider for a box of full `size`
    pub fn cuboid(size: Vec3) -> Self {
        Self {
            half_extents: size * 0.5,
            offset: Vec3::ZERO,
        }
    }

    pub fn cube(size: f32) -> Self {
        Self::cuboid(Vec3::splat(size))
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Static ground plane
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Ground;

/// Static platform; `index` follows the climb order
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Platform {
    pub index: usize,
}

/// Win volume above the top platform
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Goal;

/// Cosmetic rotation around the vertical axis
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Spin {
    pub degrees_per_second: f32,
    /// Current yaw, kept in [0, 360)
    pub angle_degrees: f32,
}

impl Spin {
    pub fn new(degrees_per_second: f32) -> Self {
        Self {
            degrees_per_second,
            angle_degrees: 0.0,
        }
    }

    pub fn advance(&mut self, delta: f32) {
        self.angle_degrees = (self.angle_degrees + delta * self.degrees_per_second).rem_euclid(360.0);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle_degrees.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_halves_size() {
        let collider = BoxCollider::cuboid(Vec3::new(6.0, 0.8, 6.0));
        assert_eq!(collider.half_extents, Vec3::new(3.0, 0.4, 3.0));
        assert_eq!(collider.offset, Vec3::ZERO);
    }

    #[test]
    fn test_spin_wraps() {
        let mut spin = Spin::new(50.0);
        spin.advance(1.0);
        assert!((spin.angle_degrees - 50.0).abs() < 1e-4);

        spin.advance(7.0); // 50 + 350 = 400 → 40
        assert!((spin.angle_degrees - 40.0).abs() < 1e-3);
    }
}
