//! Physics Probe — ray and volume queries over a per-tick collision snapshot
//!
//! Архитектура:
//! - `rebuild_collision_snapshot` runs first every tick and copies every
//!   `BoxCollider` into world-space AABBs
//! - All gameplay queries read that snapshot, so nobody observes a
//!   half-updated frame and systems stay free to mutate `Transform`
//! - Entities spawned during a tick become visible to probes on the next one

use bevy::math::bounding::{Aabb3d, IntersectsVolume, RayCast3d};
use bevy::math::Vec3A;
use bevy::prelude::*;

use crate::components::BoxCollider;

/// First thing a ray touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// World-space bounds of a collider at the transform's current position
pub fn world_aabb(transform: &Transform, collider: &BoxCollider) -> Aabb3d {
    Aabb3d::new(
        Vec3A::from(transform.translation + collider.offset),
        Vec3A::from(collider.half_extents),
    )
}

/// Volume test on current-frame positions (rotation ignored)
pub fn colliders_intersect(a: (&Transform, &BoxCollider), b: (&Transform, &BoxCollider)) -> bool {
    world_aabb(a.0, a.1).intersects(&world_aabb(b.0, b.1))
}

/// Point-in-time copy of the collision world
#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionSnapshot {
    volumes: Vec<(Entity, Aabb3d)>,
}

impl CollisionSnapshot {
    pub fn insert(&mut self, entity: Entity, volume: Aabb3d) {
        self.volumes.push((entity, volume));
    }

    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// Nearest hit within `max_distance`, skipping `exclude`
    ///
    /// A ray that starts inside a volume hits it at distance 0.
    /// Zero-length rays never hit (nothing moved this tick).
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        exclude: &[Entity],
    ) -> Option<RayHit> {
        self.nearest_hit(origin, direction, max_distance, exclude, false)
    }

    /// Straight-down probe: "is there ground within `max_distance`?"
    ///
    /// Volumes that enclose the origin are skipped, so a probe starting inside
    /// a crate reports the surface below it instead of the crate itself.
    pub fn probe_ground(&self, origin: Vec3, max_distance: f32, exclude: &[Entity]) -> Option<RayHit> {
        self.nearest_hit(origin, Dir3::NEG_Y, max_distance, exclude, true)
    }

    fn nearest_hit(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        exclude: &[Entity],
        skip_enclosing: bool,
    ) -> Option<RayHit> {
        if max_distance.is_nan() || max_distance <= 0.0 {
            return None;
        }

        let ray = RayCast3d::new(Vec3A::from(origin), direction, max_distance);

        self.volumes
            .iter()
            .filter(|(entity, _)| !exclude.contains(entity))
            .filter_map(|(entity, volume)| {
                ray.aabb_intersection_at(volume)
                    .map(|distance| (*entity, distance))
            })
            .filter(|(_, distance)| !skip_enclosing || *distance > 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, distance)| RayHit {
                entity,
                distance,
                point: origin + direction * distance,
            })
    }
}

/// System: copy every collider into the snapshot (runs first each tick)
pub fn rebuild_collision_snapshot(
    mut snapshot: ResMut<CollisionSnapshot>,
    colliders: Query<(Entity, &Transform, &BoxCollider)>,
) {
    snapshot.clear();
    for (entity, transform, collider) in colliders.iter() {
        snapshot.insert(entity, world_aabb(transform, collider));
    }
}
