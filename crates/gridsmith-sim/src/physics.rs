//! World geometry queries: ray casts and sphere overlaps against
//! axis-aligned box colliders.

use glam::Vec3;

use gridsmith_core::types::Layer;

use crate::replication::BlockHandle;

/// Nearest surface struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Outward normal of the struck face.
    pub normal: Vec3,
    pub distance: f32,
    pub layer: Layer,
    /// Set when the struck collider is a pooled block.
    pub handle: Option<BlockHandle>,
}

/// Read-only geometry queries the placement logic needs from the world.
pub trait WorldQuery {
    /// Nearest hit along `direction` within `max_distance`, ignoring inactive colliders.
    fn ray_query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Number of active colliders intersecting the sphere.
    fn overlap_count(&self, center: Vec3, radius: f32) -> usize;
}

/// Slab test. Returns the entry distance and the entry face normal.
/// A ray starting inside the box does not hit it.
pub fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 {
        return None;
    }
    Some((t_enter, normal))
}

/// Sphere vs box, touching counts as overlapping.
pub fn sphere_intersects_aabb(center: Vec3, radius: f32, min: Vec3, max: Vec3) -> bool {
    let closest = center.clamp(min, max);
    (closest - center).length_squared() <= radius * radius
}
