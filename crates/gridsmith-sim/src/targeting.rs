//! Targeting and grid engine.
//!
//! Pure functions: resolve an aim ray to a placement point, snap points onto
//! the grid lattice, and test whether a cell is free. No state is kept here;
//! anything holding a pose and a `WorldQuery` can call them.

use glam::Vec3;

use gridsmith_core::constants::{MIN_GRID_SIZE, OVERLAP_RADIUS_FACTOR};
use gridsmith_core::types::Pose;

use crate::physics::WorldQuery;

/// Where a block aimed along the ray would go, before snapping.
///
/// A surface hit within `max_distance` yields a point half a cell off the
/// surface along its normal, so the block sits flush against it. A miss
/// yields the point at full reach in open air.
pub fn resolve_target<W: WorldQuery + ?Sized>(
    world: &W,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    grid_size: f32,
) -> Vec3 {
    match world.ray_query(origin, direction, max_distance) {
        Some(hit) => hit.point + hit.normal * (grid_size / 2.0),
        None => origin + direction.normalize_or_zero() * max_distance,
    }
}

/// Round each axis to the nearest multiple of `grid_size`.
/// Grid sizes at or below `MIN_GRID_SIZE` disable snapping.
pub fn snap_to_grid(point: Vec3, grid_size: f32) -> Vec3 {
    if grid_size <= MIN_GRID_SIZE {
        return point;
    }
    // Ties go to the even multiple.
    Vec3::new(
        (point.x / grid_size).round_ties_even() * grid_size,
        (point.y / grid_size).round_ties_even() * grid_size,
        (point.z / grid_size).round_ties_even() * grid_size,
    )
}

/// True when nothing intersects a sphere of `0.45 * grid_size` at `point`.
pub fn is_placement_valid<W: WorldQuery + ?Sized>(world: &W, point: Vec3, grid_size: f32) -> bool {
    world.overlap_count(point, grid_size * OVERLAP_RADIUS_FACTOR) == 0
}

/// Resolved and snapped target for a head pose.
pub fn placement_target<W: WorldQuery + ?Sized>(
    world: &W,
    pose: &Pose,
    max_distance: f32,
    grid_size: f32,
) -> Vec3 {
    let raw = resolve_target(world, pose.position, pose.forward(), max_distance, grid_size);
    snap_to_grid(raw, grid_size)
}

/// Snapped point a fixed distance straight ahead of the head, ignoring geometry.
pub fn ahead_target(pose: &Pose, distance: f32, grid_size: f32) -> Vec3 {
    snap_to_grid(pose.position + pose.forward() * distance, grid_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_each_axis() {
        let p = snap_to_grid(Vec3::new(1.4, -2.6, 0.51), 1.0);
        assert_eq!(p, Vec3::new(1.0, -3.0, 1.0));

        let p = snap_to_grid(Vec3::new(0.74, 1.3, -0.2), 0.5);
        assert_eq!(p, Vec3::new(0.5, 1.5, 0.0));
    }

    #[test]
    fn test_snap_disabled_for_tiny_grid() {
        let p = Vec3::new(0.123, 4.567, -8.9);
        assert_eq!(snap_to_grid(p, MIN_GRID_SIZE), p);
        assert_eq!(snap_to_grid(p, 0.0), p);
        assert_eq!(snap_to_grid(p, -1.0), p);
    }

    #[test]
    fn test_snap_idempotent() {
        for grid in [0.25_f32, 0.5, 1.0, 2.0, 0.3] {
            for i in -40..40 {
                let f = i as f32 * 0.37;
                let p = Vec3::new(f, -f * 1.9, f * 0.11 + 3.3);
                let once = snap_to_grid(p, grid);
                let twice = snap_to_grid(once, grid);
                assert_eq!(once, twice, "grid {grid}, point {p:?}");
            }
        }
    }

    #[test]
    fn test_ahead_target() {
        let pose = Pose::new(Vec3::new(0.2, 1.6, 0.0), glam::Quat::IDENTITY);
        assert_eq!(ahead_target(&pose, 4.0, 1.0), Vec3::new(0.0, 2.0, 4.0));
    }
}
