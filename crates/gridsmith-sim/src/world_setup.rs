//! World construction: static level geometry and the shared block pool.

use tracing::debug;

use gridsmith_core::config::{EnvironmentBox, SessionConfig};

use crate::pool::ObjectPool;
use crate::world::BlockWorld;

/// Build the shared world and the pool template every participant clones.
pub fn setup_world(config: &SessionConfig) -> (BlockWorld, ObjectPool) {
    let mut world = BlockWorld::new();
    spawn_environment(&mut world, &config.environment);
    let pool = ObjectPool::initialize(
        &mut world,
        &config.pool.prefabs,
        config.pool.capacity_per_type,
        config.pool.reuse_policy,
    );
    (world, pool)
}

/// Spawn static colliders for the level.
pub fn spawn_environment(world: &mut BlockWorld, boxes: &[EnvironmentBox]) {
    for env in boxes {
        world.spawn_environment(env);
    }
    debug!(count = boxes.len(), "environment spawned");
}
