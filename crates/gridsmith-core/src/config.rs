//! Session configuration.
//!
//! Every field has a default so a partial JSON document is enough;
//! `SessionConfig::from_json_str` parses and validates in one step.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{PlacementMode, ReusePolicy};
use crate::error::ConfigError;
use crate::types::Layer;

/// Configuration for starting a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed and same commands = same session.
    pub seed: u64,
    pub pool: PoolConfig,
    pub inventory: InventoryConfig,
    pub placer: PlacerConfig,
    pub flight: FlightConfig,
    pub lobby: LobbyConfig,
    /// Ghost previews are recomputed every this many ticks.
    pub ghost_refresh_interval_ticks: u32,
    /// Where new participants' heads start.
    pub spawn_position: Vec3,
    /// Placement path new participants start in.
    pub default_mode: PlacementMode,
    /// Static level geometry.
    pub environment: Vec<EnvironmentBox>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool: PoolConfig::default(),
            inventory: InventoryConfig::default(),
            placer: PlacerConfig::default(),
            flight: FlightConfig::default(),
            lobby: LobbyConfig::default(),
            ghost_refresh_interval_ticks: 1,
            spawn_position: Vec3::new(0.0, 1.5, 0.0),
            default_mode: PlacementMode::default(),
            environment: vec![EnvironmentBox::floor()],
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.capacity_per_type == 0 {
            return Err(ConfigError::Invalid("pool.capacity_per_type must be > 0".into()));
        }
        for (name, value) in [
            ("inventory.grid_size", self.inventory.grid_size),
            ("placer.grid_size", self.placer.grid_size),
            ("inventory.max_reach_distance", self.inventory.max_reach_distance),
            ("placer.placement_distance", self.placer.placement_distance),
            ("flight.move_speed", self.flight.move_speed),
            ("flight.sprint_speed", self.flight.sprint_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be finite and >= 0")));
            }
        }
        if self.lobby.werewolf_count == 0 {
            return Err(ConfigError::Invalid("lobby.werewolf_count must be > 0".into()));
        }
        if self.lobby.min_players > self.lobby.max_players {
            return Err(ConfigError::Invalid(
                "lobby.min_players exceeds lobby.max_players".into(),
            ));
        }
        if self.ghost_refresh_interval_ticks == 0 {
            return Err(ConfigError::Invalid(
                "ghost_refresh_interval_ticks must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// One pooled block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPrefab {
    pub name: String,
    /// Collider half size at unit scale.
    pub half_extents: Vec3,
    pub layer: Layer,
}

impl BlockPrefab {
    /// A unit cube on the block layer.
    pub fn cube(name: &str) -> Self {
        Self {
            name: name.to_string(),
            half_extents: Vec3::splat(0.5),
            layer: Layer::BLOCKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub prefabs: Vec<BlockPrefab>,
    pub capacity_per_type: usize,
    pub reuse_policy: ReusePolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            prefabs: vec![
                BlockPrefab::cube("stone"),
                BlockPrefab::cube("wood"),
                BlockPrefab::cube("glass"),
            ],
            capacity_per_type: DEFAULT_CAPACITY_PER_TYPE,
            reuse_policy: ReusePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub total_stock: u32,
    pub max_reach_distance: f32,
    pub grid_size: f32,
    /// Only hits on this layer can be removed.
    pub block_layer: Layer,
    pub frame_normal_color: [f32; 4],
    pub frame_selected_color: [f32; 4],
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            total_stock: DEFAULT_TOTAL_STOCK,
            max_reach_distance: DEFAULT_MAX_REACH_DISTANCE,
            grid_size: DEFAULT_GRID_SIZE,
            block_layer: Layer::BLOCKS,
            frame_normal_color: FRAME_NORMAL_COLOR,
            frame_selected_color: FRAME_SELECTED_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacerConfig {
    pub placement_distance: f32,
    pub grid_size: f32,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            placement_distance: DEFAULT_PLACEMENT_DISTANCE,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub enabled_on_join: bool,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            sprint_speed: DEFAULT_SPRINT_SPEED,
            enabled_on_join: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    pub werewolf_count: usize,
    pub max_players: usize,
    pub min_players: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            werewolf_count: DEFAULT_WEREWOLF_COUNT,
            max_players: DEFAULT_MAX_PLAYERS,
            min_players: DEFAULT_MIN_PLAYERS,
        }
    }
}

/// Static axis-aligned box in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentBox {
    pub center: Vec3,
    pub half_extents: Vec3,
    #[serde(default)]
    pub layer: Layer,
}

impl EnvironmentBox {
    /// 64 m square floor whose top face sits half a cell below y = 0,
    /// so unit blocks resting on it are centred on integer heights.
    pub fn floor() -> Self {
        Self {
            center: Vec3::new(0.0, -1.0, 0.0),
            half_extents: Vec3::new(32.0, 0.5, 32.0),
            layer: Layer::DEFAULT,
        }
    }
}
