//! Session constants and tuning defaults.

/// Session tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Inventory ---

/// Number of inventory slots per participant.
pub const SLOT_COUNT: usize = 5;

/// Default number of blocks a participant may hand out across all slots.
pub const DEFAULT_TOTAL_STOCK: u32 = 100;

/// Default ray reach for inventory placement and removal (meters).
pub const DEFAULT_MAX_REACH_DISTANCE: f32 = 8.0;

// --- Grid ---

/// Default grid pitch (meters).
pub const DEFAULT_GRID_SIZE: f32 = 1.0;

/// Grid sizes at or below this disable snapping.
pub const MIN_GRID_SIZE: f32 = 0.001;

/// Occupancy probe radius as a fraction of the grid pitch.
pub const OVERLAP_RADIUS_FACTOR: f32 = 0.45;

// --- Pool ---

/// Default number of pre-allocated handles per block type.
pub const DEFAULT_CAPACITY_PER_TYPE: usize = 10;

// --- Direct placer ---

/// Default distance ahead of the head at which the direct placer drops blocks.
pub const DEFAULT_PLACEMENT_DISTANCE: f32 = 4.0;

// --- Flight ---

/// Default cruising speed (m/s).
pub const DEFAULT_MOVE_SPEED: f32 = 3.0;

/// Default sprint speed (m/s).
pub const DEFAULT_SPRINT_SPEED: f32 = 6.0;

// --- Lobby ---

/// Maximum participants that can join one round.
pub const DEFAULT_MAX_PLAYERS: usize = 20;

/// Minimum participants required to start a round.
pub const DEFAULT_MIN_PLAYERS: usize = 1;

/// Werewolves drawn per round.
pub const DEFAULT_WEREWOLF_COUNT: usize = 1;

// --- HUD ---

/// Slot frame color when not selected (RGBA).
pub const FRAME_NORMAL_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.5];

/// Slot frame color when selected (RGBA).
pub const FRAME_SELECTED_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
