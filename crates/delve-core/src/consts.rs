//! Tuning constants shared across generation and the view pipeline.

/// Level dimension bounds (both axes)
pub const MIN_LEVEL_DIM: usize = 15;
pub const MAX_LEVEL_DIM: usize = 30;

/// Deepest level of the dungeon; the boss lives here
pub const MAX_DUNGEON_DEPTH: u32 = 10;

/// Room limits
pub const MAX_ROOMS: usize = 8;
pub const ROOM_ATTEMPTS: usize = 120;
pub const MIN_ROOM_DIM: usize = 3;
pub const MAX_ROOM_DIM: usize = 7;

/// Raycast tuning
pub const MAX_VIEW_DISTANCE: f64 = 12.0;
pub const RAY_STEP: f64 = 0.02;
/// Distance from a cell edge within which a flagged edge counts as a hit
pub const EDGE_THRESHOLD: f64 = 0.05;

/// Default horizontal field of view (60 degrees)
pub const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_3;
