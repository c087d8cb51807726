//! Camera: discrete pose to continuous rays

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::dungeon::Direction;

/// Reference angle per facing, indexed by the [`Direction`] ordinal.
///
/// Screen y grows downward, so north points at -90 degrees.
pub const DEFAULT_FACING_ANGLES: [f64; 4] = [
    -FRAC_PI_2, // North
    FRAC_PI_2,  // South
    0.0,        // East
    PI,         // West
];

/// The player's discrete position, owned by the navigation collaborator.
/// The view pipeline only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub x: i32,
    pub y: i32,
    /// Level index (1-based)
    pub level: u32,
    pub facing: Direction,
}

/// Continuous camera state, refreshed once per frame from the pose.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    x: f64,
    y: f64,
    angle: f64,
    facing_angles: [f64; 4],
}

impl Camera {
    /// Build a camera from a pose using the default facing angles
    pub fn from_pose(pose: &PlayerPose) -> Self {
        Self::with_facing_angles(pose, DEFAULT_FACING_ANGLES)
    }

    /// Build a camera with a custom facing-to-angle table
    pub fn with_facing_angles(pose: &PlayerPose, facing_angles: [f64; 4]) -> Self {
        let mut cam = Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            facing_angles,
        };
        cam.update(pose);
        cam
    }

    /// Refresh position and orientation from the current pose.
    ///
    /// The position snaps to the cell center for every facing, so all four
    /// facings start rays from the same subcell offset and no direction
    /// sees walls earlier than another.
    pub fn update(&mut self, pose: &PlayerPose) {
        self.x = pose.x as f64 + 0.5;
        self.y = pose.y as f64 + 0.5;
        self.angle = self.facing_angles[pose.facing as usize];
    }

    /// Ray starting point: the cell center
    pub const fn ray_origin(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Facing angle in radians
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Map a screen column to a ray angle.
    ///
    /// Tangent-space interpolation rather than a linear angle spread: the
    /// offset across [-1, 1] is scaled by tan(fov/2) and pulled back
    /// through atan, which cancels the fisheye stretch a flat projection
    /// plane produces at wide fields of view.
    pub fn ray_angle(&self, column: usize, total_columns: usize, fov: f64) -> f64 {
        debug_assert!(total_columns > 0);
        let offset = (column as f64 + 0.5) / total_columns as f64 * 2.0 - 1.0;
        self.angle + (offset * (fov / 2.0).tan()).atan()
    }
}
