//! Room rectangles used during generation

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Rectangle representing a room interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of the interior's left edge
    pub x: usize,
    /// Y coordinate of the interior's top edge
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if this room overlaps another, with a buffer of cells around both
    pub fn overlaps(&self, other: &Room, buffer: usize) -> bool {
        let x1 = self.x.saturating_sub(buffer);
        let y1 = self.y.saturating_sub(buffer);
        let x2 = self.x + self.width + buffer;
        let y2 = self.y + self.height + buffer;

        let ox1 = other.x.saturating_sub(buffer);
        let oy1 = other.y.saturating_sub(buffer);
        let ox2 = other.x + other.width + buffer;
        let oy2 = other.y + other.height + buffer;

        !(x2 <= ox1 || x1 >= ox2 || y2 <= oy1 || y1 >= oy2)
    }

    /// Get center point of room
    pub const fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if point is inside the room interior
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Get a random point inside the room
    pub fn random_point(&self, rng: &mut GameRng) -> (usize, usize) {
        let x = self.x + rng.rn2(self.width as u32) as usize;
        let y = self.y + rng.rn2(self.height as u32) as usize;
        (x, y)
    }

    /// Get room area (interior cells)
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Squared centroid distance to another room
    pub fn distance_sq(&self, other: &Room) -> usize {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let dx = ax.abs_diff(bx);
        let dy = ay.abs_diff(by);
        dx * dx + dy * dy
    }
}
