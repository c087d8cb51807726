//! Level grid structure
//!
//! Dense row-major cell storage; width and height are fixed once generation
//! completes, so lookups are plain `y * width + x` indexing.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellKind, Direction};
use super::theme::LevelTheme;

/// One generated dungeon level.
///
/// Written by the generator, then read-mostly: only the per-cell
/// discovered/visited flags mutate afterwards, via the navigation-facing
/// `mark_*` methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: u16,
    pub height: u16,

    /// Level index within the dungeon (1-based)
    pub depth: u32,

    /// Flavor tag driving palette selection
    pub theme: LevelTheme,

    /// Cells in row-major order (`y * width + x`)
    cells: Vec<Cell>,

    /// Player entry point, inside the first carved room
    pub start: (u16, u16),

    pub stairs_up: Option<(u16, u16)>,
    pub stairs_down: Option<(u16, u16)>,
    pub boss: Option<(u16, u16)>,
}

impl Level {
    /// Create a level with every cell initialized to solid wall
    pub fn new(width: u16, height: u16, depth: u32, theme: LevelTheme) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::wall(x, y));
            }
        }
        Self {
            width,
            height,
            depth,
            theme,
            cells,
            start: (0, 0),
            stairs_up: None,
            stairs_down: None,
            boss: None,
        }
    }

    /// Check if position is inside the grid
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get cell at position; None when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.cells[self.index(x, y)])
    }

    /// Get mutable cell at position; None when out of bounds
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.index(x, y);
        Some(&mut self.cells[idx])
    }

    /// Replace the cell at the position carried by `cell`.
    ///
    /// Generation-time only; out-of-bounds writes are ignored.
    pub fn set_cell(&mut self, cell: Cell) {
        if self.in_bounds(cell.x as i32, cell.y as i32) {
            let idx = self.index(cell.x as i32, cell.y as i32);
            self.cells[idx] = cell;
        }
    }

    /// True iff the cell exists and its kind is passable
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| c.kind.is_passable())
    }

    /// Bounds-filtered 4-neighborhood of a position
    pub fn cardinal_neighbors(&self, x: i32, y: i32) -> Vec<(u16, u16)> {
        let mut out = Vec::with_capacity(4);
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (nx, ny) = (x + dx, y + dy);
            if self.in_bounds(nx, ny) {
                out.push((nx as u16, ny as u16));
            }
        }
        out
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of every passable cell
    pub fn floor_positions(&self) -> Vec<(u16, u16)> {
        self.cells
            .iter()
            .filter(|c| c.kind.is_passable())
            .map(|c| (c.x, c.y))
            .collect()
    }

    /// Mark a cell as seen by the player (navigation-owned flag)
    pub fn mark_discovered(&mut self, x: i32, y: i32) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.discovered = true;
        }
    }

    /// Mark a cell as stepped on by the player (navigation-owned flag)
    pub fn mark_visited(&mut self, x: i32, y: i32) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.visited = true;
            cell.discovered = true;
        }
    }

    /// Derive every cell's wall flags from its neighbors.
    ///
    /// A flag is set exactly when the neighbor across that edge is absent or
    /// a wall. Generation-time only: runs once at the end of carving, and
    /// carving after this call would leave stale flags.
    pub fn derive_wall_flags(&mut self) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let mut walls = crate::dungeon::WallFlags::default();
                for dir in Direction::ALL {
                    let (dx, dy) = dir.delta();
                    let blocked = self
                        .cell(x + dx, y + dy)
                        .is_none_or(|n| n.kind == CellKind::Wall);
                    walls.set(dir, blocked);
                }
                let idx = self.index(x, y);
                self.cells[idx].walls = walls;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_level(w: u16, h: u16) -> Level {
        let mut level = Level::new(w, h, 1, LevelTheme::Stone);
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                level.set_cell(Cell::floor(x, y));
            }
        }
        level.derive_wall_flags();
        level
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let level = Level::new(10, 10, 1, LevelTheme::Stone);
        assert!(level.cell(-1, 0).is_none());
        assert!(level.cell(0, -1).is_none());
        assert!(level.cell(10, 0).is_none());
        assert!(level.cell(0, 10).is_none());
        assert!(level.cell(5, 5).is_some());
    }

    #[test]
    fn test_traversability_matches_kind() {
        let level = open_level(8, 8);
        assert!(!level.is_traversable(0, 0)); // border wall
        assert!(level.is_traversable(3, 3));
        assert!(!level.is_traversable(-1, 3)); // out of bounds
    }

    #[test]
    fn test_cardinal_neighbors_filtered() {
        let level = Level::new(5, 5, 1, LevelTheme::Stone);
        assert_eq!(level.cardinal_neighbors(0, 0).len(), 2);
        assert_eq!(level.cardinal_neighbors(2, 2).len(), 4);
        assert_eq!(level.cardinal_neighbors(4, 2).len(), 3);
    }

    #[test]
    fn test_wall_flags_against_neighbors() {
        let level = open_level(8, 8);
        // Interior cell with open neighbors on all sides
        let open = level.cell(3, 3).unwrap();
        assert!(!open.walls.north() && !open.walls.south());
        assert!(!open.walls.east() && !open.walls.west());

        // Top-left floor cell borders walls to the north and west
        let corner = level.cell(1, 1).unwrap();
        assert!(corner.walls.north());
        assert!(corner.walls.west());
        assert!(!corner.walls.south());
        assert!(!corner.walls.east());
    }

    #[test]
    fn test_navigation_flags() {
        let mut level = open_level(8, 8);
        assert!(!level.cell(2, 2).unwrap().discovered);

        level.mark_discovered(2, 2);
        assert!(level.cell(2, 2).unwrap().discovered);
        assert!(!level.cell(2, 2).unwrap().visited);

        level.mark_visited(2, 2);
        assert!(level.cell(2, 2).unwrap().visited);

        // Out-of-bounds marks are ignored
        level.mark_visited(-5, -5);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut level = open_level(8, 8);
        level.mark_visited(2, 2);

        let json = serde_json::to_string(&level).unwrap();
        let restored: Level = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.width, level.width);
        assert_eq!(restored.height, level.height);
        assert!(restored.cell(2, 2).unwrap().visited);
        for (a, b) in level.cells().zip(restored.cells()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.walls, b.walls);
        }
    }
}
