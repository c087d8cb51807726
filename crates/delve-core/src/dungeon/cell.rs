//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cardinal direction; the ordinal doubles as the index into [`WallFlags`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Grid delta for one step in this direction (y grows downward)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Turn 90 degrees clockwise
    pub const fn turn_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Turn 90 degrees counterclockwise
    pub const fn turn_left(self) -> Direction {
        self.turn_right().opposite()
    }
}

/// Cell/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Wall = 0,
    Floor = 1,
    Door = 2,
    StairsUp = 3,
    StairsDown = 4,
    Treasure = 5,
    Trap = 6,
    Special = 7,
    Boss = 8,
}

impl CellKind {
    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Get the display character for this cell type (minimap / debug dumps)
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Floor => '.',
            CellKind::Door => '+',
            CellKind::StairsUp => '<',
            CellKind::StairsDown => '>',
            CellKind::Treasure => '$',
            CellKind::Trap => '^',
            CellKind::Special => '_',
            CellKind::Boss => '&',
        }
    }
}

/// Trap flavors; effect resolution lives with an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum TrapKind {
    Spikes,
    PoisonDart,
    Teleport,
    Alarm,
    Collapse,
}

impl TrapKind {
    pub const ALL: [TrapKind; 5] = [
        TrapKind::Spikes,
        TrapKind::PoisonDart,
        TrapKind::Teleport,
        TrapKind::Alarm,
        TrapKind::Collapse,
    ];
}

/// Per-cell blocked-passage flags, one per cardinal direction.
///
/// A flag is true exactly when the neighboring cell across that edge is a
/// wall or out of bounds. Stored as a fixed array indexed by the
/// [`Direction`] ordinal; named accessors cover the common reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallFlags([bool; 4]);

impl WallFlags {
    pub const fn get(&self, dir: Direction) -> bool {
        self.0[dir as usize]
    }

    pub fn set(&mut self, dir: Direction, blocked: bool) {
        self.0[dir as usize] = blocked;
    }

    pub const fn north(&self) -> bool {
        self.0[Direction::North as usize]
    }

    pub const fn south(&self) -> bool {
        self.0[Direction::South as usize]
    }

    pub const fn east(&self) -> bool {
        self.0[Direction::East as usize]
    }

    pub const fn west(&self) -> bool {
        self.0[Direction::West as usize]
    }
}

/// A single map cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,

    /// Terrain type
    pub kind: CellKind,

    /// Blocked-passage flags derived from the neighboring terrain
    pub walls: WallFlags,

    /// Trap flavor, set only when `kind == Trap`
    pub trap: Option<TrapKind>,

    /// Treasure table key, set only when `kind == Treasure`
    pub treasure_id: Option<u32>,

    /// Has been seen by the player (navigation-owned)
    pub discovered: bool,

    /// Has been stepped on by the player (navigation-owned)
    pub visited: bool,
}

impl Cell {
    /// Create a new solid wall cell
    pub const fn wall(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: CellKind::Wall,
            walls: WallFlags([false; 4]),
            trap: None,
            treasure_id: None,
            discovered: false,
            visited: false,
        }
    }

    /// Create a floor cell
    pub const fn floor(x: u16, y: u16) -> Self {
        Self {
            kind: CellKind::Floor,
            ..Self::wall(x, y)
        }
    }

    /// Check if walkable
    pub const fn is_walkable(&self) -> bool {
        self.kind.is_passable()
    }
}
