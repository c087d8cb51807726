//! Dungeon system
//!
//! Contains the cell/level grid model, room and corridor carving, and the
//! seeded level generator.

mod cell;
mod corridor;
mod generation;
mod grid;
mod room;
mod theme;

pub use cell::{Cell, CellKind, Direction, TrapKind, WallFlags};
pub use corridor::{carve_corridor, connect_rooms};
pub use generation::{GeneratorConfig, LevelGenerator};
pub use grid::Level;
pub use room::Room;
pub use theme::LevelTheme;
