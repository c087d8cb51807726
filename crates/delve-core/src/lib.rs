//! delve-core: Dungeon generation and first-person view logic for delve
//!
//! This crate contains all game logic with no I/O dependencies.
//! Levels are generated deterministically from an opaque seed string and a
//! level index; the view module turns a discrete player pose into per-column
//! raycast results that a renderer crate projects onto a screen.

pub mod dungeon;
pub mod view;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
