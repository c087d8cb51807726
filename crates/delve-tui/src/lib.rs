//! delve-tui: Terminal first-person view for delve
//!
//! Renders the current level as a flat-shaded column projection using
//! ratatui, and hosts the navigation shell (movement, stairs traversal,
//! discovered-cell minimap).

pub mod app;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod surface;

pub use app::{App, Command};
pub use palette::{Palette, PaletteTable};
pub use renderer::{FirstPersonRenderer, RenderConfig, RenderError};
pub use surface::{BufferSurface, MemorySurface, Surface};
