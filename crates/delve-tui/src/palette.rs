//! Theme color palettes
//!
//! Maps a level's theme tag to the colors the first-person renderer shades
//! with. The table is keyed by theme name so an external JSON file can
//! override or extend it; unknown keys fall back to a neutral palette
//! instead of failing the frame.

use std::collections::HashMap;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use delve_core::dungeon::LevelTheme;

/// Plain RGB triple; converted to a terminal color after shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scale toward black by `brightness` in [0, 1]
    pub fn shaded(self, brightness: f64) -> Color {
        let b = brightness.clamp(0.0, 1.0);
        Color::Rgb(
            (self.0 as f64 * b) as u8,
            (self.1 as f64 * b) as u8,
            (self.2 as f64 * b) as u8,
        )
    }
}

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub wall: Rgb,
    pub ceiling: Rgb,
    pub floor: Rgb,
    /// Marker color for projected point features
    pub accent: Rgb,
}

/// Fallback for unknown theme keys
pub const NEUTRAL: Palette = Palette {
    wall: Rgb(150, 150, 150),
    ceiling: Rgb(60, 60, 70),
    floor: Rgb(90, 85, 80),
    accent: Rgb(220, 220, 120),
};

fn builtin(theme: LevelTheme) -> Palette {
    match theme {
        LevelTheme::Stone => Palette {
            wall: Rgb(160, 155, 150),
            ceiling: Rgb(55, 55, 60),
            floor: Rgb(95, 90, 85),
            accent: Rgb(230, 220, 130),
        },
        LevelTheme::Moss => Palette {
            wall: Rgb(110, 150, 100),
            ceiling: Rgb(40, 55, 40),
            floor: Rgb(70, 95, 65),
            accent: Rgb(200, 230, 120),
        },
        LevelTheme::Flooded => Palette {
            wall: Rgb(90, 120, 160),
            ceiling: Rgb(35, 45, 65),
            floor: Rgb(50, 75, 110),
            accent: Rgb(150, 220, 230),
        },
        LevelTheme::Ice => Palette {
            wall: Rgb(170, 200, 230),
            ceiling: Rgb(70, 85, 100),
            floor: Rgb(130, 160, 190),
            accent: Rgb(240, 250, 255),
        },
        LevelTheme::Fire => Palette {
            wall: Rgb(180, 90, 60),
            ceiling: Rgb(60, 25, 20),
            floor: Rgb(120, 55, 35),
            accent: Rgb(255, 190, 80),
        },
        LevelTheme::Obsidian => Palette {
            wall: Rgb(100, 90, 120),
            ceiling: Rgb(30, 25, 40),
            floor: Rgb(60, 50, 75),
            accent: Rgb(200, 140, 255),
        },
    }
}

/// Theme-name → palette lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteTable {
    entries: HashMap<String, Palette>,
}

impl Default for PaletteTable {
    fn default() -> Self {
        let entries = LevelTheme::iter()
            .map(|t| (t.to_string(), builtin(t)))
            .collect();
        Self { entries }
    }
}

impl PaletteTable {
    /// Parse an externally configured table from JSON. Entries missing from
    /// the file simply fall back to neutral at lookup time.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, Palette> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Look up the palette for a theme; unknown keys get the neutral one.
    pub fn get(&self, theme: LevelTheme) -> Palette {
        match self.entries.get(&theme.to_string()) {
            Some(palette) => *palette,
            None => {
                log::debug!("no palette for theme {theme}, using neutral");
                NEUTRAL
            }
        }
    }
}
