//! Per-level themes
//!
//! A theme is a flavor tag driving palette selection in the renderer;
//! deeper levels unlock the harsher themes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GameRng;

/// Level theme/attribute tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LevelTheme {
    #[default]
    Stone,
    Moss,
    Flooded,
    Ice,
    Fire,
    Obsidian,
}

impl LevelTheme {
    /// Pick a theme for the given depth.
    ///
    /// Levels 1-2 stay plain, mid levels add the wet/cold themes, and
    /// depth 6+ opens the full set.
    pub fn pick(depth: u32, rng: &mut GameRng) -> Self {
        const SHALLOW: &[LevelTheme] = &[LevelTheme::Stone, LevelTheme::Moss];
        const MID: &[LevelTheme] = &[
            LevelTheme::Stone,
            LevelTheme::Moss,
            LevelTheme::Flooded,
            LevelTheme::Ice,
        ];
        const DEEP: &[LevelTheme] = &[
            LevelTheme::Stone,
            LevelTheme::Moss,
            LevelTheme::Flooded,
            LevelTheme::Ice,
            LevelTheme::Fire,
            LevelTheme::Obsidian,
        ];

        let tier = match depth {
            0..=2 => SHALLOW,
            3..=5 => MID,
            _ => DEEP,
        };
        *rng.choose(tier).unwrap_or(&LevelTheme::Stone)
    }
}
