//! First-person column renderer
//!
//! Casts one ray per screen column, turns each hit into a shaded vertical
//! wall strip over flat ceiling/floor bands, then projects point features
//! (stairs, treasure, boss) into marker glyphs with a per-column depth
//! test for occlusion.

use thiserror::Error;

use delve_core::dungeon::{CellKind, Level};
use delve_core::view::{Camera, HitKind, PlayerPose, cast_ray_to};
use delve_core::{DEFAULT_FOV, MAX_VIEW_DISTANCE};

use crate::palette::{Palette, PaletteTable};
use crate::surface::Surface;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The surface has zero area this frame (e.g. mid terminal resize).
    /// Callers skip the frame and retry on the next one.
    #[error("render target has zero area")]
    TargetUnavailable,
}

/// Tunables for the column projection
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Horizontal field of view in radians
    pub fov: f64,
    /// Ray cap, in cell widths
    pub max_view_distance: f64,
    /// Wall strip height multiplier
    pub wall_height_scale: f64,
    /// Distance floor for the height division
    pub min_distance: f64,
    /// Fraction of the screen above the ceiling/floor split
    pub horizon: f64,
    /// Brightness multiplier for corner hits
    pub corner_boost: f64,
    /// Brightness multiplier for solid (boundary) hits
    pub boundary_dim: f64,
    /// Markers past this distance are not drawn
    pub marker_range: f64,
    /// Minimum marker height in rows
    pub min_marker_size: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            max_view_distance: MAX_VIEW_DISTANCE,
            wall_height_scale: 1.0,
            min_distance: 0.1,
            horizon: 0.5,
            corner_boost: 1.3,
            boundary_dim: 0.6,
            marker_range: 8.0,
            min_marker_size: 1,
        }
    }
}

/// Shade glyph ramp, darkest to brightest
const WALL_SHADES: [char; 4] = ['░', '▒', '▓', '█'];
const CEILING_CHAR: char = '░';
const FLOOR_CHAR: char = '▒';

fn wall_char(brightness: f64) -> char {
    let idx = (brightness.clamp(0.0, 1.0) * (WALL_SHADES.len() - 1) as f64).round() as usize;
    WALL_SHADES[idx.min(WALL_SHADES.len() - 1)]
}

/// A point feature queued for marker projection
struct Marker {
    x: u16,
    y: u16,
    glyph: char,
}

pub struct FirstPersonRenderer {
    config: RenderConfig,
    palettes: PaletteTable,
}

impl Default for FirstPersonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstPersonRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            palettes: PaletteTable::default(),
        }
    }

    pub fn set_palettes(&mut self, palettes: PaletteTable) {
        self.palettes = palettes;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw one frame of the player's view onto `surface`.
    pub fn render(
        &self,
        level: &Level,
        pose: &PlayerPose,
        surface: &mut impl Surface,
    ) -> Result<(), RenderError> {
        let width = surface.width();
        let height = surface.height();
        if width == 0 || height == 0 {
            return Err(RenderError::TargetUnavailable);
        }

        let palette = self.palettes.get(level.theme);
        let cam = Camera::from_pose(pose);
        let horizon_row = (height as f64 * self.config.horizon) as u16;

        self.draw_bands(surface, &palette, horizon_row);
        let depths = self.draw_walls(level, &cam, surface, &palette, horizon_row);
        self.draw_markers(level, &cam, surface, &palette, horizon_row, &depths);

        Ok(())
    }

    fn draw_bands(&self, surface: &mut impl Surface, palette: &Palette, horizon_row: u16) {
        let width = surface.width();
        let height = surface.height();
        let ceiling = palette.ceiling.shaded(1.0);
        let floor = palette.floor.shaded(1.0);
        for y in 0..height {
            let (ch, color) = if y < horizon_row {
                (CEILING_CHAR, ceiling)
            } else {
                (FLOOR_CHAR, floor)
            };
            for x in 0..width {
                surface.put(x, y, ch, color);
            }
        }
    }

    /// Cast and draw one wall strip per column. Returns the per-column hit
    /// distances used afterwards for marker occlusion.
    fn draw_walls(
        &self,
        level: &Level,
        cam: &Camera,
        surface: &mut impl Surface,
        palette: &Palette,
        horizon_row: u16,
    ) -> Vec<f64> {
        let width = surface.width();
        let height = surface.height();
        let mut depths = vec![f64::INFINITY; width as usize];

        for col in 0..width {
            let angle = cam.ray_angle(col as usize, width as usize, self.config.fov);
            let hit = cast_ray_to(level, cam.ray_origin(), angle, self.config.max_view_distance);
            if !hit.hit {
                continue;
            }
            depths[col as usize] = hit.distance;

            let mut brightness =
                (1.0 - hit.distance / self.config.max_view_distance).clamp(0.0, 1.0);
            match hit.kind {
                HitKind::Corner => brightness *= self.config.corner_boost,
                HitKind::Solid => brightness *= self.config.boundary_dim,
                HitKind::Face | HitKind::None => {}
            }
            let brightness = brightness.clamp(0.0, 1.0);

            let strip = (height as f64 * self.config.wall_height_scale
                / hit.distance.max(self.config.min_distance))
            .min(height as f64);
            let top = (horizon_row as f64 - strip * self.config.horizon).max(0.0) as u16;
            let bottom = ((top as f64 + strip) as u16).min(height);

            let ch = wall_char(brightness);
            let color = palette.wall.shaded(brightness.max(0.15));
            for y in top..bottom {
                surface.put(col, y, ch, color);
            }
        }

        depths
    }

    fn point_features(level: &Level) -> Vec<Marker> {
        let mut markers = Vec::new();
        if let Some((x, y)) = level.stairs_up {
            markers.push(Marker { x, y, glyph: '<' });
        }
        if let Some((x, y)) = level.stairs_down {
            markers.push(Marker { x, y, glyph: '>' });
        }
        if let Some((x, y)) = level.boss {
            markers.push(Marker { x, y, glyph: '&' });
        }
        for cell in level.cells() {
            if cell.kind == CellKind::Treasure {
                markers.push(Marker {
                    x: cell.x,
                    y: cell.y,
                    glyph: '$',
                });
            }
        }
        markers
    }

    fn draw_markers(
        &self,
        level: &Level,
        cam: &Camera,
        surface: &mut impl Surface,
        palette: &Palette,
        horizon_row: u16,
        depths: &[f64],
    ) {
        let width = surface.width();
        let height = surface.height();
        let (ox, oy) = cam.ray_origin();
        let half_fov = self.config.fov / 2.0;

        let mut visible: Vec<(f64, f64, char)> = Vec::new();
        for marker in Self::point_features(level) {
            let dx = marker.x as f64 + 0.5 - ox;
            let dy = marker.y as f64 + 0.5 - oy;
            let distance = dx.hypot(dy);
            // The feature under the player's feet has no screen position
            if distance < 0.5 || distance > self.config.marker_range {
                continue;
            }
            let rel = normalize_angle(dy.atan2(dx) - cam.angle());
            if rel.abs() > half_fov {
                continue;
            }
            visible.push((distance, rel, marker.glyph));
        }

        // Far to near, so closer markers draw over farther ones
        visible.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (distance, rel, glyph) in visible {
            let sx = ((rel / half_fov + 1.0) / 2.0 * (width.saturating_sub(1)) as f64)
                .round() as u16;
            let sx = sx.min(width - 1);
            // Occluded by a wall strip in front of it
            if depths[sx as usize] < distance - 0.25 {
                continue;
            }

            let shrink = (1.0 - distance / self.config.marker_range).clamp(0.0, 1.0);
            let size = ((height as f64 * 0.3 * shrink) as u16).max(self.config.min_marker_size);
            let brightness = (1.0 - distance / self.config.max_view_distance).clamp(0.25, 1.0);
            let color = palette.accent.shaded(brightness);

            // Anchored just below the horizon, where the floor meets the cell
            let top = horizon_row.saturating_sub(size / 2);
            for y in top..(top + size).min(height) {
                surface.put(sx, y, glyph, color);
            }
        }
    }
}

fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI { PI } else { wrapped }
}
