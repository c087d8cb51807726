//! Grid ray marching
//!
//! Advances a point along the ray direction in small fixed steps until it
//! hits a wall cell, a flagged cell edge, or the view-distance cap. The
//! grid boundary counts as solid wall, which keeps the inner loop free of
//! error branches.

use crate::consts::{EDGE_THRESHOLD, MAX_VIEW_DISTANCE, RAY_STEP};
use crate::dungeon::{CellKind, Level};

/// What a ray ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Flat stretch of a flagged cell edge
    Face,
    /// Two adjacent flagged edges at once
    Corner,
    /// Wall cell interior or the grid boundary
    Solid,
    /// Nothing within the view distance
    None,
}

/// Result of one ray march
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance traveled, in cell widths
    pub distance: f64,
    pub hit: bool,
    pub kind: HitKind,
}

/// March a ray using the default view-distance cap.
pub fn cast_ray(level: &Level, origin: (f64, f64), angle: f64) -> RayHit {
    cast_ray_to(level, origin, angle, MAX_VIEW_DISTANCE)
}

/// March a ray from `origin` along `angle` up to `max_distance`.
///
/// Pure function of its inputs; re-casting the same ray for the same level
/// always reproduces the same hit.
pub fn cast_ray_to(level: &Level, origin: (f64, f64), angle: f64, max_distance: f64) -> RayHit {
    let (ox, oy) = origin;
    let dir_x = angle.cos();
    let dir_y = angle.sin();

    let mut distance = RAY_STEP;
    while distance <= max_distance {
        let px = ox + dir_x * distance;
        let py = oy + dir_y * distance;
        let cx = px.floor() as i32;
        let cy = py.floor() as i32;

        // Out of bounds reads as solid wall
        let Some(cell) = level.cell(cx, cy) else {
            return RayHit {
                distance,
                hit: true,
                kind: HitKind::Solid,
            };
        };

        if cell.kind == CellKind::Wall {
            return RayHit {
                distance,
                hit: true,
                kind: HitKind::Solid,
            };
        }

        // Fractional offset within the cell, tested against flagged edges
        let fx = px - cx as f64;
        let fy = py - cy as f64;
        let near = [
            fx < EDGE_THRESHOLD && cell.walls.west(),
            fx > 1.0 - EDGE_THRESHOLD && cell.walls.east(),
            fy < EDGE_THRESHOLD && cell.walls.north(),
            fy > 1.0 - EDGE_THRESHOLD && cell.walls.south(),
        ];
        match near.iter().filter(|&&n| n).count() {
            0 => {}
            1 => {
                return RayHit {
                    distance,
                    hit: true,
                    kind: HitKind::Face,
                };
            }
            _ => {
                return RayHit {
                    distance,
                    hit: true,
                    kind: HitKind::Corner,
                };
            }
        }

        distance += RAY_STEP;
    }

    RayHit {
        distance: max_distance,
        hit: false,
        kind: HitKind::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Cell, Direction, LevelTheme};
    use crate::view::{Camera, PlayerPose};

    /// All-wall level with the given cells carved to floor
    fn level_with_floor(w: u16, h: u16, floor: &[(u16, u16)]) -> Level {
        let mut level = Level::new(w, h, 1, LevelTheme::Stone);
        for &(x, y) in floor {
            level.set_cell(Cell::floor(x, y));
        }
        level.derive_wall_flags();
        level
    }

    /// Open square room with a solid one-cell border
    fn open_room(size: u16) -> Level {
        let mut level = Level::new(size, size, 1, LevelTheme::Stone);
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                level.set_cell(Cell::floor(x, y));
            }
        }
        level.derive_wall_flags();
        level
    }

    #[test]
    fn test_adjacent_wall_hits_at_half_cell() {
        let level = level_with_floor(5, 5, &[(1, 1)]);
        // From the center of (1,1) straight east into the wall at (2,1)
        let hit = cast_ray(&level, (1.5, 1.5), 0.0);

        assert!(hit.hit);
        assert!(matches!(hit.kind, HitKind::Solid | HitKind::Face));
        assert!(
            (hit.distance - 0.5).abs() <= EDGE_THRESHOLD + RAY_STEP,
            "expected ~0.5, got {}",
            hit.distance
        );
    }

    #[test]
    fn test_open_room_miss_returns_cap() {
        let level = open_room(30);
        let hit = cast_ray_to(&level, (15.5, 15.5), 0.0, 10.0);

        assert!(!hit.hit);
        assert_eq!(hit.kind, HitKind::None);
        assert_eq!(hit.distance, 10.0);
    }

    #[test]
    fn test_facing_north_in_open_room() {
        let level = open_room(30);
        let pose = PlayerPose {
            x: 15,
            y: 15,
            level: 1,
            facing: Direction::North,
        };
        let cam = Camera::from_pose(&pose);
        let hit = cast_ray_to(&level, cam.ray_origin(), cam.angle(), 8.0);
        assert!(!hit.hit);
    }

    #[test]
    fn test_corner_classification() {
        // Lone floor cell: all four edges flagged. A ray creeping into the
        // northwest corner sees two adjacent flagged edges at once.
        let level = level_with_floor(5, 5, &[(1, 1)]);
        let cell = level.cell(1, 1).unwrap();
        assert!(cell.walls.west() && cell.walls.north());

        // March from the center toward the corner at (1.0, 1.0)
        let angle = (-3.0f64 / 4.0) * std::f64::consts::PI;
        let hit = cast_ray(&level, (1.5, 1.5), angle);

        assert!(hit.hit);
        assert_eq!(hit.kind, HitKind::Corner);
    }

    #[test]
    fn test_face_classification_on_single_flagged_edge() {
        // Two-cell east-west hallway; east end of (2,1) is flagged, the
        // shared edge between the cells is not.
        let level = level_with_floor(5, 5, &[(1, 1), (2, 1)]);
        let hit = cast_ray(&level, (1.5, 1.5), 0.0);

        assert!(hit.hit);
        assert_eq!(hit.kind, HitKind::Face);
        assert!(
            (hit.distance - 1.5).abs() <= EDGE_THRESHOLD + RAY_STEP,
            "expected ~1.5, got {}",
            hit.distance
        );
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        // Ray escaping through a floor cell on the grid edge
        let mut level = Level::new(3, 3, 1, LevelTheme::Stone);
        for y in 0..3 {
            for x in 0..3 {
                level.set_cell(Cell::floor(x, y));
            }
        }
        level.derive_wall_flags();

        let hit = cast_ray(&level, (1.5, 1.5), 0.0);
        assert!(hit.hit);
        // Either the flagged east edge of (2,1) or the boundary itself
        assert!(matches!(hit.kind, HitKind::Face | HitKind::Solid));
    }

    #[test]
    fn test_determinism() {
        let level = open_room(20);
        let a = cast_ray(&level, (5.3, 7.7), 1.234);
        let b = cast_ray(&level, (5.3, 7.7), 1.234);
        assert_eq!(a, b);
    }
}
