//! Property tests over generation and the view pipeline.

use proptest::prelude::*;

use delve_core::dungeon::{CellKind, Direction, Level, LevelGenerator};
use delve_core::view::{Camera, PlayerPose, cast_ray};
use delve_core::{DEFAULT_FOV, MAX_DUNGEON_DEPTH, MAX_VIEW_DISTANCE};

fn cells_identical(a: &Level, b: &Level) -> bool {
    a.width == b.width
        && a.height == b.height
        && a.start == b.start
        && a.stairs_up == b.stairs_up
        && a.stairs_down == b.stairs_down
        && a.boss == b.boss
        && a.cells().zip(b.cells()).all(|(ca, cb)| {
            ca.kind == cb.kind
                && ca.walls == cb.walls
                && ca.trap == cb.trap
                && ca.treasure_id == cb.treasure_id
        })
}

proptest! {
    #[test]
    fn generation_is_deterministic(seed in "[a-z0-9]{1,16}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let generator = LevelGenerator::new(seed);
        let a = generator.generate(index);
        let b = generator.generate(index);
        prop_assert!(cells_identical(&a, &b));
    }

    #[test]
    fn wall_iff_not_traversable(seed in "[a-z0-9]{1,12}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let level = LevelGenerator::new(seed).generate(index);
        for cell in level.cells() {
            let traversable = level.is_traversable(cell.x as i32, cell.y as i32);
            prop_assert_eq!(cell.kind == CellKind::Wall, !traversable);
        }
    }

    #[test]
    fn wall_flags_match_neighbors(seed in "[a-z0-9]{1,12}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let level = LevelGenerator::new(seed).generate(index);
        for cell in level.cells() {
            for dir in Direction::ALL {
                let (dx, dy) = dir.delta();
                let neighbor = level.cell(cell.x as i32 + dx, cell.y as i32 + dy);
                let blocked = neighbor.is_none_or(|n| n.kind == CellKind::Wall);
                prop_assert_eq!(cell.walls.get(dir), blocked);
            }
        }
    }

    #[test]
    fn all_floor_reachable(seed in "[a-z0-9]{1,12}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let level = LevelGenerator::new(seed).generate(index);

        let mut seen = vec![false; level.width as usize * level.height as usize];
        let mut stack = vec![level.start];
        let mut reached = 0usize;
        while let Some((x, y)) = stack.pop() {
            let idx = y as usize * level.width as usize + x as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            reached += 1;
            for (nx, ny) in level.cardinal_neighbors(x as i32, y as i32) {
                if level.is_traversable(nx as i32, ny as i32) {
                    stack.push((nx, ny));
                }
            }
        }

        prop_assert_eq!(reached, level.floor_positions().len());
    }

    #[test]
    fn special_positions_are_distinct(seed in "[a-z0-9]{1,12}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let level = LevelGenerator::new(seed).generate(index);

        let mut positions = vec![level.start];
        positions.extend(level.stairs_up);
        positions.extend(level.stairs_down);
        positions.extend(level.boss);

        let total = positions.len();
        positions.sort_unstable();
        positions.dedup();
        prop_assert_eq!(positions.len(), total);
    }

    #[test]
    fn stairs_present_exactly_where_expected(seed in "[a-z0-9]{1,12}", index in 1u32..=MAX_DUNGEON_DEPTH) {
        let level = LevelGenerator::new(seed).generate(index);

        prop_assert_eq!(level.stairs_up.is_some(), index > 1);
        prop_assert_eq!(level.stairs_down.is_some(), index < MAX_DUNGEON_DEPTH);
        prop_assert_eq!(level.boss.is_some(), index == MAX_DUNGEON_DEPTH);

        let ups = level.cells().filter(|c| c.kind == CellKind::StairsUp).count();
        let downs = level.cells().filter(|c| c.kind == CellKind::StairsDown).count();
        prop_assert_eq!(ups, usize::from(index > 1));
        prop_assert_eq!(downs, usize::from(index < MAX_DUNGEON_DEPTH));
    }

    #[test]
    fn rays_from_start_terminate_and_reproduce(
        seed in "[a-z0-9]{1,12}",
        index in 1u32..=MAX_DUNGEON_DEPTH,
        column in 0usize..80,
    ) {
        let level = LevelGenerator::new(seed).generate(index);
        let pose = PlayerPose {
            x: level.start.0 as i32,
            y: level.start.1 as i32,
            level: index,
            facing: Direction::North,
        };
        let cam = Camera::from_pose(&pose);
        let angle = cam.ray_angle(column, 80, DEFAULT_FOV);

        let hit = cast_ray(&level, cam.ray_origin(), angle);
        prop_assert!(hit.distance > 0.0);
        prop_assert!(hit.distance <= MAX_VIEW_DISTANCE);
        prop_assert_eq!(hit, cast_ray(&level, cam.ray_origin(), angle));
    }
}
