//! Corridor carving
//!
//! Rooms are connected by growing a connected set: each step attaches the
//! room nearest (by centroid distance) to any already-connected room, with
//! an L-shaped two-segment corridor between the two centers. A few extra
//! random corridors are added afterwards so the layout is not a pure tree.
//!
//! Nearest-pair selection is quadratic in room count, which is fine at the
//! current scale (at most 8 rooms); a binary-heap MST would be the upgrade
//! if that ever grows.

use crate::rng::GameRng;

use super::cell::{Cell, CellKind};
use super::grid::Level;
use super::room::Room;

/// Carve a single cell to floor if it is still solid wall
fn carve(level: &mut Level, x: usize, y: usize) {
    if let Some(cell) = level.cell_mut(x as i32, y as i32)
        && cell.kind == CellKind::Wall
    {
        *cell = Cell::floor(x as u16, y as u16);
    }
}

/// Carve an L-shaped two-segment corridor between two points.
///
/// `horizontal_first` picks which axis the first segment runs along.
pub fn carve_corridor(
    level: &mut Level,
    from: (usize, usize),
    to: (usize, usize),
    horizontal_first: bool,
) {
    let (x1, y1) = from;
    let (x2, y2) = to;

    let (corner_x, corner_y) = if horizontal_first { (x2, y1) } else { (x1, y2) };

    for x in x1.min(corner_x)..=x1.max(corner_x) {
        carve(level, x, y1);
    }
    for y in y1.min(corner_y)..=y1.max(corner_y) {
        carve(level, corner_x, y);
    }
    for x in corner_x.min(x2)..=corner_x.max(x2) {
        carve(level, x, y2);
    }
    for y in corner_y.min(y2)..=corner_y.max(y2) {
        carve(level, x2, y);
    }
}

/// Connect all rooms into one walkable component, then add a few cycles.
pub fn connect_rooms(level: &mut Level, rooms: &[Room], rng: &mut GameRng) {
    if rooms.len() < 2 {
        return;
    }

    let mut connected = vec![0usize];
    let mut remaining: Vec<usize> = (1..rooms.len()).collect();

    while !remaining.is_empty() {
        // Globally nearest (connected, unconnected) pair
        let mut best: Option<(usize, usize, usize)> = None;
        for &c in &connected {
            for (ri, &r) in remaining.iter().enumerate() {
                let d = rooms[c].distance_sq(&rooms[r]);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((c, ri, d));
                }
            }
        }
        let Some((from_idx, remaining_pos, _)) = best else {
            break;
        };
        let to_idx = remaining.swap_remove(remaining_pos);

        carve_corridor(
            level,
            rooms[from_idx].center(),
            rooms[to_idx].center(),
            rng.one_in(2),
        );
        connected.push(to_idx);
    }

    // Extra corridors break the tree topology
    let extras = rng.rn2(2) + 1;
    for _ in 0..extras {
        let a = rng.rn2(rooms.len() as u32) as usize;
        let b = rng.rn2(rooms.len() as u32) as usize;
        if a != b {
            carve_corridor(level, rooms[a].center(), rooms[b].center(), rng.one_in(2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::LevelTheme;

    fn carve_room(level: &mut Level, room: &Room) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                carve(level, x, y);
            }
        }
    }

    /// Flood fill from `start` over passable cells, counting reached cells
    fn reachable_count(level: &Level, start: (u16, u16)) -> usize {
        let mut seen = vec![false; level.width as usize * level.height as usize];
        let mut stack = vec![start];
        let mut count = 0;
        while let Some((x, y)) = stack.pop() {
            let idx = y as usize * level.width as usize + x as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            count += 1;
            for (nx, ny) in level.cardinal_neighbors(x as i32, y as i32) {
                if level.is_traversable(nx as i32, ny as i32) {
                    stack.push((nx, ny));
                }
            }
        }
        count
    }

    #[test]
    fn test_l_corridor_joins_endpoints() {
        let mut level = Level::new(20, 20, 1, LevelTheme::Stone);
        carve_corridor(&mut level, (2, 2), (15, 12), true);

        assert!(level.is_traversable(2, 2));
        assert!(level.is_traversable(15, 12));
        // Corner of the horizontal-first L
        assert!(level.is_traversable(15, 2));

        let total_floor = level.floor_positions().len();
        assert_eq!(reachable_count(&level, (2, 2)), total_floor);
    }

    #[test]
    fn test_connect_rooms_single_component() {
        let mut level = Level::new(30, 30, 1, LevelTheme::Stone);
        let rooms = [
            Room::new(2, 2, 4, 3),
            Room::new(20, 3, 5, 4),
            Room::new(4, 20, 3, 5),
            Room::new(22, 22, 4, 4),
        ];
        for room in &rooms {
            carve_room(&mut level, room);
        }

        let mut rng = GameRng::new(1234);
        connect_rooms(&mut level, &rooms, &mut rng);

        let total_floor = level.floor_positions().len();
        let (sx, sy) = rooms[0].center();
        assert_eq!(reachable_count(&level, (sx as u16, sy as u16)), total_floor);
    }

    #[test]
    fn test_single_room_is_noop() {
        let mut level = Level::new(20, 20, 1, LevelTheme::Stone);
        let rooms = [Room::new(5, 5, 4, 4)];
        carve_room(&mut level, &rooms[0]);
        let before = level.floor_positions().len();

        let mut rng = GameRng::new(5);
        connect_rooms(&mut level, &rooms, &mut rng);

        assert_eq!(level.floor_positions().len(), before);
    }
}
