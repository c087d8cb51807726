//! Level generation
//!
//! Carves rooms, connects them with corridors, derives wall flags, and
//! places stairs, boss, treasure and trap cells. Everything is driven by a
//! per-level RNG derived from the dungeon seed, so the same (seed, index)
//! pair always yields a bit-identical grid.

use log::warn;

use crate::consts::{
    MAX_DUNGEON_DEPTH, MAX_LEVEL_DIM, MAX_ROOMS, MAX_ROOM_DIM, MIN_LEVEL_DIM, MIN_ROOM_DIM,
    ROOM_ATTEMPTS,
};
use crate::rng::GameRng;

use super::cell::{Cell, CellKind, TrapKind};
use super::corridor::connect_rooms;
use super::grid::Level;
use super::room::Room;
use super::theme::LevelTheme;

/// Tunables for the level generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Level dimension bounds (both axes)
    pub min_dim: usize,
    pub max_dim: usize,
    /// Target room count per level
    pub max_rooms: usize,
    /// Placement attempts before giving up on further rooms
    pub room_attempts: usize,
    /// Room interior dimension bounds
    pub min_room_dim: usize,
    pub max_room_dim: usize,
    /// Deepest level; gets the boss instead of a stairs-down
    pub max_depth: u32,
    /// Treasure share of eligible floor cells, in percent, before depth scaling
    pub treasure_percent: u32,
    /// Trap share of eligible floor cells, in percent, before depth scaling
    pub trap_percent: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_dim: MIN_LEVEL_DIM,
            max_dim: MAX_LEVEL_DIM,
            max_rooms: MAX_ROOMS,
            room_attempts: ROOM_ATTEMPTS,
            min_room_dim: MIN_ROOM_DIM,
            max_room_dim: MAX_ROOM_DIM,
            max_depth: MAX_DUNGEON_DEPTH,
            treasure_percent: 2,
            trap_percent: 1,
        }
    }
}

/// Pool of floor cells still eligible for special placement.
///
/// Every draw removes the chosen cell, so no two special features can ever
/// land on the same cell regardless of placement order.
struct FloorPool {
    cells: Vec<(u16, u16)>,
}

impl FloorPool {
    fn new(cells: Vec<(u16, u16)>) -> Self {
        Self { cells }
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    /// Draw a random cell, removing it from the pool
    fn draw(&mut self, rng: &mut GameRng) -> Option<(u16, u16)> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = rng.rn2(self.cells.len() as u32) as usize;
        Some(self.cells.swap_remove(idx))
    }

    /// Remove a specific cell if present
    fn remove(&mut self, pos: (u16, u16)) {
        if let Some(idx) = self.cells.iter().position(|&p| p == pos) {
            self.cells.swap_remove(idx);
        }
    }
}

/// Deterministic multi-level dungeon generator.
///
/// An explicitly constructed object rather than a process-wide singleton:
/// one session owns one generator, and independent sessions (or tests) can
/// hold their own without shared state.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    seed: String,
    config: GeneratorConfig,
}

impl LevelGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(seed: impl Into<String>, config: GeneratorConfig) -> Self {
        Self {
            seed: seed.into(),
            config,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one level. Pure function of the generator's seed/config and
    /// the level index.
    pub fn generate(&self, level_index: u32) -> Level {
        let mut rng = GameRng::for_level(&self.seed, level_index);
        let cfg = &self.config;

        let theme = LevelTheme::pick(level_index, &mut rng);
        let (width, height) = self.pick_dimensions(level_index, &mut rng);
        let mut level = Level::new(width as u16, height as u16, level_index, theme);

        let mut rooms = self.place_rooms(&mut level, &mut rng);
        if rooms.is_empty() {
            warn!(
                "level {level_index}: no rooms placed within {} attempts, \
                 falling back to a single open chamber",
                cfg.room_attempts
            );
            rooms.push(self.carve_fallback_chamber(&mut level));
        }

        connect_rooms(&mut level, &rooms, &mut rng);
        place_doors(&mut level, &rooms, &mut rng);
        level.derive_wall_flags();

        self.place_specials(&mut level, &rooms, level_index, &mut rng);

        level
    }

    /// Depth-scaled base size plus bounded variance, clamped to the bounds
    fn pick_dimensions(&self, level_index: u32, rng: &mut GameRng) -> (usize, usize) {
        let cfg = &self.config;
        let base = cfg.min_dim + level_index as usize;
        let width = (base + rng.rn2(5) as usize).clamp(cfg.min_dim, cfg.max_dim);
        let height = (base + rng.rn2(5) as usize).clamp(cfg.min_dim, cfg.max_dim);
        (width, height)
    }

    /// Rejection-sample room rectangles, keeping a one-cell buffer between
    /// accepted rooms, and carve their interiors to floor.
    fn place_rooms(&self, level: &mut Level, rng: &mut GameRng) -> Vec<Room> {
        let cfg = &self.config;
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..cfg.room_attempts {
            if rooms.len() >= cfg.max_rooms {
                break;
            }

            let span = (cfg.max_room_dim - cfg.min_room_dim + 1) as u32;
            let w = cfg.min_room_dim + rng.rn2(span) as usize;
            let h = cfg.min_room_dim + rng.rn2(span) as usize;

            // Keep the outermost ring solid wall
            let Some(max_x) = (level.width as usize).checked_sub(w + 1) else {
                continue;
            };
            let Some(max_y) = (level.height as usize).checked_sub(h + 1) else {
                continue;
            };
            if max_x < 1 || max_y < 1 {
                continue;
            }
            let x = 1 + rng.rn2(max_x as u32) as usize;
            let y = 1 + rng.rn2(max_y as u32) as usize;

            let room = Room::new(x, y, w, h);
            if rooms.iter().any(|r| room.overlaps(r, 1)) {
                continue;
            }

            for cy in room.y..room.y + room.height {
                for cx in room.x..room.x + room.width {
                    level.set_cell(Cell::floor(cx as u16, cy as u16));
                }
            }
            rooms.push(room);
        }

        rooms
    }

    /// Degraded fallback: one large open chamber so the level stays playable
    fn carve_fallback_chamber(&self, level: &mut Level) -> Room {
        let room = Room::new(
            1,
            1,
            level.width as usize - 2,
            level.height as usize - 2,
        );
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                level.set_cell(Cell::floor(x as u16, y as u16));
            }
        }
        room
    }

    /// Place start, stairs, boss, treasure and traps, each draw shrinking a
    /// shared pool of eligible floor cells.
    fn place_specials(
        &self,
        level: &mut Level,
        rooms: &[Room],
        level_index: u32,
        rng: &mut GameRng,
    ) {
        let cfg = &self.config;
        let mut pool = FloorPool::new(level.floor_positions());

        // Start position: somewhere in the first carved room
        let (sx, sy) = rooms[0].random_point(rng);
        let start = (sx as u16, sy as u16);
        level.start = start;
        pool.remove(start);

        if level_index > 1
            && let Some((x, y)) = pool.draw(rng)
            && let Some(cell) = level.cell_mut(x as i32, y as i32)
        {
            cell.kind = CellKind::StairsUp;
            level.stairs_up = Some((x, y));
        }

        if level_index < cfg.max_depth
            && let Some((x, y)) = pool.draw(rng)
            && let Some(cell) = level.cell_mut(x as i32, y as i32)
        {
            cell.kind = CellKind::StairsDown;
            level.stairs_down = Some((x, y));
        }

        if level_index == cfg.max_depth
            && let Some((x, y)) = pool.draw(rng)
            && let Some(cell) = level.cell_mut(x as i32, y as i32)
        {
            cell.kind = CellKind::Boss;
            level.boss = Some((x, y));
        }

        // Depth-scaled shares of whatever floor remains
        let treasure_count = pool.len() * (cfg.treasure_percent + level_index / 2) as usize / 100;
        let mut next_treasure_id = 1u32;
        for _ in 0..treasure_count {
            let Some((x, y)) = pool.draw(rng) else { break };
            if let Some(cell) = level.cell_mut(x as i32, y as i32) {
                cell.kind = CellKind::Treasure;
                cell.treasure_id = Some(next_treasure_id);
                next_treasure_id += 1;
            }
        }

        let trap_count = pool.len() * (cfg.trap_percent + level_index / 2) as usize / 100;
        for _ in 0..trap_count {
            let Some((x, y)) = pool.draw(rng) else { break };
            let Some(&kind) = rng.choose(&TrapKind::ALL) else { break };
            if let Some(cell) = level.cell_mut(x as i32, y as i32) {
                cell.kind = CellKind::Trap;
                cell.trap = Some(kind);
            }
        }
    }
}

/// Turn corridor mouths on room boundaries into doors.
///
/// A candidate is a corridor floor cell outside every room whose passable
/// neighbors lie on exactly one axis (a gap in a wall run) with at least one
/// of them inside a room.
fn place_doors(level: &mut Level, rooms: &[Room], rng: &mut GameRng) {
    let mut doors = Vec::new();

    for cell in level.cells() {
        if cell.kind != CellKind::Floor {
            continue;
        }
        let (x, y) = (cell.x as i32, cell.y as i32);
        let inside_room = rooms.iter().any(|r| r.contains(x as usize, y as usize));
        if inside_room {
            continue;
        }

        let open = |dx: i32, dy: i32| level.is_traversable(x + dx, y + dy);
        let ns = open(0, -1) && open(0, 1) && !open(-1, 0) && !open(1, 0);
        let ew = open(-1, 0) && open(1, 0) && !open(0, -1) && !open(0, 1);
        if !(ns || ew) {
            continue;
        }

        let touches_room = rooms.iter().any(|r| {
            level
                .cardinal_neighbors(x, y)
                .iter()
                .any(|&(nx, ny)| r.contains(nx as usize, ny as usize))
        });
        if touches_room && rng.one_in(3) {
            doors.push((x, y));
        }
    }

    for (x, y) in doors {
        if let Some(cell) = level.cell_mut(x, y) {
            cell.kind = CellKind::Door;
        }
    }
}
