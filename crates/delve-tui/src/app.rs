//! Navigation shell: player pose, level cache, per-frame drawing

use std::collections::HashMap;

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use delve_core::dungeon::{CellKind, Direction, Level, LevelGenerator};
use delve_core::view::PlayerPose;

use crate::input::key_to_command;
use crate::renderer::FirstPersonRenderer;
use crate::surface::BufferSurface;

/// One navigation action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnLeft,
    TurnRight,
    StepForward,
    StepBack,
    StrafeLeft,
    StrafeRight,
    Descend,
    Ascend,
    ToggleMap,
    Quit,
}

/// Game shell state. Owns the pose, the generated-level cache and the
/// renderer; levels are generated lazily on first entry and kept by index
/// so revisiting a depth shows the same grid.
pub struct App {
    generator: LevelGenerator,
    max_depth: u32,
    levels: HashMap<u32, Level>,
    pose: PlayerPose,
    renderer: FirstPersonRenderer,
    show_map: bool,
    message: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(generator: LevelGenerator, renderer: FirstPersonRenderer) -> Self {
        let max_depth = generator.config().max_depth;
        let first = generator.generate(1);
        let pose = PlayerPose {
            x: first.start.0 as i32,
            y: first.start.1 as i32,
            level: 1,
            facing: Direction::North,
        };
        let mut app = Self {
            generator,
            max_depth,
            levels: HashMap::from([(1, first)]),
            pose,
            renderer,
            show_map: false,
            message: Some(String::from("You enter the dungeon.")),
            quit: false,
        };
        app.mark_arrival();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    pub fn current_level(&self) -> &Level {
        // The current level is inserted before the pose can point at it
        &self.levels[&self.pose.level]
    }

    /// Translate a terminal event into a command, if it is bound.
    pub fn handle_event(&self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_to_command(key),
            _ => None,
        }
    }

    pub fn execute(&mut self, command: Command) {
        self.message = None;
        match command {
            Command::TurnLeft => self.pose.facing = self.pose.facing.turn_left(),
            Command::TurnRight => self.pose.facing = self.pose.facing.turn_right(),
            Command::StepForward => self.try_step(self.pose.facing),
            Command::StepBack => self.try_step(self.pose.facing.opposite()),
            Command::StrafeLeft => self.try_step(self.pose.facing.turn_left()),
            Command::StrafeRight => self.try_step(self.pose.facing.turn_right()),
            Command::Descend => self.take_stairs(true),
            Command::Ascend => self.take_stairs(false),
            Command::ToggleMap => self.show_map = !self.show_map,
            Command::Quit => self.quit = true,
        }
    }

    /// Jump to a cell on the current level. No-op on non-traversable
    /// targets. Exists for tooling and tests.
    pub fn warp_to(&mut self, pos: (u16, u16)) {
        if self.current_level().is_traversable(pos.0 as i32, pos.1 as i32) {
            self.pose.x = pos.0 as i32;
            self.pose.y = pos.1 as i32;
            self.mark_arrival();
        }
    }

    fn try_step(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        let (nx, ny) = (self.pose.x + dx, self.pose.y + dy);
        let level = &self.levels[&self.pose.level];
        if !level.is_traversable(nx, ny) {
            self.message = Some(String::from("A wall blocks the way."));
            return;
        }
        self.pose.x = nx;
        self.pose.y = ny;
        self.mark_arrival();
        self.describe_cell();
    }

    fn take_stairs(&mut self, down: bool) {
        let level = &self.levels[&self.pose.level];
        let here = (self.pose.x as u16, self.pose.y as u16);
        let stairs = if down { level.stairs_down } else { level.stairs_up };
        if stairs != Some(here) {
            self.message = Some(if down {
                String::from("There are no stairs down here.")
            } else {
                String::from("There are no stairs up here.")
            });
            return;
        }

        let target = if down {
            self.pose.level + 1
        } else {
            self.pose.level - 1
        };
        let next = self
            .levels
            .entry(target)
            .or_insert_with(|| self.generator.generate(target));
        // Arrive at the matching staircase on the other side
        let arrival = if down {
            next.stairs_up.unwrap_or(next.start)
        } else {
            next.stairs_down.unwrap_or(next.start)
        };

        self.pose.level = target;
        self.pose.x = arrival.0 as i32;
        self.pose.y = arrival.1 as i32;
        self.mark_arrival();
        self.message = Some(if down {
            format!("You descend to depth {target}.")
        } else {
            format!("You climb back to depth {target}.")
        });
        if target == self.max_depth {
            self.message = Some(format!(
                "You descend to depth {target}. Something large stirs in the dark."
            ));
        }
    }

    /// Mark the current cell visited and its 3x3 surroundings discovered.
    fn mark_arrival(&mut self) {
        let (x, y, index) = (self.pose.x, self.pose.y, self.pose.level);
        if let Some(level) = self.levels.get_mut(&index) {
            level.mark_visited(x, y);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    level.mark_discovered(x + dx, y + dy);
                }
            }
        }
    }

    fn describe_cell(&mut self) {
        let level = &self.levels[&self.pose.level];
        let Some(cell) = level.cell(self.pose.x, self.pose.y) else {
            return;
        };
        self.message = match cell.kind {
            CellKind::StairsDown => Some(String::from("A staircase leads down. [>]")),
            CellKind::StairsUp => Some(String::from("A staircase leads up. [<]")),
            CellKind::Treasure => Some(String::from("Something glitters on the floor.")),
            CellKind::Boss => Some(String::from("You have found the lair.")),
            CellKind::Trap => match cell.trap {
                Some(kind) => Some(format!("You step around a {kind} trap.")),
                None => Some(String::from("The floor looks unsafe here.")),
            },
            CellKind::Door => Some(String::from("You pass through a doorway.")),
            _ => None,
        };
    }

    /// Draw one frame: first-person view, status line, optional minimap.
    pub fn render(&self, frame: &mut Frame) {
        let [view_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let level = self.current_level();
        let mut surface = BufferSurface::new(frame.buffer_mut(), view_area);
        // A zero-area view (mid-resize) skips the frame; the next one retries
        let _ = self.renderer.render(level, &self.pose, &mut surface);

        if self.show_map {
            self.draw_minimap(frame, view_area);
        }
        self.draw_status(frame, status_area);
    }

    /// Top-down overlay of discovered cells in the view's top-left corner
    fn draw_minimap(&self, frame: &mut Frame, view_area: Rect) {
        let level = self.current_level();
        let buf = frame.buffer_mut();
        for cell in level.cells() {
            if !cell.discovered {
                continue;
            }
            let sx = view_area.x + 1 + cell.x;
            let sy = view_area.y + 1 + cell.y;
            if sx >= view_area.right().saturating_sub(1) || sy >= view_area.bottom() {
                continue;
            }
            let (ch, color) = if (cell.x as i32, cell.y as i32) == (self.pose.x, self.pose.y) {
                ('@', Color::Yellow)
            } else if cell.visited {
                (cell.kind.symbol(), Color::White)
            } else {
                (cell.kind.symbol(), Color::DarkGray)
            };
            if let Some(c) = buf.cell_mut((sx, sy)) {
                c.set_char(ch);
                c.set_fg(color);
                c.set_bg(Color::Black);
            }
        }
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let level = self.current_level();
        let mut spans = vec![
            Span::styled(
                format!(" depth {} ({}) ", self.pose.level, level.theme),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                "({},{}) facing {}  ",
                self.pose.x, self.pose.y, self.pose.facing
            )),
        ];
        if let Some(msg) = &self.message {
            spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
        } else {
            spans.push(Span::styled(
                "[arrows/hjkl] move  [a/d] strafe  [</>] stairs  [m]ap  [q]uit",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
