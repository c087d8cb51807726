//! Drawing-surface abstraction
//!
//! The renderer draws through this trait so the framebuffer stays
//! externally owned: the game shell hands it a ratatui buffer region, and
//! headless callers (tests, capture tools) can use an in-memory grid.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;

/// A column-addressable character framebuffer
pub trait Surface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    /// Write one styled character. Out-of-range writes are ignored.
    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color);
}

/// Surface backed by a region of a ratatui [`Buffer`]
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }
}

impl Surface for BufferSurface<'_> {
    fn width(&self) -> u16 {
        self.area.width
    }

    fn height(&self) -> u16 {
        self.area.height
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let pos = Position::new(self.area.x + x, self.area.y + y);
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_char(ch);
            cell.set_fg(fg);
        }
    }
}

/// In-memory surface for headless rendering
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u16,
    height: u16,
    chars: Vec<char>,
    colors: Vec<Color>,
}

impl MemorySurface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            chars: vec![' '; len],
            colors: vec![Color::Reset; len],
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.chars[y as usize * self.width as usize + x as usize])
    }

    pub fn color_at(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.colors[y as usize * self.width as usize + x as usize])
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.chars[idx] = ch;
        self.colors[idx] = fg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_bounds() {
        let mut surface = MemorySurface::new(4, 3);
        surface.put(1, 1, 'x', Color::Red);
        surface.put(99, 99, 'y', Color::Blue); // ignored

        assert_eq!(surface.char_at(1, 1), Some('x'));
        assert_eq!(surface.color_at(1, 1), Some(Color::Red));
        assert_eq!(surface.char_at(0, 0), Some(' '));
        assert_eq!(surface.char_at(99, 99), None);
    }

    #[test]
    fn test_buffer_surface_offsets_into_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        let area = Rect::new(2, 3, 5, 5);
        let mut surface = BufferSurface::new(&mut buf, area);

        assert_eq!(surface.width(), 5);
        assert_eq!(surface.height(), 5);
        surface.put(0, 0, '#', Color::White);
        surface.put(9, 9, '#', Color::White); // outside the region, ignored

        assert_eq!(buf.cell(Position::new(2, 3)).unwrap().symbol(), "#");
    }
}
