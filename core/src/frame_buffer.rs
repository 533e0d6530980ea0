use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// The Chip-8 display is composed of 64x32 black/white pixels, indexed as `[y][x]`.
///
/// Coordinates wrap: anything drawn past the right or bottom edge reappears on the opposite side.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        let (x, y) = FrameBuffer::wrap(x, y);
        self.pixels[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize) {
        let (x, y) = FrameBuffer::wrap(x, y);
        self.pixels[y][x] = true;
    }

    pub fn unset(&mut self, x: usize, y: usize) {
        let (x, y) = FrameBuffer::wrap(x, y);
        self.pixels[y][x] = false;
    }

    /// Flips a pixel, returning true if it was turned off (a collision)
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let (x, y) = FrameBuffer::wrap(x, y);
        let was_set = self.pixels[y][x];
        self.pixels[y][x] = !was_set;
        was_set
    }

    /// XORs a sprite onto the display with its top-left corner at (x, y).
    ///
    /// Each byte of `rows` is one 8 pixel row of the sprite, most significant bit leftmost.
    /// Returns true if any pixel went from on to off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..8 {
                if row & (0x80 >> dx) != 0 {
                    collision |= self.toggle(x + dx, y + dy);
                }
            }
        }
        collision
    }

    /// Rows of the display from top to bottom, for rendering
    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    fn wrap(x: usize, y: usize) -> (usize, usize) {
        (x % DISPLAY_WIDTH, y % DISPLAY_HEIGHT)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of text per row, `#` for lit pixels and `.` for dark ones
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FrameBuffer\n{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> usize {
        fb.rows().flat_map(|r| r.iter()).filter(|&&p| p).count()
    }

    #[test]
    fn test_set_unset() {
        let mut fb = FrameBuffer::new();
        fb.set(3, 4);
        assert!(fb.is_set(3, 4));
        fb.unset(3, 4);
        assert!(!fb.is_set(3, 4));
    }

    #[test]
    fn test_toggle_reports_collision() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.toggle(0, 0));
        assert!(fb.toggle(0, 0));
        assert!(!fb.is_set(0, 0));
    }

    #[test]
    fn test_addressing_wraps() {
        let mut fb = FrameBuffer::new();
        fb.set(DISPLAY_WIDTH + 1, DISPLAY_HEIGHT + 2);
        assert!(fb.is_set(1, 2));
    }

    #[test]
    fn test_draw_sprite_xors() {
        let mut fb = FrameBuffer::new();
        // 0 1 0 1 -> Set
        fb.set(3, 0);
        fb.set(5, 0);
        // 1 1 0 0 -> Draw xor
        let collision = fb.draw_sprite(2, 0, &[0b1100_0000]);
        assert!(collision);
        let row: Vec<bool> = (2..6).map(|x| fb.is_set(x, 0)).collect();
        assert_eq!(row, vec![true, false, false, true]);
    }

    #[test]
    fn test_draw_twice_erases_with_collision() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(10, 10, &[0xFF]));
        assert_eq!(lit(&fb), 8);
        assert!(fb.draw_sprite(10, 10, &[0xFF]));
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_draw_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(DISPLAY_WIDTH - 1, 0, &[0b1100_0000]);
        assert!(fb.is_set(DISPLAY_WIDTH - 1, 0));
        assert!(fb.is_set(0, 0));
        assert_eq!(lit(&fb), 2);
    }

    #[test]
    fn test_draw_wraps_vertically() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, DISPLAY_HEIGHT - 1, &[0x80, 0x80]);
        assert!(fb.is_set(0, DISPLAY_HEIGHT - 1));
        assert!(fb.is_set(0, 0));
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0xFF; 15]);
        fb.clear();
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_display_text() {
        let mut fb = FrameBuffer::new();
        fb.set(0, 0);
        fb.set(DISPLAY_WIDTH - 1, DISPLAY_HEIGHT - 1);
        let text = fb.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with("#."));
        assert!(lines[DISPLAY_HEIGHT - 1].ends_with(".#"));
        assert!(lines.iter().all(|l| l.len() == DISPLAY_WIDTH));
    }
}
