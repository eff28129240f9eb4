//! The monochrome framebuffer. Sprites are XOR'ed onto it and wrap around the edges.

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fmt;

/// One byte per pixel, row-major, every cell is 0 or 1.
pub type Framebuffer = [u8; SCREEN_WIDTH * SCREEN_HEIGHT];

const EMPTY_FRAMEBUFFER: Framebuffer = [0; SCREEN_WIDTH * SCREEN_HEIGHT];

pub struct Display {
    cells: Framebuffer,
}

impl Display {
    pub fn new() -> Display {
        Display {
            cells: EMPTY_FRAMEBUFFER,
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.cells = EMPTY_FRAMEBUFFER;
    }

    /// XOR a sprite onto the screen with its top left corner at `(x, y)`.
    /// Each row is 8 pixels wide, most significant bit first.
    ///
    /// Returns true if any pixel that was on got turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut any_collisions = false;
        for (dy, row) in rows.iter().enumerate() {
            let py = (y as usize + dy) % SCREEN_HEIGHT;
            for dx in 0..8 {
                let new_pixel = row >> (7 - dx) & 1;
                let px = (x as usize + dx) % SCREEN_WIDTH;
                let old_pixel = &mut self.cells[py * SCREEN_WIDTH + px];

                // Set pixel is unset
                if *old_pixel == 1 && new_pixel == 1 {
                    any_collisions = true;
                }
                *old_pixel ^= new_pixel;
            }
        }
        any_collisions
    }

    /// The pixel at `(x, y)`, coordinates wrap like they do when drawing.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[(y % SCREEN_HEIGHT) * SCREEN_WIDTH + x % SCREEN_WIDTH]
    }

    /// Copy out the whole framebuffer.
    pub fn snapshot(&self) -> Framebuffer {
        self.cells
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                write!(f, "{}", if self.get(x, y) == 1 { "#" } else { " " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
