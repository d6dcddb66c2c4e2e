//! Render-side framebuffer for the board picture.
//!
//! The engine draws into a caller-owned [`Framebuffer`]; there is no global
//! pixel buffer and no plotting callback. The hosting view copies the
//! finished picture to the screen however it likes.

pub(crate) mod glyphs;

/// Edge length of the board picture in pixels (8 squares of 8 px each).
pub const BOARD_PICTURE_WIDTH: usize = 64;

/// Edge length of one square in pixels.
pub const SQUARE_PIXELS: usize = 8;

/// A 64x64 1-bit framebuffer. Set pixels are ink.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Framebuffer {
    pixels: [bool; BOARD_PICTURE_WIDTH * BOARD_PICTURE_WIDTH],
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: [false; BOARD_PICTURE_WIDTH * BOARD_PICTURE_WIDTH],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize) {
        if x < BOARD_PICTURE_WIDTH && y < BOARD_PICTURE_WIDTH {
            self.pixels[y * BOARD_PICTURE_WIDTH + x] = true;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < BOARD_PICTURE_WIDTH && y < BOARD_PICTURE_WIDTH && self.pixels[y * BOARD_PICTURE_WIDTH + x]
    }

    /// Number of ink pixels; handy for change detection.
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// One text row per pixel row, `#` for ink, `.` for background.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((BOARD_PICTURE_WIDTH + 1) * BOARD_PICTURE_WIDTH);
        for y in 0..BOARD_PICTURE_WIDTH {
            for x in 0..BOARD_PICTURE_WIDTH {
                out.push(if self.get(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
