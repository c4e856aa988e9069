use crate::constants::{DISPLAY_HEIGHT, DISPLAY_ROW_BYTES, DISPLAY_WIDTH};

/// The packed pixel rows, indexed as [y][x / 8]
pub type Rows = [[u8; DISPLAY_ROW_BYTES]; DISPLAY_HEIGHT];

/// # FrameBuffer
/// 64x32 monochrome pixels packed 8 to a byte, most significant bit first.
///
/// Pixel `(x, y)` lives in `rows[y][x / 8]` under the mask `0x80 >> (x % 8)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: Rows,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            rows: [[0; DISPLAY_ROW_BYTES]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.rows = [[0; DISPLAY_ROW_BYTES]; DISPLAY_HEIGHT];
    }

    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    /// Whether the pixel at `(x, y)` is lit; coordinates wrap around the screen
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = Self::locate(x);
        self.rows[y % DISPLAY_HEIGHT][byte] & mask != 0
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(|byte| *byte == 0)
    }

    fn locate(x: usize) -> (usize, u8) {
        let x = x % DISPLAY_WIDTH;
        (x / 8, 0x80 >> (x % 8))
    }

    /// XORs an 8-pixel-wide sprite onto the screen with its top left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row. Rows past the bottom edge continue at the
    /// top and columns past the right edge continue at the left.
    ///
    /// Returns true if any lit pixel was switched off (a collision).
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if bits & (0x80 >> bit) == 0 {
                    continue;
                }
                let (byte, mask) = Self::locate(x as usize + bit);
                collision |= self.rows[py][byte] & mask != 0;
                self.rows[py][byte] ^= mask;
            }
        }
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
