//! Packed in-memory mirrors of the panels' pixel RAM.
//!
//! Both controllers pack several physical pixels into each byte; the
//! addressing arithmetic here must match the controller's data format
//! exactly, byte for byte, since [`display`](crate::st7305::St7305::display)
//! streams the buffer to the panel unmodified.
//!
//! Both buffers implement [`PixelSink`] in physical coordinates, so the
//! rasterizer and font blitter can target them directly, without a driver
//! or a rotation in between.

use crate::graphics::PixelSink;

/// 1-bit framebuffer for the ST7305 (168 × 384).
///
/// Each byte holds a 4 × 2 block of pixels: four horizontally adjacent
/// columns and two rows. Bit position inside the byte is
/// `7 - ((x % 4) * 2 + (y % 2))`, a bijection over the eight bits.
pub struct MonoFrameBuffer {
    data: [u8; Self::LEN],
}

impl MonoFrameBuffer {
    /// Panel width in pixels.
    pub const WIDTH: u16 = 168;
    /// Panel height in pixels.
    pub const HEIGHT: u16 = 384;
    /// Buffer row length in bytes (4 pixels per byte horizontally).
    pub const DATA_WIDTH: usize = (Self::WIDTH / 4) as usize;
    /// Buffer row count (2 pixel rows per byte row).
    pub const DATA_HEIGHT: usize = (Self::HEIGHT / 2) as usize;
    /// Total buffer length in bytes.
    pub const LEN: usize = Self::DATA_WIDTH * Self::DATA_HEIGHT;

    /// A zeroed (all pixels off) buffer.
    pub fn new() -> Self {
        MonoFrameBuffer {
            data: [0x00; Self::LEN],
        }
    }

    /// Overwrite every byte of the buffer.
    pub fn fill(&mut self, value: u8) {
        self.data = [value; Self::LEN];
    }

    /// Set every pixel off.
    pub fn clear(&mut self) {
        self.fill(0x00);
    }

    fn address(x: u16, y: u16) -> (usize, u8) {
        let index = (y as usize / 2) * Self::DATA_WIDTH + x as usize / 4;
        let bit = 7 - ((x % 4) * 2 + (y % 2)) as u8;
        (index, bit)
    }

    /// Write one physical pixel. Out-of-range coordinates are dropped.
    pub fn set_pixel(&mut self, x: u16, y: u16, on: bool) {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return;
        }
        let (index, bit) = Self::address(x, y);
        if on {
            self.data[index] |= 1 << bit;
        } else {
            self.data[index] &= !(1 << bit);
        }
    }

    /// Read one physical pixel; out-of-range reads return `false`.
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return false;
        }
        let (index, bit) = Self::address(x, y);
        self.data[index] & (1 << bit) != 0
    }

    /// The packed bytes, in the order the controller expects them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for MonoFrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSink for MonoFrameBuffer {
    fn write_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        self.set_pixel(x, y, on);
    }
}

/// 2-bit grayscale framebuffer for the ST7306 (300 × 400).
///
/// Each byte holds a 2 × 2 block of pixels, two bits per pixel spread over
/// two bit planes: the high plane at `7 - (4 * (x % 2) + (y % 2))` and the
/// low plane two bits below it. The plane pair encodes four gray levels,
/// `0b00` through `0b11`.
pub struct GrayFrameBuffer {
    data: [u8; Self::LEN],
}

impl GrayFrameBuffer {
    /// Panel width in pixels.
    pub const WIDTH: u16 = 300;
    /// Panel height in pixels.
    pub const HEIGHT: u16 = 400;
    /// Buffer row length in bytes (2 pixels per byte horizontally).
    pub const DATA_WIDTH: usize = (Self::WIDTH / 2) as usize;
    /// Buffer row count (2 pixel rows per byte row).
    pub const DATA_HEIGHT: usize = (Self::HEIGHT / 2) as usize;
    /// Total buffer length in bytes.
    pub const LEN: usize = Self::DATA_WIDTH * Self::DATA_HEIGHT;

    /// Darkest gray level (both plane bits set).
    pub const LEVEL_MAX: u8 = 0b11;

    /// A zeroed (all pixels at level 0) buffer.
    pub fn new() -> Self {
        GrayFrameBuffer {
            data: [0x00; Self::LEN],
        }
    }

    /// Overwrite every byte of the buffer.
    pub fn fill(&mut self, value: u8) {
        self.data = [value; Self::LEN];
    }

    /// Set every pixel to level 0.
    pub fn clear(&mut self) {
        self.fill(0x00);
    }

    fn address(x: u16, y: u16) -> (usize, u8, u8) {
        let index = (y as usize / 2) * Self::DATA_WIDTH + x as usize / 2;
        let line = (4 * (x % 2) + (y % 2)) as u8;
        let high_bit = 7 - line;
        let low_bit = 7 - (line + 2);
        (index, high_bit, low_bit)
    }

    /// Write one physical pixel at a gray level in `0..=3` (values above 3
    /// are masked). Out-of-range coordinates are dropped.
    pub fn set_gray(&mut self, x: u16, y: u16, level: u8) {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return;
        }
        let level = level & Self::LEVEL_MAX;
        let (index, high_bit, low_bit) = Self::address(x, y);
        for (bit, set) in [(high_bit, level & 0b10 != 0), (low_bit, level & 0b01 != 0)] {
            if set {
                self.data[index] |= 1 << bit;
            } else {
                self.data[index] &= !(1 << bit);
            }
        }
    }

    /// Write one physical pixel as binary black/white: both planes set for
    /// on, both clear for off.
    pub fn set_pixel(&mut self, x: u16, y: u16, on: bool) {
        self.set_gray(x, y, if on { Self::LEVEL_MAX } else { 0 });
    }

    /// Read back the gray level at one physical pixel; out-of-range reads
    /// return 0.
    pub fn gray(&self, x: u16, y: u16) -> u8 {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return 0;
        }
        let (index, high_bit, low_bit) = Self::address(x, y);
        let byte = self.data[index];
        (((byte >> high_bit) & 1) << 1) | ((byte >> low_bit) & 1)
    }

    /// Read one physical pixel as binary: on when any plane bit is set.
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        self.gray(x, y) != 0
    }

    /// The packed bytes, in the order the controller expects them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for GrayFrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSink for GrayFrameBuffer {
    fn write_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        self.set_pixel(x, y, on);
    }
}
