//! Bitmap font glyph lookup and blitting.
//!
//! Glyph tables are opaque data supplied by the caller: a contiguous run
//! of fixed-size records covering one character range. The two controller
//! variants ship fonts with different bit orientations, so the renderer
//! takes the layout explicitly.

use crate::graphics::PixelSink;

/// Descriptor for one fixed-cell bitmap font.
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Raw glyph table, `bytes_per_char` bytes per character code in
    /// `first_char..=last_char`.
    pub data: &'static [u8],
    /// Glyph cell width in pixels.
    pub width: u8,
    /// Glyph cell height in pixels.
    pub height: u8,
    /// First character code covered by the table.
    pub first_char: u8,
    /// Last character code covered by the table (inclusive).
    pub last_char: u8,
    /// Record size of one glyph in bytes.
    pub bytes_per_char: u8,
}

impl Font {
    /// Whether the table has a glyph for this character code.
    pub fn contains(&self, code: u8) -> bool {
        code >= self.first_char && code <= self.last_char
    }

    fn record(&self, code: u8) -> &'static [u8] {
        let offset = (code - self.first_char) as usize * self.bytes_per_char as usize;
        &self.data[offset..offset + self.bytes_per_char as usize]
    }
}

/// Bit orientation of the glyph records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontLayout {
    /// Row-major: each glyph row packed left-to-right, MSB first.
    Horizontal,
    /// Column-major: each byte is an 8-row slice of one column, LSB at the
    /// top; pages of 8 rows stacked for taller glyphs.
    Vertical,
}

/// Renders glyphs from one font into any [`PixelSink`].
pub struct FontRenderer {
    font: Font,
    layout: FontLayout,
}

impl FontRenderer {
    /// Renderer for a font with the given bit layout.
    pub fn new(font: Font, layout: FontLayout) -> Self {
        FontRenderer { font, layout }
    }

    /// Glyph cell width in pixels.
    pub fn glyph_width(&self) -> u8 {
        self.font.width
    }

    /// Glyph cell height in pixels.
    pub fn glyph_height(&self) -> u8 {
        self.font.height
    }

    /// Glyph record for a character. Characters outside the table range
    /// substitute the blank (space) glyph; `None` when even the blank is
    /// not covered.
    fn glyph(&self, c: char) -> Option<&'static [u8]> {
        let code = u8::try_from(u32::from(c)).unwrap_or(0);
        let code = if self.font.contains(code) { code } else { b' ' };
        if !self.font.contains(code) {
            return None;
        }
        Some(self.font.record(code))
    }

    fn bit(&self, glyph: &[u8], gx: u8, gy: u8) -> bool {
        match self.layout {
            FontLayout::Horizontal => {
                let bytes_per_row = (self.font.width as usize + 7) / 8;
                let byte = glyph[gy as usize * bytes_per_row + gx as usize / 8];
                byte & (0x80 >> (gx % 8)) != 0
            }
            FontLayout::Vertical => {
                let byte = glyph[(gy as usize / 8) * self.font.width as usize + gx as usize];
                byte & (1 << (gy % 8)) != 0
            }
        }
    }

    /// Blit one glyph with its top-left corner at (x, y). Set bits are
    /// written in the given polarity; unset bits leave the sink untouched.
    pub fn draw_char<S: PixelSink + ?Sized>(&self, sink: &mut S, x: i32, y: i32, c: char, on: bool) {
        let Some(glyph) = self.glyph(c) else {
            return;
        };
        for gy in 0..self.font.height {
            for gx in 0..self.font.width {
                if self.bit(glyph, gx, gy) {
                    sink.write_pixel(x + gx as i32, y + gy as i32, on);
                }
            }
        }
    }

    /// Draw a string, advancing the cursor one glyph width per character.
    /// No wrapping or kerning; that stays with the caller.
    pub fn draw_string<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        x: i32,
        y: i32,
        s: &str,
        on: bool,
    ) {
        let mut cursor = x;
        for c in s.chars() {
            self.draw_char(sink, cursor, y, c, on);
            cursor += i32::from(self.font.width);
        }
    }

    /// Width of a string in pixels. Characters outside the table range
    /// contribute zero width (while `draw_char` substitutes a blank glyph
    /// of full width; kept as-is for compatibility with existing layout
    /// code).
    pub fn string_width(&self, s: &str) -> u32 {
        s.chars()
            .filter(|&c| {
                u8::try_from(u32::from(c)).is_ok_and(|code| self.font.contains(code))
            })
            .count() as u32
            * u32::from(self.font.width)
    }
}
