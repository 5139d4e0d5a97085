//! Glyph rendering.
//!
//! The engine never rasterizes text itself; it consumes a [`Font`]
//! capability that measures a single line's pixel width and draws it into a
//! clipped region of the buffer. Two implementations ship with the crate:
//!
//! - [`PixelFont`]: the default 8x8 monospaced bitmap font with an 8-pixel
//!   line advance, small enough for the 12-pixel widget rows.
//! - [`NotoFont`]: 16px anti-aliased Noto Sans Mono via the
//!   `noto-sans-mono-bitmap` crate, for hosts that pair it with taller rows
//!   (`next_height`).

use image::RgbaImage;
use noto_sans_mono_bitmap::{FontWeight, RasterHeight, get_raster, get_raster_width};

use crate::draw;
use crate::types::{Color, Rect};

// =============================================================================
// Font capability
// =============================================================================

/// A text-rendering capability.
///
/// `draw_line` renders exactly one line (no newline handling) with its top
/// edge at `y`, clipped to `clip`. Multi-line splitting and centering are
/// the engine's job, not the font's.
pub trait Font {
    /// Pixel width of a single line of text.
    fn measure(&self, line: &str) -> i32;

    /// Vertical distance between successive line tops.
    fn line_advance(&self) -> i32;

    /// Draw one line of text with its top-left corner at (x, y).
    fn draw_line(&self, buf: &mut RgbaImage, clip: Rect, x: i32, y: i32, line: &str, color: Color);
}

// =============================================================================
// PixelFont: built-in 8x8 bitmap font
// =============================================================================

/// Width and height of one glyph cell in [`PixelFont`].
const GLYPH_SIZE: i32 = 8;

/// Built-in 8x8 monospaced pixel font covering printable ASCII.
///
/// Characters outside `0x20..=0x7E` render as the replacement glyph (`?`).
/// Each glyph row is one byte, most significant bit leftmost.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelFont;

impl PixelFont {
    pub fn new() -> Self {
        Self
    }

    fn glyph(ch: char) -> &'static [u8; 8] {
        let idx = match ch {
            ' '..='~' => ch as usize - 0x20,
            _ => '?' as usize - 0x20,
        };
        &GLYPHS[idx]
    }
}

impl Font for PixelFont {
    fn measure(&self, line: &str) -> i32 {
        line.chars().count() as i32 * GLYPH_SIZE
    }

    fn line_advance(&self) -> i32 {
        GLYPH_SIZE
    }

    fn draw_line(&self, buf: &mut RgbaImage, clip: Rect, x: i32, y: i32, line: &str, color: Color) {
        let mut pen_x = x;
        for ch in line.chars() {
            let rows = Self::glyph(ch);
            for (dy, bits) in rows.iter().enumerate() {
                for dx in 0..GLYPH_SIZE {
                    if (bits >> (7 - dx)) & 1 == 1 {
                        draw::put_pixel(buf, clip, pen_x + dx, y + dy as i32, color);
                    }
                }
            }
            pen_x += GLYPH_SIZE;
        }
    }
}

// =============================================================================
// NotoFont: 16px anti-aliased Noto Sans Mono
// =============================================================================

/// 16px regular-weight Noto Sans Mono, alpha-blended against the buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotoFont;

impl NotoFont {
    pub fn new() -> Self {
        Self
    }

    fn char_width() -> i32 {
        get_raster_width(FontWeight::Regular, RasterHeight::Size16) as i32
    }
}

impl Font for NotoFont {
    fn measure(&self, line: &str) -> i32 {
        line.chars().count() as i32 * Self::char_width()
    }

    fn line_advance(&self) -> i32 {
        16
    }

    fn draw_line(&self, buf: &mut RgbaImage, clip: Rect, x: i32, y: i32, line: &str, color: Color) {
        let mut pen_x = x;
        for ch in line.chars() {
            let raster = get_raster(ch, FontWeight::Regular, RasterHeight::Size16)
                .or_else(|| get_raster('?', FontWeight::Regular, RasterHeight::Size16));
            let Some(raster) = raster else {
                pen_x += Self::char_width();
                continue;
            };
            let width = raster.width();
            for (dy, row) in raster.raster().iter().enumerate() {
                for (dx, &intensity) in row.iter().take(width).enumerate() {
                    if intensity == 0 {
                        continue;
                    }
                    let px = pen_x + dx as i32;
                    let py = y + dy as i32;
                    if intensity == 255 {
                        draw::put_pixel(buf, clip, px, py, color);
                    } else if clip.contains(px, py) && draw::bounds(buf).contains(px, py) {
                        let dst = *buf.get_pixel(px as u32, py as u32);
                        let blended = blend(color, dst, intensity);
                        buf.put_pixel(px as u32, py as u32, blended);
                    }
                }
            }
            pen_x += Self::char_width();
        }
    }
}

/// Blend `fg` over `dst` by the glyph coverage `intensity` (0..=255).
fn blend(fg: Color, dst: Color, intensity: u8) -> Color {
    let a = intensity as u32;
    let inv = 255 - a;
    let mix = |f: u8, d: u8| ((f as u32 * a + d as u32 * inv) / 255) as u8;
    image::Rgba([
        mix(fg[0], dst[0]),
        mix(fg[1], dst[1]),
        mix(fg[2], dst[2]),
        255,
    ])
}

// =============================================================================
// Glyph data
// =============================================================================

/// 8x8 glyph bitmaps for ASCII `0x20..=0x7E`, one byte per row, MSB leftmost.
#[rustfmt::skip]
const GLYPHS: [[u8; 8]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x20, 0x20, 0x20, 0x20, 0x20, 0x00, 0x20, 0x00], // !
    [0x50, 0x50, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x50, 0x50, 0xf8, 0x50, 0xf8, 0x50, 0x50, 0x00], // #
    [0x20, 0x78, 0x80, 0x70, 0x08, 0xf0, 0x20, 0x00], // $
    [0xc0, 0xc8, 0x10, 0x20, 0x40, 0x98, 0x18, 0x00], // %
    [0x60, 0x90, 0xa0, 0x40, 0xa8, 0x90, 0x68, 0x00], // &
    [0x20, 0x20, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00], // '
    [0x10, 0x20, 0x40, 0x40, 0x40, 0x20, 0x10, 0x00], // (
    [0x40, 0x20, 0x10, 0x10, 0x10, 0x20, 0x40, 0x00], // )
    [0x00, 0x20, 0xa8, 0x70, 0xa8, 0x20, 0x00, 0x00], // *
    [0x00, 0x20, 0x20, 0xf8, 0x20, 0x20, 0x00, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x30, 0x20, 0x40, 0x00], // ,
    [0x00, 0x00, 0x00, 0xf8, 0x00, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x60, 0x60, 0x00], // .
    [0x08, 0x10, 0x20, 0x40, 0x80, 0x00, 0x00, 0x00], // /
    [0x70, 0x88, 0x98, 0xa8, 0xc8, 0x88, 0x70, 0x00], // 0
    [0x20, 0x60, 0x20, 0x20, 0x20, 0x20, 0x70, 0x00], // 1
    [0x70, 0x88, 0x08, 0x10, 0x20, 0x40, 0xf8, 0x00], // 2
    [0x70, 0x88, 0x08, 0x30, 0x08, 0x88, 0x70, 0x00], // 3
    [0x10, 0x30, 0x50, 0x90, 0xf8, 0x10, 0x10, 0x00], // 4
    [0xf8, 0x80, 0xf0, 0x08, 0x08, 0x88, 0x70, 0x00], // 5
    [0x70, 0x80, 0x80, 0xf0, 0x88, 0x88, 0x70, 0x00], // 6
    [0xf8, 0x08, 0x10, 0x20, 0x40, 0x40, 0x40, 0x00], // 7
    [0x70, 0x88, 0x88, 0x70, 0x88, 0x88, 0x70, 0x00], // 8
    [0x70, 0x88, 0x88, 0x78, 0x08, 0x08, 0x70, 0x00], // 9
    [0x00, 0x60, 0x60, 0x00, 0x60, 0x60, 0x00, 0x00], // :
    [0x00, 0x60, 0x60, 0x00, 0x60, 0x20, 0x40, 0x00], // ;
    [0x10, 0x20, 0x40, 0x80, 0x40, 0x20, 0x10, 0x00], // <
    [0x00, 0x00, 0xf8, 0x00, 0xf8, 0x00, 0x00, 0x00], // =
    [0x40, 0x20, 0x10, 0x08, 0x10, 0x20, 0x40, 0x00], // >
    [0x70, 0x88, 0x08, 0x10, 0x20, 0x00, 0x20, 0x00], // ?
    [0x70, 0x88, 0xb8, 0xa8, 0xb0, 0x80, 0x70, 0x00], // @
    [0x70, 0x88, 0x88, 0xf8, 0x88, 0x88, 0x88, 0x00], // A
    [0xf0, 0x88, 0x88, 0xf0, 0x88, 0x88, 0xf0, 0x00], // B
    [0x70, 0x88, 0x80, 0x80, 0x80, 0x88, 0x70, 0x00], // C
    [0xf0, 0x88, 0x88, 0x88, 0x88, 0x88, 0xf0, 0x00], // D
    [0xf8, 0x80, 0x80, 0xf0, 0x80, 0x80, 0xf8, 0x00], // E
    [0xf8, 0x80, 0x80, 0xf0, 0x80, 0x80, 0x80, 0x00], // F
    [0x70, 0x88, 0x80, 0xb8, 0x88, 0x88, 0x70, 0x00], // G
    [0x88, 0x88, 0x88, 0xf8, 0x88, 0x88, 0x88, 0x00], // H
    [0x70, 0x20, 0x20, 0x20, 0x20, 0x20, 0x70, 0x00], // I
    [0x38, 0x10, 0x10, 0x10, 0x10, 0x90, 0x60, 0x00], // J
    [0x88, 0x90, 0xa0, 0xc0, 0xa0, 0x90, 0x88, 0x00], // K
    [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xf8, 0x00], // L
    [0x88, 0xd8, 0xa8, 0xa8, 0x88, 0x88, 0x88, 0x00], // M
    [0x88, 0xc8, 0xa8, 0x98, 0x88, 0x88, 0x88, 0x00], // N
    [0x70, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70, 0x00], // O
    [0xf0, 0x88, 0x88, 0xf0, 0x80, 0x80, 0x80, 0x00], // P
    [0x70, 0x88, 0x88, 0x88, 0xa8, 0x90, 0x68, 0x00], // Q
    [0xf0, 0x88, 0x88, 0xf0, 0xa0, 0x90, 0x88, 0x00], // R
    [0x78, 0x80, 0x80, 0x70, 0x08, 0x08, 0xf0, 0x00], // S
    [0xf8, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x00], // T
    [0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70, 0x00], // U
    [0x88, 0x88, 0x88, 0x88, 0x88, 0x50, 0x20, 0x00], // V
    [0x88, 0x88, 0x88, 0xa8, 0xa8, 0xd8, 0x88, 0x00], // W
    [0x88, 0x88, 0x50, 0x20, 0x50, 0x88, 0x88, 0x00], // X
    [0x88, 0x88, 0x50, 0x20, 0x20, 0x20, 0x20, 0x00], // Y
    [0xf8, 0x08, 0x10, 0x20, 0x40, 0x80, 0xf8, 0x00], // Z
    [0x70, 0x40, 0x40, 0x40, 0x40, 0x40, 0x70, 0x00], // [
    [0x80, 0x40, 0x20, 0x10, 0x08, 0x00, 0x00, 0x00], // \
    [0x70, 0x10, 0x10, 0x10, 0x10, 0x10, 0x70, 0x00], // ]
    [0x20, 0x50, 0x88, 0x00, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x00], // _
    [0x40, 0x20, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00], // `
    [0x00, 0x00, 0x70, 0x08, 0x78, 0x88, 0x78, 0x00], // a
    [0x80, 0x80, 0xf0, 0x88, 0x88, 0x88, 0xf0, 0x00], // b
    [0x00, 0x00, 0x70, 0x80, 0x80, 0x88, 0x70, 0x00], // c
    [0x08, 0x08, 0x78, 0x88, 0x88, 0x88, 0x78, 0x00], // d
    [0x00, 0x00, 0x70, 0x88, 0xf8, 0x80, 0x70, 0x00], // e
    [0x30, 0x48, 0x40, 0xe0, 0x40, 0x40, 0x40, 0x00], // f
    [0x00, 0x78, 0x88, 0x88, 0x78, 0x08, 0x70, 0x00], // g
    [0x80, 0x80, 0xf0, 0x88, 0x88, 0x88, 0x88, 0x00], // h
    [0x20, 0x00, 0x60, 0x20, 0x20, 0x20, 0x70, 0x00], // i
    [0x10, 0x00, 0x30, 0x10, 0x10, 0x90, 0x60, 0x00], // j
    [0x80, 0x80, 0x90, 0xa0, 0xc0, 0xa0, 0x90, 0x00], // k
    [0x60, 0x20, 0x20, 0x20, 0x20, 0x20, 0x70, 0x00], // l
    [0x00, 0x00, 0xd0, 0xa8, 0xa8, 0xa8, 0xa8, 0x00], // m
    [0x00, 0x00, 0xf0, 0x88, 0x88, 0x88, 0x88, 0x00], // n
    [0x00, 0x00, 0x70, 0x88, 0x88, 0x88, 0x70, 0x00], // o
    [0x00, 0xf0, 0x88, 0x88, 0xf0, 0x80, 0x80, 0x00], // p
    [0x00, 0x78, 0x88, 0x88, 0x78, 0x08, 0x08, 0x00], // q
    [0x00, 0x00, 0xb0, 0xc8, 0x80, 0x80, 0x80, 0x00], // r
    [0x00, 0x00, 0x78, 0x80, 0x70, 0x08, 0xf0, 0x00], // s
    [0x40, 0x40, 0xe0, 0x40, 0x40, 0x48, 0x30, 0x00], // t
    [0x00, 0x00, 0x88, 0x88, 0x88, 0x88, 0x78, 0x00], // u
    [0x00, 0x00, 0x88, 0x88, 0x88, 0x50, 0x20, 0x00], // v
    [0x00, 0x00, 0x88, 0x88, 0xa8, 0xa8, 0x50, 0x00], // w
    [0x00, 0x00, 0x88, 0x50, 0x20, 0x50, 0x88, 0x00], // x
    [0x00, 0x88, 0x88, 0x88, 0x78, 0x08, 0x70, 0x00], // y
    [0x00, 0x00, 0xf8, 0x10, 0x20, 0x40, 0xf8, 0x00], // z
    [0x18, 0x20, 0x20, 0x40, 0x20, 0x20, 0x18, 0x00], // {
    [0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x00], // |
    [0xc0, 0x20, 0x20, 0x10, 0x20, 0x20, 0xc0, 0x00], // }
    [0x00, 0x00, 0x40, 0xa8, 0x10, 0x00, 0x00, 0x00], // ~
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLACK, WHITE};

    #[test]
    fn test_pixel_font_measure() {
        let f = PixelFont::new();
        assert_eq!(f.measure(""), 0);
        assert_eq!(f.measure("OK"), 16);
        assert_eq!(f.measure("hello"), 40);
        assert_eq!(f.line_advance(), 8);
    }

    #[test]
    fn test_pixel_font_draws_within_clip() {
        let f = PixelFont::new();
        let mut buf = RgbaImage::from_pixel(32, 16, BLACK);
        let clip = Rect::new(0, 0, 32, 16);
        f.draw_line(&mut buf, clip, 2, 2, "H", WHITE);

        // 'H' has lit pixels; all of them inside the glyph cell
        let lit: Vec<(u32, u32)> = buf
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == WHITE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| x >= 2 && x < 10 && y >= 2 && y < 10));
    }

    #[test]
    fn test_pixel_font_clips_at_rect() {
        let f = PixelFont::new();
        let mut buf = RgbaImage::from_pixel(32, 16, BLACK);
        let clip = Rect::new(0, 0, 6, 16);
        f.draw_line(&mut buf, clip, 0, 0, "HH", WHITE);

        // Nothing escapes the clip rect
        for (x, _y, p) in buf.enumerate_pixels() {
            if x >= 6 {
                assert_eq!(*p, BLACK);
            }
        }
    }

    #[test]
    fn test_pixel_font_replacement_glyph() {
        let f = PixelFont::new();
        // Non-ASCII measures like any other single glyph
        assert_eq!(f.measure("\u{263a}"), 8);

        let mut buf = RgbaImage::from_pixel(16, 16, BLACK);
        f.draw_line(&mut buf, Rect::new(0, 0, 16, 16), 0, 0, "\u{263a}", WHITE);
        assert!(buf.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn test_noto_font_metrics() {
        let f = NotoFont::new();
        assert_eq!(f.line_advance(), 16);
        assert!(f.measure("a") > 0);
        assert_eq!(f.measure("ab"), 2 * f.measure("a"));
    }
}
