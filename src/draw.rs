//! Pixel drawing primitives.
//!
//! All widget rendering bottoms out here: filling and outlining rectangles
//! in the window's `RgbaImage`. Every operation clips to the buffer bounds
//! and treats empty or inverted rectangles as no-ops, so malformed geometry
//! from mutator overrides degrades to drawing nothing.

use image::RgbaImage;

use crate::types::{Color, Rect};

/// The buffer's full bounds as a clip rectangle.
pub fn bounds(buf: &RgbaImage) -> Rect {
    Rect::new(0, 0, buf.width() as i32, buf.height() as i32)
}

/// Fill the entire buffer with one color.
pub fn clear(buf: &mut RgbaImage, color: Color) {
    for px in buf.pixels_mut() {
        *px = color;
    }
}

/// Fill a rectangle, clipped to the buffer.
pub fn fill_rect(buf: &mut RgbaImage, rect: Rect, color: Color) {
    let clipped = rect.intersect(&bounds(buf));
    if clipped.is_empty() {
        return;
    }
    for y in clipped.min_y..clipped.max_y {
        for x in clipped.min_x..clipped.max_x {
            buf.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw a one-pixel outline along the rectangle's four edges.
///
/// For rectangles narrower or shorter than two pixels the edges collapse
/// onto each other and the outline covers the whole interior.
pub fn stroke_rect(buf: &mut RgbaImage, rect: Rect, color: Color) {
    if rect.is_empty() {
        return;
    }
    let top = Rect::new(rect.min_x, rect.min_y, rect.max_x, rect.min_y + 1);
    let bottom = Rect::new(rect.min_x, rect.max_y - 1, rect.max_x, rect.max_y);
    let left = Rect::new(rect.min_x, rect.min_y, rect.min_x + 1, rect.max_y);
    let right = Rect::new(rect.max_x - 1, rect.min_y, rect.max_x, rect.max_y);
    fill_rect(buf, top, color);
    fill_rect(buf, bottom, color);
    fill_rect(buf, left, color);
    fill_rect(buf, right, color);
}

/// Set a single pixel if it lies inside both the clip rect and the buffer.
#[inline]
pub fn put_pixel(buf: &mut RgbaImage, clip: Rect, x: i32, y: i32, color: Color) {
    if clip.contains(x, y) && bounds(buf).contains(x, y) {
        buf.put_pixel(x as u32, y as u32, color);
    }
}
