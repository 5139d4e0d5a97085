//! Core types for pixui.
//!
//! Geometry and color foundations that every other module builds on.
//! The pixel buffer itself is `image::RgbaImage`; colors are `image::Rgba<u8>`.

use image::Rgba;

// =============================================================================
// Color
// =============================================================================

/// Color type used throughout the engine (8-bit RGBA).
pub type Color = Rgba<u8>;

/// Opaque white, the foreground default at every frame start.
pub const WHITE: Color = Rgba([255, 255, 255, 255]);

/// Opaque black, the background default at every frame start.
pub const BLACK: Color = Rgba([0, 0, 0, 255]);

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle with exclusive max bounds.
///
/// Coordinates are `i32` so that degenerate geometry produced by mutator
/// overrides (zero or negative sizes) stays representable; such rectangles
/// are empty and draw nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Create a rectangle from corner coordinates.
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Rectangle width. Negative for inverted rectangles.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Rectangle height. Negative for inverted rectangles.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// True if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Point-in-rectangle test: min bounds inclusive, max bounds exclusive.
    ///
    /// This is the hit test used for clicks: a direct bounds comparison,
    /// never a pixel lookup.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Shrink the rectangle by `n` pixels on every side.
    ///
    /// Insetting past the rectangle's center yields an empty (or inverted)
    /// rectangle, which downstream drawing treats as a no-op.
    pub const fn inset(&self, n: i32) -> Self {
        Self {
            min_x: self.min_x + n,
            min_y: self.min_y + n,
            max_x: self.max_x - n,
            max_y: self.max_y - n,
        }
    }

    /// Intersection of two rectangles. Empty if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Self {
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10, 20, 30, 40);

        // Min edges are inside, max edges are outside
        assert!(r.contains(10, 20));
        assert!(r.contains(29, 39));
        assert!(!r.contains(30, 20));
        assert!(!r.contains(10, 40));
        assert!(!r.contains(9, 20));
        assert!(!r.contains(10, 19));

        // Center
        assert!(r.contains(20, 30));
    }

    #[test]
    fn test_from_size() {
        let r = Rect::from_size(5, 6, 10, 12);
        assert_eq!(r.max_x, 15);
        assert_eq!(r.max_y, 18);
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 12);
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(0, 0, 10, 10).inset(2);
        assert_eq!(r, Rect::new(2, 2, 8, 8));

        // Over-insetting produces an empty rectangle
        assert!(Rect::new(0, 0, 3, 3).inset(2).is_empty());
    }

    #[test]
    fn test_empty_and_inverted() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(5, 5, 3, 10).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());

        // Empty rectangles contain nothing
        assert!(!Rect::new(5, 5, 3, 10).contains(4, 6));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 10, 10));

        let c = Rect::new(15, 15, 20, 20);
        assert!(a.intersect(&c).is_empty());
    }
}
