#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in viewport coordinates.
///
/// Units are CSS pixels with the origin at the top-left of the viewport.
/// Coordinates may be negative (an element scrolled above the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// The zero rectangle, used when nothing better is known.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    ///
    /// NaN extents are treated as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check that every component is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rectangle of this size anchored at the viewport origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Whether both extents are finite and non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(2.0, 3.0));
        assert!(rect.contains(5.5, 7.5));
        assert!(!rect.contains(6.0, 3.0));
        assert!(!rect.contains(2.0, 8.0));
    }

    #[test]
    fn rect_contains_empty_rect() {
        let r = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!r.contains(5.0, 5.0));
    }

    #[test]
    fn rect_edges_with_negative_origin() {
        let r = Rect::new(-10.0, -20.0, 30.0, 40.0);
        assert_eq!(r.right(), 20.0);
        assert_eq!(r.bottom(), 20.0);
        assert!(r.contains(0.0, 0.0));
    }

    #[test]
    fn rect_is_empty_handles_nan() {
        assert!(Rect::new(0.0, 0.0, f32::NAN, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 10.0).is_finite());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn size_validity() {
        assert!(Size::new(0.0, 0.0).is_valid());
        assert!(!Size::new(-1.0, 3.0).is_valid());
        assert!(!Size::new(f32::INFINITY, 3.0).is_valid());
        assert_eq!(Size::new(3.0, 4.0).to_rect(), Rect::new(0.0, 0.0, 3.0, 4.0));
    }
}
