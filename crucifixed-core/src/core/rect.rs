//! Pixel-Space Points and Boxes
//!
//! Screen convention: x grows right, y grows down. `right()` and `bottom()`
//! are exclusive edges, so a 50 px wide box at x = 0 ends at x = 50.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A pixel-space position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in pixels
    pub x: i32,
    /// Y coordinate in pixels
    pub y: i32,
}

impl Point {
    /// Origin
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Scale both components by an integer factor.
    #[inline]
    pub fn scale(self, factor: i32) -> Self {
        Self {
            x: self.x.saturating_mul(factor),
            y: self.y.saturating_mul(factor),
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned box in pixel space.
///
/// Width and height are never negative; constructors clamp them to zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a box from its top-left corner and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Create a box of the given size centred on a point.
    pub fn from_centre(centre: Point, width: i32, height: i32) -> Self {
        Self::new(centre.x - width / 2, centre.y - height / 2, width, height)
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Centre point, rounded towards the top-left.
    #[inline]
    pub const fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Move so the left edge sits at `left`.
    #[inline]
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`.
    #[inline]
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    /// Move so the top edge sits at `top`.
    #[inline]
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move so the bottom edge sits at `bottom`.
    #[inline]
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Copy of this box shifted by a delta.
    #[inline]
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Copy of this box with its top-left corner at `point`.
    #[inline]
    pub fn at(self, point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            ..self
        }
    }

    /// Strict overlap test. Boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if a point lies inside this box.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Keep this box inside `bounds`, sliding it back along each axis.
    ///
    /// A box larger than the bounds is pinned to the bounds' top-left.
    pub fn clamp_within(self, bounds: &Rect) -> Self {
        let max_x = (bounds.right() - self.width).max(bounds.left());
        let max_y = (bounds.bottom() - self.height).max(bounds.top());
        Self {
            x: self.x.clamp(bounds.left(), max_x),
            y: self.y.clamp(bounds.top(), max_y),
            ..self
        }
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_centre() {
        let r = Rect::new(10, 20, 50, 30);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 60);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 50);
        assert_eq!(r.centre(), Point::new(35, 35));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(0, 0, -5, -1);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));

        let c = Rect::new(9, 9, 10, 10);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_set_edges() {
        let mut r = Rect::new(0, 0, 20, 10);
        r.set_right(100);
        assert_eq!(r.x, 80);
        r.set_bottom(50);
        assert_eq!(r.y, 40);
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(40, 250, 1200, 430);
        let r = Rect::new(0, 700, 50, 50).clamp_within(&bounds);
        assert_eq!(r.top_left(), Point::new(40, 630));

        // Already inside - unchanged
        let inside = Rect::new(100, 300, 50, 50);
        assert_eq!(inside.clamp_within(&bounds), inside);
    }
}
