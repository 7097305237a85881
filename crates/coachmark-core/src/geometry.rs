#![forbid(unsafe_code)]

//! Geometric primitives in canvas units.
//!
//! All coordinates are `f64` and canvas-relative (origin at top-left, `y`
//! growing downward). Nothing here rounds: the rendering surface is free to
//! subpixel-render whatever the overlay produces.

/// A two-component vector used for sizes, positions, and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` and `to` at progress `t`.
    ///
    /// `t` is not clamped: overshooting easings rely on values outside
    /// `[0.0, 1.0]`.
    #[inline]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    /// Smaller of the two components.
    #[inline]
    pub fn min_component(self) -> f64 {
        self.x.min(self.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Size of the drawing surface the overlay covers.
///
/// A zero width means the host has not reported a layout yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Zero-sized canvas (headless layout, or not yet measured).
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new canvas size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the host has reported a usable layout.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.width != 0.0
    }

    /// The full-canvas rectangle anchored at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Size as a vector.
    #[inline]
    pub const fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A highlighted region's bounds, in canvas-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from a position and a size.
    #[inline]
    pub const fn from_parts(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height as a vector.
    #[inline]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether `other` lies entirely within this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Return a copy shifted vertically by `dy`.
    #[inline]
    pub fn offset_y(&self, dy: f64) -> Rect {
        Rect::new(self.x, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasSize, Rect, Vec2};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(2.0, 3.0));
        assert!(rect.contains(5.5, 7.5));
        assert!(!rect.contains(6.0, 3.0));
        assert!(!rect.contains(2.0, 8.0));
    }

    #[test]
    fn rect_center_and_edges() {
        let rect = Rect::new(50.0, 500.0, 100.0, 40.0);
        assert_eq!(rect.center(), Vec2::new(100.0, 520.0));
        assert_eq!(rect.right(), 150.0);
        assert_eq!(rect.bottom(), 540.0);
    }

    #[test]
    fn rect_contains_rect() {
        let canvas = CanvasSize::new(800.0, 600.0).bounds();
        assert!(canvas.contains_rect(&Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert!(!canvas.contains_rect(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn vec2_lerp_allows_overshoot() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 15.0));
        assert_eq!(a.lerp(b, 1.2), Vec2::new(12.0, 22.0));
    }

    #[test]
    fn canvas_measured_flag() {
        assert!(!CanvasSize::ZERO.is_measured());
        assert!(CanvasSize::new(320.0, 0.0).is_measured());
    }
}
