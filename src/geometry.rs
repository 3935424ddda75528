//! Core geometry types: Point, Size, Rect, Insets.
//!
//! All coordinates are absolute window pixels. A [`Rect`] is stored as
//! left/top/right/bottom with exclusive right and bottom edges, matching the
//! way the host window reports client and invalidation rectangles.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A pixel position in window coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (taxicab) distance to `other`.
    #[inline]
    pub fn manhattan_distance(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle in absolute window pixels.
///
/// `right` and `bottom` are exclusive. Layout never produces a rectangle with
/// `right < left` or `bottom < top`; degenerate space collapses to zero area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// An empty rectangle at the origin.
    pub const EMPTY: Rect = Rect { left: 0, top: 0, right: 0, bottom: 0 };

    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    /// Horizontal extent, never negative.
    #[inline]
    pub const fn width(self) -> i32 {
        let w = self.right - self.left;
        if w > 0 { w } else { 0 }
    }

    /// Vertical extent, never negative.
    #[inline]
    pub const fn height(self) -> i32 {
        let h = self.bottom - self.top;
        if h > 0 { h } else { 0 }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width(), height: self.height() }
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.left, y: self.top }
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether `pt` lies inside the rectangle (right/bottom exclusive).
    #[inline]
    pub const fn contains(self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }

    /// Whether `other` overlaps this rectangle (non-zero intersection area).
    #[inline]
    pub const fn overlaps(self, other: Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Compute the intersection of two rectangles.
    ///
    /// Returns [`Rect::EMPTY`] if they do not overlap.
    #[inline]
    pub const fn intersection(self, other: Rect) -> Rect {
        let l = if self.left > other.left { self.left } else { other.left };
        let t = if self.top > other.top { self.top } else { other.top };
        let r = if self.right < other.right { self.right } else { other.right };
        let b = if self.bottom < other.bottom { self.bottom } else { other.bottom };
        if r <= l || b <= t {
            Rect::EMPTY
        } else {
            Rect { left: l, top: t, right: r, bottom: b }
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[inline]
    pub const fn union(self, other: Rect) -> Rect {
        Rect {
            left: if self.left < other.left { self.left } else { other.left },
            top: if self.top < other.top { self.top } else { other.top },
            right: if self.right > other.right { self.right } else { other.right },
            bottom: if self.bottom > other.bottom { self.bottom } else { other.bottom },
        }
    }

    /// Expand outward by the given [`Insets`].
    #[inline]
    pub const fn grow(self, insets: Insets) -> Rect {
        Rect {
            left: self.left.saturating_sub(insets.left),
            top: self.top.saturating_sub(insets.top),
            right: self.right.saturating_add(insets.right),
            bottom: self.bottom.saturating_add(insets.bottom),
        }
    }

    /// Contract inward by the given [`Insets`].
    ///
    /// Opposite edges never cross and the result never leaves `self`: when
    /// the insets exceed the extent, the result collapses to zero width/height
    /// at the inset leading edge, pinned to the trailing edge at most.
    #[inline]
    pub const fn shrink(self, insets: Insets) -> Rect {
        let left = self.left.saturating_add(insets.left);
        let left = if left < self.right { left } else if self.right > self.left { self.right } else { self.left };
        let top = self.top.saturating_add(insets.top);
        let top = if top < self.bottom { top } else if self.bottom > self.top { self.bottom } else { self.top };
        let right = self.right.saturating_sub(insets.right);
        let bottom = self.bottom.saturating_sub(insets.bottom);
        Rect {
            left,
            top,
            right: if right > left { right } else { left },
            bottom: if bottom > top { bottom } else { top },
        }
    }
}

// ---------------------------------------------------------------------------
// Insets
// ---------------------------------------------------------------------------

/// Resolved pixel thickness on each side of a rectangle (border + padding,
/// or margins after `auto` has been resolved).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    /// Zero on all sides.
    pub const ZERO: Insets = Insets { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create insets with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl Add for Insets {
    type Output = Insets;
    #[inline]
    fn add(self, rhs: Insets) -> Insets {
        Insets {
            top: self.top.saturating_add(rhs.top),
            right: self.right.saturating_add(rhs.right),
            bottom: self.bottom.saturating_add(rhs.bottom),
            left: self.left.saturating_add(rhs.left),
        }
    }
}
