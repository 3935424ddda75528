//! Sizing and spacing values: Length (px, fill, auto) and Edges (px or auto per side).

use std::fmt;

use crate::geometry::Insets;

/// A width or height value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Length {
    /// Fixed size in pixels (border box: includes border and padding).
    Px(i32),
    /// Take all space remaining on the axis after earlier siblings.
    Fill,
    /// Use the control's intrinsic size on this axis, or behave like `Fill`
    /// when the control reports none.
    #[default]
    Auto,
}

impl Length {
    /// Returns `true` for [`Length::Fill`].
    pub fn is_fill(self) -> bool {
        self == Length::Fill
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}"),
            Length::Fill => write!(f, "fill"),
            Length::Auto => write!(f, "auto"),
        }
    }
}

/// One side of a margin or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeValue {
    /// Non-negative pixel thickness.
    Px(i32),
    /// Distribute remaining space on this side (centering for margins).
    Auto,
}

impl EdgeValue {
    /// Pixel thickness, with `auto` contributing zero.
    #[inline]
    pub fn px_or_zero(self) -> i32 {
        match self {
            EdgeValue::Px(v) => v,
            EdgeValue::Auto => 0,
        }
    }

    /// Returns `true` if this side is `auto`.
    #[inline]
    pub fn is_auto(self) -> bool {
        self == EdgeValue::Auto
    }
}

impl Default for EdgeValue {
    fn default() -> Self {
        EdgeValue::Px(0)
    }
}

impl fmt::Display for EdgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeValue::Px(v) => write!(f, "{v}"),
            EdgeValue::Auto => write!(f, "auto"),
        }
    }
}

/// Four-sided values (top, right, bottom, left) like CSS margin/padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: EdgeValue,
    pub right: EdgeValue,
    pub bottom: EdgeValue,
    pub left: EdgeValue,
}

impl Edges {
    /// Zero on all sides.
    pub const ZERO: Edges = Edges {
        top: EdgeValue::Px(0),
        right: EdgeValue::Px(0),
        bottom: EdgeValue::Px(0),
        left: EdgeValue::Px(0),
    };

    /// The same value on all four sides.
    pub fn all(v: EdgeValue) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// Symmetric vertical and horizontal values.
    pub fn symmetric(vertical: EdgeValue, horizontal: EdgeValue) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Explicit values for all four sides.
    pub fn new(top: EdgeValue, right: EdgeValue, bottom: EdgeValue, left: EdgeValue) -> Self {
        Self { top, right, bottom, left }
    }

    /// `left + right`, with `auto` sides contributing zero.
    pub fn width(&self) -> i32 {
        self.left.px_or_zero().saturating_add(self.right.px_or_zero())
    }

    /// `top + bottom`, with `auto` sides contributing zero.
    pub fn height(&self) -> i32 {
        self.top.px_or_zero().saturating_add(self.bottom.px_or_zero())
    }

    /// Pixel insets, `auto` sides resolved to zero.
    pub fn to_insets(&self) -> Insets {
        Insets::new(
            self.top.px_or_zero(),
            self.right.px_or_zero(),
            self.bottom.px_or_zero(),
            self.left.px_or_zero(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_display() {
        assert_eq!(Length::Px(12).to_string(), "12");
        assert_eq!(Length::Fill.to_string(), "fill");
        assert_eq!(Length::Auto.to_string(), "auto");
        assert!(Length::Fill.is_fill());
        assert!(!Length::Auto.is_fill());
    }

    #[test]
    fn edges_auto_contributes_zero() {
        let e = Edges::new(EdgeValue::Px(0), EdgeValue::Auto, EdgeValue::Px(20), EdgeValue::Auto);
        assert_eq!(e.width(), 0);
        assert_eq!(e.height(), 20);
        assert_eq!(e.to_insets(), Insets::new(0, 0, 20, 0));
    }

    #[test]
    fn edges_constructors() {
        let a = Edges::all(EdgeValue::Px(5));
        assert_eq!(a.width(), 10);
        let s = Edges::symmetric(EdgeValue::Px(1), EdgeValue::Px(2));
        assert_eq!(s.top, EdgeValue::Px(1));
        assert_eq!(s.right, EdgeValue::Px(2));
        assert_eq!(s.bottom, EdgeValue::Px(1));
        assert_eq!(s.left, EdgeValue::Px(2));
        assert_eq!(Edges::default(), Edges::ZERO);
    }
}
