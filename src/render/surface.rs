//! Surface: the abstract drawing back end.
//!
//! The control tree never rasterizes anything itself. Painting walks the tree
//! back to front and issues these primitives; the host maps them onto its
//! native drawing API.

use crate::css::color::Color;
use crate::css::styles::{Border, FontWeight, Style};
use crate::geometry::{Point, Rect};

// ---------------------------------------------------------------------------
// TextStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// How a single line of text is drawn inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub weight: FontWeight,
    /// 0 (invisible) ..= 100 (opaque).
    pub opacity: u8,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextStyle {
    /// Centered text in the style's color, weight and opacity.
    pub fn from_style(style: &Style) -> Self {
        TextStyle {
            color: style.color,
            weight: style.font_weight,
            opacity: style.opacity,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        }
    }

    /// Set the alignment (builder).
    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Drawing primitives used by the painter and by controls.
pub trait Surface {
    /// Fill `rect` with `color`. `opacity` is 0 (invisible) ..= 100 (opaque).
    fn fill_rect(&mut self, rect: Rect, color: Color, opacity: u8);

    /// Stroke each non-zero edge of `border` inside `rect`.
    fn draw_border(&mut self, rect: Rect, border: &Border, opacity: u8);

    /// Draw a single line of text clipped to `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, style: &TextStyle);

    /// Connect `points` with a pen of `width` pixels.
    fn draw_polyline(&mut self, points: &[Point], color: Color, width: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_style_from_style() {
        let style = Style::parse("color:red;font-weight:bold;opacity:40", &[]).unwrap();
        let text = TextStyle::from_style(&style);
        assert_eq!(text.color, Color::rgb(255, 0, 0));
        assert_eq!(text.weight, FontWeight::Bold);
        assert_eq!(text.opacity, 40);
        assert_eq!(text.h_align, HAlign::Center);
    }

    #[test]
    fn aligned_builder() {
        let text = TextStyle::from_style(&Style::default()).aligned(HAlign::Left, VAlign::Bottom);
        assert_eq!(text.h_align, HAlign::Left);
        assert_eq!(text.v_align, VAlign::Bottom);
    }
}
