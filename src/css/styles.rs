//! The per-node style record.
//!
//! Every node owns a fully resolved [`Style`]: there is no cascade and no
//! inheritance. A style string is applied on top of the current record with
//! [`Style::apply`], which is all-or-nothing: a malformed declaration leaves
//! the record untouched.

use std::collections::BTreeMap;

use tracing::debug;

use crate::css::color::Color;
use crate::css::parser::{parse_declarations, ParseError};
use crate::css::properties::{apply_declaration, ExtraProperty, PropertyError};
use crate::css::scalar::{Edges, Length};
use crate::geometry::Insets;

/// Horizontal anchor used when a child does not span the full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionX {
    #[default]
    Left,
    Right,
}

/// Vertical anchor used when a child does not span the full height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionY {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Stroke pattern of a border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderLine {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl BorderLine {
    pub fn from_name(name: &str) -> Option<BorderLine> {
        match name.to_ascii_lowercase().as_str() {
            "solid" => Some(BorderLine::Solid),
            "dashed" => Some(BorderLine::Dashed),
            "dotted" => Some(BorderLine::Dotted),
            _ => None,
        }
    }
}

/// One edge of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderEdge {
    pub width: i32,
    pub color: Color,
    pub line: BorderLine,
}

/// Per-edge border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub top: BorderEdge,
    pub right: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
}

impl Border {
    /// `left + right` widths.
    pub fn width(&self) -> i32 {
        self.left.width.saturating_add(self.right.width)
    }

    /// `top + bottom` widths.
    pub fn height(&self) -> i32 {
        self.top.width.saturating_add(self.bottom.width)
    }

    pub fn insets(&self) -> Insets {
        Insets::new(self.top.width, self.right.width, self.bottom.width, self.left.width)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 && self.height() == 0
    }

    pub(crate) fn edges_mut(&mut self) -> [&mut BorderEdge; 4] {
        [&mut self.top, &mut self.right, &mut self.bottom, &mut self.left]
    }
}

/// What a style change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleChange {
    /// Geometry may have changed: the parent's children must be laid out again.
    pub relayout: bool,
    /// Appearance may have changed: the node must be repainted.
    pub redraw: bool,
}

impl StyleChange {
    pub const NONE: StyleChange = StyleChange { relayout: false, redraw: false };
    pub const PAINT: StyleChange = StyleChange { relayout: false, redraw: true };
    pub const LAYOUT: StyleChange = StyleChange { relayout: true, redraw: true };

    pub fn merge(self, other: StyleChange) -> StyleChange {
        StyleChange {
            relayout: self.relayout || other.relayout,
            redraw: self.redraw || other.redraw,
        }
    }

    pub fn is_empty(self) -> bool {
        !self.relayout && !self.redraw
    }
}

/// Errors from [`Style::apply`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Fully resolved visual and layout attributes of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    // Flags
    pub display: bool,
    pub disable: bool,
    pub is_float: bool,

    // Box
    pub margin: Edges,
    pub padding: Edges,
    pub border: Border,

    // Sizing & position
    pub px: PositionX,
    pub py: PositionY,
    pub width: Length,
    pub height: Length,

    // Paint
    pub font_weight: FontWeight,
    pub color: Color,
    pub background: Option<Color>,
    /// 0 (invisible) ..= 100 (opaque).
    pub opacity: u8,

    /// Integer values of control-specific keys, see [`ExtraProperty`].
    pub extras: BTreeMap<&'static str, i32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: true,
            disable: false,
            is_float: false,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            border: Border::default(),
            px: PositionX::Left,
            py: PositionY::Top,
            width: Length::Auto,
            height: Length::Auto,
            font_weight: FontWeight::Normal,
            color: Color::BLACK,
            background: None,
            opacity: 100,
            extras: BTreeMap::new(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` on top of the default style.
    pub fn parse(text: &str, extras: &[ExtraProperty]) -> Result<Style, StyleError> {
        Style::default().apply(text, extras).map(|(style, _)| style)
    }

    /// Apply a style string on top of `self`.
    ///
    /// Returns the new record and what changed. Declarations are applied in
    /// order, later ones overriding earlier ones. A declaration only counts
    /// towards the returned [`StyleChange`] if it actually changed a value.
    /// Unknown keys are ignored. Any syntax or value error rejects the whole
    /// string.
    pub fn apply(&self, text: &str, extras: &[ExtraProperty]) -> Result<(Style, StyleChange), StyleError> {
        let declarations = parse_declarations(text)?;
        let mut next = self.clone();
        let mut change = StyleChange::NONE;

        for decl in &declarations {
            let before = next.clone();
            match apply_declaration(&mut next, decl, extras)? {
                Some(impact) if next != before => change = change.merge(impact),
                Some(_) => {}
                None => debug!(property = %decl.property, "ignoring unknown style property"),
            }
        }

        Ok((next, change))
    }

    /// Value of a control-specific key, if set.
    pub fn extra(&self, name: &str) -> Option<i32> {
        self.extras.get(name).copied()
    }

    /// Border plus padding; the client rect is the node rect shrunk by this.
    pub fn client_insets(&self) -> Insets {
        self.border.insets() + self.padding.to_insets()
    }

    /// `100 - opacity`.
    pub fn transparency(&self) -> u8 {
        100 - self.opacity.min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::scalar::EdgeValue;

    #[test]
    fn default_style() {
        let s = Style::new();
        assert!(s.display);
        assert!(!s.disable);
        assert!(!s.is_float);
        assert_eq!(s.width, Length::Auto);
        assert_eq!(s.height, Length::Auto);
        assert_eq!(s.px, PositionX::Left);
        assert_eq!(s.py, PositionY::Top);
        assert_eq!(s.opacity, 100);
        assert_eq!(s.transparency(), 0);
        assert_eq!(s.background, None);
        assert!(s.border.is_empty());
    }

    #[test]
    fn apply_toolbar_style() {
        let s = Style::parse("px:left;py:top;height:32;width:fill;margin:0 0 5", &[]).unwrap();
        assert_eq!(s.width, Length::Fill);
        assert_eq!(s.height, Length::Px(32));
        assert_eq!(
            s.margin,
            Edges::new(EdgeValue::Px(0), EdgeValue::Px(0), EdgeValue::Px(5), EdgeValue::Px(0))
        );
    }

    #[test]
    fn later_declarations_override() {
        let s = Style::parse("width:10;width:20", &[]).unwrap();
        assert_eq!(s.width, Length::Px(20));
    }

    #[test]
    fn apply_reports_layout_change() {
        let (s, change) = Style::new().apply("width:100", &[]).unwrap();
        assert_eq!(s.width, Length::Px(100));
        assert_eq!(change, StyleChange::LAYOUT);
    }

    #[test]
    fn apply_reports_paint_only_change() {
        let (_, change) = Style::new().apply("background-color:#323232", &[]).unwrap();
        assert_eq!(change, StyleChange::PAINT);
    }

    #[test]
    fn reapplying_same_value_changes_nothing() {
        let s = Style::parse("width:100;color:red", &[]).unwrap();
        let (t, change) = s.apply("width:100; color:red", &[]).unwrap();
        assert_eq!(t, s);
        assert!(change.is_empty());
    }

    #[test]
    fn malformed_string_leaves_record_untouched() {
        let s = Style::parse("width:100", &[]).unwrap();
        let err = s.apply("height:50; margin:oops", &[]).unwrap_err();
        assert!(matches!(err, StyleError::Property(_)));
        assert_eq!(s.width, Length::Px(100));
        assert_eq!(s.height, Length::Auto);

        let err = s.apply("height 50", &[]).unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (s, change) = Style::new().apply("frobnicate: 3; width: 4", &[]).unwrap();
        assert_eq!(s.width, Length::Px(4));
        assert_eq!(change, StyleChange::LAYOUT);
        assert!(s.extras.is_empty());
    }

    #[test]
    fn extra_keys_use_declared_impact() {
        const EXTRAS: &[ExtraProperty] = &[ExtraProperty::paint("gesture-line-width", 1)];
        let (s, change) = Style::new().apply("gesture-line-width: 3", EXTRAS).unwrap();
        assert_eq!(s.extra("gesture-line-width"), Some(3));
        assert_eq!(change, StyleChange::PAINT);
        assert_eq!(s.extra("gesture-timeout"), None);
    }

    #[test]
    fn client_insets_include_border_and_padding() {
        let s = Style::parse("border:2;padding:1 3", &[]).unwrap();
        assert_eq!(s.client_insets(), Insets::new(3, 5, 3, 5));
    }

    #[test]
    fn transparency_mirrors_opacity() {
        let s = Style::parse("opacity:30", &[]).unwrap();
        assert_eq!(s.transparency(), 70);
    }

    #[test]
    fn change_merge() {
        assert_eq!(StyleChange::NONE.merge(StyleChange::PAINT), StyleChange::PAINT);
        assert_eq!(StyleChange::PAINT.merge(StyleChange::LAYOUT), StyleChange::LAYOUT);
        assert!(StyleChange::NONE.is_empty());
    }
}
