//! Property parsing: declaration values → typed style fields.
//!
//! [`apply_declaration`] writes one parsed [`Declaration`] into a [`Style`]
//! and reports its [`StyleChange`] impact. Controls can recognise additional
//! integer keys by declaring [`ExtraProperty`] entries; those are checked
//! before the built-in keys.

use crate::css::color::Color;
use crate::css::model::{Declaration, DeclarationValue};
use crate::css::scalar::{EdgeValue, Edges, Length};
use crate::css::styles::*;

/// Errors from property value parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("invalid value for {property} at byte {position}: {message}")]
    InvalidValue {
        property: String,
        position: usize,
        message: String,
    },
}

/// An additional integer style key recognised by a specific control type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraProperty {
    /// Property name, lower case, e.g. `"gesture-timeout"`.
    pub name: &'static str,
    /// Smallest accepted value.
    pub min: i32,
    /// What a change to this key invalidates.
    pub impact: StyleChange,
}

impl ExtraProperty {
    /// Declare a key that only affects painting.
    pub const fn paint(name: &'static str, min: i32) -> Self {
        Self { name, min, impact: StyleChange::PAINT }
    }

    /// Declare a key that affects neither layout nor painting.
    pub const fn behavior(name: &'static str, min: i32) -> Self {
        Self { name, min, impact: StyleChange::NONE }
    }
}

fn invalid(decl: &Declaration, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: decl.property.clone(),
        position: decl.position,
        message: message.into(),
    }
}

/// Require exactly one value.
fn single(decl: &Declaration) -> Result<&DeclarationValue, PropertyError> {
    match decl.values.as_slice() {
        [value] => Ok(value),
        values => Err(invalid(decl, format!("expected 1 value, got {}", values.len()))),
    }
}

fn single_ident<'a>(decl: &'a Declaration) -> Result<&'a str, PropertyError> {
    match single(decl)? {
        DeclarationValue::Ident(name) => Ok(name.as_str()),
        other => Err(invalid(decl, format!("expected identifier, got {other:?}"))),
    }
}

fn parse_bool(decl: &Declaration) -> Result<bool, PropertyError> {
    let name = single_ident(decl)?;
    if name.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if name.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid(decl, format!("expected true|false, got {name}")))
    }
}

fn parse_length(decl: &Declaration) -> Result<Length, PropertyError> {
    match single(decl)? {
        DeclarationValue::Number(n) if *n >= 0 => Ok(Length::Px(*n)),
        DeclarationValue::Number(n) => Err(invalid(decl, format!("size must not be negative, got {n}"))),
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("fill") => Ok(Length::Fill),
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("auto") => Ok(Length::Auto),
        other => Err(invalid(decl, format!("expected number, 'fill', or 'auto', got {other:?}"))),
    }
}

fn parse_edge_value(decl: &Declaration, value: &DeclarationValue) -> Result<EdgeValue, PropertyError> {
    match value {
        DeclarationValue::Number(n) if *n >= 0 => Ok(EdgeValue::Px(*n)),
        DeclarationValue::Number(n) => Err(invalid(decl, format!("edge must not be negative, got {n}"))),
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("auto") => Ok(EdgeValue::Auto),
        other => Err(invalid(decl, format!("expected number or 'auto', got {other:?}"))),
    }
}

/// Parse 1-4 values into [`Edges`] (CSS shorthand).
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
fn parse_edges(decl: &Declaration) -> Result<Edges, PropertyError> {
    let v = |i: usize| parse_edge_value(decl, &decl.values[i]);
    match decl.values.len() {
        1 => Ok(Edges::all(v(0)?)),
        2 => Ok(Edges::symmetric(v(0)?, v(1)?)),
        3 => {
            let horizontal = v(1)?;
            Ok(Edges::new(v(0)?, horizontal, v(2)?, horizontal))
        }
        4 => Ok(Edges::new(v(0)?, v(1)?, v(2)?, v(3)?)),
        n => Err(invalid(decl, format!("expected 1-4 values, got {n}"))),
    }
}

fn color_value(value: &DeclarationValue) -> Option<Color> {
    match value {
        DeclarationValue::Color(hex) => Color::from_hex(hex),
        DeclarationValue::Ident(name) => Color::from_name(name),
        DeclarationValue::Number(_) => None,
    }
}

fn parse_color(decl: &Declaration) -> Result<Color, PropertyError> {
    let value = single(decl)?;
    color_value(value).ok_or_else(|| invalid(decl, format!("expected color, got {value:?}")))
}

fn parse_background(decl: &Declaration) -> Result<Option<Color>, PropertyError> {
    if single(decl)?.as_ident().is_some_and(|n| n.eq_ignore_ascii_case("none")) {
        return Ok(None);
    }
    parse_color(decl).map(Some)
}

/// Border edge value: any of `<width>`, `<color>`, `<line>`, or `none`.
fn parse_border_edge(decl: &Declaration, current: BorderEdge) -> Result<BorderEdge, PropertyError> {
    let mut edge = current;
    for value in &decl.values {
        match value {
            DeclarationValue::Number(n) if *n >= 0 => edge.width = *n,
            DeclarationValue::Number(n) => {
                return Err(invalid(decl, format!("border width must not be negative, got {n}")));
            }
            DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("none") => edge.width = 0,
            DeclarationValue::Ident(name) if BorderLine::from_name(name).is_some() => {
                edge.line = BorderLine::from_name(name).unwrap_or_default();
            }
            other => {
                edge.color = color_value(other)
                    .ok_or_else(|| invalid(decl, format!("expected border width, color or line, got {other:?}")))?;
            }
        }
    }
    Ok(edge)
}

fn parse_border_widths(decl: &Declaration) -> Result<[i32; 4], PropertyError> {
    let edges = parse_edges(decl)?;
    if [edges.top, edges.right, edges.bottom, edges.left].iter().any(|e| e.is_auto()) {
        return Err(invalid(decl, "border width cannot be 'auto'"));
    }
    Ok([
        edges.top.px_or_zero(),
        edges.right.px_or_zero(),
        edges.bottom.px_or_zero(),
        edges.left.px_or_zero(),
    ])
}

fn parse_font_weight(decl: &Declaration) -> Result<FontWeight, PropertyError> {
    match single(decl)? {
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("normal") => Ok(FontWeight::Normal),
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("bold") => Ok(FontWeight::Bold),
        DeclarationValue::Number(n) if (1..=1000).contains(n) => {
            Ok(if *n >= 600 { FontWeight::Bold } else { FontWeight::Normal })
        }
        other => Err(invalid(decl, format!("expected normal|bold, got {other:?}"))),
    }
}

fn parse_opacity(decl: &Declaration) -> Result<u8, PropertyError> {
    match single(decl)? {
        DeclarationValue::Number(n) if (0..=100).contains(n) => Ok(*n as u8),
        other => Err(invalid(decl, format!("expected 0..=100, got {other:?}"))),
    }
}

fn apply_extra(style: &mut Style, decl: &Declaration, extra: &ExtraProperty) -> Result<(), PropertyError> {
    match single(decl)? {
        DeclarationValue::Number(n) if *n >= extra.min => {
            style.extras.insert(extra.name, *n);
            Ok(())
        }
        other => Err(invalid(
            decl,
            format!("expected integer >= {}, got {other:?}", extra.min),
        )),
    }
}

/// Apply one declaration to `style`.
///
/// Returns the impact of the key, or `None` when the key is not recognised
/// (neither in `extras` nor built in). On error `style` may be partially
/// modified; callers apply declarations to a scratch copy.
pub fn apply_declaration(
    style: &mut Style,
    decl: &Declaration,
    extras: &[ExtraProperty],
) -> Result<Option<StyleChange>, PropertyError> {
    if let Some(extra) = extras.iter().find(|e| e.name == decl.property) {
        apply_extra(style, decl, extra)?;
        return Ok(Some(extra.impact));
    }

    let impact = match decl.property.as_str() {
        // Flags
        "display" => {
            style.display = parse_bool(decl)?;
            StyleChange::LAYOUT
        }
        "disable" => {
            style.disable = parse_bool(decl)?;
            StyleChange::PAINT
        }
        "float" => {
            style.is_float = parse_bool(decl)?;
            StyleChange::LAYOUT
        }

        // Sizing & position
        "width" => {
            style.width = parse_length(decl)?;
            StyleChange::LAYOUT
        }
        "height" => {
            style.height = parse_length(decl)?;
            StyleChange::LAYOUT
        }
        "px" => {
            style.px = match single_ident(decl)? {
                n if n.eq_ignore_ascii_case("left") => PositionX::Left,
                n if n.eq_ignore_ascii_case("right") => PositionX::Right,
                other => return Err(invalid(decl, format!("expected left|right, got {other}"))),
            };
            StyleChange::LAYOUT
        }
        "py" => {
            style.py = match single_ident(decl)? {
                n if n.eq_ignore_ascii_case("top") => PositionY::Top,
                n if n.eq_ignore_ascii_case("bottom") => PositionY::Bottom,
                other => return Err(invalid(decl, format!("expected top|bottom, got {other}"))),
            };
            StyleChange::LAYOUT
        }

        // Spacing
        "margin" => {
            style.margin = parse_edges(decl)?;
            StyleChange::LAYOUT
        }
        "padding" => {
            style.padding = parse_edges(decl)?;
            StyleChange::LAYOUT
        }

        // Border
        "border" => {
            let top = parse_border_edge(decl, style.border.top)?;
            style.border = Border {
                top,
                right: parse_border_edge(decl, style.border.right)?,
                bottom: parse_border_edge(decl, style.border.bottom)?,
                left: parse_border_edge(decl, style.border.left)?,
            };
            StyleChange::LAYOUT
        }
        "border-top" => {
            style.border.top = parse_border_edge(decl, style.border.top)?;
            StyleChange::LAYOUT
        }
        "border-right" => {
            style.border.right = parse_border_edge(decl, style.border.right)?;
            StyleChange::LAYOUT
        }
        "border-bottom" => {
            style.border.bottom = parse_border_edge(decl, style.border.bottom)?;
            StyleChange::LAYOUT
        }
        "border-left" => {
            style.border.left = parse_border_edge(decl, style.border.left)?;
            StyleChange::LAYOUT
        }
        "border-width" => {
            let [t, r, b, l] = parse_border_widths(decl)?;
            style.border.top.width = t;
            style.border.right.width = r;
            style.border.bottom.width = b;
            style.border.left.width = l;
            StyleChange::LAYOUT
        }
        "border-color" => {
            let color = parse_color(decl)?;
            for edge in style.border.edges_mut() {
                edge.color = color;
            }
            StyleChange::PAINT
        }

        // Paint-only
        "color" => {
            style.color = parse_color(decl)?;
            StyleChange::PAINT
        }
        "background" | "background-color" => {
            style.background = parse_background(decl)?;
            StyleChange::PAINT
        }
        "opacity" => {
            style.opacity = parse_opacity(decl)?;
            StyleChange::PAINT
        }
        "font-weight" => {
            style.font_weight = parse_font_weight(decl)?;
            StyleChange::PAINT
        }

        _ => return Ok(None),
    };

    Ok(Some(impact))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(property: &str, values: Vec<DeclarationValue>) -> Declaration {
        Declaration::new(property, values, 0)
    }

    fn num(n: i32) -> DeclarationValue {
        DeclarationValue::Number(n)
    }

    fn ident(s: &str) -> DeclarationValue {
        DeclarationValue::Ident(s.into())
    }

    fn apply(style: &mut Style, d: &Declaration) -> Result<Option<StyleChange>, PropertyError> {
        apply_declaration(style, d, &[])
    }

    #[test]
    fn apply_width_variants() {
        let mut s = Style::default();
        assert_eq!(apply(&mut s, &decl("width", vec![num(50)])), Ok(Some(StyleChange::LAYOUT)));
        assert_eq!(s.width, Length::Px(50));
        apply(&mut s, &decl("width", vec![ident("fill")])).unwrap();
        assert_eq!(s.width, Length::Fill);
        apply(&mut s, &decl("height", vec![ident("AUTO")])).unwrap();
        assert_eq!(s.height, Length::Auto);
    }

    #[test]
    fn apply_negative_width_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("width", vec![num(-1)])).is_err());
    }

    #[test]
    fn apply_width_two_values_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("width", vec![num(1), num(2)])).is_err());
    }

    #[test]
    fn apply_margin_three_values() {
        let mut s = Style::default();
        apply(&mut s, &decl("margin", vec![num(0), ident("auto"), num(20)])).unwrap();
        assert_eq!(
            s.margin,
            Edges::new(EdgeValue::Px(0), EdgeValue::Auto, EdgeValue::Px(20), EdgeValue::Auto)
        );
    }

    #[test]
    fn apply_padding_two_and_four_values() {
        let mut s = Style::default();
        apply(&mut s, &decl("padding", vec![num(1), num(2)])).unwrap();
        assert_eq!(s.padding, Edges::symmetric(EdgeValue::Px(1), EdgeValue::Px(2)));
        apply(&mut s, &decl("padding", vec![num(1), num(2), num(3), num(4)])).unwrap();
        assert_eq!(
            s.padding,
            Edges::new(EdgeValue::Px(1), EdgeValue::Px(2), EdgeValue::Px(3), EdgeValue::Px(4))
        );
    }

    #[test]
    fn apply_margin_five_values_err() {
        let mut s = Style::default();
        let d = decl("margin", vec![num(1), num(1), num(1), num(1), num(1)]);
        assert!(apply(&mut s, &d).is_err());
    }

    #[test]
    fn apply_margin_color_err() {
        let mut s = Style::default();
        let d = decl("margin", vec![DeclarationValue::Color("fff".into())]);
        assert!(apply(&mut s, &d).is_err());
    }

    #[test]
    fn apply_flags() {
        let mut s = Style::default();
        apply(&mut s, &decl("display", vec![ident("false")])).unwrap();
        apply(&mut s, &decl("disable", vec![ident("true")])).unwrap();
        apply(&mut s, &decl("float", vec![ident("true")])).unwrap();
        assert!(!s.display);
        assert!(s.disable);
        assert!(s.is_float);
    }

    #[test]
    fn apply_flag_bad_value_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("display", vec![ident("maybe")])).is_err());
        assert!(apply(&mut s, &decl("display", vec![num(1)])).is_err());
    }

    #[test]
    fn apply_anchors() {
        let mut s = Style::default();
        apply(&mut s, &decl("px", vec![ident("right")])).unwrap();
        apply(&mut s, &decl("py", vec![ident("bottom")])).unwrap();
        assert_eq!(s.px, PositionX::Right);
        assert_eq!(s.py, PositionY::Bottom);
        assert!(apply(&mut s, &decl("px", vec![ident("top")])).is_err());
    }

    #[test]
    fn apply_border_shorthand() {
        let mut s = Style::default();
        let d = decl("border", vec![num(2), DeclarationValue::Color("ff0000".into())]);
        assert_eq!(apply(&mut s, &d), Ok(Some(StyleChange::LAYOUT)));
        for edge in [s.border.top, s.border.right, s.border.bottom, s.border.left] {
            assert_eq!(edge.width, 2);
            assert_eq!(edge.color, Color::rgb(255, 0, 0));
        }
        assert_eq!(s.border.width(), 4);
    }

    #[test]
    fn apply_border_edge_keeps_color() {
        let mut s = Style::default();
        apply(&mut s, &decl("border", vec![num(1), ident("blue")])).unwrap();
        apply(&mut s, &decl("border-top", vec![num(5), ident("dashed")])).unwrap();
        assert_eq!(s.border.top.width, 5);
        assert_eq!(s.border.top.color, Color::rgb(0, 0, 255));
        assert_eq!(s.border.top.line, BorderLine::Dashed);
        assert_eq!(s.border.bottom.width, 1);
        assert_eq!(s.border.bottom.line, BorderLine::Solid);
    }

    #[test]
    fn apply_border_none() {
        let mut s = Style::default();
        apply(&mut s, &decl("border", vec![num(3)])).unwrap();
        apply(&mut s, &decl("border", vec![ident("none")])).unwrap();
        assert_eq!(s.border.width(), 0);
        assert_eq!(s.border.height(), 0);
    }

    #[test]
    fn apply_border_width_and_color() {
        let mut s = Style::default();
        apply(&mut s, &decl("border-width", vec![num(1), num(2)])).unwrap();
        assert_eq!(s.border.top.width, 1);
        assert_eq!(s.border.left.width, 2);
        assert_eq!(
            apply(&mut s, &decl("border-color", vec![ident("white")])),
            Ok(Some(StyleChange::PAINT))
        );
        assert_eq!(s.border.right.color, Color::WHITE);
        assert!(apply(&mut s, &decl("border-width", vec![ident("auto")])).is_err());
    }

    #[test]
    fn apply_border_garbage_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("border", vec![ident("wavy")])).is_err());
        assert!(apply(&mut s, &decl("border", vec![num(-2)])).is_err());
    }

    #[test]
    fn apply_paint_properties() {
        let mut s = Style::default();
        assert_eq!(
            apply(&mut s, &decl("color", vec![DeclarationValue::Color("fff".into())])),
            Ok(Some(StyleChange::PAINT))
        );
        assert_eq!(s.color, Color::WHITE);
        apply(&mut s, &decl("background-color", vec![DeclarationValue::Color("323232".into())])).unwrap();
        assert_eq!(s.background, Some(Color::rgb(0x32, 0x32, 0x32)));
        apply(&mut s, &decl("background", vec![ident("none")])).unwrap();
        assert_eq!(s.background, None);
        apply(&mut s, &decl("opacity", vec![num(25)])).unwrap();
        assert_eq!(s.opacity, 25);
        apply(&mut s, &decl("font-weight", vec![ident("bold")])).unwrap();
        assert_eq!(s.font_weight, FontWeight::Bold);
        apply(&mut s, &decl("font-weight", vec![num(400)])).unwrap();
        assert_eq!(s.font_weight, FontWeight::Normal);
    }

    #[test]
    fn apply_opacity_out_of_range_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("opacity", vec![num(101)])).is_err());
        assert!(apply(&mut s, &decl("opacity", vec![num(-1)])).is_err());
    }

    #[test]
    fn apply_bad_color_err() {
        let mut s = Style::default();
        assert!(apply(&mut s, &decl("color", vec![DeclarationValue::Color("12345".into())])).is_err());
        assert!(apply(&mut s, &decl("color", vec![ident("mauve-ish")])).is_err());
    }

    #[test]
    fn apply_unknown_property_is_ignored() {
        let mut s = Style::default();
        let before = s.clone();
        assert_eq!(apply(&mut s, &decl("text-shadow", vec![num(1)])), Ok(None));
        assert_eq!(s, before);
    }

    #[test]
    fn apply_extra_property() {
        const EXTRAS: &[ExtraProperty] = &[ExtraProperty::behavior("gesture-timeout", 1)];
        let mut s = Style::default();
        let d = decl("gesture-timeout", vec![num(500)]);
        assert_eq!(apply_declaration(&mut s, &d, EXTRAS), Ok(Some(StyleChange::NONE)));
        assert_eq!(s.extra("gesture-timeout"), Some(500));

        let bad = decl("gesture-timeout", vec![num(0)]);
        assert!(apply_declaration(&mut s, &bad, EXTRAS).is_err());
    }

    #[test]
    fn extra_property_checked_before_builtin() {
        const EXTRAS: &[ExtraProperty] = &[ExtraProperty::paint("width", 0)];
        let mut s = Style::default();
        apply_declaration(&mut s, &decl("width", vec![num(7)]), EXTRAS).unwrap();
        assert_eq!(s.extra("width"), Some(7));
        assert_eq!(s.width, Length::Auto);
    }

    #[test]
    fn error_carries_property_and_position() {
        let mut s = Style::default();
        let d = Declaration::new("opacity", vec![num(300)], 12);
        let err = apply(&mut s, &d).unwrap_err();
        let PropertyError::InvalidValue { property, position, .. } = err;
        assert_eq!(property, "opacity");
        assert_eq!(position, 12);
    }
}
