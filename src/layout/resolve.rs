//! Box-model resolution: style + available rectangle -> child rectangle.
//!
//! Each axis is resolved independently:
//!
//! - `Px(n)` is clamped to the space left after the fixed margins.
//! - `Fill` takes all space left after the fixed margins.
//! - `Auto` takes the control's intrinsic size when it reports one, and
//!   behaves like `Fill` otherwise.
//!
//! Leftover space goes to `auto` margins: both sides `auto` centers the box
//! (odd pixel to the trailing side), one side `auto` pushes it against the
//! other side. With no `auto` margin the box sits against its anchor edge.

use crate::css::scalar::{EdgeValue, Length};
use crate::css::styles::{PositionX, PositionY, Style};
use crate::geometry::Rect;

/// Size a control would like to have on each axis, if it has a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntrinsicSize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl IntrinsicSize {
    pub const NONE: IntrinsicSize = IntrinsicSize { width: None, height: None };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width: Some(width), height: Some(height) }
    }
}

/// One axis of a child box.
#[derive(Debug, Clone, Copy)]
struct Axis {
    length: Length,
    intrinsic: Option<i32>,
    lead: EdgeValue,
    trail: EdgeValue,
    anchor_trailing: bool,
}

/// Resolved extent on one axis: `outer` includes the resolved margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    outer_start: i32,
    start: i32,
    end: i32,
    outer_end: i32,
}

fn resolve_axis(axis: Axis, start: i32, end: i32) -> Span {
    let avail = end.saturating_sub(start).max(0);
    let end = start.saturating_add(avail);
    let lead = axis.lead.px_or_zero();
    let trail = axis.trail.px_or_zero();
    let room = avail.saturating_sub(lead).saturating_sub(trail).max(0);

    let size = match axis.length {
        Length::Px(n) => n.min(room),
        Length::Fill => room,
        Length::Auto => axis.intrinsic.map_or(room, |n| n.clamp(0, room)),
    };
    let extra = room - size;

    let pos = match (axis.lead.is_auto(), axis.trail.is_auto()) {
        (true, true) => start + extra / 2,
        (true, false) => end.saturating_sub(trail).saturating_sub(size),
        (false, true) => start.saturating_add(lead),
        (false, false) if axis.anchor_trailing => end.saturating_sub(trail).saturating_sub(size),
        (false, false) => start.saturating_add(lead),
    };
    let pos = pos.clamp(start, end);
    let size = size.min(end - pos);

    let (outer_start, outer_end) = match (axis.lead.is_auto(), axis.trail.is_auto()) {
        (true, true) => (start, end),
        (true, false) => (start, (pos + size).saturating_add(trail).min(end)),
        (false, true) => (pos.saturating_sub(lead).max(start), end),
        (false, false) => (pos.saturating_sub(lead).max(start), (pos + size).saturating_add(trail).min(end)),
    };

    Span { outer_start, start: pos, end: pos + size, outer_end }
}

fn axes(style: &Style, intrinsic: IntrinsicSize) -> (Axis, Axis) {
    let x = Axis {
        length: style.width,
        intrinsic: intrinsic.width,
        lead: style.margin.left,
        trail: style.margin.right,
        anchor_trailing: style.px == PositionX::Right,
    };
    let y = Axis {
        length: style.height,
        intrinsic: intrinsic.height,
        lead: style.margin.top,
        trail: style.margin.bottom,
        anchor_trailing: style.py == PositionY::Bottom,
    };
    (x, y)
}

/// Whether the box spans the whole available width (and so stacks vertically).
pub fn spans_width(style: &Style, intrinsic: IntrinsicSize) -> bool {
    match style.width {
        Length::Fill => true,
        Length::Auto => intrinsic.width.is_none(),
        Length::Px(_) => false,
    }
}

/// Result of placing a flow child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The child's rectangle.
    pub rect: Rect,
    /// Space left for later flow siblings.
    pub remaining: Rect,
}

/// Place a flow child in `avail` and consume its outer box from the anchored
/// edge.
///
/// A child spanning the full width consumes a strip from the top (or bottom,
/// for `py:bottom`); any other child consumes a strip from the left (or right,
/// for `px:right`).
pub fn place_flow(style: &Style, intrinsic: IntrinsicSize, avail: Rect) -> Placement {
    let (x, y) = axes(style, intrinsic);
    let h = resolve_axis(x, avail.left, avail.right);
    let v = resolve_axis(y, avail.top, avail.bottom);
    let rect = Rect::new(h.start, v.start, h.end, v.end);

    let mut remaining = avail;
    if spans_width(style, intrinsic) {
        match style.py {
            PositionY::Top => remaining.top = v.outer_end.min(avail.bottom).max(avail.top),
            PositionY::Bottom => remaining.bottom = v.outer_start.max(avail.top).min(avail.bottom),
        }
    } else {
        match style.px {
            PositionX::Left => remaining.left = h.outer_end.min(avail.right).max(avail.left),
            PositionX::Right => remaining.right = h.outer_start.max(avail.left).min(avail.right),
        }
    }

    Placement { rect, remaining }
}

/// Place a floating child against `avail` without consuming anything.
pub fn place_float(style: &Style, intrinsic: IntrinsicSize, avail: Rect) -> Rect {
    let (x, y) = axes(style, intrinsic);
    let h = resolve_axis(x, avail.left, avail.right);
    let v = resolve_axis(y, avail.top, avail.bottom);
    Rect::new(h.start, v.start, h.end, v.end)
}
