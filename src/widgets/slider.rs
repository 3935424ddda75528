//! Slider: a horizontal value picker.
//!
//! A left press captures the pointer and jumps the thumb to it; dragging
//! reports tracking values, the release reports the final value. The wheel
//! steps the value by one. Every report goes through
//! [`Target::on_slider`](crate::host::Target::on_slider).

use std::any::Any;

use tracing::trace;

use crate::css::color::Color;
use crate::css::styles::Style;
use crate::event::input::{KeyState, MouseButton};
use crate::geometry::{Point, Rect};
use crate::layout::resolve::IntrinsicSize;
use crate::render::surface::Surface;
use crate::widget::context::{EventCtx, PaintCtx};
use crate::widget::traits::Control;

/// Width of the draggable thumb.
pub const THUMB_WIDTH: i32 = 8;
/// Preferred client height.
pub const SLIDER_HEIGHT: i32 = 16;

const TRACK_COLOR: Color = Color::rgb(0x80, 0x80, 0x80);

#[derive(Debug, Clone)]
pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
    dragging: bool,
}

impl Slider {
    /// A slider over `min..=max` (bounds are swapped if reversed). `value` is
    /// clamped into range.
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the value without notifying the target. Returns whether it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// Value under horizontal position `x` in `client`, rounded to nearest.
    pub fn value_at(&self, client: Rect, x: i32) -> i32 {
        let track = client.width() - THUMB_WIDTH;
        if track <= 0 || self.span() == 0 {
            return self.min;
        }
        let offset = i64::from((x - client.left - THUMB_WIDTH / 2).clamp(0, track));
        let track = i64::from(track);
        let value = i64::from(self.min) + (offset * self.span() + track / 2) / track;
        value as i32
    }

    /// Thumb rectangle for the current value in `client`.
    pub fn thumb_rect(&self, client: Rect) -> Rect {
        let track = (client.width() - THUMB_WIDTH).max(0);
        let pos = if self.span() == 0 {
            0
        } else {
            (i64::from(self.value - self.min) * i64::from(track) / self.span()) as i32
        };
        let left = client.left + pos;
        Rect::new(left, client.top, (left + THUMB_WIDTH).min(client.right), client.bottom)
    }

    fn report(&self, ctx: &mut EventCtx<'_>, tracking: bool) {
        let id = ctx.id();
        trace!(id, value = self.value, tracking, "slider value");
        ctx.target().on_slider(id, self.min, self.max, self.value, tracking);
    }

    /// Move the value to `pt`. Returns whether it changed.
    fn track(&mut self, ctx: &mut EventCtx<'_>, pt: Point) -> bool {
        let value = self.value_at(ctx.client_rect(), pt.x);
        let changed = self.set_value(value);
        if changed {
            ctx.invalidate();
        }
        changed
    }
}

impl Control for Slider {
    fn control_type(&self) -> &'static str {
        "Slider"
    }

    fn default_style(&self) -> &str {
        "color:#404040;"
    }

    fn intrinsic_size(&self, style: &Style) -> IntrinsicSize {
        IntrinsicSize {
            width: None,
            height: Some(SLIDER_HEIGHT.saturating_add(style.client_insets().height())),
        }
    }

    fn draw(&self, ctx: &PaintCtx<'_>, surface: &mut dyn Surface) {
        let style = ctx.style();
        let client = ctx.client_rect();
        let mid = client.top + client.height() / 2;
        let track = Rect::new(client.left, mid - 1, client.right, mid + 1).intersection(client);
        surface.fill_rect(track, TRACK_COLOR, style.opacity);

        let thumb_color = if self.dragging { style.color.lighten(64) } else { style.color };
        surface.fill_rect(self.thumb_rect(client), thumb_color, style.opacity);
    }

    fn on_button_down(&mut self, ctx: &mut EventCtx<'_>, pt: Point, button: MouseButton, _keys: KeyState) {
        if button != MouseButton::Left || ctx.is_disabled() {
            return;
        }
        self.dragging = true;
        ctx.set_capture(true);
        self.track(ctx, pt);
        ctx.invalidate();
        self.report(ctx, true);
    }

    fn on_mouse_move(&mut self, ctx: &mut EventCtx<'_>, pt: Point, _keys: KeyState) {
        if self.dragging && self.track(ctx, pt) {
            self.report(ctx, true);
        }
    }

    fn on_button_up(&mut self, ctx: &mut EventCtx<'_>, pt: Point, button: MouseButton, _keys: KeyState) {
        if button != MouseButton::Left || !self.dragging {
            return;
        }
        self.track(ctx, pt);
        self.dragging = false;
        ctx.set_capture(false);
        ctx.invalidate();
        self.report(ctx, false);
    }

    fn on_mouse_wheel(&mut self, ctx: &mut EventCtx<'_>, _pt: Point, delta: i32, _keys: KeyState) {
        if ctx.is_disabled() || self.dragging {
            return;
        }
        if self.set_value(self.value + delta.signum()) {
            ctx.invalidate();
            self.report(ctx, false);
        }
    }

    /// A drag cut short still reports where it ended.
    fn on_lost_capture(&mut self, ctx: &mut EventCtx<'_>) {
        if self.dragging {
            self.dragging = false;
            ctx.invalidate();
            self.report(ctx, false);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
