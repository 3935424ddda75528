//! Button: a clickable control with a centered label.
//!
//! A left press captures the pointer and shows the pushed state; releasing
//! while the pointer is still over the button reports
//! [`Target::on_command`](crate::host::Target::on_command) with the node id.
//! A disabled button ignores all input.

use std::any::Any;

use tracing::debug;

use crate::css::color::Color;
use crate::css::styles::Style;
use crate::event::input::{KeyState, MouseButton};
use crate::geometry::Point;
use crate::layout::resolve::IntrinsicSize;
use crate::render::surface::{Surface, TextStyle};
use crate::widget::context::{EventCtx, PaintCtx};
use crate::widget::traits::Control;

/// Width of one label character for `auto` sizing.
pub const CHAR_WIDTH: i32 = 8;
/// Height of one label line for `auto` sizing.
pub const LINE_HEIGHT: i32 = 16;

const PUSH_SHADE: Color = Color::rgb(0xc0, 0xc0, 0xc0);
const DISABLED_TEXT: Color = Color::rgb(0x80, 0x80, 0x80);

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A push button.
///
/// # Examples
///
/// ```ignore
/// let ok = ui.create_styled(1, Button::new("OK"), "width:80;height:24;margin:4")?;
/// ui.insert_child(ui.root(), ok)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Button {
    label: String,
    hover: bool,
    pushed: bool,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hover: false,
            pushed: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label. The caller is responsible for invalidating the node.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Whether the pointer is over the button.
    pub fn is_hover(&self) -> bool {
        self.hover
    }

    /// Whether the button is held down.
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }
}

impl Control for Button {
    fn control_type(&self) -> &'static str {
        "Button"
    }

    fn default_style(&self) -> &str {
        "background:#e0e0e0;border:1 black;"
    }

    fn intrinsic_size(&self, style: &Style) -> IntrinsicSize {
        let insets = style.client_insets();
        let chars = self.label.chars().count() as i32;
        IntrinsicSize::new(
            chars.saturating_mul(CHAR_WIDTH).saturating_add(insets.width()),
            LINE_HEIGHT.saturating_add(insets.height()),
        )
    }

    fn draw(&self, ctx: &PaintCtx<'_>, surface: &mut dyn Surface) {
        let style = ctx.style();
        let client = ctx.client_rect();
        if !style.disable {
            if self.pushed {
                surface.fill_rect(client, PUSH_SHADE, style.opacity);
            } else if self.hover {
                let shade = style.background.unwrap_or(Color::WHITE).lighten(96);
                surface.fill_rect(client, shade, style.opacity);
            }
        }

        let mut text = TextStyle::from_style(style);
        if style.disable {
            text.color = DISABLED_TEXT;
        }
        surface.draw_text(client, &self.label, &text);
    }

    fn on_mouse_in(&mut self, ctx: &mut EventCtx<'_>, _pt: Point) {
        if ctx.is_disabled() {
            return;
        }
        self.hover = true;
        ctx.invalidate();
    }

    fn on_mouse_out(&mut self, ctx: &mut EventCtx<'_>, _pt: Point) {
        if !self.hover {
            return;
        }
        self.hover = false;
        ctx.invalidate();
    }

    fn on_button_down(&mut self, ctx: &mut EventCtx<'_>, _pt: Point, button: MouseButton, _keys: KeyState) {
        if button != MouseButton::Left || ctx.is_disabled() {
            return;
        }
        self.pushed = true;
        ctx.set_capture(true);
        ctx.invalidate();
    }

    fn on_button_up(&mut self, ctx: &mut EventCtx<'_>, _pt: Point, button: MouseButton, _keys: KeyState) {
        if button != MouseButton::Left || !self.pushed {
            return;
        }
        self.pushed = false;
        ctx.set_capture(false);
        ctx.invalidate();
        if ctx.is_cursor_in() && !ctx.is_disabled() {
            let id = ctx.id();
            debug!(id, label = %self.label, "button clicked");
            ctx.target().on_command(id);
        }
    }

    fn on_lost_capture(&mut self, ctx: &mut EventCtx<'_>) {
        if self.pushed {
            self.pushed = false;
            ctx.invalidate();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
