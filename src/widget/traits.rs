//! Control trait: identity, styling hooks, painting and event callbacks.
//!
//! Every node in the tree carries one boxed [`Control`]. All callbacks have
//! no-op defaults, so a control only overrides what it reacts to. Callbacks
//! receive an [`EventCtx`] giving access to the owning [`Ui`](crate::ui::Ui)
//! and the node being notified.

use std::any::Any;

use crate::css::properties::ExtraProperty;
use crate::css::styles::Style;
use crate::event::input::{KeyState, MouseButton};
use crate::geometry::Point;
use crate::layout::resolve::IntrinsicSize;
use crate::render::surface::Surface;

use super::context::{EventCtx, PaintCtx};

// ---------------------------------------------------------------------------
// Control trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all controls.
///
/// Object-safe: the tree stores `Box<dyn Control>`.
pub trait Control {
    /// Type name for this control (e.g. "Button", "Slider").
    fn control_type(&self) -> &'static str;

    /// Style text applied when the node is created and by `reset_style`.
    fn default_style(&self) -> &str {
        ""
    }

    /// Additional integer style keys this control understands.
    fn extra_properties(&self) -> &'static [ExtraProperty] {
        &[]
    }

    /// Preferred size for `auto` width/height. `None` on an axis means fill.
    fn intrinsic_size(&self, _style: &Style) -> IntrinsicSize {
        IntrinsicSize::NONE
    }

    /// Paint the control's content. Background and border are already drawn.
    fn draw(&self, _ctx: &PaintCtx<'_>, _surface: &mut dyn Surface) {}

    // -- Lifecycle ------------------------------------------------------------

    /// The node became reachable from the root.
    fn on_attach(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// The node is about to become unreachable from the root.
    fn on_detach(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// Layout assigned a new rectangle.
    fn on_size(&mut self, _ctx: &mut EventCtx<'_>) {}

    // -- Pointer --------------------------------------------------------------

    /// The pointer entered this node.
    fn on_mouse_in(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point) {}

    /// The pointer entered a descendant.
    fn on_mouse_in_child(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point) {}

    /// The pointer left this node (it may now be over a descendant).
    fn on_mouse_out(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point) {}

    /// The pointer left a descendant.
    fn on_mouse_out_child(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point) {}

    /// The pointer moved over this node, or anywhere while it holds capture.
    fn on_mouse_move(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point, _keys: KeyState) {}

    fn on_button_down(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point, _button: MouseButton, _keys: KeyState) {}

    fn on_button_up(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point, _button: MouseButton, _keys: KeyState) {}

    fn on_mouse_wheel(&mut self, _ctx: &mut EventCtx<'_>, _pt: Point, _delta: i32, _keys: KeyState) {}

    // -- Capture & timers -----------------------------------------------------

    /// Capture was taken away: by another node acquiring it, by the host
    /// window losing it, or by this node being detached. Not called when the
    /// node releases capture itself.
    fn on_lost_capture(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// This node became the capture holder.
    fn on_get_capture(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// A timer registered by this node with `id` expired.
    fn on_timer(&mut self, _ctx: &mut EventCtx<'_>, _id: u32) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
