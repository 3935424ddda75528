//! Pointer routing: hover tracking, capture, timer delivery.
//!
//! The router state lives on the [`Ui`]; this module holds the `impl Ui`
//! block that turns raw [`InputEvent`]s into per-node callbacks.
//!
//! Precedence for pointer events: the capture holder first, then the hover
//! node, otherwise the event is dropped. A right button press with no capture
//! holder goes to the gesture overlay when gestures are enabled.

use tracing::{trace, warn};

use crate::dom::node::NodeKey;
use crate::geometry::Point;
use crate::host::TimerToken;
use crate::ui::Ui;

use super::input::{InputEvent, KeyState, MouseButton};

/// Hover/capture bookkeeping owned by the [`Ui`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterState {
    /// Node under the pointer, absent capture.
    pub hover: Option<NodeKey>,
    /// Node receiving all pointer events.
    pub capture: Option<NodeKey>,
    /// Whether the host window currently holds pointer capture.
    pub host_captured: bool,
    /// Last pointer position seen.
    pub cursor: Option<Point>,
}

impl Ui {
    /// Deliver one host event.
    pub fn handle(&mut self, event: InputEvent) {
        if let Some(pt) = event.point() {
            self.router.cursor = Some(pt);
        }
        match event {
            InputEvent::PointerMove { pt, keys } => self.pointer_move(pt, keys),
            InputEvent::ButtonDown { pt, button, keys } => self.button_down(pt, button, keys),
            InputEvent::ButtonUp { pt, button, keys } => self.button_up(pt, button, keys),
            InputEvent::Wheel { pt, delta, keys } => self.wheel(pt, delta, keys),
            InputEvent::Timer(token) => self.timer_fired(token),
            InputEvent::CaptureLost => self.capture_lost(),
        }
    }

    fn pointer_move(&mut self, pt: Point, keys: KeyState) {
        if !self.router.host_captured {
            self.host.set_capture();
            self.router.host_captured = true;
        }

        if let Some(holder) = self.router.capture {
            self.dispatch(holder, |control, ctx| control.on_mouse_move(ctx, pt, keys));
            return;
        }

        let inside = self.rect(self.root()).is_some_and(|rect| rect.contains(pt));
        if inside {
            let over = self.control_at(pt);
            if over != self.router.hover {
                self.change_hover(over, pt);
            }
            if let Some(node) = over {
                self.dispatch(node, |control, ctx| control.on_mouse_move(ctx, pt, keys));
            }
        } else {
            trace!(?pt, "pointer left the window");
            self.host.release_capture();
            self.router.host_captured = false;
            if let Some(old) = self.router.hover.take() {
                self.notify_out(old, None, pt);
            }
        }
    }

    /// Move hover to `new`, notifying both branches up to their common
    /// ancestor.
    fn change_hover(&mut self, new: Option<NodeKey>, pt: Point) {
        let old = self.router.hover;
        self.router.hover = new;
        trace!(?old, ?new, "hover changed");

        let common = match (old, new) {
            (Some(a), Some(b)) => self.common_ancestor(a, b),
            _ => None,
        };
        if let Some(old) = old {
            self.notify_out(old, common, pt);
        }
        if let Some(new) = new {
            self.notify_in(new, common, pt);
        }
    }

    /// `on_mouse_out` on `old`, then `on_mouse_out_child` on each ancestor up
    /// to and including `common` (all of them when `common` is `None`).
    fn notify_out(&mut self, old: NodeKey, common: Option<NodeKey>, pt: Point) {
        self.dispatch(old, |control, ctx| control.on_mouse_out(ctx, pt));
        if common == Some(old) {
            return;
        }
        for ancestor in self.dom.ancestors(old) {
            self.dispatch(ancestor, |control, ctx| control.on_mouse_out_child(ctx, pt));
            if Some(ancestor) == common {
                break;
            }
        }
    }

    /// `on_mouse_in_child` on each ancestor of `new` from `common` downwards,
    /// then `on_mouse_in` on `new`.
    fn notify_in(&mut self, new: NodeKey, common: Option<NodeKey>, pt: Point) {
        if common != Some(new) {
            let mut chain = Vec::new();
            for ancestor in self.dom.ancestors(new) {
                chain.push(ancestor);
                if Some(ancestor) == common {
                    break;
                }
            }
            for ancestor in chain.into_iter().rev() {
                self.dispatch(ancestor, |control, ctx| control.on_mouse_in_child(ctx, pt));
            }
        }
        self.dispatch(new, |control, ctx| control.on_mouse_in(ctx, pt));
    }

    /// Deepest node that is `a` or an ancestor of `a` and also `b` or an
    /// ancestor of `b`.
    fn common_ancestor(&self, a: NodeKey, b: NodeKey) -> Option<NodeKey> {
        std::iter::once(a)
            .chain(self.dom.ancestors(a))
            .find(|&candidate| candidate == b || self.dom.is_ancestor(candidate, b))
    }

    /// Capture holder, else hover node.
    fn pointer_target(&self) -> Option<NodeKey> {
        self.router.capture.or(self.router.hover)
    }

    fn button_down(&mut self, pt: Point, button: MouseButton, keys: KeyState) {
        if button == MouseButton::Right && self.router.capture.is_none() {
            if let Some(gesture) = self.gesture {
                trace!(?pt, "right press routed to gesture overlay");
                self.dispatch(gesture, |control, ctx| control.on_button_down(ctx, pt, button, keys));
                return;
            }
        }
        match self.pointer_target() {
            Some(node) => {
                self.dispatch(node, |control, ctx| control.on_button_down(ctx, pt, button, keys));
            }
            None => trace!(?pt, ?button, "button press dropped"),
        }
    }

    fn button_up(&mut self, pt: Point, button: MouseButton, keys: KeyState) {
        match self.pointer_target() {
            Some(node) => {
                self.dispatch(node, |control, ctx| control.on_button_up(ctx, pt, button, keys));
            }
            None => trace!(?pt, ?button, "button release dropped"),
        }
    }

    fn wheel(&mut self, pt: Point, delta: i32, keys: KeyState) {
        match self.pointer_target() {
            Some(node) => {
                self.dispatch(node, |control, ctx| control.on_mouse_wheel(ctx, pt, delta, keys));
            }
            None => trace!(?pt, delta, "wheel dropped"),
        }
    }

    /// The host window lost capture: forget hover silently and take capture
    /// away from its holder.
    fn capture_lost(&mut self) {
        self.router.host_captured = false;
        self.router.hover = None;
        if let Some(holder) = self.router.capture.take() {
            trace!(?holder, "window capture lost");
            self.dispatch(holder, |control, ctx| control.on_lost_capture(ctx));
        }
    }

    fn timer_fired(&mut self, token: TimerToken) {
        match self.timers.lookup(token) {
            Some((node, id)) => {
                self.dispatch(node, |control, ctx| control.on_timer(ctx, id));
            }
            None => {
                warn!(%token, "timer fired for no registered node");
                self.host.kill_timer(token);
            }
        }
    }

    /// Acquire (`capture == true`) or release pointer capture for `key`.
    ///
    /// Acquiring takes capture away from the previous holder first
    /// (`on_lost_capture`), then notifies the new one (`on_get_capture`).
    /// Re-acquiring is a no-op. Releasing only affects the current holder and
    /// does not call `on_lost_capture`. Returns whether `key` ends up in the
    /// requested state.
    pub fn set_capture(&mut self, key: NodeKey, capture: bool) -> bool {
        if !capture {
            if self.router.capture == Some(key) {
                self.router.capture = None;
                trace!(?key, "capture released");
            }
            return self.router.capture != Some(key);
        }

        if self.router.capture == Some(key) {
            return true;
        }
        if !self.dom.is_connected(key) {
            warn!(?key, "capture requested by a detached node");
            return false;
        }

        if let Some(previous) = self.router.capture.take() {
            self.dispatch(previous, |control, ctx| control.on_lost_capture(ctx));
        }
        self.router.capture = Some(key);
        trace!(?key, "capture acquired");
        self.dispatch(key, |control, ctx| control.on_get_capture(ctx));
        true
    }
}
