//! Callback contexts handed to controls.
//!
//! [`EventCtx`] wraps `&mut Ui` plus the notified node and exposes the
//! operations a control needs from inside a callback: repaint requests,
//! capture, timers, restyling. [`PaintCtx`] is the read-only counterpart used
//! while painting.

use crate::css::styles::{Style, StyleChange};
use crate::dom::node::{NodeData, NodeKey};
use crate::geometry::Rect;
use crate::host::{Target, TimerToken};
use crate::ui::{Ui, UiError};

// ---------------------------------------------------------------------------
// EventCtx
// ---------------------------------------------------------------------------

/// Context for event callbacks.
///
/// While a callback runs, the notified control is checked out of the tree, so
/// nested callbacks addressed to the same node are skipped.
pub struct EventCtx<'a> {
    pub(crate) ui: &'a mut Ui,
    node: NodeKey,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(ui: &'a mut Ui, node: NodeKey) -> Self {
        Self { ui, node }
    }

    /// The node being notified.
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// The node's application id (0 if the node no longer exists).
    pub fn id(&self) -> u32 {
        self.ui.get(self.node).map_or(0, |d| d.id)
    }

    pub fn style(&self) -> Option<&Style> {
        self.ui.style(self.node)
    }

    /// Value of a control-specific style key.
    pub fn extra(&self, name: &str) -> Option<i32> {
        self.style().and_then(|s| s.extra(name))
    }

    pub fn is_disabled(&self) -> bool {
        self.style().is_some_and(|s| s.disable)
    }

    pub fn rect(&self) -> Rect {
        self.ui.rect(self.node).unwrap_or(Rect::EMPTY)
    }

    pub fn client_rect(&self) -> Rect {
        self.ui.client_rect(self.node).unwrap_or(Rect::EMPTY)
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self) -> bool {
        self.ui.is_attached(self.node)
    }

    /// Request a repaint of this node.
    pub fn invalidate(&mut self) {
        self.ui.invalidate(self.node);
    }

    /// Acquire (`true`) or release (`false`) pointer capture for this node.
    pub fn set_capture(&mut self, capture: bool) -> bool {
        self.ui.set_capture(self.node, capture)
    }

    pub fn has_capture(&self) -> bool {
        self.ui.capture() == Some(self.node)
    }

    /// Whether the last known pointer position lies inside this node.
    pub fn is_cursor_in(&self) -> bool {
        self.ui.is_cursor_in(self.node)
    }

    /// Start (or restart) timer `id` for this node.
    pub fn set_timer(&mut self, elapse_ms: u32, id: u32) -> Option<TimerToken> {
        self.ui.set_timer(self.node, elapse_ms, id)
    }

    pub fn kill_timer(&mut self, id: u32) -> bool {
        self.ui.kill_timer(self.node, id)
    }

    /// Apply style text to this node.
    pub fn set_style(&mut self, text: &str) -> Result<StyleChange, UiError> {
        self.ui.set_style(self.node, text)
    }

    pub fn target(&self) -> &dyn Target {
        self.ui.target()
    }

    /// Host clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.ui.now_ms()
    }

    pub fn ui(&self) -> &Ui {
        &*self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut *self.ui
    }
}

// ---------------------------------------------------------------------------
// PaintCtx
// ---------------------------------------------------------------------------

/// Context for [`Control::draw`](super::traits::Control::draw).
pub struct PaintCtx<'a> {
    ui: &'a Ui,
    node: NodeKey,
    data: &'a NodeData,
}

impl<'a> PaintCtx<'a> {
    pub(crate) fn new(ui: &'a Ui, node: NodeKey, data: &'a NodeData) -> Self {
        Self { ui, node, data }
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn id(&self) -> u32 {
        self.data.id
    }

    pub fn style(&self) -> &Style {
        &self.data.style
    }

    pub fn extra(&self, name: &str) -> Option<i32> {
        self.data.style.extra(name)
    }

    pub fn rect(&self) -> Rect {
        self.data.rect
    }

    pub fn client_rect(&self) -> Rect {
        self.data.client_rect()
    }

    pub fn is_hover(&self) -> bool {
        self.ui.hover() == Some(self.node)
    }

    pub fn has_capture(&self) -> bool {
        self.ui.capture() == Some(self.node)
    }

    pub fn target(&self) -> &dyn Target {
        self.ui.target()
    }
}
