//! Recursive dock layout over the control tree.
//!
//! [`LayoutEngine`] writes rectangles into the [`Dom`] top-down: a node's
//! rectangle is fixed first, then its flow children are placed in insertion
//! order against the shrinking client rectangle, then its floats are placed
//! against the full client rectangle. Hidden children are skipped and keep
//! their previous rectangles.

use tracing::trace;

use crate::css::styles::Style;
use crate::dom::node::NodeKey;
use crate::dom::tree::Dom;
use crate::geometry::Rect;

use super::resolve::{place_float, place_flow, IntrinsicSize};

/// One layout pass. Collects the nodes whose rectangle changed.
pub struct LayoutEngine<'a> {
    dom: &'a mut Dom,
    intrinsic: &'a dyn Fn(NodeKey, &Style) -> IntrinsicSize,
    resized: Vec<NodeKey>,
}

impl<'a> LayoutEngine<'a> {
    /// `intrinsic` reports the preferred size of a node for `auto` sizing.
    pub fn new(dom: &'a mut Dom, intrinsic: &'a dyn Fn(NodeKey, &Style) -> IntrinsicSize) -> Self {
        Self { dom, intrinsic, resized: Vec::new() }
    }

    /// Assign `rect` to `key` and lay out its subtree.
    pub fn layout(&mut self, key: NodeKey, rect: Rect) {
        let Some(data) = self.dom.get_mut(key) else {
            return;
        };
        if data.rect != rect {
            trace!(?key, ?rect, "node resized");
            data.rect = rect;
            self.resized.push(key);
        }
        self.layout_children(key);
    }

    /// Lay out the children of `parent` inside its current client rectangle.
    pub fn layout_children(&mut self, parent: NodeKey) {
        let Some(client) = self.dom.get(parent).map(|d| d.client_rect()) else {
            return;
        };

        let mut remaining = client;
        let mut floats = Vec::new();
        for child in self.dom.children(parent).to_vec() {
            let Some(data) = self.dom.get(child) else {
                continue;
            };
            if !data.is_displayed() {
                continue;
            }
            if data.style.is_float {
                floats.push(child);
                continue;
            }
            let intrinsic = (self.intrinsic)(child, &data.style);
            let placement = place_flow(&data.style, intrinsic, remaining);
            remaining = placement.remaining;
            self.layout(child, placement.rect);
        }

        for child in floats {
            let Some(data) = self.dom.get(child) else {
                continue;
            };
            let intrinsic = (self.intrinsic)(child, &data.style);
            let rect = place_float(&data.style, intrinsic, client);
            self.layout(child, rect);
        }
    }

    /// Nodes whose rectangle changed during this pass, in layout order.
    pub fn finish(self) -> Vec<NodeKey> {
        self.resized
    }
}
