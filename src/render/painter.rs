//! Back-to-front tree painting.
//!
//! Each displayed node paints its background, then its border, then its
//! control content, then its children in paint order (flow children before
//! floats). Nodes outside the clip rectangle are not drawn but their children
//! are still visited, since floats may extend anywhere in the parent.

use tracing::trace;

use crate::dom::node::NodeKey;
use crate::geometry::Rect;
use crate::ui::Ui;
use crate::widget::context::PaintCtx;

use super::surface::Surface;

impl Ui {
    /// Paint every displayed node overlapping `clip`.
    pub fn paint(&self, surface: &mut dyn Surface, clip: Rect) {
        trace!(?clip, "paint");
        self.paint_node(self.root(), surface, clip);
    }

    fn paint_node(&self, key: NodeKey, surface: &mut dyn Surface, clip: Rect) {
        let Some(data) = self.dom.get(key) else {
            return;
        };
        if !data.is_displayed() {
            return;
        }

        if data.rect.overlaps(clip) {
            let style = &data.style;
            if let Some(background) = style.background {
                surface.fill_rect(data.rect, background, style.opacity);
            }
            if !style.border.is_empty() {
                surface.draw_border(data.rect, &style.border, style.opacity);
            }
            if let Some(control) = self.controls.get(key) {
                control.draw(&PaintCtx::new(self, key, data), surface);
            }
        }

        for child in self.dom.paint_order(key) {
            self.paint_node(child, surface, clip);
        }
    }
}
