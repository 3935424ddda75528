//! Snapshot helpers.
//!
//! Functions for converting a painted or laid-out [`Ui`] into plain-text
//! strings suitable for snapshot testing and assertions.

use std::fmt::Write;

use crate::dom::node::NodeKey;
use crate::geometry::Rect;
use crate::testing::recorder::RecordingSurface;
use crate::ui::Ui;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Paint `ui` clipped to `clip` and return one line per draw call.
///
/// # Examples
///
/// ```ignore
/// let text = paint_to_string(&ui, Rect::new(0, 0, 100, 50));
/// assert!(text.contains("'OK'"));
/// ```
pub fn paint_to_string(ui: &Ui, clip: Rect) -> String {
    let mut surface = RecordingSurface::new();
    ui.paint(&mut surface, clip);
    surface.to_string()
}

/// Dump the connected tree as an indented outline of
/// `Type#id (left,top)-(right,bottom)` lines.
pub fn layout_to_string(ui: &Ui) -> String {
    let mut out = String::new();
    write_node(ui, ui.root(), 0, &mut out);
    out
}

fn write_node(ui: &Ui, key: NodeKey, depth: usize, out: &mut String) {
    let Some(node) = ui.get(key) else {
        return;
    };
    if !out.is_empty() {
        out.push('\n');
    }
    let r = node.rect;
    let _ = write!(
        out,
        "{:indent$}{}#{} ({},{})-({},{})",
        "",
        node.control_type,
        node.id,
        r.left,
        r.top,
        r.right,
        r.bottom,
        indent = depth * 2
    );
    for &child in ui.children(key) {
        write_node(ui, child, depth + 1, out);
    }
}
