//! Node types: NodeKey, NodeData.

use slotmap::new_key_type;

use crate::css::properties::ExtraProperty;
use crate::css::styles::Style;
use crate::geometry::Rect;

new_key_type! {
    /// Arena handle for a control node. Copy, lightweight (u64).
    pub struct NodeKey;
}

/// Per-node state owned by the tree (the control object lives beside it).
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Application-chosen identifier. Not required to be unique.
    pub id: u32,
    /// Control type name (e.g. "Button", "Panel").
    pub control_type: &'static str,
    /// Current resolved style.
    pub style: Style,
    /// Style restored by `reset_style`.
    pub default_style: Style,
    /// Control-specific style keys accepted by this node.
    pub extras: &'static [ExtraProperty],
    /// Laid-out rectangle in absolute coordinates.
    pub rect: Rect,
}

impl NodeData {
    /// Create a new `NodeData` with the default style and an empty rectangle.
    pub fn new(control_type: &'static str) -> Self {
        Self {
            id: 0,
            control_type,
            style: Style::default(),
            default_style: Style::default(),
            extras: &[],
            rect: Rect::EMPTY,
        }
    }

    /// Set the identifier (builder).
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Set both the current and default style (builder).
    pub fn with_style(mut self, style: Style) -> Self {
        self.default_style = style.clone();
        self.style = style;
        self
    }

    /// Set the accepted control-specific keys (builder).
    pub fn with_extras(mut self, extras: &'static [ExtraProperty]) -> Self {
        self.extras = extras;
        self
    }

    /// The rectangle minus border and padding.
    pub fn client_rect(&self) -> Rect {
        self.rect.shrink(self.style.client_insets())
    }

    /// Whether the node takes part in layout, painting and hit-testing.
    pub fn is_displayed(&self) -> bool {
        self.style.display
    }
}
