//! Ui: the root object owning the control tree.
//!
//! [`Ui`] ties together the node arena, the boxed controls, the pointer
//! router state, the timer table, and the host/target capabilities. All tree
//! mutation goes through it so that hover, capture and timers never point at
//! detached nodes.

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::css::styles::{Style, StyleChange, StyleError};
use crate::dom::node::{NodeData, NodeKey};
use crate::dom::tree::{Dom, TreeError};
use crate::event::router::RouterState;
use crate::event::timer::TimerTable;
use crate::geometry::{Point, Rect};
use crate::host::{Host, Target, TimerToken};
use crate::layout::engine::LayoutEngine;
use crate::layout::resolve::IntrinsicSize;
use crate::widget::context::EventCtx;
use crate::widget::traits::Control;
use crate::widgets::{GestureOverlay, Panel};

/// Id given to the gesture overlay node.
pub const GESTURE_ID: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Ui`].
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Style text applied to the root panel.
    pub root_style: String,
    /// Whether right-button drags start a gesture.
    pub gesture: bool,
    /// Style text applied to the gesture overlay on top of its defaults.
    pub gesture_style: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            root_style: String::from("width:fill;height:fill;"),
            gesture: false,
            gesture_style: None,
        }
    }
}

impl UiConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root style (builder).
    pub fn with_root_style(mut self, style: impl Into<String>) -> Self {
        self.root_style = style.into();
        self
    }

    /// Enable or disable gestures (builder).
    pub fn with_gesture(mut self, enabled: bool) -> Self {
        self.gesture = enabled;
        self
    }

    /// Override the gesture overlay style (builder).
    pub fn with_gesture_style(mut self, style: impl Into<String>) -> Self {
        self.gesture_style = Some(style.into());
        self
    }
}

// ---------------------------------------------------------------------------
// UiError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("invalid style: {0}")]
    Style(#[from] StyleError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// The control tree root: owns every node and routes host input to them.
pub struct Ui {
    pub(crate) dom: Dom,
    pub(crate) controls: SecondaryMap<NodeKey, Box<dyn Control>>,
    pub(crate) router: RouterState,
    pub(crate) timers: TimerTable,
    pub(crate) host: Box<dyn Host>,
    target: Box<dyn Target>,
    root: NodeKey,
    pub(crate) gesture: Option<NodeKey>,
    layout_rect: Option<Rect>,
    config: UiConfig,
}

impl Ui {
    /// Create a tree with a root [`Panel`] styled from `config.root_style`.
    pub fn new(config: UiConfig, host: impl Host + 'static, target: impl Target + 'static) -> Result<Self, UiError> {
        let root_style = Style::parse(&config.root_style, &[])?;
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("Panel").with_style(root_style));
        dom.set_root(root)?;

        let mut controls: SecondaryMap<NodeKey, Box<dyn Control>> = SecondaryMap::new();
        controls.insert(root, Box::new(Panel::new()));

        let gesture = config.gesture;
        let mut ui = Self {
            dom,
            controls,
            router: RouterState::default(),
            timers: TimerTable::new(),
            host: Box::new(host),
            target: Box::new(target),
            root,
            gesture: None,
            layout_rect: None,
            config,
        };
        ui.enable_gesture(gesture)?;
        Ok(ui)
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Turn right-button gestures on or off.
    pub fn enable_gesture(&mut self, enabled: bool) -> Result<(), UiError> {
        match (enabled, self.gesture) {
            (true, None) => {
                let key = self.create(GESTURE_ID, GestureOverlay::new())?;
                if let Some(style) = self.config.gesture_style.clone() {
                    // The overlay never takes part in the flow of the root's children.
                    let styled = self.set_style(key, &style).and_then(|_| self.set_style(key, "float:true"));
                    if let Err(err) = styled {
                        self.destroy(key)?;
                        return Err(err);
                    }
                }
                self.gesture = Some(key);
            }
            (false, Some(key)) => {
                self.gesture = None;
                self.destroy(key)?;
            }
            _ => {}
        }
        self.config.gesture = enabled;
        Ok(())
    }

    // -- Node creation & tree mutation ---------------------------------------

    /// Create a detached node for `control`, styled with its default style.
    pub fn create(&mut self, id: u32, control: impl Control + 'static) -> Result<NodeKey, UiError> {
        let extras = control.extra_properties();
        let style = Style::parse(control.default_style(), extras)?;
        let control_type = control.control_type();
        let data = NodeData::new(control_type)
            .with_id(id)
            .with_style(style)
            .with_extras(extras);
        let key = self.dom.insert(data);
        self.controls.insert(key, Box::new(control));
        debug!(?key, id, control_type, "node created");
        Ok(key)
    }

    /// [`create`](Self::create) followed by [`set_style`](Self::set_style).
    pub fn create_styled(&mut self, id: u32, control: impl Control + 'static, style: &str) -> Result<NodeKey, UiError> {
        let key = self.create(id, control)?;
        if let Err(err) = self.set_style(key, style) {
            self.destroy(key)?;
            return Err(err);
        }
        Ok(key)
    }

    /// Append `child` as the topmost child of `parent`.
    ///
    /// If `parent` is attached, every node of the inserted subtree receives
    /// `on_attach` (pre-order), the parent's children are laid out again and
    /// the child is repainted.
    pub fn insert_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), TreeError> {
        self.dom.append_child(parent, child)?;
        debug!(?parent, ?child, "node inserted");
        if !self.dom.is_connected(child) {
            return Ok(());
        }

        for key in self.dom.walk_depth_first(child) {
            self.dispatch(key, |control, ctx| control.on_attach(ctx));
        }
        self.relayout_children(parent);
        self.invalidate(child);
        Ok(())
    }

    /// Detach the first direct child of `parent` with `id`.
    ///
    /// The subtree stays alive; the returned key may be inserted again.
    pub fn remove_child(&mut self, parent: NodeKey, id: u32) -> Option<NodeKey> {
        let child = self
            .dom
            .children(parent)
            .iter()
            .copied()
            .find(|&c| self.dom.get(c).is_some_and(|d| d.id == id))?;
        self.remove_node(child).ok().map(|_| child)
    }

    /// Detach `key` from its parent, returning the former parent.
    ///
    /// Order for an attached subtree: `on_detach` (children first), then
    /// capture held inside the subtree is taken away (`on_lost_capture`),
    /// hover is cleared and the subtree's timers are killed, then the node is
    /// unlinked. Callbacks thus still observe an attached tree.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<NodeKey, TreeError> {
        if !self.dom.contains(key) {
            return Err(TreeError::MissingNode(key));
        }
        if key == self.root {
            return Err(TreeError::IsRoot(key));
        }
        if self.dom.parent(key).is_none() {
            return Err(TreeError::NotAttached(key));
        }

        let connected = self.dom.is_connected(key);
        if connected {
            for node in self.dom.walk_depth_first(key).into_iter().rev() {
                self.dispatch(node, |control, ctx| control.on_detach(ctx));
            }
        }
        let subtree = self.dom.walk_depth_first(key);
        self.forget_nodes(&subtree);

        let old_rect = self.dom.get(key).map(|d| d.rect);
        let parent = self.dom.detach(key)?;
        debug!(?key, ?parent, nodes = subtree.len(), "node removed");

        if connected {
            self.relayout_children(parent);
            if let Some(rect) = old_rect {
                self.host.invalidate(Some(rect));
            }
        }
        Ok(parent)
    }

    /// Free `key` and its subtree, detaching it first if needed.
    pub fn destroy(&mut self, key: NodeKey) -> Result<(), TreeError> {
        if key == self.root {
            return Err(TreeError::IsRoot(key));
        }
        if self.dom.parent(key).is_some() {
            self.remove_node(key)?;
        }
        let subtree = self.dom.walk_depth_first(key);
        self.forget_nodes(&subtree);

        let freed = self.dom.remove(key);
        if freed.is_empty() {
            return Err(TreeError::MissingNode(key));
        }
        for node in &freed {
            self.controls.remove(*node);
        }
        if self.gesture.is_some_and(|g| freed.contains(&g)) {
            self.gesture = None;
        }
        debug!(?key, nodes = freed.len(), "subtree destroyed");
        Ok(())
    }

    /// Drop every router/timer reference into `nodes`.
    fn forget_nodes(&mut self, nodes: &[NodeKey]) {
        if let Some(holder) = self.router.capture.filter(|c| nodes.contains(c)) {
            self.router.capture = None;
            trace!(?holder, "capture holder removed");
            self.dispatch(holder, |control, ctx| control.on_lost_capture(ctx));
        }
        if self.router.hover.is_some_and(|h| nodes.contains(&h)) {
            self.router.hover = None;
        }
        for token in self.timers.remove_nodes(nodes) {
            self.host.kill_timer(token);
        }
    }

    // -- Layout ---------------------------------------------------------------

    /// Lay out the whole tree inside `rect` (the window client area).
    pub fn layout(&mut self, rect: Rect) {
        self.layout_rect = Some(rect);
        self.relayout();
    }

    /// Lay out the whole tree again inside the last [`layout`](Self::layout)
    /// rectangle. No-op before the first layout.
    pub fn relayout(&mut self) {
        let Some(rect) = self.layout_rect else {
            return;
        };
        let root = self.root;
        let resized = self.run_layout(|engine| engine.layout(root, rect));
        self.notify_resized(resized);
    }

    /// Lay out the children of `parent` inside its current client rectangle.
    fn relayout_children(&mut self, parent: NodeKey) {
        if self.layout_rect.is_none() || !self.dom.is_connected(parent) {
            return;
        }
        let resized = self.run_layout(|engine| engine.layout_children(parent));
        self.notify_resized(resized);
    }

    fn run_layout(&mut self, pass: impl FnOnce(&mut LayoutEngine<'_>)) -> Vec<NodeKey> {
        let controls = &self.controls;
        let intrinsic = |key: NodeKey, style: &Style| {
            controls
                .get(key)
                .map_or(IntrinsicSize::NONE, |control| control.intrinsic_size(style))
        };
        let mut engine = LayoutEngine::new(&mut self.dom, &intrinsic);
        pass(&mut engine);
        engine.finish()
    }

    fn notify_resized(&mut self, resized: Vec<NodeKey>) {
        for key in resized {
            self.dispatch(key, |control, ctx| control.on_size(ctx));
        }
    }

    // -- Style ------------------------------------------------------------------

    /// Apply style text to `key` and propagate what changed.
    ///
    /// A geometry change lays out the parent's children again (the whole tree
    /// for the root) and repaints the parent; a paint-only change repaints the
    /// node. The node is left untouched if the text is malformed.
    pub fn set_style(&mut self, key: NodeKey, text: &str) -> Result<StyleChange, UiError> {
        let data = self.dom.get(key).ok_or(TreeError::MissingNode(key))?;
        let (style, change) = data.style.apply(text, data.extras)?;
        if let Some(data) = self.dom.get_mut(key) {
            data.style = style;
        }
        if !change.is_empty() {
            trace!(?key, ?change, "style changed");
            self.apply_change(key, change);
        }
        Ok(change)
    }

    /// Restore the control's default style.
    pub fn reset_style(&mut self, key: NodeKey) -> Result<StyleChange, TreeError> {
        let data = self.dom.get_mut(key).ok_or(TreeError::MissingNode(key))?;
        if data.style == data.default_style {
            return Ok(StyleChange::NONE);
        }
        data.style = data.default_style.clone();
        self.apply_change(key, StyleChange::LAYOUT);
        Ok(StyleChange::LAYOUT)
    }

    fn apply_change(&mut self, key: NodeKey, change: StyleChange) {
        if !self.dom.is_connected(key) {
            return;
        }
        if change.relayout {
            match self.dom.parent(key) {
                Some(parent) => {
                    self.relayout_children(parent);
                    self.invalidate(parent);
                }
                None => {
                    self.relayout();
                    self.host.invalidate(None);
                }
            }
        } else if change.redraw {
            self.invalidate(key);
        }
    }

    // -- Queries ----------------------------------------------------------------

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// The node under the pointer, absent capture.
    pub fn hover(&self) -> Option<NodeKey> {
        self.router.hover
    }

    /// The node receiving all pointer input, if any.
    pub fn capture(&self) -> Option<NodeKey> {
        self.router.capture
    }

    /// The gesture overlay node, when gestures are enabled.
    pub fn gesture(&self) -> Option<NodeKey> {
        self.gesture
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn get(&self, key: NodeKey) -> Option<&NodeData> {
        self.dom.get(key)
    }

    pub fn style(&self, key: NodeKey) -> Option<&Style> {
        self.dom.get(key).map(|d| &d.style)
    }

    pub fn rect(&self, key: NodeKey) -> Option<Rect> {
        self.dom.get(key).map(|d| d.rect)
    }

    pub fn client_rect(&self, key: NodeKey) -> Option<Rect> {
        self.dom.get(key).map(NodeData::client_rect)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.dom.children(key)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.dom.parent(key)
    }

    /// First node below the root with `id`, depth-first.
    pub fn find_by_id(&self, id: u32) -> Option<NodeKey> {
        self.dom.find_by_id(self.root, id)
    }

    /// Topmost displayed node under `pt`.
    pub fn control_at(&self, pt: Point) -> Option<NodeKey> {
        self.dom.hit_test(self.root, pt)
    }

    /// Borrow the control of `key` as its concrete type.
    pub fn control<T: Control + 'static>(&self, key: NodeKey) -> Option<&T> {
        self.controls.get(key)?.as_any().downcast_ref::<T>()
    }

    pub fn control_mut<T: Control + 'static>(&mut self, key: NodeKey) -> Option<&mut T> {
        self.controls.get_mut(key)?.as_any_mut().downcast_mut::<T>()
    }

    /// Whether `key` is reachable from the root.
    pub fn is_attached(&self, key: NodeKey) -> bool {
        self.dom.is_connected(key)
    }

    /// Whether the last known pointer position lies inside `key`.
    pub fn is_cursor_in(&self, key: NodeKey) -> bool {
        match (self.router.cursor, self.rect(key)) {
            (Some(pt), Some(rect)) => self.is_attached(key) && rect.contains(pt),
            _ => false,
        }
    }

    pub fn target(&self) -> &dyn Target {
        self.target.as_ref()
    }

    pub fn now_ms(&self) -> u64 {
        self.host.now_ms()
    }

    // -- Host services ----------------------------------------------------------

    /// Request a repaint of `key`. No-op for detached nodes.
    pub fn invalidate(&mut self, key: NodeKey) {
        if !self.dom.is_connected(key) {
            return;
        }
        if let Some(rect) = self.rect(key) {
            self.host.invalidate(Some(rect));
        }
    }

    /// Request a repaint of the whole window.
    pub fn invalidate_all(&mut self) {
        self.host.invalidate(None);
    }

    /// Start (or restart) timer `id` for `node`.
    pub fn set_timer(&mut self, node: NodeKey, elapse_ms: u32, id: u32) -> Option<TimerToken> {
        if !self.dom.contains(node) {
            return None;
        }
        let (token, replaced) = self.timers.register(node, id);
        if let Some(old) = replaced {
            self.host.kill_timer(old);
        }
        self.host.set_timer(token, elapse_ms);
        trace!(?node, id, %token, elapse_ms, "timer set");
        Some(token)
    }

    /// Stop timer `id` of `node`. Returns whether it was running.
    pub fn kill_timer(&mut self, node: NodeKey, id: u32) -> bool {
        match self.timers.remove(node, id) {
            Some(token) => {
                self.host.kill_timer(token);
                true
            }
            None => false,
        }
    }

    // -- Callback dispatch --------------------------------------------------------

    /// Run `f` on the control of `key` with an [`EventCtx`] for that node.
    ///
    /// The control is checked out for the duration of the call and put back
    /// only if the node still exists. Returns `None` if the node has no
    /// control or its control is already running a callback.
    pub(crate) fn dispatch<R>(
        &mut self,
        key: NodeKey,
        f: impl FnOnce(&mut dyn Control, &mut EventCtx<'_>) -> R,
    ) -> Option<R> {
        let Some(mut control) = self.controls.remove(key) else {
            trace!(?key, "no control available, callback skipped");
            return None;
        };
        let result = {
            let mut ctx = EventCtx::new(self, key);
            f(control.as_mut(), &mut ctx)
        };
        if self.dom.contains(key) {
            self.controls.insert(key, control);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHost, RecordingTarget};
    use pretty_assertions::assert_eq;

    fn ui() -> (Ui, RecordingHost) {
        let host = RecordingHost::new();
        let ui = Ui::new(UiConfig::new(), host.clone(), RecordingTarget::new()).unwrap();
        (ui, host)
    }

    #[test]
    fn config_builder() {
        let config = UiConfig::new()
            .with_root_style("padding:4")
            .with_gesture(true)
            .with_gesture_style("gesture-sensitivity:20");
        assert_eq!(config.root_style, "padding:4");
        assert!(config.gesture);
        assert_eq!(config.gesture_style.as_deref(), Some("gesture-sensitivity:20"));
    }

    #[test]
    fn invalid_root_style_is_rejected() {
        let result = Ui::new(
            UiConfig::new().with_root_style("width:wide"),
            RecordingHost::new(),
            RecordingTarget::new(),
        );
        assert!(matches!(result, Err(UiError::Style(_))));
    }

    #[test]
    fn create_is_detached() {
        let (mut ui, _) = ui();
        let key = ui.create(7, Panel::new()).unwrap();
        assert!(!ui.is_attached(key));
        assert_eq!(ui.parent(key), None);
        assert_eq!(ui.get(key).map(|d| d.control_type), Some("Panel"));
        assert_eq!(ui.find_by_id(7), None);
    }

    #[test]
    fn insert_then_remove_child() {
        let (mut ui, _) = ui();
        let root = ui.root();
        let key = ui.create(7, Panel::new()).unwrap();
        ui.insert_child(root, key).unwrap();
        assert_eq!(ui.find_by_id(7), Some(key));
        assert_eq!(ui.remove_child(root, 7), Some(key));
        assert_eq!(ui.find_by_id(7), None);
        assert!(ui.get(key).is_some(), "removed subtree stays alive");
        assert_eq!(ui.remove_child(root, 7), None);
    }

    #[test]
    fn insert_attached_node_fails() {
        let (mut ui, _) = ui();
        let root = ui.root();
        let a = ui.create(1, Panel::new()).unwrap();
        let b = ui.create(2, Panel::new()).unwrap();
        ui.insert_child(root, a).unwrap();
        ui.insert_child(root, b).unwrap();
        assert_eq!(ui.insert_child(b, a), Err(TreeError::AlreadyAttached(a)));
        assert_eq!(ui.insert_child(a, root), Err(TreeError::IsRoot(root)));
    }

    #[test]
    fn root_cannot_be_removed() {
        let (mut ui, _) = ui();
        let root = ui.root();
        assert_eq!(ui.remove_node(root), Err(TreeError::IsRoot(root)));
        assert_eq!(ui.destroy(root), Err(TreeError::IsRoot(root)));
    }

    #[test]
    fn destroy_frees_subtree() {
        let (mut ui, _) = ui();
        let root = ui.root();
        let a = ui.create(1, Panel::new()).unwrap();
        let b = ui.create(2, Panel::new()).unwrap();
        ui.insert_child(a, b).unwrap();
        ui.insert_child(root, a).unwrap();
        ui.destroy(a).unwrap();
        assert!(ui.get(a).is_none());
        assert!(ui.get(b).is_none());
        assert!(ui.children(root).is_empty());
    }

    #[test]
    fn malformed_style_leaves_node_untouched() {
        let (mut ui, _) = ui();
        let key = ui.create_styled(1, Panel::new(), "width:40").unwrap();
        let err = ui.set_style(key, "height:10;width:oops").unwrap_err();
        assert!(matches!(err, UiError::Style(_)));
        let style = ui.style(key).unwrap();
        assert_eq!(style.width, crate::css::Length::Px(40));
        assert_eq!(style.height, crate::css::Length::Auto);
    }

    #[test]
    fn style_change_relays_out_siblings() {
        let (mut ui, host) = ui();
        let root = ui.root();
        let a = ui.create_styled(1, Panel::new(), "width:50;height:fill").unwrap();
        let b = ui.create_styled(2, Panel::new(), "width:fill;height:fill").unwrap();
        ui.insert_child(root, a).unwrap();
        ui.insert_child(root, b).unwrap();
        ui.layout(Rect::new(0, 0, 200, 100));
        assert_eq!(ui.rect(b), Some(Rect::new(50, 0, 200, 100)));

        host.take_invalidations();
        let change = ui.set_style(a, "width:80").unwrap();
        assert_eq!(change, StyleChange::LAYOUT);
        assert_eq!(ui.rect(b), Some(Rect::new(80, 0, 200, 100)));
        assert_eq!(host.take_invalidations(), vec![Some(Rect::new(0, 0, 200, 100))]);

        assert_eq!(ui.set_style(a, "width:80").unwrap(), StyleChange::NONE);
        assert_eq!(ui.set_style(a, "color:red").unwrap(), StyleChange::PAINT);
        assert_eq!(host.take_invalidations(), vec![Some(Rect::new(0, 0, 80, 100))]);
    }

    #[test]
    fn reset_style_restores_default() {
        let (mut ui, _) = ui();
        let key = ui.create_styled(1, Panel::new(), "width:30").unwrap();
        assert_eq!(ui.reset_style(key), Ok(StyleChange::LAYOUT));
        assert_eq!(ui.style(key).map(|s| s.width), Some(crate::css::Length::Auto));
        assert_eq!(ui.reset_style(key), Ok(StyleChange::NONE));
    }

    #[test]
    fn invalidate_detached_is_noop() {
        let (mut ui, host) = ui();
        let key = ui.create(1, Panel::new()).unwrap();
        host.take_invalidations();
        ui.invalidate(key);
        assert!(host.take_invalidations().is_empty());
    }

    #[test]
    fn timers_replace_and_die_with_node() {
        let (mut ui, host) = ui();
        let root = ui.root();
        let key = ui.create(1, Panel::new()).unwrap();
        ui.insert_child(root, key).unwrap();
        let first = ui.set_timer(key, 100, 1).unwrap();
        let second = ui.set_timer(key, 100, 1).unwrap();
        assert_ne!(first, second);
        assert_eq!(host.running_timers(), vec![second]);

        ui.set_timer(key, 50, 2).unwrap();
        ui.remove_node(key).unwrap();
        assert!(host.running_timers().is_empty());
        assert!(!ui.kill_timer(key, 1));
    }

    #[test]
    fn gesture_toggle() {
        let (mut ui, _) = ui();
        assert_eq!(ui.gesture(), None);
        ui.enable_gesture(true).unwrap();
        let key = ui.gesture().unwrap();
        assert!(!ui.is_attached(key));
        assert_eq!(ui.get(key).map(|d| d.id), Some(GESTURE_ID));
        ui.enable_gesture(false).unwrap();
        assert_eq!(ui.gesture(), None);
        assert!(ui.get(key).is_none());
    }

    #[test]
    fn gesture_overlay_stays_floating() {
        let config = UiConfig::new().with_gesture_style("float:false;gesture-sensitivity:20");
        let mut ui = Ui::new(config, RecordingHost::new(), RecordingTarget::new()).unwrap();
        ui.enable_gesture(true).unwrap();
        let key = ui.gesture().unwrap();
        assert_eq!(ui.get(key).map(|d| d.style.is_float), Some(true));
    }
}
