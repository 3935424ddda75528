//! Pilot: programmatic interaction with a headless [`Ui`].
//!
//! The `Pilot` owns a [`Ui`] wired to a [`RecordingHost`] and a
//! [`RecordingTarget`], and provides methods to simulate pointer input,
//! advance the clock, and paint the tree to text for snapshot testing.

use crate::dom::node::NodeKey;
use crate::event::input::{InputEvent, KeyState, MouseButton};
use crate::geometry::{Point, Rect};
use crate::testing::recorder::{RecordingHost, RecordingTarget, TargetEvent};
use crate::testing::snapshot::paint_to_string;
use crate::ui::{Ui, UiConfig, UiError};
use crate::widget::traits::Control;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless window driver for testing.
///
/// # Examples
///
/// ```ignore
/// use ctrl_tree::testing::{Pilot, TargetEvent};
/// use ctrl_tree::widgets::Button;
///
/// let mut pilot = Pilot::new(UiConfig::new(), Rect::new(0, 0, 200, 100))?;
/// pilot.add(7, Button::new("OK"), "width:80;height:30")?;
/// pilot.click(Point::new(10, 10));
/// assert_eq!(pilot.target_events(), vec![TargetEvent::Command(7)]);
/// ```
pub struct Pilot {
    ui: Ui,
    host: RecordingHost,
    target: RecordingTarget,
    area: Rect,
    keys: KeyState,
}

impl Pilot {
    /// Create a headless window laid out over `area`.
    pub fn new(config: UiConfig, area: Rect) -> Result<Self, UiError> {
        Self::with_target(config, area, RecordingTarget::new())
    }

    /// Like [`new`](Self::new) with a preconfigured target (e.g. gesture labels).
    pub fn with_target(config: UiConfig, area: Rect, target: RecordingTarget) -> Result<Self, UiError> {
        let host = RecordingHost::new();
        let mut ui = Ui::new(config, host.clone(), target.clone())?;
        ui.layout(area);
        host.take_invalidations();
        Ok(Self {
            ui,
            host,
            target,
            area,
            keys: KeyState::NONE,
        })
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Create a styled control and append it to the root.
    pub fn add(&mut self, id: u32, control: impl Control + 'static, style: &str) -> Result<NodeKey, UiError> {
        let root = self.ui.root();
        self.add_to(root, id, control, style)
    }

    /// Create a styled control and append it to `parent`.
    pub fn add_to(
        &mut self,
        parent: NodeKey,
        id: u32,
        control: impl Control + 'static,
        style: &str,
    ) -> Result<NodeKey, UiError> {
        let key = self.ui.create_styled(id, control, style)?;
        self.ui.insert_child(parent, key)?;
        Ok(key)
    }

    /// Lay the tree out over a new window area.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.ui.layout(area);
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn move_to(&mut self, pt: Point) {
        self.ui.handle(InputEvent::PointerMove { pt, keys: self.keys });
    }

    pub fn press(&mut self, pt: Point, button: MouseButton) {
        self.keys = self.keys | button.key_state();
        self.ui.handle(InputEvent::ButtonDown { pt, button, keys: self.keys });
    }

    pub fn release(&mut self, pt: Point, button: MouseButton) {
        self.keys = KeyState(self.keys.0 & !button.key_state().0);
        self.ui.handle(InputEvent::ButtonUp { pt, button, keys: self.keys });
    }

    /// Move to `pt`, then press and release the left button there.
    pub fn click(&mut self, pt: Point) {
        self.move_to(pt);
        self.press(pt, MouseButton::Left);
        self.release(pt, MouseButton::Left);
    }

    /// Press the right button at the first point, move through the rest and
    /// release at the last one.
    pub fn right_drag(&mut self, path: &[Point]) {
        let Some((&first, rest)) = path.split_first() else {
            return;
        };
        self.press(first, MouseButton::Right);
        for &pt in rest {
            self.move_to(pt);
        }
        let last = rest.last().copied().unwrap_or(first);
        self.release(last, MouseButton::Right);
    }

    pub fn wheel(&mut self, pt: Point, delta: i32) {
        self.ui.handle(InputEvent::Wheel { pt, delta, keys: self.keys });
    }

    /// Simulate another window stealing pointer capture.
    pub fn capture_lost(&mut self) {
        self.keys = KeyState::NONE;
        self.ui.handle(InputEvent::CaptureLost);
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Advance the clock by `ms`, delivering every timer that comes due in
    /// order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.host.now() + ms;
        while let Some(token) = self.host.pop_due(until) {
            self.ui.handle(InputEvent::Timer(token));
        }
        self.host.set_now(until);
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Target notifications since the last call.
    pub fn target_events(&mut self) -> Vec<TargetEvent> {
        self.target.take_events()
    }

    /// Paint the whole window to text.
    pub fn paint(&self) -> String {
        paint_to_string(&self.ui, self.area)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::widgets::Panel;

    #[test]
    fn new_lays_out_root() {
        let pilot = Pilot::new(UiConfig::new(), Rect::new(0, 0, 40, 30)).unwrap();
        assert_eq!(pilot.ui().rect(pilot.ui().root()), Some(Rect::new(0, 0, 40, 30)));
        assert!(pilot.host().take_invalidations().is_empty());
    }

    #[test]
    fn add_appends_to_root() {
        let mut pilot = Pilot::new(UiConfig::new(), Rect::new(0, 0, 40, 30)).unwrap();
        let key = pilot.add(2, Panel::new(), "height:10").unwrap();
        assert_eq!(pilot.ui().parent(key), Some(pilot.ui().root()));
        assert_eq!(pilot.ui().rect(key), Some(Rect::new(0, 0, 40, 10)));
    }

    #[test]
    fn resize_relays_out() {
        let mut pilot = Pilot::new(UiConfig::new(), Rect::new(0, 0, 40, 30)).unwrap();
        let key = pilot.add(2, Panel::new(), "height:10").unwrap();
        pilot.resize(Rect::new(0, 0, 80, 30));
        assert_eq!(pilot.ui().rect(key), Some(Rect::new(0, 0, 80, 10)));
    }

    #[test]
    fn advance_moves_clock() {
        let mut pilot = Pilot::new(UiConfig::new(), Rect::new(0, 0, 40, 30)).unwrap();
        pilot.advance(250);
        assert_eq!(pilot.host().now(), 250);
        assert_eq!(pilot.ui().now_ms(), 250);
    }
}
