//! GestureOverlay: right-button mouse gestures.
//!
//! A right press inserts the overlay as the topmost child of the root and
//! captures the pointer. Each move of at least `gesture-sensitivity` pixels
//! on either axis records a point and appends its dominant direction (`L`,
//! `R`, `U`, `D`) unless it repeats the last letter. A pause longer than
//! `gesture-timeout` marks the gesture as timed out.
//!
//! On release the overlay removes itself and either commits the gesture to
//! the target, replays a plain right click to the controls underneath (no
//! movement at all), or drops it (timed out).

use std::any::Any;

use tracing::{debug, warn};

use crate::css::properties::ExtraProperty;
use crate::event::input::{KeyState, MouseButton};
use crate::geometry::Point;
use crate::render::surface::{HAlign, Surface, TextStyle, VAlign};
use crate::widget::context::{EventCtx, PaintCtx};
use crate::widget::traits::Control;

pub const DEFAULT_SENSITIVITY: i32 = 10;
pub const DEFAULT_TIMEOUT_MS: i32 = 1000;
pub const DEFAULT_LINE_WIDTH: i32 = 5;

/// Label passed to the target while the gesture is timed out.
pub const CANCELED: &str = "canceled";

const TIMER_ID: u32 = 1;

const EXTRAS: &[ExtraProperty] = &[
    ExtraProperty::behavior("gesture-sensitivity", 1),
    ExtraProperty::behavior("gesture-timeout", 1),
    ExtraProperty::paint("gesture-line-width", 0),
];

/// How the last gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Reported to the target as final.
    Committed(String),
    /// No movement: the right click was replayed underneath.
    PassThrough,
    /// Timed out, or taken away by a capture loss.
    Dropped,
}

/// Direction letter for a move of `(dx, dy)`. Horizontal wins only when
/// strictly dominant.
pub fn direction(dx: i32, dy: i32) -> char {
    if dx.abs() > dy.abs() {
        if dx > 0 {
            'R'
        } else {
            'L'
        }
    } else if dy > 0 {
        'D'
    } else {
        'U'
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureOverlay {
    points: Vec<Point>,
    gesture: String,
    timed_out: bool,
    last_move: Option<u64>,
    outcome: Option<GestureOutcome>,
}

impl GestureOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a right drag is in progress.
    pub fn is_tracking(&self) -> bool {
        !self.points.is_empty()
    }

    /// Direction letters recorded so far.
    pub fn gesture(&self) -> &str {
        &self.gesture
    }

    /// Points recorded so far, starting with the press point.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    /// How the most recent gesture ended.
    pub fn outcome(&self) -> Option<&GestureOutcome> {
        self.outcome.as_ref()
    }

    fn reset(&mut self) {
        self.points.clear();
        self.gesture.clear();
        self.timed_out = false;
        self.last_move = None;
    }

    /// Leave the tree after the drag ended or was taken away.
    fn detach(ctx: &mut EventCtx<'_>) {
        ctx.kill_timer(TIMER_ID);
        if ctx.is_attached() {
            let node = ctx.node();
            if let Err(err) = ctx.ui_mut().remove_node(node) {
                warn!(%err, "gesture overlay could not be removed");
            }
        }
    }

    /// Replay a right click to the controls under the press and release
    /// points.
    fn pass_through(ctx: &mut EventCtx<'_>, down: Point, up: Point, keys: KeyState) {
        let ui = ctx.ui_mut();
        if let Some(node) = ui.control_at(down) {
            ui.dispatch(node, |control, ctx| {
                control.on_button_down(ctx, down, MouseButton::Right, keys | KeyState::RBUTTON)
            });
        }
        if let Some(node) = ui.control_at(up) {
            ui.dispatch(node, |control, ctx| control.on_button_up(ctx, up, MouseButton::Right, keys));
        }
    }
}

impl Control for GestureOverlay {
    fn control_type(&self) -> &'static str {
        "GestureOverlay"
    }

    fn default_style(&self) -> &str {
        "px:left;py:top;width:fill;height:fill;float:true;color:#ff0000;\
         gesture-sensitivity:10;gesture-timeout:1000;gesture-line-width:5;"
    }

    fn extra_properties(&self) -> &'static [ExtraProperty] {
        EXTRAS
    }

    fn draw(&self, ctx: &PaintCtx<'_>, surface: &mut dyn Surface) {
        if self.points.len() <= 1 {
            return;
        }
        let start = self.points[0];
        let style = ctx.style();
        let line_width = ctx.extra("gesture-line-width").unwrap_or(DEFAULT_LINE_WIDTH);
        if line_width > 0 {
            surface.draw_polyline(&self.points, style.color, line_width);
        }

        let live = if self.timed_out { CANCELED } else { self.gesture.as_str() };
        let label = format!("{} ({})", self.gesture, ctx.target().on_gesture(live, start, false));
        let text = TextStyle::from_style(style).aligned(HAlign::Center, VAlign::Bottom);
        surface.draw_text(ctx.client_rect(), &label, &text);
    }

    fn on_button_down(&mut self, ctx: &mut EventCtx<'_>, pt: Point, button: MouseButton, _keys: KeyState) {
        if button != MouseButton::Right {
            return;
        }
        if !ctx.is_attached() {
            let root = ctx.ui().root();
            let node = ctx.node();
            if let Err(err) = ctx.ui_mut().insert_child(root, node) {
                warn!(%err, "gesture overlay could not be inserted");
                return;
            }
        }
        ctx.set_capture(true);
        self.reset();
        self.points.push(pt);
        self.outcome = None;
    }

    fn on_mouse_move(&mut self, ctx: &mut EventCtx<'_>, pt: Point, _keys: KeyState) {
        let Some(&last) = self.points.last() else {
            return;
        };
        let sensitivity = ctx.extra("gesture-sensitivity").unwrap_or(DEFAULT_SENSITIVITY);
        let (dx, dy) = (pt.x - last.x, pt.y - last.y);
        if dx.abs() < sensitivity && dy.abs() < sensitivity {
            return;
        }

        let timeout = ctx.extra("gesture-timeout").unwrap_or(DEFAULT_TIMEOUT_MS);
        self.timed_out = false;
        ctx.set_timer(timeout.max(1) as u32, TIMER_ID);
        self.last_move = Some(ctx.now_ms());

        let letter = direction(dx, dy);
        if !self.gesture.ends_with(letter) {
            self.gesture.push(letter);
        }
        self.points.push(pt);
        ctx.invalidate();
    }

    fn on_timer(&mut self, ctx: &mut EventCtx<'_>, id: u32) {
        if id != TIMER_ID {
            return;
        }
        ctx.kill_timer(TIMER_ID);
        self.timed_out = true;
        ctx.invalidate();
    }

    fn on_button_up(&mut self, ctx: &mut EventCtx<'_>, pt: Point, button: MouseButton, keys: KeyState) {
        if button != MouseButton::Right {
            return;
        }
        let Some(&down) = self.points.first() else {
            return;
        };
        let single_point = self.points.len() == 1;
        let gesture = std::mem::take(&mut self.gesture);
        let timed_out = self.timed_out;
        let last_move = self.last_move;

        ctx.set_capture(false);
        Self::detach(ctx);
        self.reset();

        let timeout = ctx.extra("gesture-timeout").unwrap_or(DEFAULT_TIMEOUT_MS);
        let now = ctx.now_ms();
        let in_time = last_move.is_some_and(|t| now.saturating_sub(t) < timeout.max(1) as u64);

        let outcome = if in_time && !timed_out {
            debug!(%gesture, "gesture committed");
            ctx.target().on_gesture(&gesture, down, true);
            GestureOutcome::Committed(gesture)
        } else if single_point && !timed_out {
            debug!(?down, ?pt, "gesture passed through as right click");
            Self::pass_through(ctx, down, pt, keys);
            GestureOutcome::PassThrough
        } else {
            debug!(%gesture, "gesture dropped");
            GestureOutcome::Dropped
        };
        self.outcome = Some(outcome);
    }

    fn on_lost_capture(&mut self, ctx: &mut EventCtx<'_>) {
        if !self.is_tracking() {
            return;
        }
        debug!(gesture = %self.gesture, "gesture canceled by capture loss");
        Self::detach(ctx);
        self.reset();
        self.outcome = Some(GestureOutcome::Dropped);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::node::NodeKey;
    use crate::geometry::Rect;
    use crate::testing::{Pilot, TargetEvent};
    use crate::ui::UiConfig;

    fn pilot() -> Pilot {
        Pilot::new(UiConfig::new().with_gesture(true), Rect::new(0, 0, 300, 200)).unwrap()
    }

    fn overlay(pilot: &Pilot) -> &GestureOverlay {
        let key = pilot.ui().gesture().unwrap();
        pilot.ui().control::<GestureOverlay>(key).unwrap()
    }

    #[test]
    fn direction_letters() {
        assert_eq!(direction(10, 0), 'R');
        assert_eq!(direction(-10, 3), 'L');
        assert_eq!(direction(2, 10), 'D');
        assert_eq!(direction(0, -10), 'U');
        // Ties go vertical.
        assert_eq!(direction(10, 10), 'D');
    }

    #[test]
    fn default_tunables() {
        let pilot = pilot();
        let key = pilot.ui().gesture().unwrap();
        let style = pilot.ui().style(key).unwrap();
        assert_eq!(style.extra("gesture-sensitivity"), Some(DEFAULT_SENSITIVITY));
        assert_eq!(style.extra("gesture-timeout"), Some(DEFAULT_TIMEOUT_MS));
        assert_eq!(style.extra("gesture-line-width"), Some(DEFAULT_LINE_WIDTH));
        assert!(style.is_float);
    }

    #[test]
    fn tunables_reject_values_below_minimum() {
        let mut pilot = pilot();
        let key = pilot.ui().gesture().unwrap();
        assert!(pilot.ui_mut().set_style(key, "gesture-timeout:0").is_err());
        assert!(pilot.ui_mut().set_style(key, "gesture-line-width:0").is_ok());
    }

    #[test]
    fn right_press_inserts_overlay_and_captures() {
        let mut pilot = pilot();
        let key = pilot.ui().gesture().unwrap();
        pilot.press(Point::new(10, 10), MouseButton::Right);
        assert!(pilot.ui().is_attached(key));
        assert_eq!(pilot.ui().capture(), Some(key));
        assert_eq!(pilot.ui().rect(key), Some(Rect::new(0, 0, 300, 200)));
        assert_eq!(overlay(&pilot).points(), &[Point::new(10, 10)]);
    }

    #[test]
    fn straight_drag_commits_r() {
        let mut pilot = pilot();
        pilot.right_drag(&[Point::new(0, 0), Point::new(50, 0), Point::new(100, 0)]);
        assert_eq!(
            pilot.target_events(),
            vec![TargetEvent::Gesture { gesture: "R".into(), pt: Point::new(0, 0), committed: true }]
        );
        assert_eq!(overlay(&pilot).outcome(), Some(&GestureOutcome::Committed("R".into())));
        let key: NodeKey = pilot.ui().gesture().unwrap();
        assert!(!pilot.ui().is_attached(key));
        assert_eq!(pilot.ui().capture(), None);
        assert!(pilot.host().running_timers().is_empty());
    }

    #[test]
    fn reversing_drag_commits_rl() {
        let mut pilot = pilot();
        pilot.right_drag(&[Point::new(100, 50), Point::new(150, 50), Point::new(180, 52), Point::new(120, 50)]);
        assert_eq!(overlay(&pilot).outcome(), Some(&GestureOutcome::Committed("RL".into())));
    }

    #[test]
    fn small_moves_are_ignored() {
        let mut pilot = pilot();
        pilot.press(Point::new(50, 50), MouseButton::Right);
        pilot.move_to(Point::new(59, 41));
        assert_eq!(overlay(&pilot).points().len(), 1);
        pilot.move_to(Point::new(60, 50));
        assert_eq!(overlay(&pilot).gesture(), "R");
    }

    #[test]
    fn timeout_drops_gesture() {
        let mut pilot = pilot();
        pilot.press(Point::new(10, 10), MouseButton::Right);
        pilot.move_to(Point::new(60, 10));
        pilot.advance(1000);
        assert!(overlay(&pilot).is_timed_out());
        pilot.release(Point::new(60, 10), MouseButton::Right);
        assert!(pilot.target_events().is_empty());
        assert_eq!(overlay(&pilot).outcome(), Some(&GestureOutcome::Dropped));
    }

    #[test]
    fn release_after_timeout_window_without_timer_is_dropped() {
        let mut pilot = pilot();
        pilot.press(Point::new(10, 10), MouseButton::Right);
        pilot.move_to(Point::new(60, 10));
        pilot.host().set_now(pilot.host().now() + 1500);
        pilot.release(Point::new(60, 10), MouseButton::Right);
        assert_eq!(overlay(&pilot).outcome(), Some(&GestureOutcome::Dropped));
    }

    #[test]
    fn live_label_shows_canceled_after_timeout() {
        let mut pilot = pilot();
        pilot.press(Point::new(10, 10), MouseButton::Right);
        pilot.move_to(Point::new(60, 10));
        assert!(pilot.paint().contains("'R (R)'"));
        pilot.advance(1000);
        assert!(pilot.paint().contains("'R (canceled)'"));
        assert!(pilot
            .target_events()
            .contains(&TargetEvent::Gesture { gesture: CANCELED.into(), pt: Point::new(10, 10), committed: false }));
    }

    #[test]
    fn click_without_movement_passes_through() {
        let mut pilot = pilot();
        let slider = pilot.add(4, crate::widgets::Slider::new(0, 10, 0), "width:fill").unwrap();
        pilot.press(Point::new(20, 5), MouseButton::Right);
        pilot.release(Point::new(20, 5), MouseButton::Right);
        assert_eq!(overlay(&pilot).outcome(), Some(&GestureOutcome::PassThrough));
        assert!(pilot.ui().is_attached(slider));
        assert_eq!(pilot.ui().capture(), None);
    }

    #[test]
    fn capture_loss_cancels_gesture() {
        let mut pilot = pilot();
        let key = pilot.ui().gesture().unwrap();
        pilot.move_to(Point::new(10, 10));
        pilot.press(Point::new(10, 10), MouseButton::Right);
        pilot.move_to(Point::new(60, 10));
        pilot.capture_lost();
        assert!(!pilot.ui().is_attached(key));
        assert!(!overlay(&pilot).is_tracking());
        assert!(pilot.host().running_timers().is_empty());
        pilot.release(Point::new(60, 10), MouseButton::Right);
        assert!(pilot.target_events().is_empty());
    }
}
