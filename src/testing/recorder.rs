//! Recording implementations of the host capabilities.
//!
//! [`RecordingHost`] and [`RecordingTarget`] are cheap handles around shared
//! state: clone one, hand the clone to the [`Ui`](crate::ui::Ui), and inspect
//! the original. [`RecordingSurface`] collects draw calls as [`DrawOp`]s whose
//! `Display` form is stable enough for snapshots.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::css::color::Color;
use crate::css::styles::{Border, FontWeight};
use crate::geometry::{Point, Rect};
use crate::host::{Host, Target, TimerToken};
use crate::render::surface::{HAlign, Surface, TextStyle, VAlign};

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct HostTimer {
    elapse: u64,
    due: u64,
}

#[derive(Debug, Default)]
struct HostState {
    invalidations: Vec<Option<Rect>>,
    captured: bool,
    timers: BTreeMap<TimerToken, HostTimer>,
    now: u64,
}

/// A [`Host`] with a manual clock that records every request.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repaint requests since the last call.
    pub fn take_invalidations(&self) -> Vec<Option<Rect>> {
        std::mem::take(&mut self.state.borrow_mut().invalidations)
    }

    /// Whether the window holds pointer capture.
    pub fn is_captured(&self) -> bool {
        self.state.borrow().captured
    }

    /// Tokens of all running timers, ascending.
    pub fn running_timers(&self) -> Vec<TimerToken> {
        self.state.borrow().timers.keys().copied().collect()
    }

    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    /// Move the clock without firing timers.
    pub fn set_now(&self, now: u64) {
        self.state.borrow_mut().now = now;
    }

    /// Earliest timer due at or before `until`, if any.
    ///
    /// The clock jumps to its due time and the timer is rescheduled, since
    /// host timers are periodic.
    pub fn pop_due(&self, until: u64) -> Option<TimerToken> {
        let mut state = self.state.borrow_mut();
        let (token, due) = state
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .map(|(&token, timer)| (token, timer.due))
            .min_by_key(|&(token, due)| (due, token))?;
        state.now = state.now.max(due);
        if let Some(timer) = state.timers.get_mut(&token) {
            timer.due += timer.elapse.max(1);
        }
        Some(token)
    }
}

impl Host for RecordingHost {
    fn invalidate(&mut self, rect: Option<Rect>) {
        self.state.borrow_mut().invalidations.push(rect);
    }

    fn set_capture(&mut self) {
        self.state.borrow_mut().captured = true;
    }

    fn release_capture(&mut self) {
        self.state.borrow_mut().captured = false;
    }

    fn set_timer(&mut self, token: TimerToken, elapse_ms: u32) {
        let mut state = self.state.borrow_mut();
        let elapse = u64::from(elapse_ms);
        let due = state.now + elapse;
        state.timers.insert(token, HostTimer { elapse, due });
    }

    fn kill_timer(&mut self, token: TimerToken) {
        self.state.borrow_mut().timers.remove(&token);
    }

    fn now_ms(&self) -> u64 {
        self.state.borrow().now
    }
}

// ---------------------------------------------------------------------------
// RecordingTarget
// ---------------------------------------------------------------------------

/// One notification received by a [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent {
    Gesture { gesture: String, pt: Point, committed: bool },
    Command(u32),
    Slider { id: u32, min: i32, max: i32, value: i32, tracking: bool },
}

/// A [`Target`] that records every notification.
///
/// Gesture labels are looked up in a table set with
/// [`with_label`](Self::with_label); unknown gestures echo themselves.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    events: Rc<RefCell<Vec<TargetEvent>>>,
    labels: HashMap<String, String>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `gesture` to a display label (builder).
    pub fn with_label(mut self, gesture: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(gesture.into(), label.into());
        self
    }

    /// Notifications since the last call.
    pub fn take_events(&self) -> Vec<TargetEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Target for RecordingTarget {
    fn on_gesture(&self, gesture: &str, pt: Point, committed: bool) -> String {
        self.events.borrow_mut().push(TargetEvent::Gesture {
            gesture: gesture.to_string(),
            pt,
            committed,
        });
        self.labels.get(gesture).cloned().unwrap_or_else(|| gesture.to_string())
    }

    fn on_command(&self, id: u32) {
        self.events.borrow_mut().push(TargetEvent::Command(id));
    }

    fn on_slider(&self, id: u32, min: i32, max: i32, value: i32, tracking: bool) {
        self.events.borrow_mut().push(TargetEvent::Slider { id, min, max, value, tracking });
    }
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color, opacity: u8 },
    Border { rect: Rect, widths: [i32; 4], opacity: u8 },
    Text { rect: Rect, text: String, style: TextStyle },
    Polyline { points: Vec<Point>, color: Color, width: i32 },
}

struct R(Rect);

impl fmt::Display for R {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(f, "({},{})-({},{})", r.left, r.top, r.right, r.bottom)
    }
}

fn h_align_name(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "left",
        HAlign::Center => "center",
        HAlign::Right => "right",
    }
}

fn v_align_name(align: VAlign) -> &'static str {
    match align {
        VAlign::Top => "top",
        VAlign::Center => "center",
        VAlign::Bottom => "bottom",
    }
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Fill { rect, color, opacity } => write!(f, "fill {} {color} {opacity}", R(*rect)),
            DrawOp::Border { rect, widths, opacity } => {
                let [t, r, b, l] = widths;
                write!(f, "border {} {t}/{r}/{b}/{l} {opacity}", R(*rect))
            }
            DrawOp::Text { rect, text, style } => {
                write!(f, "text {} {}", R(*rect), style.color)?;
                if style.weight == FontWeight::Bold {
                    write!(f, " bold")?;
                }
                write!(
                    f,
                    " {}/{} '{text}'",
                    h_align_name(style.h_align),
                    v_align_name(style.v_align)
                )
            }
            DrawOp::Polyline { points, color, width } => {
                write!(f, "polyline {color} w{width}")?;
                for p in points {
                    write!(f, " ({},{})", p.x, p.y)?;
                }
                Ok(())
            }
        }
    }
}

/// A [`Surface`] that records draw calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color, opacity: u8) {
        self.ops.push(DrawOp::Fill { rect, color, opacity });
    }

    fn draw_border(&mut self, rect: Rect, border: &Border, opacity: u8) {
        let widths = [border.top.width, border.right.width, border.bottom.width, border.left.width];
        self.ops.push(DrawOp::Border { rect, widths, opacity });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, style: &TextStyle) {
        self.ops.push(DrawOp::Text { rect, text: text.to_string(), style: *style });
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color, width: i32) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), color, width });
    }
}
