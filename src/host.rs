//! Capabilities the embedding application provides.
//!
//! [`Host`] is the native window: repaint requests, pointer capture, timers
//! and a millisecond clock. [`Target`] receives the high-level notifications
//! controls produce (commands, slider values, gestures).

use std::fmt;

use crate::geometry::{Point, Rect};

/// Host-side timer handle. Allocated by the [`Ui`](crate::ui::Ui), unique per
/// live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u32);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// The native window the control tree lives in.
pub trait Host {
    /// Request a repaint of `rect`, or of the whole window for `None`.
    fn invalidate(&mut self, rect: Option<Rect>);

    /// Route all pointer input to this window until released.
    fn set_capture(&mut self);

    fn release_capture(&mut self);

    /// Start a periodic timer. Each expiry must be delivered back as
    /// [`InputEvent::Timer`](crate::event::InputEvent::Timer) with `token`.
    /// Starting a token that is already running restarts it.
    fn set_timer(&mut self, token: TimerToken, elapse_ms: u32);

    fn kill_timer(&mut self, token: TimerToken);

    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Receiver of control notifications, implemented by the application.
pub trait Target {
    /// A gesture in progress (`committed == false`) or completed
    /// (`committed == true`). Returns the label shown by the overlay.
    fn on_gesture(&self, gesture: &str, _pt: Point, _committed: bool) -> String {
        gesture.to_string()
    }

    /// A button was clicked.
    fn on_command(&self, _id: u32) {}

    /// A slider value changed. `tracking` is true while the thumb is dragged.
    fn on_slider(&self, _id: u32, _min: i32, _max: i32, _value: i32, _tracking: bool) {}
}

/// A [`Target`] that keeps every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl Target for NullTarget {}
