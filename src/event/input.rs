//! Raw input events delivered by the host window.
//!
//! Defines [`InputEvent`], [`MouseButton`] and the [`KeyState`] bitmask that
//! accompanies pointer events.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Point;
use crate::host::TimerToken;

// ---------------------------------------------------------------------------
// KeyState
// ---------------------------------------------------------------------------

/// Modifier keys and mouse buttons held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyState(pub u8);

impl KeyState {
    pub const NONE: KeyState = KeyState(0);
    pub const CONTROL: KeyState = KeyState(0x01);
    pub const LBUTTON: KeyState = KeyState(0x02);
    pub const MBUTTON: KeyState = KeyState(0x04);
    pub const RBUTTON: KeyState = KeyState(0x08);
    pub const SHIFT: KeyState = KeyState(0x10);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: KeyState) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for KeyState {
    type Output = KeyState;
    fn bitor(self, rhs: Self) -> Self::Output {
        KeyState(self.0 | rhs.0)
    }
}

impl BitAnd for KeyState {
    type Output = KeyState;
    fn bitand(self, rhs: Self) -> Self::Output {
        KeyState(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// MouseButton
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The [`KeyState`] bit for this button.
    pub fn key_state(self) -> KeyState {
        match self {
            MouseButton::Left => KeyState::LBUTTON,
            MouseButton::Right => KeyState::RBUTTON,
            MouseButton::Middle => KeyState::MBUTTON,
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerMove { pt: Point, keys: KeyState },
    ButtonDown { pt: Point, button: MouseButton, keys: KeyState },
    ButtonUp { pt: Point, button: MouseButton, keys: KeyState },
    /// `delta` is positive away from the user.
    Wheel { pt: Point, delta: i32, keys: KeyState },
    Timer(TimerToken),
    /// The window lost pointer capture to someone else.
    CaptureLost,
}

impl InputEvent {
    /// The pointer position, for pointer events.
    pub fn point(&self) -> Option<Point> {
        match *self {
            InputEvent::PointerMove { pt, .. }
            | InputEvent::ButtonDown { pt, .. }
            | InputEvent::ButtonUp { pt, .. }
            | InputEvent::Wheel { pt, .. } => Some(pt),
            InputEvent::Timer(_) | InputEvent::CaptureLost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_bit_ops() {
        let keys = KeyState::CONTROL | KeyState::LBUTTON;
        assert!(keys.contains(KeyState::CONTROL));
        assert!(keys.contains(KeyState::LBUTTON));
        assert!(!keys.contains(KeyState::SHIFT));
        assert_eq!(keys & KeyState::LBUTTON, KeyState::LBUTTON);
        assert!(KeyState::NONE.is_empty());
        assert!(KeyState::default().is_empty());
    }

    #[test]
    fn button_key_state() {
        assert_eq!(MouseButton::Left.key_state(), KeyState::LBUTTON);
        assert_eq!(MouseButton::Right.key_state(), KeyState::RBUTTON);
        assert_eq!(MouseButton::Middle.key_state(), KeyState::MBUTTON);
    }

    #[test]
    fn event_point() {
        let pt = Point::new(3, 4);
        assert_eq!(InputEvent::PointerMove { pt, keys: KeyState::NONE }.point(), Some(pt));
        assert_eq!(
            InputEvent::Wheel { pt, delta: 120, keys: KeyState::NONE }.point(),
            Some(pt)
        );
        assert_eq!(InputEvent::Timer(TimerToken(1)).point(), None);
        assert_eq!(InputEvent::CaptureLost.point(), None);
    }
}
