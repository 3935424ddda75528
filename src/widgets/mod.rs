//! Built-in controls: Panel, Button, Slider, GestureOverlay.

pub mod panel;
pub mod button;
pub mod slider;
pub mod gesture;

pub use panel::Panel;
pub use button::Button;
pub use slider::Slider;
pub use gesture::{GestureOutcome, GestureOverlay};
