//! Event system: raw input, pointer routing, timers.

pub mod input;
pub mod router;
pub mod timer;

pub use input::{InputEvent, KeyState, MouseButton};
pub use router::RouterState;
pub use timer::TimerTable;
