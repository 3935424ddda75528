//! Control system: the Control trait and its callback contexts.

pub mod traits;
pub mod context;

pub use context::{EventCtx, PaintCtx};
pub use traits::Control;
