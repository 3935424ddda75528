//! Dock layout: box-model resolution and the recursive layout pass.

pub mod engine;
pub mod resolve;

pub use engine::LayoutEngine;
pub use resolve::{IntrinsicSize, Placement};
