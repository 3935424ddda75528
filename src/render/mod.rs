//! Rendering: the abstract drawing surface and the tree painter.

pub mod painter;
pub mod surface;

pub use surface::{HAlign, Surface, TextStyle, VAlign};
