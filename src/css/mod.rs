//! Style engine: tokenizer, parser, typed properties, style record.

pub mod color;
pub mod scalar;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod styles;
pub mod properties;

pub use color::Color;
pub use properties::ExtraProperty;
pub use scalar::{EdgeValue, Edges, Length};
pub use styles::{Border, BorderEdge, BorderLine, FontWeight, PositionX, PositionY, Style, StyleChange, StyleError};
