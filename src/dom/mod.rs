//! Control tree arena: slotmap-backed node storage, mutation, and queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeKey};
pub use tree::{Dom, TreeError};
