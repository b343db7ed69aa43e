//! Domain types for the route engine.
//!
//! This module contains the core types that represent validated graph
//! data. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod criterion;
mod edge;
mod node;

pub use criterion::{Criterion, UnknownCriterion};
pub use edge::{Edge, InvalidWeight};
pub use node::{Coordinates, InvalidCoordinates, Node, NodeId};
