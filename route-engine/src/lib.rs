//! Route-graph engine.
//!
//! Given geographic nodes and weighted directed edges, computes an optimal
//! path between two nodes — optionally via an ordered sequence of
//! waypoints — under a caller-selected criterion (time or cost).
//!
//! The engine is computation-only: the upstream collaborator that fetches
//! and parses route data hands it validated records (see [`records`]), and
//! the downstream presentation layer consumes the resulting path.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod records;
