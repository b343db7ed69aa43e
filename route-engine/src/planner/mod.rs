//! Route planning over a populated graph.
//!
//! This module implements the core planning algorithms: a single-pair
//! weighted shortest-path solver (Dijkstra) and the waypoint router that
//! chains the solver over an ordered sequence of required stops.
//!
//! "No route exists" is an expected outcome reported as data
//! ([`PathOutcome::NoRoute`]); only malformed requests (unknown node ids)
//! use the error channel ([`PlanError`]).

mod dijkstra;
mod route;

pub use dijkstra::{NoRoute, PathOutcome, PlanError, Route, shortest_path};
pub use route::{Planner, RouteRequest};
