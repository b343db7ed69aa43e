//! Directed, weighted edges.

use super::{Criterion, NodeId};

/// Error returned when constructing an edge with an invalid weight.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid edge weight: {reason}")]
pub struct InvalidWeight {
    reason: &'static str,
}

/// A directed edge with one weight per optimization criterion.
///
/// An edge from A to B says nothing about reachability from B to A.
/// Multiple parallel edges between the same ordered pair are legal; the
/// solver considers all of them.
///
/// Weights are guaranteed non-negative and finite by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    time: f64,
    cost: f64,
}

impl Edge {
    /// Create an edge with the given per-criterion weights.
    ///
    /// Both weights must be non-negative and finite.
    pub fn new(source: NodeId, target: NodeId, time: f64, cost: f64) -> Result<Self, InvalidWeight> {
        for weight in [time, cost] {
            if !weight.is_finite() {
                return Err(InvalidWeight {
                    reason: "weights must be finite",
                });
            }
            if weight < 0.0 {
                return Err(InvalidWeight {
                    reason: "weights must be non-negative",
                });
            }
        }
        Ok(Edge {
            source,
            target,
            time,
            cost,
        })
    }

    /// The edge's origin node.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The edge's destination node.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Traversal time weight.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Traversal cost weight.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The weight selected by a criterion.
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Time => self.time,
            Criterion::Cost => self.cost,
        }
    }

    /// Whether source and target are the same node.
    ///
    /// Self-loops never improve a shortest path under non-negative
    /// weights, so the solver skips them.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
