//! Boundary records and graph building.
//!
//! The upstream geocoding/HTTP layer, which lives outside this crate,
//! hands the engine loosely-typed node and edge records. This module
//! validates them into domain types before anything reaches the graph
//! store:
//! malformed records are rejected with a typed error, never coerced to
//! defaults.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinates, Edge, InvalidCoordinates, InvalidWeight, Node, NodeId};
use crate::graph::{GraphError, RouteGraph};

/// A node record as produced by the upstream parser.
///
/// Field names match the upstream JSON shape
/// (`{id, latitude, longitude, name?}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

/// An edge record as produced by the upstream parser
/// (`{source, target, time, cost}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub source: i64,
    pub target: i64,
    pub time: f64,
    pub cost: f64,
}

/// Errors from validating records and assembling the graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A record carries an id outside the node id range
    #[error("id {0} is out of range for a node id")]
    IdOutOfRange(i64),

    /// A node record carries invalid coordinates
    #[error("node record {id}: {reason}")]
    InvalidNode {
        id: i64,
        reason: InvalidCoordinates,
    },

    /// An edge record carries an invalid weight
    #[error("edge record {from_id} -> {to_id}: {reason}")]
    InvalidEdge {
        from_id: i64,
        to_id: i64,
        reason: InvalidWeight,
    },

    /// The validated records violated a graph invariant
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn node_id(raw: i64) -> Result<NodeId, BuildError> {
    u32::try_from(raw)
        .map(NodeId)
        .map_err(|_| BuildError::IdOutOfRange(raw))
}

impl NodeRecord {
    /// Validate this record into a domain node.
    pub fn to_node(&self) -> Result<Node, BuildError> {
        let id = node_id(self.id)?;
        let coordinates =
            Coordinates::new(self.latitude, self.longitude).map_err(|reason| {
                BuildError::InvalidNode {
                    id: self.id,
                    reason,
                }
            })?;
        Ok(match &self.name {
            Some(name) => Node::named(id, coordinates, name.clone()),
            None => Node::new(id, coordinates),
        })
    }
}

impl EdgeRecord {
    /// Validate this record into a domain edge.
    pub fn to_edge(&self) -> Result<Edge, BuildError> {
        let source = node_id(self.source)?;
        let target = node_id(self.target)?;
        Edge::new(source, target, self.time, self.cost).map_err(|reason| {
            BuildError::InvalidEdge {
                from_id: self.source,
                to_id: self.target,
                reason,
            }
        })
    }
}

/// Validate records and build a fresh graph from them.
///
/// Fails on the first malformed record, duplicate node id, or dangling
/// edge endpoint. On success every record is present in the returned
/// graph.
pub fn build_graph(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Result<RouteGraph, BuildError> {
    let mut graph = RouteGraph::new();
    for record in nodes {
        graph.add_node(record.to_node()?)?;
    }
    for record in edges {
        graph.add_edge(record.to_edge()?)?;
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built from records"
    );
    Ok(graph)
}
