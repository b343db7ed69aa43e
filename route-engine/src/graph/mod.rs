//! Graph store: owns the nodes and directed edges of one planning session.
//!
//! A [`RouteGraph`] is built fresh per planning request, populated once
//! from validated records, queried (possibly several times with different
//! criteria), and discarded. There is no update-in-place of existing
//! nodes or edges once queries begin.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Edge, Node, NodeId};

/// Errors from graph construction and lookup.
///
/// `Display` and `Error` are implemented by hand: thiserror would treat
/// the `UnknownEndpoint::source` field as an error source, but it is a
/// plain [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node with this id was already inserted
    DuplicateNode(NodeId),

    /// An edge references a node that was never inserted
    UnknownEndpoint {
        source: NodeId,
        target: NodeId,
        missing: NodeId,
    },

    /// A lookup references a node that was never inserted
    UnknownNode(NodeId),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateNode(id) => write!(f, "duplicate node id: {id}"),
            Self::UnknownEndpoint {
                source,
                target,
                missing,
            } => write!(f, "edge {source} -> {target} references unknown node {missing}"),
            Self::UnknownNode(id) => write!(f, "unknown node id: {id}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// In-memory store of nodes and their outgoing edges.
///
/// Invariant: every edge's endpoints resolve to nodes present in the
/// graph. Inserting an edge with an unknown endpoint is an error and
/// leaves the graph unmodified.
///
/// Per-source edge insertion order is preserved; the solver's
/// deterministic tie-breaking relies on it.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    nodes: HashMap<NodeId, Node>,
    /// One (possibly empty) outgoing list per inserted node.
    outgoing: HashMap<NodeId, Vec<Edge>>,
    edge_count: usize,
}

impl RouteGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node.
    ///
    /// Fails with [`GraphError::DuplicateNode`] if the id already exists;
    /// the existing node is never overwritten.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        trace!(%id, "node inserted");
        self.nodes.insert(id, node);
        self.outgoing.insert(id, Vec::new());
        Ok(())
    }

    /// Insert a directed edge.
    ///
    /// Fails with [`GraphError::UnknownEndpoint`] if either endpoint is
    /// not a known node. No reverse edge is created. Parallel edges
    /// between the same ordered pair are permitted.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (source, target) = (edge.source(), edge.target());
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    source,
                    target,
                    missing: endpoint,
                });
            }
        }
        trace!(%source, %target, "edge inserted");
        // Both endpoints exist, so the source's list does too.
        self.outgoing.entry(source).or_default().push(edge);
        self.edge_count += 1;
        Ok(())
    }

    /// The outgoing edges of a node, in insertion order.
    ///
    /// An empty slice is a valid answer; an absent node is
    /// [`GraphError::UnknownNode`].
    pub fn neighbors(&self, id: NodeId) -> Result<&[Edge], GraphError> {
        self.outgoing
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether a node with this id was inserted.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
