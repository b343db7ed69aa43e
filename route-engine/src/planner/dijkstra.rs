//! Single-pair weighted shortest-path search.
//!
//! Standard binary-heap Dijkstra over non-negative edge weights, with a
//! predecessor map for path reconstruction and an early exit when the
//! target is settled.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{Criterion, NodeId};
use crate::graph::RouteGraph;

/// Error for a malformed path query.
///
/// Distinct from "no route exists", which is not an error at all but the
/// [`PathOutcome::NoRoute`] arm of a successful query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The query references a node id that was never inserted
    #[error("query references unknown node id: {0}")]
    UnknownNode(NodeId),
}

/// A computed route: the node sequence and its accumulated weight under
/// the queried criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Ordered node ids from start to end, inclusive.
    pub path: Vec<NodeId>,

    /// Sum of the criterion weights along the path's edges.
    pub total_weight: f64,
}

impl Route {
    /// Display names of the path's nodes, for presentation.
    ///
    /// Nodes without an explicit name get their generated placeholder.
    pub fn named_path(&self, graph: &RouteGraph) -> Vec<String> {
        self.path
            .iter()
            .map(|id| match graph.node(*id) {
                Some(node) => node.display_name(),
                None => format!("Waypoint {id}"),
            })
            .collect()
    }

    /// Great-circle length of the route in kilometres, summed over
    /// consecutive node pairs.
    pub fn distance_km(&self, graph: &RouteGraph) -> f64 {
        self.path
            .windows(2)
            .filter_map(|pair| {
                let a = graph.node(pair[0])?;
                let b = graph.node(pair[1])?;
                Some(a.coordinates.distance_km(&b.coordinates))
            })
            .sum()
    }
}

/// Details of the leg that could not be connected.
///
/// For a direct (waypoint-free) query the failing leg is always leg 0,
/// start to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoRoute {
    /// Index of the failing leg within the stop sequence.
    pub leg_index: usize,

    /// The leg's origin.
    pub from: NodeId,

    /// The leg's unreachable destination.
    pub to: NodeId,
}

/// Outcome of a well-formed path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    /// A connecting route was found.
    Found(Route),

    /// The stops are disconnected under the queried criterion.
    NoRoute(NoRoute),
}

impl PathOutcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            PathOutcome::Found(route) => Some(route),
            PathOutcome::NoRoute(_) => None,
        }
    }

    /// Whether the query found no connecting route.
    pub fn is_no_route(&self) -> bool {
        matches!(self, PathOutcome::NoRoute(_))
    }
}

/// Frontier entry: a node with a tentative distance.
///
/// Ordered as a min-heap by distance, then by push sequence so that
/// equal distances pop in insertion order. That makes tie-breaking
/// deterministic: among equally-short paths, the one whose final edge
/// was relaxed first wins.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the smallest
        // distance (and, on ties, the earliest push) on top.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Compute the shortest path from `start` to `end` under `criterion`.
///
/// Returns [`PathOutcome::NoRoute`] when the nodes are disconnected;
/// fails with [`PlanError::UnknownNode`] when either id was never
/// inserted. `start == end` yields a single-node path of weight zero.
pub fn shortest_path(
    graph: &RouteGraph,
    start: NodeId,
    end: NodeId,
    criterion: Criterion,
) -> Result<PathOutcome, PlanError> {
    for id in [start, end] {
        if !graph.contains(id) {
            return Err(PlanError::UnknownNode(id));
        }
    }

    if start == end {
        return Ok(PathOutcome::Found(Route {
            path: vec![start],
            total_weight: 0.0,
        }));
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut seq: u64 = 0;

    distances.insert(start, 0.0);
    frontier.push(FrontierEntry {
        distance: 0.0,
        seq,
        node: start,
    });

    let mut settled = 0usize;

    while let Some(FrontierEntry { distance, node, .. }) = frontier.pop() {
        if node == end {
            let route = reconstruct(&previous, start, end, distance);
            debug!(%start, %end, %criterion, weight = distance, settled, "route found");
            return Ok(PathOutcome::Found(route));
        }

        // Stale entry: this node was re-pushed with a smaller distance.
        if distances.get(&node).is_some_and(|&best| distance > best) {
            continue;
        }
        settled += 1;

        let edges = graph
            .neighbors(node)
            .map_err(|_| PlanError::UnknownNode(node))?;
        for edge in edges {
            if edge.is_self_loop() {
                continue;
            }
            let target = edge.target();
            let candidate = distance + edge.weight(criterion);
            // Strict improvement only: on ties the first-relaxed edge
            // keeps its predecessor.
            let improved = match distances.get(&target) {
                Some(&best) => candidate < best,
                None => true,
            };
            if improved {
                trace!(%node, %target, candidate, "relaxed");
                distances.insert(target, candidate);
                previous.insert(target, node);
                seq += 1;
                frontier.push(FrontierEntry {
                    distance: candidate,
                    seq,
                    node: target,
                });
            }
        }
    }

    debug!(%start, %end, %criterion, settled, "no route");
    Ok(PathOutcome::NoRoute(NoRoute {
        leg_index: 0,
        from: start,
        to: end,
    }))
}

/// Follow predecessor pointers from end back to start and reverse.
fn reconstruct(
    previous: &HashMap<NodeId, NodeId>,
    start: NodeId,
    end: NodeId,
    total_weight: f64,
) -> Route {
    let mut path = vec![end];
    let mut at = end;
    while at != start {
        // The predecessor chain is complete for any settled node.
        match previous.get(&at) {
            Some(&prev) => {
                path.push(prev);
                at = prev;
            }
            None => break,
        }
    }
    path.reverse();
    Route { path, total_weight }
}
