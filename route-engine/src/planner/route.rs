//! Waypoint-constrained route planning.
//!
//! Chains the shortest-path solver over an ordered stop sequence
//! `[start, w1, .., wk, end]` and concatenates the legs, eliding the
//! duplicated seam node between consecutive legs.
//!
//! Waypoint order is fixed as given by the caller. Reordering waypoints
//! for a cheaper overall tour is a different combinatorial problem and is
//! deliberately not attempted here.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Criterion, NodeId};
use crate::graph::RouteGraph;

use super::dijkstra::{NoRoute, PathOutcome, PlanError, Route, shortest_path};

/// A route query: start, ordered intermediate waypoints, end, and the
/// criterion to minimize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteRequest {
    /// Route start node.
    pub start: NodeId,

    /// Required intermediate stops, visited in this order.
    #[serde(default)]
    pub waypoints: Vec<NodeId>,

    /// Route end node.
    pub end: NodeId,

    /// Which edge weight to minimize.
    pub criterion: Criterion,
}

impl RouteRequest {
    /// A direct query with no intermediate stops.
    pub fn direct(start: NodeId, end: NodeId, criterion: Criterion) -> Self {
        Self {
            start,
            waypoints: Vec::new(),
            end,
            criterion,
        }
    }

    /// A query constrained to visit `waypoints` in order.
    pub fn via(start: NodeId, waypoints: Vec<NodeId>, end: NodeId, criterion: Criterion) -> Self {
        Self {
            start,
            waypoints,
            end,
            criterion,
        }
    }

    /// Check that every referenced node exists in the graph.
    pub fn validate(&self, graph: &RouteGraph) -> Result<(), PlanError> {
        for id in self.stops() {
            if !graph.contains(id) {
                return Err(PlanError::UnknownNode(id));
            }
        }
        Ok(())
    }

    /// The full stop sequence: start, waypoints in order, end.
    fn stops(&self) -> Vec<NodeId> {
        let mut stops = Vec::with_capacity(self.waypoints.len() + 2);
        stops.push(self.start);
        stops.extend_from_slice(&self.waypoints);
        stops.push(self.end);
        stops
    }
}

/// Route planner over a populated graph.
pub struct Planner<'a> {
    graph: &'a RouteGraph,
}

impl<'a> Planner<'a> {
    /// Create a planner borrowing the graph for this planning session.
    pub fn new(graph: &'a RouteGraph) -> Self {
        Self { graph }
    }

    /// Plan a route for the request.
    ///
    /// Solves each consecutive stop pair as one leg and concatenates the
    /// results. If any leg is unreachable the whole query is
    /// [`PathOutcome::NoRoute`] carrying that leg; no partial path is
    /// ever returned.
    pub fn plan(&self, request: &RouteRequest) -> Result<PathOutcome, PlanError> {
        request.validate(self.graph)?;

        let stops = request.stops();
        let mut path: Vec<NodeId> = Vec::new();
        let mut total_weight = 0.0;

        for (leg_index, pair) in stops.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            match shortest_path(self.graph, from, to, request.criterion)? {
                PathOutcome::Found(leg) => {
                    debug!(leg_index, %from, %to, weight = leg.total_weight, "leg solved");
                    if path.is_empty() {
                        path.extend(leg.path);
                    } else {
                        // The leg starts at the seam node already present.
                        path.extend(leg.path.into_iter().skip(1));
                    }
                    total_weight += leg.total_weight;
                }
                PathOutcome::NoRoute(_) => {
                    debug!(leg_index, %from, %to, "leg unreachable, abandoning route");
                    return Ok(PathOutcome::NoRoute(NoRoute {
                        leg_index,
                        from,
                        to,
                    }));
                }
            }
        }

        Ok(PathOutcome::Found(Route { path, total_weight }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Edge, Node};

    fn graph_with_nodes(n: u32) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for id in 0..n {
            graph
                .add_node(Node::new(NodeId(id), Coordinates::new(0.0, 0.0).unwrap()))
                .unwrap();
        }
        graph
    }

    fn add(graph: &mut RouteGraph, source: u32, target: u32, time: f64) {
        graph
            .add_edge(Edge::new(NodeId(source), NodeId(target), time, time).unwrap())
            .unwrap();
    }

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn direct_request_matches_solver() {
        let mut graph = graph_with_nodes(3);
        add(&mut graph, 0, 1, 5.0);
        add(&mut graph, 1, 2, 3.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::direct(NodeId(0), NodeId(2), Criterion::Time);
        let outcome = planner.plan(&request).unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.path, ids(&[0, 1, 2]));
        assert_eq!(route.total_weight, 8.0);
    }

    #[test]
    fn waypoint_route_concatenates_legs_without_seam_duplicates() {
        // 0 -> 1 -> 2 with a waypoint at 1: the seam node 1 appears once.
        let mut graph = graph_with_nodes(3);
        add(&mut graph, 0, 1, 5.0);
        add(&mut graph, 1, 2, 3.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(NodeId(0), vec![NodeId(1)], NodeId(2), Criterion::Time);
        let outcome = planner.plan(&request).unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.path, ids(&[0, 1, 2]));
        assert_eq!(route.total_weight, 8.0);
    }

    #[test]
    fn waypoint_total_is_sum_of_leg_weights() {
        let mut graph = graph_with_nodes(4);
        add(&mut graph, 0, 1, 2.0);
        add(&mut graph, 1, 2, 3.0);
        add(&mut graph, 2, 3, 4.0);
        // A shortcut the waypoint constraint must ignore
        add(&mut graph, 0, 3, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(
            NodeId(0),
            vec![NodeId(1), NodeId(2)],
            NodeId(3),
            Criterion::Time,
        );
        let outcome = planner.plan(&request).unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.path, ids(&[0, 1, 2, 3]));
        assert_eq!(route.total_weight, 9.0);
    }

    #[test]
    fn waypoint_order_is_preserved_even_when_suboptimal() {
        // Visiting 2 before 1 forces a detour; the planner must not
        // reorder to the cheaper 1-then-2 tour.
        let mut graph = graph_with_nodes(4);
        add(&mut graph, 0, 1, 1.0);
        add(&mut graph, 1, 2, 1.0);
        add(&mut graph, 0, 2, 10.0);
        add(&mut graph, 2, 1, 10.0);
        add(&mut graph, 1, 3, 1.0);
        add(&mut graph, 2, 3, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(
            NodeId(0),
            vec![NodeId(2), NodeId(1)],
            NodeId(3),
            Criterion::Time,
        );
        let outcome = planner.plan(&request).unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.path, ids(&[0, 2, 1, 3]));
        assert_eq!(route.total_weight, 21.0);
    }

    #[test]
    fn unreachable_leg_fails_whole_query() {
        // 0 -> 1 exists, but nothing reaches 2 from 1.
        let mut graph = graph_with_nodes(4);
        add(&mut graph, 0, 1, 1.0);
        add(&mut graph, 2, 3, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(NodeId(0), vec![NodeId(1)], NodeId(3), Criterion::Time);
        let outcome = planner.plan(&request).unwrap();

        assert_eq!(
            outcome,
            PathOutcome::NoRoute(NoRoute {
                leg_index: 1,
                from: NodeId(1),
                to: NodeId(3),
            })
        );
    }

    #[test]
    fn first_leg_failure_reports_leg_zero() {
        let mut graph = graph_with_nodes(3);
        add(&mut graph, 1, 2, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(NodeId(0), vec![NodeId(1)], NodeId(2), Criterion::Time);
        let outcome = planner.plan(&request).unwrap();

        assert_eq!(
            outcome,
            PathOutcome::NoRoute(NoRoute {
                leg_index: 0,
                from: NodeId(0),
                to: NodeId(1),
            })
        );
    }

    #[test]
    fn unknown_waypoint_is_rejected_up_front() {
        let mut graph = graph_with_nodes(2);
        add(&mut graph, 0, 1, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(NodeId(0), vec![NodeId(9)], NodeId(1), Criterion::Time);

        assert_eq!(
            planner.plan(&request).unwrap_err(),
            PlanError::UnknownNode(NodeId(9))
        );
    }

    #[test]
    fn repeated_stop_contributes_nothing() {
        // A waypoint equal to the previous stop is a zero-weight leg.
        let mut graph = graph_with_nodes(2);
        add(&mut graph, 0, 1, 1.0);

        let planner = Planner::new(&graph);
        let request = RouteRequest::via(NodeId(0), vec![NodeId(0)], NodeId(1), Criterion::Time);
        let outcome = planner.plan(&request).unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.path, ids(&[0, 1]));
        assert_eq!(route.total_weight, 1.0);
    }

    #[test]
    fn request_deserializes_with_defaulted_waypoints() {
        let request: RouteRequest =
            serde_json::from_str(r#"{"start": 0, "end": 1, "criterion": "cost"}"#).unwrap();
        assert_eq!(
            request,
            RouteRequest::direct(NodeId(0), NodeId(1), Criterion::Cost)
        );

        let request: RouteRequest = serde_json::from_str(
            r#"{"start": 0, "waypoints": [2, 3], "end": 1, "criterion": "time"}"#,
        )
        .unwrap();
        assert_eq!(request.waypoints, vec![NodeId(2), NodeId(3)]);
    }
}
