use geo::Coord;
use itertools::Itertools;
use log::debug;

use super::dijkstra::adjacency_shortest_path;
use crate::model::ComposedGraph;
use crate::{Distance, NodeId};

/// Shortest indoor path between two composed nodes
#[derive(Debug, Clone, PartialEq)]
pub struct IndoorRoute {
    /// Node ids from start to end inclusive
    pub path: Vec<NodeId>,
    pub distance: Distance,
}

impl IndoorRoute {
    /// Coordinates of the path nodes; ids that do not resolve are dropped
    pub fn coordinates(&self, graph: &ComposedGraph) -> Vec<Coord<f64>> {
        graph.coordinates(&self.path)
    }

    /// Path coordinates as `[y, x]` pairs, the order map overlays expect
    pub fn lat_lng(&self, graph: &ComposedGraph) -> Vec<[f64; 2]> {
        self.coordinates(graph)
            .into_iter()
            .map(|c| [c.y, c.x])
            .collect()
    }
}

/// Shortest path between two nodes of a composed graph, `None` when unreachable
pub fn find_indoor_route(graph: &ComposedGraph, start: &str, end: &str) -> Option<IndoorRoute> {
    let (path, distance) = adjacency_shortest_path(&graph.adjacency, start, end)?;
    Some(IndoorRoute { path, distance })
}

/// Shortest path between any node of `from_room` and any node of `to_room`.
///
/// Every pair of nodes attributed to the two rooms is searched and the
/// cheapest route kept.
pub fn find_room_route(
    graph: &ComposedGraph,
    from_room: &str,
    to_room: &str,
) -> Option<IndoorRoute> {
    let starts = graph.nodes_in_room(from_room);
    let ends = graph.nodes_in_room(to_room);
    debug!(
        "Room route {from_room} -> {to_room}: {} x {} candidate nodes",
        starts.len(),
        ends.len()
    );

    starts
        .iter()
        .cartesian_product(ends.iter())
        .filter_map(|(start, end)| find_indoor_route(graph, start, end))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
