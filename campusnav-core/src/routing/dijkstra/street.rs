use std::collections::BinaryHeap;

use geo::Coord;
use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::model::StreetGraph;

/// Dijkstra's algorithm on the street network between two nodes.
/// Returns the path as coordinates from `start` to `target` and its length in metres.
pub(crate) fn street_shortest_path(
    graph: &StreetGraph,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<(Vec<Coord<f64>>, f64)> {
    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = graph.graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut reached = None;
    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        // Check if we've reached the target
        if node == target {
            reached = Some(cost);
            break;
        }

        // Examine neighbors
        for edge in graph.graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + edge.weight().weight;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    let total = reached?;

    // Follow predecessors backward from target to start
    let mut node_path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        node_path.push(current);
    }
    node_path.reverse(); // Now path is from start to target

    let coords = node_path
        .into_iter()
        .map(|node| graph.graph[node].geometry)
        .collect();

    Some((coords, total))
}
