use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::state::State;
use crate::model::Adjacency;
use crate::{Distance, NodeId};

/// Dijkstra over a composed adjacency, stopping once `target` is settled.
///
/// Returns the node path from `start` to `target` inclusive and its length,
/// or `None` when either node is unknown or `target` is unreachable.
pub fn adjacency_shortest_path(
    adjacency: &Adjacency,
    start: &str,
    target: &str,
) -> Option<(Vec<NodeId>, Distance)> {
    let (start, _) = adjacency.get_key_value(start)?;
    if !adjacency.contains_key(target) {
        return None;
    }

    let mut distances: HashMap<&str, Distance> = HashMap::new();
    let mut predecessors: HashMap<&str, &str> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    distances.insert(start.as_str(), 0.0);
    heap.push(State {
        cost: 0.0,
        node: start.as_str(),
    });

    let mut reached = None;
    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(node).is_some_and(|&best| cost > best) {
            continue;
        }

        if node == target {
            reached = Some(cost);
            break;
        }

        for edge in adjacency.get(node).into_iter().flatten() {
            let next_cost = cost + edge.weight;
            let next = edge.to.as_str();

            let improved = match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                predecessors.insert(next, node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let distance = reached?;

    let mut path = vec![target.to_string()];
    let mut current: &str = target;
    while current != start.as_str() {
        current = *predecessors.get(current)?;
        path.push(current.to_string());
    }
    path.reverse();

    Some((path, distance))
}
