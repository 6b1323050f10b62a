//! Per-floor and composed indoor graphs

use geo::Coord;
use hashbrown::HashMap;
use log::warn;

use super::components::{IndoorEdge, IndoorNode};
use crate::{Distance, NodeId};

/// Graph of a single floor.
///
/// Nodes keep their insertion order, which is the order the builder scans
/// them in when attaching point features.
#[derive(Debug, Clone, Default)]
pub struct FloorGraph {
    nodes: Vec<IndoorNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<IndoorEdge>,
}

impl FloorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: IndoorNode) {
        match self.index.get(&node.id) {
            Some(&pos) => {
                warn!("Replacing indoor node with duplicate id {}", node.id);
                self.nodes[pos] = node;
            }
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Adds the edge in both directions. Returns false, leaving the graph
    /// untouched, when either endpoint is unknown.
    pub fn connect(&mut self, u: &str, v: &str, weight: Distance) -> bool {
        if !self.index.contains_key(u) || !self.index.contains_key(v) {
            warn!("Refusing edge {u} -> {v}: endpoint not in graph");
            return false;
        }

        self.edges.push(IndoorEdge {
            u: u.to_string(),
            v: v.to_string(),
            weight,
        });
        self.edges.push(IndoorEdge {
            u: v.to_string(),
            v: u.to_string(),
            weight,
        });
        true
    }

    pub fn node(&self, id: &str) -> Option<&IndoorNode> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn nodes(&self) -> &[IndoorNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [IndoorNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[IndoorEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn into_parts(self) -> (Vec<IndoorNode>, Vec<IndoorEdge>) {
        (self.nodes, self.edges)
    }
}

/// Outgoing adjacency entry
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacent {
    pub to: NodeId,
    pub weight: Distance,
}

pub type Adjacency = HashMap<NodeId, Vec<Adjacent>>;

/// All floors of a building merged under collision free keys
#[derive(Debug, Clone, Default)]
pub struct ComposedGraph {
    pub nodes: HashMap<NodeId, IndoorNode>,
    pub edges: Vec<IndoorEdge>,
    pub adjacency: Adjacency,
}

impl ComposedGraph {
    /// Builds the composed graph and derives its adjacency.
    ///
    /// Every node gets an adjacency entry, possibly empty. Edges naming a
    /// node that is not in `nodes` are logged and left out of the adjacency.
    pub fn new(nodes: HashMap<NodeId, IndoorNode>, edges: Vec<IndoorEdge>) -> Self {
        let adjacency = build_adjacency(&nodes, &edges);
        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    pub fn node(&self, id: &str) -> Option<&IndoorNode> {
        self.nodes.get(id)
    }

    pub fn neighbors(&self, id: &str) -> &[Adjacent] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Coordinates of the given ids, skipping ids that do not resolve
    pub fn coordinates<'a, I>(&self, ids: I) -> Vec<Coord<f64>>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        ids.into_iter()
            .filter_map(|id| self.nodes.get(id).map(|node| node.coord))
            .collect()
    }

    /// Ids of nodes attributed to `room_name`, sorted for stable iteration
    pub fn nodes_in_room(&self, room_name: &str) -> Vec<&NodeId> {
        let room_name = room_name.trim();
        let mut ids: Vec<&NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.meta.room.room_name.as_deref() == Some(room_name))
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

pub(crate) fn build_adjacency(
    nodes: &HashMap<NodeId, IndoorNode>,
    edges: &[IndoorEdge],
) -> Adjacency {
    let mut adjacency: Adjacency = nodes.keys().map(|id| (id.clone(), Vec::new())).collect();

    for edge in edges {
        if !nodes.contains_key(&edge.v) {
            warn!("Skipping edge {} -> {}: missing node {}", edge.u, edge.v, edge.v);
            continue;
        }
        match adjacency.get_mut(&edge.u) {
            Some(out) => out.push(Adjacent {
                to: edge.v.clone(),
                weight: edge.weight,
            }),
            None => warn!("Skipping edge {} -> {}: missing node {}", edge.u, edge.v, edge.u),
        }
    }

    adjacency
}
