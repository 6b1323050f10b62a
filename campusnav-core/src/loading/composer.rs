use std::collections::BTreeMap;

use geojson::FeatureCollection;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::{info, warn};
use rayon::prelude::*;

use super::builder::{IdGenerator, build_floor_graph};
use super::config::IndoorGraphConfig;
use super::rooms::attribute_rooms;
use crate::model::{ComposedGraph, FloorGraph, IndoorEdge, IndoorNode};
use crate::{FloorId, NodeId};

/// Key of a node in the composed graph
pub fn composed_key(building_id: &str, floor: &str, node_id: &str) -> NodeId {
    format!("{building_id}_F{floor}_{node_id}")
}

/// Builds, attributes and merges every floor of a building.
///
/// Node ids are re-keyed to `{building}_F{floor}_{id}` where `building`
/// is the node's own `buildingId` and falls back to `building_id`. No edges are created between
/// floors. Floors are built in parallel and merged in floor order.
pub fn compose_floors(
    building_id: &str,
    floors: &BTreeMap<FloorId, FeatureCollection>,
    config: &IndoorGraphConfig,
) -> ComposedGraph {
    let floor_graphs: Vec<(&FloorId, FloorGraph)> = floors
        .par_iter()
        .map(|(floor, collection)| {
            let mut ids = IdGenerator::new();
            let mut graph = build_floor_graph(collection, config, &mut ids);
            attribute_rooms(&mut graph, collection);
            (floor, graph)
        })
        .collect();

    let mut nodes: HashMap<NodeId, IndoorNode> = HashMap::new();
    let mut edges: Vec<IndoorEdge> = Vec::new();

    for (floor, graph) in floor_graphs {
        merge_floor(building_id, floor, graph, &mut nodes, &mut edges);
    }

    let composed = ComposedGraph::new(nodes, edges);
    info!(
        "Composed {} floors of {building_id}: {} nodes, {} directed edges",
        floors.len(),
        composed.node_count(),
        composed.edge_count()
    );
    composed
}

fn merge_floor(
    building_id: &str,
    floor: &str,
    graph: FloorGraph,
    nodes: &mut HashMap<NodeId, IndoorNode>,
    edges: &mut Vec<IndoorEdge>,
) {
    let (floor_nodes, floor_edges) = graph.into_parts();
    let mut keys: HashMap<NodeId, NodeId> = HashMap::with_capacity(floor_nodes.len());

    for mut node in floor_nodes {
        let building = node.meta.building_key().unwrap_or(building_id);
        let key = composed_key(building, floor, &node.id);

        node.meta.original_id = Some(std::mem::replace(&mut node.id, key.clone()));
        node.meta.floor_id = Some(floor.to_string());

        match nodes.entry(key.clone()) {
            Entry::Vacant(entry) => {
                if let Some(original) = &node.meta.original_id {
                    keys.insert(original.clone(), key);
                }
                entry.insert(node);
            }
            Entry::Occupied(_) => warn!("Composed key {key} already taken, dropping node"),
        }
    }

    for edge in floor_edges {
        match (keys.get(&edge.u), keys.get(&edge.v)) {
            (Some(u), Some(v)) => edges.push(IndoorEdge {
                u: u.clone(),
                v: v.clone(),
                weight: edge.weight,
            }),
            _ => warn!(
                "Dropping edge {} -> {} on floor {floor}: endpoint was not composed",
                edge.u, edge.v
            ),
        }
    }
}
