use geo::Geometry;
use geojson::FeatureCollection;
use log::{debug, trace};

use super::config::IndoorGraphConfig;
use super::features::{IndoorFeature, indoor_features};
use crate::algo::distance;
use crate::model::{FeatureKind, FloorGraph, IndoorNode, NodeMeta};
use crate::{Distance, NodeId};

/// Node id source scoped to a single build.
///
/// Ids look like `c_1` for corridor vertices and `p_2` for point features;
/// the counter is shared by both prefixes.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, prefix: &str) -> NodeId {
        self.counter += 1;
        format!("{prefix}_{}", self.counter)
    }
}

/// Builds the navigation graph of one floor.
///
/// Corridor vertices become chained nodes; doors, elevators and stairs
/// become nodes attached to their nearest node within
/// `max_connect_distance`. Room metadata is not attached here, see
/// [`attribute_rooms`](super::attribute_rooms).
pub fn build_floor_graph(
    collection: &FeatureCollection,
    config: &IndoorGraphConfig,
    ids: &mut IdGenerator,
) -> FloorGraph {
    let features = indoor_features(collection);
    let mut graph = FloorGraph::new();

    add_corridors(&mut graph, &features, ids);
    let corridor_nodes = graph.node_count();
    add_point_features(&mut graph, &features, config.max_connect_distance, ids);

    debug!(
        "Floor graph: {} corridor nodes, {} point nodes, {} directed edges",
        corridor_nodes,
        graph.node_count() - corridor_nodes,
        graph.edge_count()
    );
    graph
}

fn add_corridors(graph: &mut FloorGraph, features: &[IndoorFeature<'_>], ids: &mut IdGenerator) {
    let corridors = features.iter().filter_map(|feature| match &feature.geometry {
        Geometry::MultiLineString(lines) if feature.kind == FeatureKind::Corridor => Some(lines),
        _ => None,
    });

    for (corridor_index, lines) in corridors.enumerate() {
        for (line_index, line) in lines.0.iter().enumerate() {
            let mut previous: Option<(NodeId, geo::Coord<f64>)> = None;

            for (vertex_index, coord) in line.coords().copied().enumerate() {
                let id = ids.next_id("c");
                graph.add_node(IndoorNode {
                    id: id.clone(),
                    coord,
                    meta: NodeMeta::corridor(corridor_index, line_index, vertex_index),
                });

                if let Some((prev_id, prev_coord)) = previous {
                    graph.connect(&prev_id, &id, distance(prev_coord, coord));
                }
                previous = Some((id, coord));
            }
        }
    }
}

fn add_point_features(
    graph: &mut FloorGraph,
    features: &[IndoorFeature<'_>],
    max_connect_distance: f64,
    ids: &mut IdGenerator,
) {
    let points = features.iter().filter_map(|feature| match &feature.geometry {
        Geometry::Point(point) if feature.kind.is_connector() => Some((point.0, feature)),
        _ => None,
    });

    for (coord, feature) in points {
        // Search before inserting so the new node never matches itself
        let nearest = nearest_within(graph, coord, max_connect_distance);

        let id = ids.next_id("p");
        graph.add_node(IndoorNode {
            id: id.clone(),
            coord,
            meta: NodeMeta::from_properties(feature.properties),
        });

        match nearest {
            Some((target, dist)) => {
                graph.connect(&id, &target, dist);
            }
            None => trace!("{id} has no node within {max_connect_distance}, left disconnected"),
        }
    }
}

/// Nearest existing node within `max_distance`; the earliest inserted wins ties
fn nearest_within(
    graph: &FloorGraph,
    coord: geo::Coord<f64>,
    max_distance: f64,
) -> Option<(NodeId, Distance)> {
    let mut best: Option<(&IndoorNode, Distance)> = None;
    for node in graph.nodes() {
        let dist = distance(node.coord, coord);
        if dist <= max_distance && best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((node, dist));
        }
    }
    best.map(|(node, dist)| (node.id.clone(), dist))
}
