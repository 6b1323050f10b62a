//! Street network graph used as the default outdoor path search

use geo::{Coord, Distance, Geometry, Haversine, LineString, Point};
use geojson::Feature;
use hashbrown::HashMap;
use log::{debug, trace, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::loading::{OutdoorRoutingConfig, feature_geometry};

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// `[lng, lat]`
    pub geometry: Coord<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Length in metres
    pub weight: f64,
}

pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Walkable street network.
///
/// Vertices of the source lines that coincide on the `coordinate_precision`
/// grid become a single node, so lines sharing an endpoint are connected.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub graph: UnGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    max_snap_distance: f64,
}

type VertexKey = (i64, i64);

#[allow(clippy::cast_possible_truncation)]
fn vertex_key(coord: Coord<f64>, precision: f64) -> VertexKey {
    (
        (coord.x / precision).round() as i64,
        (coord.y / precision).round() as i64,
    )
}

/// Vertex merge grid from `config`, the default grid when it is not a positive finite value
fn merge_precision(config: &OutdoorRoutingConfig) -> f64 {
    let precision = config.coordinate_precision;
    if precision.is_finite() && precision > 0.0 {
        return precision;
    }
    let fallback = OutdoorRoutingConfig::default().coordinate_precision;
    warn!("Invalid coordinate precision {precision}, merging vertices on a {fallback} grid");
    fallback
}

/// Great-circle distance in metres between two `[lng, lat]` coordinates
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

impl StreetGraph {
    /// Builds the network from `LineString` and `MultiLineString` features.
    /// Other geometries are ignored.
    pub fn from_features<'a, I>(features: I, config: &OutdoorRoutingConfig) -> Self
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let mut graph = UnGraph::new_undirected();
        let mut vertices: HashMap<VertexKey, NodeIndex> = HashMap::new();
        let precision = merge_precision(config);

        for feature in features {
            let lines: Vec<LineString<f64>> = match feature_geometry(feature) {
                Some(Geometry::LineString(line)) => vec![line],
                Some(Geometry::MultiLineString(lines)) => lines.0,
                _ => continue,
            };

            for line in lines {
                let mut previous: Option<NodeIndex> = None;
                for coord in line.coords().copied() {
                    if !coord.x.is_finite() || !coord.y.is_finite() {
                        previous = None;
                        continue;
                    }
                    let node = *vertices
                        .entry(vertex_key(coord, precision))
                        .or_insert_with(|| graph.add_node(StreetNode { geometry: coord }));

                    if let Some(prev) = previous
                        && prev != node
                    {
                        let weight = haversine_distance(graph[prev].geometry, graph[node].geometry);
                        graph.add_edge(prev, node, StreetEdge { weight });
                    }
                    previous = Some(node);
                }
            }
        }

        let rtree = build_rtree(&graph);
        let mut street_graph = Self {
            graph,
            rtree,
            max_snap_distance: config.max_snap_distance,
        };

        if config.join_tolerance > 0.0 {
            street_graph.join_loose_ends(config.join_tolerance);
        }

        debug!(
            "Street graph built with {} nodes and {} edges",
            street_graph.graph.node_count(),
            street_graph.graph.edge_count()
        );
        street_graph
    }

    /// Connects dead-end vertices to the closest other vertex within
    /// `tolerance` metres, bridging digitizing gaps between lines
    fn join_loose_ends(&mut self, tolerance: f64) {
        let dead_ends: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&node| self.graph.neighbors(node).count() == 1)
            .collect();

        let mut joined = 0;
        for node in dead_ends {
            let origin = self.graph[node].geometry;
            let candidate = self
                .rtree
                .nearest_neighbor_iter(&[origin.x, origin.y])
                .map(|indexed| indexed.data)
                .find(|&other| other != node && self.graph.find_edge(node, other).is_none());

            if let Some(other) = candidate {
                let weight = haversine_distance(origin, self.graph[other].geometry);
                if weight <= tolerance {
                    trace!("Joining loose end {node:?} to {other:?} ({weight:.2} m)");
                    self.graph.add_edge(node, other, StreetEdge { weight });
                    joined += 1;
                }
            }
        }

        if joined > 0 {
            debug!("Joined {joined} loose street ends");
        }
    }

    /// Nearest network node and its distance in metres
    pub fn nearest_node(&self, coord: Coord<f64>) -> Option<(NodeIndex, f64)> {
        self.rtree
            .nearest_neighbor(&[coord.x, coord.y])
            .map(|indexed| {
                let node = indexed.data;
                (node, haversine_distance(coord, self.graph[node].geometry))
            })
    }

    /// Nearest node within the snapping distance
    pub(crate) fn snap(&self, coord: Coord<f64>) -> Option<NodeIndex> {
        match self.nearest_node(coord) {
            Some((node, distance)) if distance <= self.max_snap_distance => Some(node),
            Some((_, distance)) => {
                trace!("{coord:?} is {distance:.1} m from the street network, not snapping");
                None
            }
            None => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn build_rtree(graph: &UnGraph<StreetNode, StreetEdge>) -> RTree<IndexedPoint> {
    let points = graph
        .node_indices()
        .map(|node| {
            let c = graph[node].geometry;
            GeomWithData::new([c.x, c.y], node)
        })
        .collect();
    RTree::bulk_load(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(coords: serde_json::Value) -> Feature {
        Feature::from_json_value(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coords },
            "properties": {}
        }))
        .unwrap()
    }

    #[test]
    fn shared_vertices_are_merged() {
        let features = vec![
            line(json!([[0.0, 0.0], [0.001, 0.0]])),
            line(json!([[0.001, 0.0], [0.002, 0.0]])),
        ];
        let config = OutdoorRoutingConfig {
            join_tolerance: 0.0,
            ..OutdoorRoutingConfig::default()
        };
        let graph = StreetGraph::from_features(&features, &config);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn invalid_precision_falls_back_to_default_grid() {
        let features = vec![
            line(json!([[0.0, 0.0], [0.001, 0.0]])),
            line(json!([[0.001, 0.0], [0.002, 0.0]])),
        ];
        for precision in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            let config = OutdoorRoutingConfig {
                coordinate_precision: precision,
                join_tolerance: 0.0,
                ..OutdoorRoutingConfig::default()
            };
            let graph = StreetGraph::from_features(&features, &config);
            assert_eq!(graph.node_count(), 3, "precision {precision}");
            assert_eq!(graph.edge_count(), 2, "precision {precision}");
        }
    }

    #[test]
    fn edge_weight_is_metres() {
        let features = vec![line(json!([[0.0, 0.0], [0.001, 0.0]]))];
        let graph = StreetGraph::from_features(&features, &OutdoorRoutingConfig::default());
        let weight = graph.graph.edge_weights().next().unwrap().weight;
        // 0.001 degrees of longitude on the equator is about 111 metres
        assert!((weight - 111.2).abs() < 0.5, "got {weight}");
    }

    #[test]
    fn loose_ends_within_tolerance_are_joined() {
        // Second line starts ~1.1 m east of where the first ends
        let features = vec![
            line(json!([[0.0, 0.0], [0.001, 0.0]])),
            line(json!([[0.00101, 0.0], [0.002, 0.0]])),
        ];
        let graph = StreetGraph::from_features(&features, &OutdoorRoutingConfig::default());
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let strict = OutdoorRoutingConfig {
            join_tolerance: 0.0,
            ..OutdoorRoutingConfig::default()
        };
        let graph = StreetGraph::from_features(&features, &strict);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn snapping_respects_distance() {
        let features = vec![line(json!([[0.0, 0.0], [0.001, 0.0]]))];
        let graph = StreetGraph::from_features(&features, &OutdoorRoutingConfig::default());

        assert!(graph.snap(Coord { x: 0.00001, y: 0.0 }).is_some());
        assert!(graph.snap(Coord { x: 0.0, y: 0.01 }).is_none());
    }

    #[test]
    fn empty_network() {
        let features: Vec<Feature> = Vec::new();
        let graph = StreetGraph::from_features(&features, &OutdoorRoutingConfig::default());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.nearest_node(Coord { x: 0.0, y: 0.0 }).is_none());
    }
}
