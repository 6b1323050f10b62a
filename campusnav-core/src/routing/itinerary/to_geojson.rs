use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::model::ComposedGraph;
use crate::routing::{IndoorRoute, OutdoorRoute};

impl OutdoorRoute {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: the walked line
    /// followed by the entrance or stop used at each end.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(3);

        if self.route_coordinates.len() > 1 {
            let value = json!({
                "type": "Feature",
                "geometry": line_geometry(&self.route_coordinates),
                "properties": {
                    "leg_type": "outdoor",
                    "start_ref": self.start_ref,
                    "end_ref": self.end_ref,
                    "total_distance": self.total_distance,
                }
            });
            features.push(Feature::from_json_value(value)?);
        }

        features.push(endpoint_feature("start", &self.start_ref, self.used_start_point)?);
        features.push(endpoint_feature("end", &self.end_ref, self.used_end_point)?);

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson()?)?)
    }
}

impl IndoorRoute {
    /// Converts the route to a `GeoJSON` `FeatureCollection` in floor plan
    /// coordinates: the path line followed by one point per path node.
    ///
    /// Nodes missing from `graph` are left out.
    pub fn to_geojson(&self, graph: &ComposedGraph) -> Result<FeatureCollection, Error> {
        let coords = self.coordinates(graph);
        let mut features = Vec::with_capacity(self.path.len() + 1);

        if coords.len() > 1 {
            let value = json!({
                "type": "Feature",
                "geometry": line_geometry(&coords),
                "properties": {
                    "leg_type": "indoor",
                    "distance": self.distance,
                    "start": self.path.first(),
                    "end": self.path.last(),
                }
            });
            features.push(Feature::from_json_value(value)?);
        }

        for (step, id) in self.path.iter().enumerate() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let value = json!({
                "type": "Feature",
                "geometry": point_geometry(node.coord),
                "properties": {
                    "step": step,
                    "id": id,
                    "kind": node.meta.kind,
                    "floor_id": node.meta.floor_id,
                    "room_name": node.meta.room.room_name,
                    "is_elevator": node.meta.is_elevator,
                }
            });
            features.push(Feature::from_json_value(value)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &ComposedGraph) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson(graph)?)?)
    }
}

fn line_geometry(coords: &[Coord<f64>]) -> Geometry {
    Geometry::new(GeoJsonValue::from(&LineString::new(coords.to_vec())))
}

fn point_geometry(coord: Coord<f64>) -> Geometry {
    Geometry::new(GeoJsonValue::from(&Point::from(coord)))
}

fn endpoint_feature(role: &str, reference: &str, coord: Coord<f64>) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": point_geometry(coord),
        "properties": {
            "role": role,
            "ref": reference,
        }
    });

    Ok(Feature::from_json_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndoorEdge, IndoorNode, NodeMeta};
    use geo::coord;
    use hashbrown::HashMap;

    fn outdoor_route() -> OutdoorRoute {
        OutdoorRoute {
            start_ref: "library".into(),
            end_ref: "bus_3".into(),
            route_coordinates: vec![
                coord! { x: 30.0, y: 59.0 },
                coord! { x: 30.001, y: 59.0 },
                coord! { x: 30.001, y: 59.001 },
            ],
            used_start_point: coord! { x: 30.0, y: 59.0 },
            used_end_point: coord! { x: 30.001, y: 59.001 },
            total_distance: 168.5,
        }
    }

    #[test]
    fn outdoor_route_features() {
        let fc = outdoor_route().to_geojson().unwrap();
        assert_eq!(fc.features.len(), 3);

        let line = &fc.features[0];
        assert!(matches!(
            line.geometry.as_ref().map(|g| &g.value),
            Some(GeoJsonValue::LineString(coords)) if coords.len() == 3
        ));
        assert_eq!(line.property("total_distance"), Some(&json!(168.5)));
        assert_eq!(fc.features[2].property("ref"), Some(&json!("bus_3")));
    }

    #[test]
    fn outdoor_route_string_is_a_feature_collection() {
        let text = outdoor_route().to_geojson_string().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"][1]["properties"]["role"], "start");
    }

    #[test]
    fn indoor_route_features() {
        let meta = NodeMeta {
            floor_id: Some("1".into()),
            ..NodeMeta::default()
        };
        let nodes: HashMap<String, IndoorNode> = [("a", 0.0), ("b", 4.0)]
            .into_iter()
            .map(|(id, x)| {
                let node = IndoorNode {
                    id: id.to_string(),
                    coord: coord! { x: x, y: 2.0 },
                    meta: meta.clone(),
                };
                (id.to_string(), node)
            })
            .collect();
        let edges = vec![IndoorEdge {
            u: "a".into(),
            v: "b".into(),
            weight: 4.0,
        }];
        let graph = ComposedGraph::new(nodes, edges);

        let route = IndoorRoute {
            path: vec!["a".into(), "b".into(), "gone".into()],
            distance: 4.0,
        };
        let fc = route.to_geojson(&graph).unwrap();

        // line plus the two resolvable nodes
        assert_eq!(fc.features.len(), 3);
        assert_eq!(fc.features[0].property("leg_type"), Some(&json!("indoor")));
        assert_eq!(fc.features[2].property("id"), Some(&json!("b")));
        assert_eq!(fc.features[2].property("floor_id"), Some(&json!("1")));
    }

    #[test]
    fn single_node_route_has_no_line() {
        let route = IndoorRoute {
            path: vec!["x".into()],
            distance: 0.0,
        };
        let fc = route
            .to_geojson(&ComposedGraph::new(HashMap::new(), Vec::new()))
            .unwrap();
        assert!(fc.features.is_empty());
    }
}
