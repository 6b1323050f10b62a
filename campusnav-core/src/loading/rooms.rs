//! Attaches room identity to indoor graph nodes.
//!
//! A node is matched by name first: a door carrying `to_room` (or
//! `from_room`) receives the identity of that room. Nodes left without a
//! room are then tested geometrically against each room polygon's outer
//! ring, first containing room in collection order wins.

use geo::{Coord, Geometry, Polygon};
use geojson::FeatureCollection;
use hashbrown::HashMap;
use log::{debug, trace};

use super::features::indoor_features;
use crate::algo::point_in_polygon;
use crate::model::properties::{Properties, property_string};
use crate::model::{FeatureKind, FloorGraph, NodeMeta, RoomInfo};

/// Room feature of a floor
#[derive(Debug, Clone)]
pub struct Room {
    /// `room_name`, or the feature `id` when the name is missing
    pub key: String,
    pub info: RoomInfo,
    pub outlines: Vec<Polygon<f64>>,
    pub properties: Properties,
}

impl Room {
    fn contains(&self, coord: Coord<f64>) -> bool {
        self.outlines
            .iter()
            .any(|polygon| point_in_polygon(coord, &polygon.exterior().0))
    }

    /// Room identity as recorded on nodes, falling back to the key for unnamed rooms
    fn identity(&self) -> RoomInfo {
        RoomInfo {
            room_name: self.info.room_name.clone().or_else(|| Some(self.key.clone())),
            ..self.info.clone()
        }
    }
}

/// Rooms of a floor in collection order, with a name index
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    rooms: Vec<Room>,
    by_name: HashMap<String, usize>,
}

impl RoomIndex {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut index = Self::default();

        for feature in indoor_features(collection) {
            if feature.kind != FeatureKind::Room {
                continue;
            }

            let key = property_string(feature.properties, "room_name")
                .or_else(|| property_string(feature.properties, "id"))
                .unwrap_or_else(|| "unknown_room".to_string());

            let outlines = match feature.geometry {
                Geometry::Polygon(polygon) => vec![polygon],
                Geometry::MultiPolygon(polygons) => polygons.0,
                _ => Vec::new(),
            };

            // A later room with the same name takes over the name link,
            // both stay available for containment tests
            index.by_name.insert(key.clone(), index.rooms.len());
            index.rooms.push(Room {
                key,
                info: RoomInfo::from_properties(feature.properties),
                outlines,
                properties: feature.properties.clone(),
            });
        }

        index
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.by_name.get(name.trim()).map(|&pos| &self.rooms[pos])
    }

    /// First room whose outer ring contains `coord`
    pub fn containing(&self, coord: Coord<f64>) -> Option<&Room> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return None;
        }
        self.rooms.iter().find(|room| room.contains(coord))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// How a node received its room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribution {
    Linked,
    Contained,
    None,
}

/// Attaches room metadata to the nodes of `graph` from the rooms of the same floor
pub fn attribute_rooms(graph: &mut FloorGraph, collection: &FeatureCollection) {
    let rooms = RoomIndex::from_collection(collection);
    if rooms.is_empty() {
        debug!("No rooms on floor, skipping room attribution");
        return;
    }

    let (mut linked, mut contained) = (0usize, 0usize);
    for node in graph.nodes_mut() {
        match attribute_node(&mut node.meta, node.coord, &rooms) {
            Attribution::Linked => linked += 1,
            Attribution::Contained => contained += 1,
            Attribution::None => trace!("{} has no room", node.id),
        }
    }

    debug!(
        "Room attribution: {linked} linked by name, {contained} by containment, {} rooms",
        rooms.len()
    );
}

fn attribute_node(meta: &mut NodeMeta, coord: Coord<f64>, rooms: &RoomIndex) -> Attribution {
    if let Some(room) = meta.linked_room().and_then(|name| rooms.get(name)) {
        meta.room = room.identity();
        return Attribution::Linked;
    }

    if meta.has_room() {
        return Attribution::None;
    }

    match rooms.containing(coord) {
        Some(room) => {
            meta.room = room.identity();
            for (key, value) in &room.properties {
                if !is_room_identity_key(key) {
                    meta.extra.insert(key.clone(), value.clone());
                }
            }
            Attribution::Contained
        }
        None => Attribution::None,
    }
}

fn is_room_identity_key(key: &str) -> bool {
    matches!(
        key,
        "room_name" | "building" | "floor" | "type" | "feature_type"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{IdGenerator, IndoorGraphConfig, build_floor_graph};
    use geojson::Feature;
    use serde_json::{Value, json};

    fn collection(features: Vec<Value>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: features
                .into_iter()
                .map(|f| Feature::from_json_value(f).unwrap())
                .collect(),
            foreign_members: None,
        }
    }

    fn room(name: &str, ring: Value, extra: Value) -> Value {
        let mut props = json!({
            "feature_type": "room",
            "room_name": name,
            "building": "eng",
            "floor": 1,
            "type": "lab"
        });
        if let (Some(props), Some(extra)) = (props.as_object_mut(), extra.as_object()) {
            props.extend(extra.clone());
        }
        json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": props
        })
    }

    fn floor() -> FeatureCollection {
        collection(vec![
            json!({
                "type": "Feature",
                "geometry": { "type": "MultiLineString", "coordinates": [[[1, 5], [50, 5]]] },
                "properties": { "feature_type": "corridor" }
            }),
            // Door sits inside room A but leads to room B
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [5, 8] },
                "properties": { "feature_type": "door", "to_room": " B " }
            }),
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [25, 8] },
                "properties": { "feature_type": "door" }
            }),
            room("A", json!([[0, 0], [20, 0], [20, 20], [0, 20], [0, 0]]), json!({ "capacity": 30 })),
            room("B", json!([[20, 0], [40, 0], [40, 20], [20, 20], [20, 0]]), json!({})),
        ])
    }

    fn attributed() -> FloorGraph {
        let fc = floor();
        let mut graph =
            build_floor_graph(&fc, &IndoorGraphConfig::default(), &mut IdGenerator::new());
        attribute_rooms(&mut graph, &fc);
        graph
    }

    #[test]
    fn name_link_beats_containment() {
        let graph = attributed();
        let door = graph.nodes().iter().find(|n| n.meta.to_room.is_some()).unwrap();

        assert_eq!(door.meta.room.room_name.as_deref(), Some("B"));
        assert_eq!(door.meta.room.building.as_deref(), Some("eng"));
        assert_eq!(door.meta.room.floor.as_deref(), Some("1"));
        assert_eq!(door.meta.room.room_type.as_deref(), Some("lab"));
        // Linked rooms copy identity only
        assert!(!door.meta.extra.contains_key("capacity"));
    }

    #[test]
    fn containment_fallback_copies_room_properties() {
        let graph = attributed();

        // Corridor vertex (1, 5) lies inside room A
        let start = &graph.nodes()[0];
        assert_eq!(start.meta.room.room_name.as_deref(), Some("A"));
        assert_eq!(start.meta.extra.get("capacity"), Some(&json!(30)));

        let plain_door = graph
            .nodes()
            .iter()
            .find(|n| n.coord == Coord { x: 25.0, y: 8.0 })
            .unwrap();
        assert_eq!(plain_door.meta.room.room_name.as_deref(), Some("B"));

        // (50, 5) is outside every room
        let end = &graph.nodes()[1];
        assert!(!end.meta.has_room());
    }

    #[test]
    fn attribution_is_idempotent() {
        let fc = floor();
        let mut once = attributed();
        let before: Vec<_> = once.nodes().iter().map(|n| n.meta.room.clone()).collect();

        attribute_rooms(&mut once, &fc);
        let after: Vec<_> = once.nodes().iter().map(|n| n.meta.room.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_link_falls_back_to_containment() {
        let fc = collection(vec![
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [5, 5] },
                "properties": { "feature_type": "door", "to_room": "Nowhere" }
            }),
            room("A", json!([[0, 0], [10, 0], [10, 10], [0, 10]]), json!({})),
        ]);
        let mut graph =
            build_floor_graph(&fc, &IndoorGraphConfig::default(), &mut IdGenerator::new());
        attribute_rooms(&mut graph, &fc);
        assert_eq!(graph.nodes()[0].meta.room.room_name.as_deref(), Some("A"));
    }

    #[test]
    fn multipolygon_and_id_fallback() {
        let fc = collection(vec![
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [105, 5] },
                "properties": { "feature_type": "stairs" }
            }),
            json!({
                "type": "Feature",
                "geometry": { "type": "MultiPolygon", "coordinates": [
                    [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]],
                    [[[100, 0], [110, 0], [110, 10], [100, 10], [100, 0]]]
                ] },
                "properties": { "feature_type": "room", "id": 42 }
            }),
        ]);
        let mut graph =
            build_floor_graph(&fc, &IndoorGraphConfig::default(), &mut IdGenerator::new());
        attribute_rooms(&mut graph, &fc);

        let meta = &graph.nodes()[0].meta;
        assert_eq!(meta.room.room_name.as_deref(), Some("42"));
        assert_eq!(meta.room.building, None);
    }

    #[test]
    fn from_room_used_when_to_room_missing() {
        let rooms = RoomIndex::from_collection(&floor());
        let mut meta = NodeMeta {
            from_room: Some("A".to_string()),
            ..NodeMeta::default()
        };
        let result = attribute_node(&mut meta, Coord { x: 30.0, y: 10.0 }, &rooms);
        assert_eq!(result, Attribution::Linked);
        assert_eq!(meta.room.room_name.as_deref(), Some("A"));
    }

    #[test]
    fn own_room_name_survives_containment() {
        let fc = collection(vec![
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [5, 5] },
                "properties": {
                    "feature_type": "elevator",
                    "room_name": "Lift 1",
                    "floor": 2
                }
            }),
            room("A", json!([[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]), json!({ "capacity": 30 })),
        ]);
        let mut graph =
            build_floor_graph(&fc, &IndoorGraphConfig::default(), &mut IdGenerator::new());
        attribute_rooms(&mut graph, &fc);

        let meta = &graph.nodes()[0].meta;
        assert_eq!(meta.room.room_name.as_deref(), Some("Lift 1"));
        assert_eq!(meta.room.floor.as_deref(), Some("2"));
        assert_eq!(meta.room.building, None);
        assert!(!meta.extra.contains_key("capacity"));

        let rooms = RoomIndex::from_collection(&fc);
        let mut own = meta.clone();
        assert_eq!(
            attribute_node(&mut own, Coord { x: 5.0, y: 5.0 }, &rooms),
            Attribution::None
        );
        assert_eq!(&own, meta);
    }

    #[test]
    fn non_finite_coordinates_are_not_contained() {
        let rooms = RoomIndex::from_collection(&floor());
        assert!(rooms.containing(Coord { x: f64::NAN, y: 5.0 }).is_none());
        assert_eq!(rooms.len(), 2);
    }
}
