//! Indoor graph components - nodes, edges and node metadata

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::model::properties::{Properties, is_elevator, property_string};
use crate::{Distance, FloorId, NodeId};

/// Kind of an indoor feature, read from the `feature_type` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Corridor,
    Door,
    Elevator,
    Stairs,
    Room,
}

impl FeatureKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "corridor" => Some(Self::Corridor),
            "door" => Some(Self::Door),
            "elevator" => Some(Self::Elevator),
            "stairs" => Some(Self::Stairs),
            "room" => Some(Self::Room),
            _ => None,
        }
    }

    /// Point features that become graph nodes
    pub fn is_connector(self) -> bool {
        matches!(self, Self::Door | Self::Elevator | Self::Stairs)
    }
}

/// Room identity copied from a room feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub room_name: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room_type: Option<String>,
}

/// Metadata of an indoor node.
///
/// Point nodes start from the properties of their source feature, corridor
/// nodes from their position in the corridor. Room fields are filled in by
/// the room attributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub kind: Option<FeatureKind>,
    pub corridor_index: Option<usize>,
    pub line_index: Option<usize>,
    pub vertex_index: Option<usize>,
    pub to_room: Option<String>,
    pub from_room: Option<String>,
    #[serde(flatten)]
    pub room: RoomInfo,
    pub building_id: Option<String>,
    pub name: Option<String>,
    pub is_elevator: bool,
    /// Floor the node was composed from and its id within that floor's graph
    pub floor_id: Option<FloorId>,
    pub original_id: Option<NodeId>,
    /// Source properties without a dedicated field
    pub extra: Properties,
}

const KNOWN_KEYS: [&str; 12] = [
    "feature_type",
    "to_room",
    "from_room",
    "room_name",
    "building",
    "floor",
    "type",
    "buildingId",
    "building_id",
    "name",
    "is_elevator",
    "elevator",
];

impl NodeMeta {
    /// Metadata of a corridor vertex
    pub fn corridor(corridor_index: usize, line_index: usize, vertex_index: usize) -> Self {
        Self {
            kind: Some(FeatureKind::Corridor),
            corridor_index: Some(corridor_index),
            line_index: Some(line_index),
            vertex_index: Some(vertex_index),
            ..Self::default()
        }
    }

    /// Metadata copied from the properties of a point feature
    pub fn from_properties(props: &Properties) -> Self {
        let kind = property_string(props, "feature_type").and_then(|t| FeatureKind::parse(&t));

        let extra = props
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            kind,
            to_room: property_string(props, "to_room"),
            from_room: property_string(props, "from_room"),
            room: RoomInfo::from_properties(props),
            building_id: property_string(props, "buildingId")
                .or_else(|| property_string(props, "building_id")),
            name: property_string(props, "name"),
            is_elevator: kind == Some(FeatureKind::Elevator) || is_elevator(props),
            extra,
            ..Self::default()
        }
    }

    /// Room the node links to by name, `to_room` taking precedence
    pub fn linked_room(&self) -> Option<&str> {
        self.to_room.as_deref().or(self.from_room.as_deref())
    }

    pub fn has_room(&self) -> bool {
        self.room.room_name.is_some()
    }

    /// Building identity used for composed node keys: the node's own
    /// `buildingId`. The building of an attributed room is a display value
    /// and never keys a node.
    pub fn building_key(&self) -> Option<&str> {
        self.building_id.as_deref()
    }
}

impl RoomInfo {
    pub fn from_properties(props: &Properties) -> Self {
        Self {
            room_name: property_string(props, "room_name"),
            building: property_string(props, "building"),
            floor: property_string(props, "floor"),
            room_type: property_string(props, "type"),
        }
    }
}

/// Indoor graph node
#[derive(Debug, Clone, PartialEq)]
pub struct IndoorNode {
    pub id: NodeId,
    /// Coordinate in the floor's planar system
    pub coord: Coord<f64>,
    pub meta: NodeMeta,
}

/// Directed half of an undirected indoor edge
#[derive(Debug, Clone, PartialEq)]
pub struct IndoorEdge {
    pub u: NodeId,
    pub v: NodeId,
    pub weight: Distance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_properties_fill_known_fields() {
        let props = json!({
            "feature_type": "door",
            "to_room": " 101 ",
            "from_room": "Hall",
            "floor": 1,
            "buildingId": "eng",
            "width": 2
        });
        let meta = NodeMeta::from_properties(props.as_object().unwrap());

        assert_eq!(meta.kind, Some(FeatureKind::Door));
        assert_eq!(meta.linked_room(), Some("101"));
        assert_eq!(meta.room.floor.as_deref(), Some("1"));
        assert_eq!(meta.building_key(), Some("eng"));
        assert!(!meta.is_elevator);
        assert_eq!(meta.extra.get("width"), Some(&json!(2)));
        assert!(!meta.extra.contains_key("to_room"));
    }

    #[test]
    fn elevator_kind_sets_flag() {
        let props = json!({ "feature_type": "elevator" });
        let meta = NodeMeta::from_properties(props.as_object().unwrap());
        assert!(meta.is_elevator);
        assert!(meta.kind.is_some_and(FeatureKind::is_connector));
    }

    #[test]
    fn unknown_kind_is_unset() {
        assert_eq!(FeatureKind::parse("window"), None);
        assert_eq!(FeatureKind::parse("stairs"), Some(FeatureKind::Stairs));
    }
}
