pub use crate::Error;

// Graph construction
pub use crate::loading::{
    IdGenerator, IndoorGraphConfig, OutdoorRoutingConfig, attribute_rooms, build_floor_graph,
    compose_floors, flip_floor_plan, parse_building_metadata, parse_feature_collection,
};
pub use crate::model::{
    ComposedGraph, FeatureKind, FloorGraph, IndoorEdge, IndoorNode, NodeMeta,
};

// Outdoor data
pub use crate::model::{BuildingMeta, BusStop, Entrance, OutdoorDataset, StreetGraph};

// Searches
pub use crate::routing::{
    IndoorRoute, NetworkPath, NetworkPathSearch, OutdoorRoute, find_indoor_route,
    find_outdoor_route, find_room_route, resolve_outdoor_route,
};

pub use crate::{Distance, FloorId, NodeId};
