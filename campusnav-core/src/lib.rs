//! Routing engine for campus navigation.
//!
//! Builds walkable graphs from indoor floor-plan GeoJSON, attaches room
//! identity to graph nodes, composes floors of a building into one graph and
//! searches it. Outdoor routes are resolved between building entrances and
//! bus stops over a street network.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{
    IndoorGraphConfig, OutdoorRoutingConfig, attribute_rooms, build_floor_graph, compose_floors,
    flip_floor_plan,
};
pub use model::{ComposedGraph, FloorGraph, IndoorNode, NodeMeta, OutdoorDataset, StreetGraph};
pub use routing::{
    IndoorRoute, NetworkPath, NetworkPathSearch, OutdoorRoute, find_indoor_route,
    find_outdoor_route, find_room_route, resolve_outdoor_route,
};

/// Identifier of an indoor graph node
pub type NodeId = String;
/// Identifier of a floor inside a building, e.g. `"0"` or `"2"`
pub type FloorId = String;
/// Edge weight or route length in the units of the source coordinates
pub type Distance = f64;
