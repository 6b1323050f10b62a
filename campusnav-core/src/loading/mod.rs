//! This module turns raw GeoJSON feature collections into routable
//! structures: per-floor indoor graphs with room identity, composed
//! building graphs and the typed outdoor data set.

mod builder;
mod composer;
mod config;
mod features;
mod rooms;
mod transform;

pub use builder::{IdGenerator, build_floor_graph};
pub use composer::{compose_floors, composed_key};
pub use config::{IndoorGraphConfig, OutdoorRoutingConfig};
pub use features::{
    IndoorFeature, bus_stops_from_collection, entrances_from_collection, feature_geometry,
    indoor_features, parse_building_metadata, parse_feature_collection, point_coord,
};
pub use rooms::{Room, RoomIndex, attribute_rooms};
pub use transform::flip_floor_plan;
