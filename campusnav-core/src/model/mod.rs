//! Data model for campus routing
//!
//! Indoor graphs built from floor plans and the outdoor data used to route
//! between buildings.

pub mod indoor;
pub mod outdoor;
pub mod properties;

pub use indoor::{
    Adjacency, Adjacent, ComposedGraph, FeatureKind, FloorGraph, IndoorEdge, IndoorNode, NodeMeta,
    RoomInfo,
};
pub use outdoor::{BuildingMeta, BusStop, Entrance, OutdoorDataset, StreetGraph};
