//! Outdoor model: building entrances, bus stops and the street network

pub mod components;
pub mod data;
pub mod network;

pub use components::{BuildingMeta, BusStop, Entrance};
pub use data::OutdoorDataset;
pub use network::{StreetEdge, StreetGraph, StreetNode, haversine_distance};
