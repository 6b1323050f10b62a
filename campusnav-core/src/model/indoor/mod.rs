//! Indoor navigation graph model

pub mod components;
pub mod graph;

pub use components::{FeatureKind, IndoorEdge, IndoorNode, NodeMeta, RoomInfo};
pub use graph::{Adjacency, Adjacent, ComposedGraph, FloorGraph};
