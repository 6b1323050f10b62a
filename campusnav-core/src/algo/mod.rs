//! Planar geometry helpers used by the graph builders

pub mod geometry;

pub use geometry::{distance, point_in_polygon};
