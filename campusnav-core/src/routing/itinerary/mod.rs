//! Route export for map clients

mod to_geojson;
