pub mod dijkstra;
pub mod indoor;
pub mod itinerary;
pub mod outdoor;

pub use indoor::{IndoorRoute, find_indoor_route, find_room_route};
pub use outdoor::{
    NetworkPath, NetworkPathSearch, OutdoorRoute, endpoint_candidates, find_outdoor_route,
    open_highways, resolve_outdoor_route,
};
