mod indoor;
mod state;
mod street;

pub use indoor::adjacency_shortest_path;
pub(crate) use street::street_shortest_path;
