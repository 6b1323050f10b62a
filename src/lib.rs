//! Campus navigation: outdoor routes between buildings and bus stops, and
//! indoor routes through the composed floors of each building.
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use campusnav::Campus;
//! use campusnav::prelude::*;
//!
//! # fn run(outdoor: OutdoorDataset, floors: BTreeMap<FloorId, geojson::FeatureCollection>) {
//! let mut campus = Campus::new(outdoor);
//! campus.add_building("main", &floors, &IndoorGraphConfig::default());
//! let route = campus.room_route("main", "101", "214");
//! # }
//! ```

mod campus;

pub use campus::{BuildingFloors, Campus};
pub use campusnav_core::Error;

pub mod prelude {
    pub use crate::Campus;
    pub use campusnav_core::prelude::*;
}
