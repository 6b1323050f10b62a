//! Outdoor data set consumed by route resolution

use geojson::Feature;
use hashbrown::HashMap;

use super::components::{BuildingMeta, BusStop, Entrance};

/// Entrances, bus stops, street network and building metadata of a campus
#[derive(Debug, Clone, Default)]
pub struct OutdoorDataset {
    pub entrances: Vec<Entrance>,
    pub bus_stops: Vec<BusStop>,
    /// Raw street network features, including closed ones
    pub highways: Vec<Feature>,
    pub metadata: HashMap<String, BuildingMeta>,
}

impl OutdoorDataset {
    pub fn new(
        entrances: Vec<Entrance>,
        bus_stops: Vec<BusStop>,
        highways: Vec<Feature>,
        metadata: HashMap<String, BuildingMeta>,
    ) -> Self {
        Self {
            entrances,
            bus_stops,
            highways,
            metadata,
        }
    }

    pub fn bus_stop(&self, id: &str) -> Option<&BusStop> {
        self.bus_stops.iter().find(|stop| stop.id == id)
    }

    pub fn building(&self, id: &str) -> Option<&BuildingMeta> {
        self.metadata.get(id)
    }

    /// Entrances listed for the building in metadata, elevators excluded
    pub fn building_entrances(&self, building_id: &str) -> Vec<&Entrance> {
        let Some(meta) = self.metadata.get(building_id) else {
            return Vec::new();
        };

        self.entrances
            .iter()
            .filter(|entrance| meta.entrances.contains(&entrance.id) && !entrance.is_elevator)
            .collect()
    }
}
