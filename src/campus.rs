use std::collections::BTreeMap;

use campusnav_core::prelude::*;
use geojson::FeatureCollection;
use log::info;
use rayon::prelude::*;

/// Floor plans of one building keyed by floor id
pub type BuildingFloors = BTreeMap<FloorId, FeatureCollection>;

/// Routing state of a campus: the outdoor data set and one composed indoor
/// graph per registered building.
#[derive(Debug, Clone)]
pub struct Campus {
    outdoor: OutdoorDataset,
    config: OutdoorRoutingConfig,
    buildings: BTreeMap<String, ComposedGraph>,
}

impl Campus {
    pub fn new(outdoor: OutdoorDataset) -> Self {
        Self::with_config(outdoor, OutdoorRoutingConfig::default())
    }

    pub fn with_config(outdoor: OutdoorDataset, config: OutdoorRoutingConfig) -> Self {
        Self {
            outdoor,
            config,
            buildings: BTreeMap::new(),
        }
    }

    /// Loads the outdoor data set from its raw documents: entrance, street and
    /// bus stop `FeatureCollection`s plus the building metadata object.
    pub fn from_geojson(
        entrances: &str,
        highways: &str,
        bus_stops: &str,
        metadata: &str,
        config: OutdoorRoutingConfig,
    ) -> Result<Self, Error> {
        let outdoor = OutdoorDataset::from_geojson(
            &parse_feature_collection(entrances)?,
            parse_feature_collection(highways)?,
            &parse_feature_collection(bus_stops)?,
            parse_building_metadata(metadata)?,
        );
        info!(
            "Loaded campus: {} entrances, {} bus stops, {} street features, {} buildings",
            outdoor.entrances.len(),
            outdoor.bus_stops.len(),
            outdoor.highways.len(),
            outdoor.metadata.len()
        );
        Ok(Self::with_config(outdoor, config))
    }

    /// Composes the floors of a building and registers the graph, replacing
    /// any graph previously registered under `building_id`.
    pub fn add_building(
        &mut self,
        building_id: &str,
        floors: &BuildingFloors,
        config: &IndoorGraphConfig,
    ) -> &ComposedGraph {
        let graph = compose_floors(building_id, floors, config);
        self.buildings.insert(building_id.to_string(), graph);
        &self.buildings[building_id]
    }

    /// Composes several buildings in parallel
    pub fn add_buildings(
        &mut self,
        buildings: &BTreeMap<String, BuildingFloors>,
        config: &IndoorGraphConfig,
    ) {
        let composed: Vec<(String, ComposedGraph)> = buildings
            .par_iter()
            .map(|(id, floors)| (id.clone(), compose_floors(id, floors, config)))
            .collect();
        self.buildings.extend(composed);
    }

    pub fn building(&self, building_id: &str) -> Option<&ComposedGraph> {
        self.buildings.get(building_id)
    }

    pub fn building_ids(&self) -> impl Iterator<Item = &str> {
        self.buildings.keys().map(String::as_str)
    }

    pub fn outdoor(&self) -> &OutdoorDataset {
        &self.outdoor
    }

    pub fn config(&self) -> &OutdoorRoutingConfig {
        &self.config
    }

    /// Route between two buildings or bus stops over the campus streets
    pub fn outdoor_route(&self, start_ref: &str, end_ref: &str) -> Option<OutdoorRoute> {
        find_outdoor_route(start_ref, end_ref, &self.outdoor, &self.config)
    }

    /// Route between two composed node ids of a building.
    ///
    /// Fails only when the building has not been added; an unreachable or
    /// unknown node yields `Ok(None)`.
    pub fn indoor_route(
        &self,
        building_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Option<IndoorRoute>, Error> {
        let graph = self.require_building(building_id)?;
        Ok(find_indoor_route(graph, start, end))
    }

    /// Route between any nodes attributed to two rooms of a building
    pub fn room_route(
        &self,
        building_id: &str,
        from_room: &str,
        to_room: &str,
    ) -> Result<Option<IndoorRoute>, Error> {
        let graph = self.require_building(building_id)?;
        Ok(find_room_route(graph, from_room, to_room))
    }

    fn require_building(&self, building_id: &str) -> Result<&ComposedGraph, Error> {
        self.buildings
            .get(building_id)
            .ok_or_else(|| Error::UnknownBuilding(building_id.to_string()))
    }
}
