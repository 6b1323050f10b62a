use geo::Coord;
use geojson::Feature;
use log::{debug, trace};
use serde_json::Value;

use super::dijkstra::street_shortest_path;
use crate::loading::OutdoorRoutingConfig;
use crate::model::{OutdoorDataset, StreetGraph};

/// Path found by a street network search
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPath {
    /// `[lng, lat]` coordinates along the network
    pub coordinates: Vec<Coord<f64>>,
    pub weight: f64,
}

/// Point to point search over a street network.
///
/// The outdoor resolver only needs this capability; [`StreetGraph`] is the
/// default implementation.
pub trait NetworkPathSearch {
    /// Lowest cost path between the two points, `None` when they are not connected
    fn find_path(&self, start: Coord<f64>, end: Coord<f64>) -> Option<NetworkPath>;
}

impl<T: NetworkPathSearch + ?Sized> NetworkPathSearch for &T {
    fn find_path(&self, start: Coord<f64>, end: Coord<f64>) -> Option<NetworkPath> {
        (**self).find_path(start, end)
    }
}

impl NetworkPathSearch for StreetGraph {
    fn find_path(&self, start: Coord<f64>, end: Coord<f64>) -> Option<NetworkPath> {
        let source = self.snap(start)?;
        let target = self.snap(end)?;
        let (coordinates, weight) = street_shortest_path(self, source, target)?;
        Some(NetworkPath {
            coordinates,
            weight,
        })
    }
}

/// Outdoor route between two buildings or bus stops
#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorRoute {
    pub start_ref: String,
    pub end_ref: String,
    /// `[lng, lat]` coordinates of the route
    pub route_coordinates: Vec<Coord<f64>>,
    /// Entrance or stop the route starts from
    pub used_start_point: Coord<f64>,
    /// Entrance or stop the route ends at
    pub used_end_point: Coord<f64>,
    pub total_distance: f64,
}

/// Street features that are open for walking: anything but an explicit `status: false`
pub fn open_highways(highways: &[Feature]) -> Vec<&Feature> {
    highways
        .iter()
        .filter(|feature| {
            let closed = feature
                .properties
                .as_ref()
                .and_then(|props| props.get("status"))
                .is_some_and(|status| *status == Value::Bool(false));
            !closed
        })
        .collect()
}

/// Candidate coordinates of a route endpoint.
///
/// References with the bus stop prefix resolve to that stop; anything else
/// is treated as a building id and resolves to its non-elevator entrances.
pub fn endpoint_candidates(
    reference: &str,
    data: &OutdoorDataset,
    config: &OutdoorRoutingConfig,
) -> Vec<Coord<f64>> {
    if reference.starts_with(&config.bus_stop_prefix) {
        return data
            .bus_stop(reference)
            .map(|stop| vec![stop.coord])
            .unwrap_or_default();
    }

    data.building_entrances(reference)
        .into_iter()
        .map(|entrance| entrance.coord)
        .collect()
}

/// Resolves an outdoor route with a caller supplied street network search.
///
/// `build_search` receives the open street features and returns the
/// search used for every pair of start and end candidates; the cheapest
/// path over all pairs wins.
pub fn resolve_outdoor_route<S, B>(
    start_ref: &str,
    end_ref: &str,
    data: &OutdoorDataset,
    config: &OutdoorRoutingConfig,
    build_search: B,
) -> Option<OutdoorRoute>
where
    S: NetworkPathSearch,
    B: FnOnce(&[&Feature]) -> S,
{
    let starts = endpoint_candidates(start_ref, data, config);
    let ends = endpoint_candidates(end_ref, data, config);

    if starts.is_empty() || ends.is_empty() {
        debug!(
            "No route {start_ref} -> {end_ref}: {} start and {} end candidates",
            starts.len(),
            ends.len()
        );
        return None;
    }

    let open = open_highways(&data.highways);
    trace!(
        "{} of {} street features are open",
        open.len(),
        data.highways.len()
    );
    let search = build_search(&open);

    let mut best: Option<(NetworkPath, Coord<f64>, Coord<f64>)> = None;
    for &start in &starts {
        for &end in &ends {
            let Some(path) = search.find_path(start, end) else {
                trace!("No street path {start:?} -> {end:?}");
                continue;
            };
            if best
                .as_ref()
                .is_none_or(|(current, _, _)| path.weight < current.weight)
            {
                best = Some((path, start, end));
            }
        }
    }

    let Some((path, used_start_point, used_end_point)) = best else {
        debug!(
            "No route {start_ref} -> {end_ref} over {} candidate pairs",
            starts.len() * ends.len()
        );
        return None;
    };

    Some(OutdoorRoute {
        start_ref: start_ref.to_string(),
        end_ref: end_ref.to_string(),
        route_coordinates: path.coordinates,
        used_start_point,
        used_end_point,
        total_distance: path.weight,
    })
}

/// Resolves an outdoor route over the data set's own street network
pub fn find_outdoor_route(
    start_ref: &str,
    end_ref: &str,
    data: &OutdoorDataset,
    config: &OutdoorRoutingConfig,
) -> Option<OutdoorRoute> {
    resolve_outdoor_route(start_ref, end_ref, data, config, |open| {
        StreetGraph::from_features(open.iter().copied(), config)
    })
}
