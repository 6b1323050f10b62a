//! Conversion of raw GeoJSON features into the typed records the engine works on.
//!
//! Features with missing or unusable geometry are skipped here with a log
//! line; campus data is expected to have gaps and none of them is fatal.

use std::str::FromStr;
use std::sync::LazyLock;

use geo::{Coord, Geometry};
use geojson::{Feature, FeatureCollection, GeoJson};
use hashbrown::HashMap;
use log::{debug, warn};

use crate::Error;
use crate::model::properties::{Properties, is_elevator, property_string};
use crate::model::{BuildingMeta, BusStop, Entrance, FeatureKind, OutdoorDataset};

/// Geometry of a feature as `geo` types, if it has a convertible one
pub fn feature_geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    match Geometry::<f64>::try_from(geometry.clone()) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            warn!("Skipping feature with unconvertible geometry: {e}");
            None
        }
    }
}

/// Coordinate of a point feature, if it is a point with finite coordinates
pub fn point_coord(feature: &Feature) -> Option<Coord<f64>> {
    match feature_geometry(feature)? {
        Geometry::Point(point) if point.x().is_finite() && point.y().is_finite() => Some(point.0),
        _ => None,
    }
}

/// Parses GeoJSON text that must hold a `FeatureCollection`
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, Error> {
    match GeoJson::from_str(text)? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(Error::InvalidData(
            "expected a FeatureCollection, found a Feature".to_string(),
        )),
        GeoJson::Geometry(_) => Err(Error::InvalidData(
            "expected a FeatureCollection, found a Geometry".to_string(),
        )),
    }
}

static NO_PROPERTIES: LazyLock<Properties> = LazyLock::new(Properties::new);

pub(crate) fn properties(feature: &Feature) -> &Properties {
    feature.properties.as_ref().unwrap_or(&NO_PROPERTIES)
}

/// Indoor feature with its kind and geometry validated
#[derive(Debug, Clone)]
pub struct IndoorFeature<'a> {
    pub kind: FeatureKind,
    pub geometry: Geometry<f64>,
    pub properties: &'a Properties,
}

impl<'a> IndoorFeature<'a> {
    /// `None` for features without a recognised `feature_type` or geometry
    pub fn from_feature(feature: &'a Feature) -> Option<Self> {
        let props = properties(feature);
        let kind = property_string(props, "feature_type").and_then(|t| FeatureKind::parse(&t))?;
        let geometry = feature_geometry(feature)?;
        Some(Self {
            kind,
            geometry,
            properties: props,
        })
    }
}

/// Typed indoor features of a floor in collection order
pub fn indoor_features(collection: &FeatureCollection) -> Vec<IndoorFeature<'_>> {
    let features: Vec<IndoorFeature<'_>> = collection
        .features
        .iter()
        .filter_map(IndoorFeature::from_feature)
        .collect();
    debug!(
        "{} of {} floor features are routable indoor features",
        features.len(),
        collection.features.len()
    );
    features
}

fn feature_id(feature: &Feature) -> Option<String> {
    property_string(properties(feature), "id")
}

/// Entrances of all buildings. Features without an id or point geometry are skipped.
pub fn entrances_from_collection(collection: &FeatureCollection) -> Vec<Entrance> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let (Some(id), Some(coord)) = (feature_id(feature), point_coord(feature)) else {
                debug!("Skipping entrance feature without id or point geometry");
                return None;
            };
            let props = properties(feature);
            Some(Entrance {
                id,
                coord,
                name: property_string(props, "name"),
                is_elevator: is_elevator(props),
            })
        })
        .collect()
}

pub fn bus_stops_from_collection(collection: &FeatureCollection) -> Vec<BusStop> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let (Some(id), Some(coord)) = (feature_id(feature), point_coord(feature)) else {
                debug!("Skipping bus stop feature without id or point geometry");
                return None;
            };
            Some(BusStop {
                id,
                coord,
                name: property_string(properties(feature), "name"),
            })
        })
        .collect()
}

/// Parses the building id keyed metadata object
pub fn parse_building_metadata(text: &str) -> Result<HashMap<String, BuildingMeta>, Error> {
    let metadata: std::collections::HashMap<String, BuildingMeta> = serde_json::from_str(text)?;
    Ok(metadata.into_iter().collect())
}

impl OutdoorDataset {
    /// Assembles the data set from the raw collections supplied by the data loader
    pub fn from_geojson(
        entrances: &FeatureCollection,
        highways: FeatureCollection,
        bus_stops: &FeatureCollection,
        metadata: HashMap<String, BuildingMeta>,
    ) -> Self {
        Self::new(
            entrances_from_collection(entrances),
            bus_stops_from_collection(bus_stops),
            highways.features,
            metadata,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        Feature::from_json_value(value).unwrap()
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    #[test]
    fn parse_collection_text() {
        let text = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
              "properties": { "feature_type": "door" } }
        ] }"#;
        let parsed = parse_feature_collection(text).unwrap();
        assert_eq!(parsed.features.len(), 1);
        assert_eq!(point_coord(&parsed.features[0]), Some(Coord { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn parse_rejects_single_feature() {
        let text = r#"{ "type": "Feature", "geometry": null, "properties": {} }"#;
        assert!(matches!(
            parse_feature_collection(text),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            parse_feature_collection("not json"),
            Err(Error::GeoJson(_))
        ));
    }

    #[test]
    fn indoor_features_need_kind_and_geometry() {
        let fc = collection(vec![
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "feature_type": "door" } })),
            feature(json!({ "type": "Feature", "geometry": null,
                "properties": { "feature_type": "door" } })),
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "feature_type": "window" } })),
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": null })),
        ]);
        let features = indoor_features(&fc);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, FeatureKind::Door);
    }

    #[test]
    fn entrances_keep_elevator_flag_and_skip_unusable() {
        let fc = collection(vec![
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                "properties": { "id": "e1", "name": "Main" } })),
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [11.0, 21.0] },
                "properties": { "id": 2, "type": "elevator" } })),
            feature(json!({ "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [12.0, 22.0] },
                "properties": { "name": "no id" } })),
            feature(json!({ "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                "properties": { "id": "e4" } })),
        ]);
        let entrances = entrances_from_collection(&fc);
        assert_eq!(entrances.len(), 2);
        assert_eq!(entrances[0].id, "e1");
        assert!(!entrances[0].is_elevator);
        assert_eq!(entrances[1].id, "2");
        assert!(entrances[1].is_elevator);
    }

    #[test]
    fn metadata_text() {
        let metadata =
            parse_building_metadata(r#"{ "lib": { "entrances": ["e1", "e2"], "name": "Library" } }"#)
                .unwrap();
        assert_eq!(metadata["lib"].entrances.len(), 2);
        assert!(parse_building_metadata("[]").is_err());
    }
}
