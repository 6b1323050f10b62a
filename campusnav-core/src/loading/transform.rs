use geo::{Coord, MapCoords};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};

use super::features::feature_geometry;

/// Moves a floor plan from image space into the map's planar space.
///
/// Floor plans are digitized with y growing downwards from the image top;
/// every coordinate `(x, y)` becomes `(x, image_height + y)`. Features whose
/// geometry cannot be read are kept unchanged.
pub fn flip_floor_plan(collection: &FeatureCollection, image_height: f64) -> FeatureCollection {
    let features = collection
        .features
        .iter()
        .map(|feature| flip_feature(feature, image_height))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: collection.foreign_members.clone(),
    }
}

fn flip_feature(feature: &Feature, image_height: f64) -> Feature {
    let Some(geometry) = feature_geometry(feature) else {
        return feature.clone();
    };

    let flipped = geometry.map_coords(|Coord { x, y }| Coord {
        x,
        y: image_height + y,
    });

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::from(&flipped))),
        ..feature.clone()
    }
}
