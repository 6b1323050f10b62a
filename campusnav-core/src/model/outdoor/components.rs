//! Outdoor routing endpoints - entrances, bus stops and building metadata

use geo::Coord;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::properties::Properties;

/// Building entrance usable as an outdoor to indoor transition
#[derive(Debug, Clone, PartialEq)]
pub struct Entrance {
    pub id: String,
    /// `[lng, lat]`
    pub coord: Coord<f64>,
    pub name: Option<String>,
    pub is_elevator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    pub id: String,
    /// `[lng, lat]`
    pub coord: Coord<f64>,
    pub name: Option<String>,
}

/// Descriptive metadata of a building, keyed by building id in the source data
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BuildingMeta {
    /// Ids of the entrance features of this building
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub entrances: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// Entrance ids show up both as strings and as numbers
fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "entrance id must be a string or number, got {other}"
            ))),
        })
        .collect()
}
