use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Unknown building: {0}")]
    UnknownBuilding(String),
}

impl From<geojson::Error> for Error {
    fn from(err: geojson::Error) -> Self {
        Error::GeoJson(err.to_string())
    }
}
