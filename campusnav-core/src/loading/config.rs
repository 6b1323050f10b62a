use serde::Deserialize;

/// Options of the indoor graph builder
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndoorGraphConfig {
    /// Radius within which a door, elevator or stairs node is attached to
    /// its nearest existing node, in floor coordinate units
    pub max_connect_distance: f64,
}

impl Default for IndoorGraphConfig {
    fn default() -> Self {
        Self {
            max_connect_distance: 40.0,
        }
    }
}

/// Options of outdoor route resolution and the default street network search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutdoorRoutingConfig {
    /// Endpoint references starting with this prefix name bus stops
    pub bus_stop_prefix: String,
    /// Farthest an endpoint may lie from a network vertex, in metres
    pub max_snap_distance: f64,
    /// Line ends closer than this to another vertex get a connector edge,
    /// in metres. Zero disables joining.
    pub join_tolerance: f64,
    /// Grid, in degrees, on which coinciding network vertices are merged
    pub coordinate_precision: f64,
}

impl Default for OutdoorRoutingConfig {
    fn default() -> Self {
        Self {
            bus_stop_prefix: "bus_".to_string(),
            max_snap_distance: 15.0,
            join_tolerance: 3.0,
            coordinate_precision: 1e-5,
        }
    }
}
