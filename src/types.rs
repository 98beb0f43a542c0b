use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::generator::SnapshotGenerator;
use crate::http_client::HttpTransport;
use crate::regions::RegionCatalog;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub catalog: Arc<RegionCatalog>,
    pub cache: Arc<SnapshotCache>,
    pub generator: Arc<SnapshotGenerator<HttpTransport>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub identifier: String,
    #[serde(default)]
    pub fixes: Vec<Fix>,
}

/// Readings for one altitude level, kept as text so missing upstream values
/// stay distinguishable from numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelReading {
    #[serde(rename = "T(K)")]
    pub temperature_kelvin: String,
    #[serde(rename = "windspeed")]
    pub wind_speed_knots: String,
    #[serde(rename = "windhdg")]
    pub wind_heading_degrees: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixCoords {
    pub lat: String,
    #[serde(rename = "long")]
    pub lon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixSnapshot {
    pub coords: FixCoords,
    pub levels: IndexMap<String, LevelReading>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub date: String,
    pub datestring: String,
    pub legal: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub info: SnapshotInfo,
    pub data: IndexMap<String, FixSnapshot>,
}
