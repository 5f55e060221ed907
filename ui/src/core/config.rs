//! Launch-time dashboard settings.
//!
//! Platforms may register a config before launching (e.g. desktop reads
//! `riskatlas.json` from its resource directory). Components call
//! [`DashboardConfig::current`], which falls back to the defaults.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPOLOGY_SOURCE: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/counties-10m.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path or URL of the survey CSV.
    pub data_source: String,
    /// Path or URL of the TopoJSON boundaries (must contain `objects.states`).
    pub topology_source: String,
    pub initial_year: Option<String>,
    pub map: MapViewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            width: 975.0,
            height: 610.0,
            scale: 1300.0,
            min_zoom: 1.0,
            max_zoom: 8.0,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: "data.csv".to_string(),
            topology_source: DEFAULT_TOPOLOGY_SOURCE.to_string(),
            initial_year: Some("2022".to_string()),
            map: MapViewport::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn current() -> Self {
        CONFIG.get().cloned().unwrap_or_default()
    }
}

static CONFIG: OnceCell<DashboardConfig> = OnceCell::new();

/// Installs the config used by [`DashboardConfig::current`]. Only the first
/// registration takes effect.
pub fn register(config: DashboardConfig) {
    let _ = CONFIG.set(config);
}
