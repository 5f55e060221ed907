mod filters;
pub use filters::FilterControls;

mod map;
pub use map::{ChoroplethMap, FloatingLabels};

mod legend;
pub use legend::ColorScaleLegend;

mod bars;
pub use bars::RegionBarChart;

mod trend;
pub use trend::TrendChart;

mod detail;
pub use detail::RegionDetailCard;

mod utils;
pub(crate) use utils::*;

use crate::core::config::MapViewport;
use crate::core::geo::{self, AlbersUsa, RegionShape};
use crate::core::loader;
use crate::core::platform;
use crate::core::record::RowStore;

/// Projected outline of one region, ready for an SVG `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPath {
    pub name: String,
    pub d: String,
}

pub fn project_shapes(shapes: &[RegionShape], viewport: &MapViewport) -> Vec<RegionPath> {
    let projection = AlbersUsa::for_viewport(viewport.width, viewport.height, viewport.scale);
    shapes
        .iter()
        .map(|shape| RegionPath {
            name: shape.name.clone(),
            d: geo::path_data(shape, &projection),
        })
        .filter(|path| !path.d.is_empty())
        .collect()
}

/// Fetches and parses the survey CSV.
pub async fn load_dataset(source: &str) -> Result<RowStore, String> {
    let text = platform::fetch_text(source)
        .await
        .map_err(|err| format!("Couldn't load survey data: {err}"))?;
    loader::load_rows_from_str(&text).map_err(|err| format!("Couldn't read survey data: {err}"))
}

/// Fetches the TopoJSON topology and decodes its `states` object.
pub async fn load_boundaries(source: &str) -> Result<Vec<RegionShape>, String> {
    let text = platform::fetch_text(source)
        .await
        .map_err(|err| format!("Couldn't load map boundaries: {err}"))?;
    geo::decode_states(&text).map_err(|err| format!("Couldn't read map boundaries: {err}"))
}
