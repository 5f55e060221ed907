//! Everything the rendering layer reads, derived in one pass from the store
//! and the current [`DashboardState`].

use super::aggregate::{self, MapOutcome, RankedRegion, TrendSeries};
use super::color::ColorMapping;
use super::filters;
use super::record::{Dimension, RowStore};
use super::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStatus {
    /// Some filter is still unset.
    Incomplete,
    /// Filters are complete but match no rows.
    NoData,
    Ready,
}

impl DataStatus {
    pub fn message(self) -> Option<&'static str> {
        match self {
            DataStatus::Incomplete => {
                Some("Please select a Year, Class, Topic, Question and Response to display the choropleth.")
            }
            DataStatus::NoData => Some("No data is reported for the current selection."),
            DataStatus::Ready => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Option lists in cascade order.
    pub options: [Vec<String>; 5],
    pub all_selected: bool,
    pub map: MapOutcome,
    pub ranked: Vec<RankedRegion>,
    pub colors: Option<ColorMapping>,
    pub highlighted: Vec<String>,
    pub trend: TrendSeries,
    pub status: DataStatus,
}

impl DashboardSnapshot {
    pub fn derive(store: &RowStore, state: &DashboardState) -> Self {
        let options = filters::all_options(store, &state.filters);
        let map = aggregate::map_values(store, &state.filters);
        let ranked = map.values().map(aggregate::rank_regions).unwrap_or_default();
        let colors = map
            .values()
            .and_then(|values| ColorMapping::build(values.values().copied()));
        let highlighted = state.highlighted().to_vec();
        let trend = aggregate::trend_series(store, &state.filters, &highlighted);
        let status = status_of(&map);

        Self {
            options,
            all_selected: state.all_selected(),
            map,
            ranked,
            colors,
            highlighted,
            trend,
            status,
        }
    }

    pub fn options(&self, dimension: Dimension) -> &[String] {
        &self.options[dimension.index()]
    }

    /// Fill for a region, if it has a mapped value.
    pub fn fill_for(&self, region: &str) -> Option<&'static str> {
        let value = self.map.get(region)?;
        self.colors.as_ref().map(|c| c.color(value))
    }
}

pub fn status_of(map: &MapOutcome) -> DataStatus {
    match map {
        MapOutcome::Incomplete => DataStatus::Incomplete,
        MapOutcome::NoData => DataStatus::NoData,
        MapOutcome::Values(values) if values.is_empty() => DataStatus::NoData,
        MapOutcome::Values(_) => DataStatus::Ready,
    }
}
