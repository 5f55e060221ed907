//! Region averages for the map and bar chart, and year series for trend comparison.

use std::collections::{BTreeMap, BTreeSet};

use super::filters::FilterTuple;
use super::record::{Dimension, RowStore};

const TREND_DIMENSIONS: [Dimension; 4] = [
    Dimension::Category,
    Dimension::Topic,
    Dimension::Question,
    Dimension::Response,
];

/// Result of reducing the store under the full filter tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// At least one dimension is unset.
    Incomplete,
    /// Filters are complete but no record matches them.
    NoData,
    Values(BTreeMap<String, f64>),
}

impl MapOutcome {
    pub fn values(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            MapOutcome::Values(values) => Some(values),
            _ => None,
        }
    }

    pub fn get(&self, region: &str) -> Option<f64> {
        self.values().and_then(|v| v.get(region).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.values().map_or(true, BTreeMap::is_empty)
    }
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean of `value` per region across every record matching all five filters.
pub fn map_values(store: &RowStore, filters: &FilterTuple) -> MapOutcome {
    if !filters.is_complete() {
        return MapOutcome::Incomplete;
    }

    let mut by_region: BTreeMap<&str, Mean> = BTreeMap::new();
    for record in store.iter().filter(|r| filters.matches(r)) {
        by_region
            .entry(record.region.as_str())
            .or_default()
            .push(record.value);
    }

    if by_region.is_empty() {
        return MapOutcome::NoData;
    }

    MapOutcome::Values(
        by_region
            .into_iter()
            .filter_map(|(region, mean)| mean.value().map(|v| (region.to_string(), v)))
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRegion {
    pub region: String,
    pub value: f64,
}

/// Regions ordered by value, highest first; ties fall back to name order.
pub fn rank_regions(values: &BTreeMap<String, f64>) -> Vec<RankedRegion> {
    let mut ranked: Vec<RankedRegion> = values
        .iter()
        .map(|(region, value)| RankedRegion {
            region: region.clone(),
            value: *value,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.region.cmp(&b.region))
    });
    ranked
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: String,
    /// `None` when the region reported nothing for this year.
    pub value: Option<f64>,
}

impl TrendPoint {
    /// Value to plot; missing years are drawn at zero.
    pub fn value_or_neutral(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub region: String,
    pub points: Vec<TrendPoint>,
}

impl TrendLine {
    pub fn last_value(&self) -> f64 {
        self.points
            .last()
            .map(TrendPoint::value_or_neutral)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    /// Union of years reported by any of the regions, sorted.
    pub years: Vec<String>,
    pub lines: Vec<TrendLine>,
}

impl TrendSeries {
    /// True when there is nothing to plot: no regions, or no year with data.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.years.is_empty()
    }

    /// Largest reported value across all lines.
    pub fn max_value(&self) -> Option<f64> {
        self.lines
            .iter()
            .flat_map(|line| line.points.iter().filter_map(|p| p.value))
            .reduce(f64::max)
    }
}

/// Year-indexed series for each of `regions`, filtered on every dimension but
/// the year. Every line covers the full union of years.
pub fn trend_series(store: &RowStore, filters: &FilterTuple, regions: &[String]) -> TrendSeries {
    if regions.is_empty() || TREND_DIMENSIONS.iter().any(|d| filters.get(*d).is_none()) {
        return TrendSeries::default();
    }

    let mut cells: BTreeMap<(&str, &str), Mean> = BTreeMap::new();
    let mut years: BTreeSet<&str> = BTreeSet::new();

    for record in store.iter() {
        if !filters.matches_on(record, &TREND_DIMENSIONS) {
            continue;
        }
        if !regions.iter().any(|r| *r == record.region) {
            continue;
        }
        years.insert(record.year.as_str());
        cells
            .entry((record.region.as_str(), record.year.as_str()))
            .or_default()
            .push(record.value);
    }

    let lines = regions
        .iter()
        .map(|region| TrendLine {
            region: region.clone(),
            points: years
                .iter()
                .map(|year| TrendPoint {
                    year: (*year).to_string(),
                    value: cells
                        .get(&(region.as_str(), *year))
                        .and_then(Mean::value),
                })
                .collect(),
        })
        .collect();

    TrendSeries {
        years: years.into_iter().map(str::to_owned).collect(),
        lines,
    }
}

/// Hover/detail figures for one region under the full filter tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDetail {
    pub region: String,
    pub value: f64,
    pub sample_size: Option<f64>,
    pub ci_low: Option<f64>,
    pub ci_high: Option<f64>,
}

pub fn region_detail(store: &RowStore, filters: &FilterTuple, region: &str) -> Option<RegionDetail> {
    if !filters.is_complete() {
        return None;
    }

    let mut value = Mean::default();
    let mut sample_size: Option<f64> = None;
    let mut ci_low = Mean::default();
    let mut ci_high = Mean::default();

    for record in store
        .iter()
        .filter(|r| r.region == region && filters.matches(r))
    {
        value.push(record.value);
        if let Some(n) = record.sample_size {
            *sample_size.get_or_insert(0.0) += n;
        }
        if let Some(low) = record.ci_low {
            ci_low.push(low);
        }
        if let Some(high) = record.ci_high {
            ci_high.push(high);
        }
    }

    Some(RegionDetail {
        region: region.to_string(),
        value: value.value()?,
        sample_size,
        ci_low: ci_low.value(),
        ci_high: ci_high.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{fixtures::record, Record};

    fn complete_filters(year: &str) -> FilterTuple {
        let sample = record(year, "", 0.0);
        let mut filters = FilterTuple::default();
        for d in Dimension::ALL {
            filters.set(d, Some(sample.field(d).to_string()));
        }
        filters
    }

    #[test]
    fn duplicate_region_rows_are_averaged() {
        let store = RowStore::from_records(vec![
            record("2021", "X", 10.0),
            record("2021", "X", 20.0),
            record("2021", "X", 30.0),
            record("2021", "Y", 5.0),
            record("2020", "Y", 500.0),
        ]);
        let outcome = map_values(&store, &complete_filters("2021"));
        assert_eq!(outcome.get("X"), Some(20.0));
        assert_eq!(outcome.get("Y"), Some(5.0));
    }

    #[test]
    fn incomplete_and_empty_are_distinct() {
        let store = RowStore::from_records(vec![record("2021", "X", 10.0)]);
        let mut partial = complete_filters("2021");
        partial.clear(Dimension::Response);
        assert_eq!(map_values(&store, &partial), MapOutcome::Incomplete);
        assert_eq!(
            map_values(&store, &complete_filters("1990")),
            MapOutcome::NoData
        );
        assert!(MapOutcome::NoData.is_empty());
    }

    #[test]
    fn ranking_is_descending_with_name_ties() {
        let values: BTreeMap<String, f64> = [("b", 3.0), ("a", 3.0), ("c", 9.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let order: Vec<String> = rank_regions(&values).into_iter().map(|r| r.region).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn trend_covers_union_of_years_with_explicit_gaps() {
        let store = RowStore::from_records(vec![
            record("2019", "A", 1.0),
            record("2021", "A", 3.0),
            record("2020", "B", 2.0),
            record("2018", "C", 7.0),
        ]);
        let regions = vec!["A".to_string(), "B".to_string()];
        let series = trend_series(&store, &complete_filters("2021"), &regions);

        assert_eq!(series.years, ["2019", "2020", "2021"]);
        assert_eq!(series.lines.len(), 2);
        let a = &series.lines[0];
        let b = &series.lines[1];
        assert_eq!(a.points.len(), 3);
        assert_eq!(b.points.len(), 3);
        assert_eq!(a.points[1].value, None);
        assert_eq!(a.points[1].value_or_neutral(), 0.0);
        assert_eq!(b.points[0].value, None);
        assert_eq!(b.points[2].value_or_neutral(), 0.0);
        assert_eq!(b.points[1].value, Some(2.0));
        assert_eq!(series.max_value(), Some(3.0));
    }

    #[test]
    fn trend_ignores_year_filter_but_needs_other_dimensions() {
        let store = RowStore::from_records(vec![record("2019", "A", 1.0)]);
        let regions = vec!["A".to_string()];
        let mut filters = complete_filters("2024");
        assert_eq!(trend_series(&store, &filters, &regions).years, ["2019"]);

        filters.clear(Dimension::Question);
        assert!(trend_series(&store, &filters, &regions).is_empty());
        assert!(trend_series(&store, &complete_filters("2024"), &[]).is_empty());
    }

    #[test]
    fn trend_without_reported_years_is_empty() {
        let store = RowStore::from_records(vec![record("2021", "Iowa", 12.0)]);
        let regions = vec!["Utah".to_string()];
        let series = trend_series(&store, &complete_filters("2021"), &regions);
        assert!(series.years.is_empty());
        assert_eq!(series.lines.len(), 1);
        assert!(series.is_empty());
        assert_eq!(series.max_value(), None);
    }

    #[test]
    fn detail_sums_sample_size_and_averages_bounds() {
        let mut first: Record = record("2021", "X", 10.0);
        first.sample_size = Some(100.0);
        first.ci_low = Some(8.0);
        let mut second = record("2021", "X", 14.0);
        second.sample_size = Some(50.0);
        second.ci_low = Some(12.0);
        let store = RowStore::from_records(vec![first, second]);

        let detail = region_detail(&store, &complete_filters("2021"), "X").unwrap();
        assert_eq!(detail.value, 12.0);
        assert_eq!(detail.sample_size, Some(150.0));
        assert_eq!(detail.ci_low, Some(10.0));
        assert_eq!(detail.ci_high, None);
        assert!(region_detail(&store, &complete_filters("2021"), "Y").is_none());
    }

    #[test]
    fn derivations_are_repeatable() {
        let store = RowStore::from_records(vec![
            record("2021", "X", 10.0),
            record("2021", "Y", 11.0),
        ]);
        let filters = complete_filters("2021");
        assert_eq!(map_values(&store, &filters), map_values(&store, &filters));
        let regions = vec!["X".to_string()];
        assert_eq!(
            trend_series(&store, &filters, &regions),
            trend_series(&store, &filters, &regions)
        );
    }
}
