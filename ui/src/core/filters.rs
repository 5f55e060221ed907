//! Filter tuple and the year-rooted option cascade.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::record::{Dimension, Record, RowStore};

/// Current value of each filter dimension. `None` is the unset sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterTuple {
    pub year: Option<String>,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub question: Option<String>,
    pub response: Option<String>,
}

impl FilterTuple {
    pub fn with_year(year: impl Into<String>) -> Self {
        let mut tuple = Self::default();
        tuple.set(Dimension::Year, Some(year.into()));
        tuple
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    /// Writes a single slot. Empty strings are stored as unset. No cascading.
    pub fn set(&mut self, dimension: Dimension, value: Option<String>) {
        *self.slot_mut(dimension) = value.filter(|v| !v.is_empty());
    }

    pub fn clear(&mut self, dimension: Dimension) {
        *self.slot_mut(dimension) = None;
    }

    /// True when every dimension holds a value.
    pub fn is_complete(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_some())
    }

    /// True when `record` matches every dimension in `dimensions`. An unset
    /// dimension matches nothing.
    pub fn matches_on(&self, record: &Record, dimensions: &[Dimension]) -> bool {
        dimensions
            .iter()
            .all(|d| self.get(*d).is_some_and(|v| record.field(*d) == v))
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_on(record, &Dimension::ALL)
    }

    fn slot(&self, dimension: Dimension) -> &Option<String> {
        match dimension {
            Dimension::Year => &self.year,
            Dimension::Category => &self.category,
            Dimension::Topic => &self.topic,
            Dimension::Question => &self.question,
            Dimension::Response => &self.response,
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::Year => &mut self.year,
            Dimension::Category => &mut self.category,
            Dimension::Topic => &mut self.topic,
            Dimension::Question => &mut self.question,
            Dimension::Response => &mut self.response,
        }
    }
}

/// Sorted, de-duplicated values of `dimension` among records matching every
/// upstream selection. Empty if an upstream selection is unset.
pub fn options_for(dimension: Dimension, store: &RowStore, filters: &FilterTuple) -> Vec<String> {
    let upstream = dimension.upstream();
    if upstream.iter().any(|d| filters.get(*d).is_none()) {
        return Vec::new();
    }

    store
        .iter()
        .filter(|record| filters.matches_on(record, upstream))
        .map(|record| record.field(dimension))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Option lists for all five dimensions, in cascade order.
pub fn all_options(store: &RowStore, filters: &FilterTuple) -> [Vec<String>; 5] {
    Dimension::ALL.map(|dimension| options_for(dimension, store, filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::fixtures::record;

    fn store() -> RowStore {
        let mut rows = vec![
            record("2021", "Ohio", 10.0),
            record("2020", "Ohio", 12.0),
            record("2021", "Utah", 8.0),
        ];
        let mut other = record("2021", "Iowa", 4.0);
        other.category = "Tobacco Use".into();
        other.topic = "Current Smoker Status".into();
        rows.push(other);
        let mut no = record("2021", "Ohio", 90.0);
        no.response = "No".into();
        rows.push(no);
        RowStore::from_records(rows)
    }

    #[test]
    fn years_are_sorted_and_unique() {
        let options = options_for(Dimension::Year, &store(), &FilterTuple::default());
        assert_eq!(options, vec!["2020", "2021"]);
    }

    #[test]
    fn downstream_options_require_upstream_values() {
        let store = store();
        let filters = FilterTuple::default();
        assert!(options_for(Dimension::Category, &store, &filters).is_empty());

        let mut filters = FilterTuple::with_year("2021");
        assert_eq!(
            options_for(Dimension::Category, &store, &filters),
            vec!["Alcohol Consumption", "Tobacco Use"]
        );
        assert!(options_for(Dimension::Question, &store, &filters).is_empty());

        filters.set(Dimension::Category, Some("Alcohol Consumption".into()));
        filters.set(Dimension::Topic, Some("Binge Drinking".into()));
        filters.set(
            Dimension::Question,
            Some("Adults who drank in the past 30 days".into()),
        );
        assert_eq!(
            options_for(Dimension::Response, &store, &filters),
            vec!["No", "Yes"]
        );
    }

    #[test]
    fn every_option_has_a_witness_record() {
        let store = store();
        let mut filters = FilterTuple::with_year("2021");
        filters.set(Dimension::Category, Some("Tobacco Use".into()));
        for topic in options_for(Dimension::Topic, &store, &filters) {
            assert!(store.iter().any(|r| filters
                .matches_on(r, Dimension::Topic.upstream())
                && r.topic == topic));
        }
    }

    #[test]
    fn stale_upstream_value_yields_no_options() {
        let mut filters = FilterTuple::with_year("1999");
        filters.set(Dimension::Category, Some("Alcohol Consumption".into()));
        assert!(options_for(Dimension::Category, &store(), &filters).is_empty());
        assert!(options_for(Dimension::Topic, &store(), &filters).is_empty());
    }

    #[test]
    fn empty_string_is_unset() {
        let mut filters = FilterTuple::with_year("2021");
        filters.set(Dimension::Category, Some(String::new()));
        assert_eq!(filters.get(Dimension::Category), None);
    }
}
