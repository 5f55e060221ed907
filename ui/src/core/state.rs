//! Mutable dashboard selection: filters, the shared region selection and hover focus.
//!
//! Changing any filter clears every dimension below it, so a selection never
//! points at a value outside its own option list. Changing the year also
//! clears region selection and hover, since the whole cascade is rooted there.

use super::filters::FilterTuple;
use super::record::Dimension;
use super::selection::RegionSelection;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub filters: FilterTuple,
    pub regions: RegionSelection,
    pub hovered: Option<String>,
}

impl DashboardState {
    pub fn new(initial_year: Option<String>) -> Self {
        let mut filters = FilterTuple::default();
        filters.set(Dimension::Year, initial_year);
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Sets one dimension and cascades the reset downstream. Re-setting the
    /// current value changes nothing.
    pub fn set(&mut self, dimension: Dimension, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        if self.filters.get(dimension) == value.as_deref() {
            return;
        }

        self.filters.set(dimension, value);
        for below in dimension.downstream() {
            self.filters.clear(*below);
        }

        if dimension == Dimension::Year {
            self.regions.clear();
            self.hovered = None;
        }
    }

    pub fn set_year(&mut self, value: Option<String>) {
        self.set(Dimension::Year, value);
    }

    pub fn set_category(&mut self, value: Option<String>) {
        self.set(Dimension::Category, value);
    }

    pub fn set_topic(&mut self, value: Option<String>) {
        self.set(Dimension::Topic, value);
    }

    pub fn set_question(&mut self, value: Option<String>) {
        self.set(Dimension::Question, value);
    }

    pub fn set_response(&mut self, value: Option<String>) {
        self.set(Dimension::Response, value);
    }

    /// Steps to the adjacent entry of `years`. No-op at either end or when the
    /// current year is not listed.
    pub fn move_year(&mut self, years: &[String], delta: isize) {
        let Some(current) = self.filters.get(Dimension::Year) else {
            return;
        };
        let Some(index) = years.iter().position(|y| y == current) else {
            return;
        };
        let Some(target) = index.checked_add_signed(delta) else {
            return;
        };
        if let Some(next) = years.get(target) {
            self.set_year(Some(next.clone()));
        }
    }

    pub fn select_region(&mut self, region: &str) {
        self.regions.select(region);
    }

    pub fn hover(&mut self, region: Option<String>) {
        self.hovered = region;
    }

    pub fn all_selected(&self) -> bool {
        self.filters.is_complete()
    }

    pub fn highlighted(&self) -> &[String] {
        self.regions.highlighted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_state() -> DashboardState {
        let mut state = DashboardState::new(Some("2021".into()));
        state.set_category(Some("Alcohol Consumption".into()));
        state.set_topic(Some("Binge Drinking".into()));
        state.set_question(Some("Q".into()));
        state.set_response(Some("Yes".into()));
        state.select_region("Ohio");
        state.select_region("Utah");
        state.hover(Some("Iowa".into()));
        state
    }

    #[test]
    fn year_change_resets_everything_below() {
        let mut state = full_state();
        assert!(state.all_selected());
        state.set_year(Some("2022".into()));
        assert_eq!(state.filters.get(Dimension::Year), Some("2022"));
        for d in Dimension::Year.downstream() {
            assert_eq!(state.filters.get(*d), None);
        }
        assert!(state.regions.is_empty());
        assert_eq!(state.hovered, None);
        assert!(!state.all_selected());
    }

    #[test]
    fn topic_change_clears_question_and_response_only() {
        let mut state = full_state();
        state.set_topic(Some("Heavy Drinking".into()));
        assert_eq!(state.filters.get(Dimension::Category), Some("Alcohol Consumption"));
        assert_eq!(state.filters.get(Dimension::Question), None);
        assert_eq!(state.filters.get(Dimension::Response), None);
        assert_eq!(state.highlighted(), ["Ohio", "Utah"]);
    }

    #[test]
    fn same_value_does_not_reset() {
        let mut state = full_state();
        state.set_year(Some("2021".into()));
        assert!(state.all_selected());
        assert_eq!(state.regions.len(), 2);
    }

    #[test]
    fn move_year_steps_within_bounds() {
        let years: Vec<String> = ["2019", "2020", "2021"].map(String::from).to_vec();
        let mut state = full_state();
        state.move_year(&years, 1);
        assert_eq!(state.filters.get(Dimension::Year), Some("2021"));
        assert!(state.all_selected());

        state.move_year(&years, -1);
        assert_eq!(state.filters.get(Dimension::Year), Some("2020"));
        assert_eq!(state.filters.get(Dimension::Category), None);

        state.move_year(&years, -1);
        state.move_year(&years, -1);
        assert_eq!(state.filters.get(Dimension::Year), Some("2019"));
    }

    #[test]
    fn move_year_ignores_unlisted_current_year() {
        let years: Vec<String> = vec!["2019".into()];
        let mut state = DashboardState::new(Some("2030".into()));
        state.move_year(&years, -1);
        assert_eq!(state.filters.get(Dimension::Year), Some("2030"));

        let mut unset = DashboardState::new(None);
        unset.move_year(&years, 1);
        assert_eq!(unset.filters.get(Dimension::Year), None);
    }
}
