//! End-to-end checks over a small survey extract: CSV rows flow through the
//! option cascade, the shared selection state and the derived snapshot.

use ui::core::{
    aggregate,
    color::BLUES,
    filters,
    loader::load_rows_from_str,
    record::{Dimension, RowStore},
    snapshot::{DashboardSnapshot, DataStatus},
    state::DashboardState,
};

const SAMPLE: &str = include_str!("fixtures/sample.csv");
const ALCOHOL: &str = "Alcohol Consumption";
const QUESTION: &str =
    "Adults who have had at least one drink of alcohol within the past 30 days, by sex";

fn store() -> RowStore {
    load_rows_from_str(SAMPLE).expect("fixture parses")
}

fn alcohol_state(year: &str) -> DashboardState {
    let mut state = DashboardState::new(Some(year.to_string()));
    state.set_category(Some(ALCOHOL.to_string()));
    state.set_topic(Some("Binge Drinking".to_string()));
    state.set_question(Some(QUESTION.to_string()));
    state.set_response(Some("Yes".to_string()));
    state
}

#[test]
fn rows_without_values_or_fields_are_skipped() {
    // The fixture ends with a truncated row; it is dropped like the Utah 2021 row.
    let store = store();
    assert_eq!(store.len(), 13);
    assert!(store.iter().all(|r| !r.question.is_empty()));
    let ohio = store
        .iter()
        .find(|r| r.region == "Ohio" && r.year == "2020" && r.response == "Yes")
        .expect("Ohio 2020 row");
    assert_eq!(ohio.sample_size, Some(4210.0));
    assert!(!store.iter().any(|r| r.region == "Utah" && r.year == "2021"));
}

#[test]
fn options_follow_the_cascade() {
    let store = store();
    let mut state = DashboardState::new(Some("2020".to_string()));

    assert_eq!(
        filters::options_for(Dimension::Year, &store, &state.filters),
        ["2020", "2021", "2022"]
    );
    assert_eq!(
        filters::options_for(Dimension::Category, &store, &state.filters),
        [ALCOHOL]
    );
    assert!(filters::options_for(Dimension::Topic, &store, &state.filters).is_empty());

    state.set_category(Some(ALCOHOL.to_string()));
    state.set_topic(Some("Binge Drinking".to_string()));
    state.set_question(Some(QUESTION.to_string()));
    assert_eq!(
        filters::options_for(Dimension::Response, &store, &state.filters),
        ["No", "Yes"]
    );

    state.set_year(Some("2022".to_string()));
    assert_eq!(state.filters.get(Dimension::Category), None);
    assert_eq!(
        filters::options_for(Dimension::Category, &store, &state.filters),
        [ALCOHOL, "Tobacco Use"]
    );
}

#[test]
fn complete_selection_maps_ranks_and_colors() {
    let store = store();
    let state = alcohol_state("2022");
    let snapshot = DashboardSnapshot::derive(&store, &state);

    assert_eq!(snapshot.status, DataStatus::Ready);
    assert_eq!(snapshot.map.get("Texas"), Some(20.0));

    let order: Vec<&str> = snapshot.ranked.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(order, ["Ohio", "Utah", "Texas"]);

    assert_eq!(snapshot.fill_for("Texas"), Some(BLUES[0]));
    assert_eq!(snapshot.fill_for("Ohio"), Some(BLUES[8]));
    assert_eq!(snapshot.fill_for("Utah"), Some(BLUES[2]));
    assert_eq!(snapshot.fill_for("Nevada"), None);
}

#[test]
fn highlighted_regions_drive_the_trend() {
    let store = store();
    let mut state = alcohol_state("2022");
    state.select_region("Utah");
    state.select_region("Ohio");

    let snapshot = DashboardSnapshot::derive(&store, &state);
    assert_eq!(snapshot.highlighted, ["Utah", "Ohio"]);

    let trend = &snapshot.trend;
    assert_eq!(trend.years, ["2020", "2021", "2022"]);
    let utah = &trend.lines[0];
    assert_eq!(utah.region, "Utah");
    assert_eq!(utah.points[1].value, None);
    assert_eq!(utah.points[1].value_or_neutral(), 0.0);
    let ohio: Vec<Option<f64>> = trend.lines[1].points.iter().map(|p| p.value).collect();
    assert_eq!(ohio, [Some(52.1), Some(53.0), Some(54.5)]);
    assert_eq!(trend.max_value(), Some(54.5));
}

#[test]
fn region_detail_sums_samples_and_averages_intervals() {
    let store = store();
    let state = alcohol_state("2022");
    let detail = aggregate::region_detail(&store, &state.filters, "Texas").expect("detail");
    assert_eq!(detail.value, 20.0);
    assert_eq!(detail.sample_size, Some(8500.0));
    assert_eq!(detail.ci_low, Some(19.0));
    assert_eq!(detail.ci_high, Some(21.0));
}

#[test]
fn stepping_the_year_resets_everything_below_it() {
    let store = store();
    let mut state = alcohol_state("2022");
    state.select_region("Ohio");
    state.hover(Some("Utah".to_string()));

    let years = filters::options_for(Dimension::Year, &store, &state.filters);
    state.move_year(&years, -1);

    assert_eq!(state.filters.get(Dimension::Year), Some("2021"));
    assert!(state.regions.is_empty());
    assert_eq!(state.hovered, None);

    let snapshot = DashboardSnapshot::derive(&store, &state);
    assert_eq!(snapshot.status, DataStatus::Incomplete);
    assert!(snapshot.trend.is_empty());

    state.move_year(&years, 5);
    assert_eq!(state.filters.get(Dimension::Year), Some("2021"));
}

#[test]
fn shared_state_sees_clicks_from_both_views() {
    let store = store();
    let mut state = alcohol_state("2022");

    // Map click, then a bar click, then a map click: one sequence.
    state.select_region("Ohio");
    state.select_region("Texas");
    state.select_region("Utah");
    assert_eq!(state.regions.as_slice(), ["Ohio", "Texas", "Utah"]);
    assert_eq!(state.highlighted(), ["Texas", "Utah"]);

    let snapshot = DashboardSnapshot::derive(&store, &state);
    assert_eq!(snapshot.trend.lines.len(), 2);
    assert_eq!(snapshot.trend.lines[0].region, "Texas");
}
