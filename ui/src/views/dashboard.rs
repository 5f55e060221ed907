use dioxus::prelude::*;
use tracing::{error, info};

use crate::{
    core::{
        aggregate,
        config::DashboardConfig,
        geo::RegionShape,
        platform,
        record::RowStore,
        snapshot::DashboardSnapshot,
        state::DashboardState,
    },
    dashboard::{
        load_boundaries, load_dataset, project_shapes, ChoroplethMap, ColorScaleLegend,
        FilterControls, RegionBarChart, RegionDetailCard, TrendChart,
    },
};

#[component]
pub fn Dashboard() -> Element {
    let config = use_context_provider(DashboardConfig::current);

    let mut store = use_signal(RowStore::empty);
    let mut shapes = use_signal(Vec::<RegionShape>::new);
    let mut errors = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    // Single selection state shared by the map and the bar chart.
    let state = use_signal(|| DashboardState::new(config.initial_year.clone()));

    let data_source = config.data_source.clone();
    use_future(move || {
        let source = data_source.clone();
        async move {
            match load_dataset(&source).await {
                Ok(rows) => {
                    info!(
                        target: "riskatlas::dashboard",
                        rows = rows.len(),
                        %source,
                        platform = %platform::platform_string(),
                        "survey data loaded"
                    );
                    store.set(rows);
                }
                Err(err) => {
                    error!(target: "riskatlas::dashboard", %source, "{err}");
                    errors.write().push(err);
                }
            }
            loading.set(false);
        }
    });

    let topology_source = config.topology_source.clone();
    use_future(move || {
        let source = topology_source.clone();
        async move {
            match load_boundaries(&source).await {
                Ok(loaded) => {
                    info!(target: "riskatlas::dashboard", regions = loaded.len(), %source, "boundaries loaded");
                    shapes.set(loaded);
                }
                Err(err) => {
                    error!(target: "riskatlas::dashboard", %source, "{err}");
                    errors.write().push(err);
                }
            }
        }
    });

    let viewport = config.map;
    let snapshot = use_memo(move || DashboardSnapshot::derive(&store.read(), &state.read()));
    let paths = use_memo(move || project_shapes(&shapes.read(), &viewport));
    let detail = use_memo(move || {
        let current = state.read();
        let focus = current
            .hovered
            .clone()
            .or_else(|| current.highlighted().last().cloned())?;
        aggregate::region_detail(&store.read(), &current.filters, &focus)
    });

    let snap = snapshot();
    let failures = errors();
    let status = if loading() && failures.is_empty() {
        Some("Loading survey data…")
    } else {
        snap.status.message()
    };

    rsx! {
        section { class: "page page-dashboard",
            h1 { "Behavioral Risk Factor Surveillance System Analyzer" }

            for message in failures.into_iter() {
                div { class: "dashboard__error", role: "alert", "⚠️ {message}" }
            }

            FilterControls { state, options: snap.options.to_vec() }

            if let Some(message) = status {
                p { class: "dashboard__status", "{message}" }
            }

            div { class: "dashboard__panels",
                div { class: "dashboard__legend",
                    ColorScaleLegend { colors: snap.colors.clone() }
                }
                ChoroplethMap { paths: paths(), snapshot: snap.clone(), state }
                RegionBarChart {
                    ranked: snap.ranked.clone(),
                    colors: snap.colors.clone(),
                    highlighted: snap.highlighted.clone(),
                    state,
                }
            }

            div { class: "dashboard__details",
                RegionDetailCard { detail: detail() }
                section { class: "dashboard-card trend-card",
                    div { class: "dashboard-card__header",
                        h2 { "Yearly Comparison" }
                    }
                    TrendChart { series: snap.trend.clone() }
                }
            }
        }
    }
}
