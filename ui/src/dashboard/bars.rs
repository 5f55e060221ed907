use dioxus::prelude::*;

use crate::{
    core::{
        aggregate::RankedRegion,
        color::{ColorMapping, FALLBACK_BAR_FILL},
        format,
        state::DashboardState,
    },
    dashboard::{BandScale, LinearScale},
};

const WIDTH: f64 = 975.0;
const MARGIN_LEFT: f64 = 300.0;
const MARGIN_RIGHT: f64 = 100.0;
const MARGIN_TOP: f64 = 20.0;
const ROW_HEIGHT: f64 = 40.0;
const ROW_PITCH: f64 = 45.0;
const BAND_PADDING: f64 = 0.2;
const TICK_COUNT: usize = 6;

#[derive(Clone)]
struct BarEntry {
    region: String,
    y: f64,
    height: f64,
    width: f64,
    fill: &'static str,
    label: String,
    highlighted: bool,
}

/// Regions ranked by value, one clickable bar each.
#[component]
pub fn RegionBarChart(
    ranked: Vec<RankedRegion>,
    colors: Option<ColorMapping>,
    highlighted: Vec<String>,
    state: Signal<DashboardState>,
) -> Element {
    if ranked.is_empty() {
        return rsx! {
            section { class: "dashboard-card bars-card",
                p { class: "dashboard-card__placeholder", "Ranked regions appear once every filter is set." }
            }
        };
    }

    let rows = ranked.len();
    let max_value = ranked
        .iter()
        .map(|r| r.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let chart_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let x = LinearScale::new((0.0, max_value), (0.0, chart_width));
    let band = BandScale::new(rows, (0.0, rows as f64 * ROW_HEIGHT), BAND_PADDING);

    let entries: Vec<BarEntry> = ranked
        .iter()
        .enumerate()
        .map(|(index, entry)| BarEntry {
            region: entry.region.clone(),
            y: band.position(index),
            height: band.bandwidth(),
            width: x.apply(entry.value).max(0.0),
            fill: colors
                .as_ref()
                .map(|c| c.color(entry.value))
                .unwrap_or(FALLBACK_BAR_FILL),
            label: format::format_percent(entry.value),
            highlighted: highlighted.contains(&entry.region),
        })
        .collect();

    let axis_y = rows as f64 * ROW_HEIGHT;
    let ticks: Vec<(f64, String)> = (0..TICK_COUNT)
        .map(|i| {
            let value = i as f64 / (TICK_COUNT - 1) as f64 * max_value;
            (x.apply(value), format::format_axis_percent(value))
        })
        .collect();
    let view_height = rows as f64 * ROW_PITCH;

    rsx! {
        section { class: "dashboard-card bars-card",
            div { class: "bars-card__scroll",
                svg {
                    class: "bars",
                    view_box: "0 0 {WIDTH} {view_height}",
                    g { transform: "translate({MARGIN_LEFT}, {MARGIN_TOP})",
                        for entry in entries.into_iter() {
                            {render_bar(entry, state)}
                        }
                        for (offset, label) in ticks.into_iter() {
                            g {
                                class: "bars__tick",
                                transform: "translate({offset}, {axis_y})",
                                line { y2: "6", stroke: "black" }
                                text { y: "20", text_anchor: "middle", "{label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_bar(entry: BarEntry, mut state: Signal<DashboardState>) -> Element {
    let BarEntry {
        region,
        y,
        height,
        width,
        fill,
        label,
        highlighted,
    } = entry;

    let middle = y + height / 2.0;
    let value_x = width + 10.0;
    let (stroke, stroke_width) = if highlighted { ("black", 3.0) } else { ("none", 0.0) };
    let text_class = if highlighted {
        "bars__label bars__label--highlighted"
    } else {
        "bars__label"
    };
    let click_region = region.clone();

    rsx! {
        g {
            rect {
                class: "bars__bar",
                x: "0",
                y: "{y}",
                width: "{width}",
                height: "{height}",
                fill,
                stroke,
                stroke_width: "{stroke_width}",
                onclick: move |_| state.with_mut(|s| s.select_region(&click_region)),
            }
            text {
                class: text_class,
                x: "-10",
                y: "{middle}",
                text_anchor: "end",
                dominant_baseline: "central",
                "{region}"
            }
            text {
                class: text_class,
                x: "{value_x}",
                y: "{middle}",
                dominant_baseline: "central",
                "{label}"
            }
        }
    }
}
