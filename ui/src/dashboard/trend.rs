use dioxus::prelude::*;

use crate::{
    core::{
        aggregate::TrendSeries,
        color::series_color,
        format,
    },
    dashboard::{LinearScale, PointScale},
};

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 300.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;
const Y_HEADROOM: f64 = 1.1;

#[derive(Clone)]
struct MarkerEntry {
    region: String,
    year: String,
    cx: f64,
    cy: f64,
    color: &'static str,
    reported: bool,
    tooltip: String,
}

/// Year-by-year comparison of the highlighted regions.
#[component]
pub fn TrendChart(series: TrendSeries) -> Element {
    let hovered_year = use_signal(|| None::<String>);
    let hovered_region = use_signal(|| None::<String>);

    if series.lines.is_empty() {
        return rsx! {
            p { class: "dashboard-card__placeholder", "Pick a region on the map or in the ranking to compare it across years." }
        };
    }
    if series.is_empty() {
        return rsx! {
            p { class: "dashboard-card__placeholder", "No data is reported for the highlighted regions under these filters." }
        };
    }

    let inner_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max_value = series.max_value().unwrap_or(0.0).max(0.0);
    let x = PointScale::new(series.years.len(), (0.0, inner_width));
    let y = LinearScale::new((0.0, max_value * Y_HEADROOM), (inner_height, 0.0));

    let grid: Vec<(f64, String)> = y
        .ticks(5)
        .into_iter()
        .map(|tick| (y.apply(tick), format!("{tick}")))
        .collect();
    let years: Vec<(f64, String)> = series
        .years
        .iter()
        .enumerate()
        .map(|(i, year)| (x.position(i), year.clone()))
        .collect();

    let active_year = hovered_year();
    let active_region = hovered_region();
    let guide_x = active_year
        .as_ref()
        .and_then(|year| series.years.iter().position(|y| y == year))
        .map(|i| x.position(i));

    let mut lines = Vec::with_capacity(series.lines.len());
    let mut markers = Vec::new();
    let mut labels = Vec::with_capacity(series.lines.len());
    for (index, line) in series.lines.iter().enumerate() {
        let color = series_color(index);
        let mut d = String::new();
        for (i, point) in line.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!(
                "{command}{:.1},{:.1}",
                x.position(i),
                y.apply(point.value_or_neutral())
            ));
            let tooltip = match point.value {
                Some(value) => format!("{}: {}", line.region, format::format_value(value)),
                None => format!("{}: no data", line.region),
            };
            markers.push(MarkerEntry {
                region: line.region.clone(),
                year: point.year.clone(),
                cx: x.position(i),
                cy: y.apply(point.value_or_neutral()),
                color,
                reported: point.value.is_some(),
                tooltip,
            });
        }
        lines.push((d, color));
        labels.push((line.region.clone(), y.apply(line.last_value()), color));
    }

    let label_x = inner_width + 5.0;
    let title_x = inner_width / 2.0;
    let year_label_y = inner_height + 30.0;
    let axis_label_y = inner_height + 45.0;
    let value_label_x = -inner_height / 2.0;

    rsx! {
        svg {
            class: "trend",
            view_box: "0 0 {WIDTH} {HEIGHT}",
            g { transform: "translate({MARGIN_LEFT},{MARGIN_TOP})",
                text {
                    class: "trend__title",
                    x: "{title_x}",
                    y: "-30",
                    text_anchor: "middle",
                    "Region Trends Over Time"
                }

                for (offset, label) in grid.into_iter() {
                    g { transform: "translate(0,{offset})",
                        line { x2: "{inner_width}", stroke: "#eee" }
                        text { class: "trend__tick", x: "-10", y: "5", text_anchor: "end", "{label}" }
                    }
                }
                for (offset, _) in years.iter() {
                    g { transform: "translate({offset},0)",
                        line { y2: "{inner_height}", stroke: "#eee" }
                    }
                }
                for (offset, year) in years.iter() {
                    text {
                        class: "trend__tick",
                        x: "{offset}",
                        y: "{year_label_y}",
                        text_anchor: "middle",
                        "{year}"
                    }
                }

                text {
                    class: "trend__axis",
                    x: "{title_x}",
                    y: "{axis_label_y}",
                    text_anchor: "middle",
                    "Year"
                }
                text {
                    class: "trend__axis",
                    x: "{value_label_x}",
                    y: "-45",
                    transform: "rotate(-90)",
                    text_anchor: "middle",
                    "Value"
                }

                if let Some(guide) = guide_x {
                    line {
                        x1: "{guide}",
                        x2: "{guide}",
                        y1: "0",
                        y2: "{inner_height}",
                        stroke: "#aaa",
                        stroke_dasharray: "4",
                    }
                }

                for (d, color) in lines.into_iter() {
                    path { d: "{d}", fill: "none", stroke: color, stroke_width: "2" }
                }
                for marker in markers.into_iter() {
                    {render_marker(marker, active_year.as_deref(), active_region.as_deref(), hovered_year, hovered_region)}
                }

                for (region, offset, color) in labels.into_iter() {
                    text {
                        class: "trend__label",
                        x: "{label_x}",
                        y: "{offset}",
                        fill: color,
                        dominant_baseline: "middle",
                        "{region}"
                    }
                }
            }
        }
    }
}

fn render_marker(
    marker: MarkerEntry,
    active_year: Option<&str>,
    active_region: Option<&str>,
    mut hovered_year: Signal<Option<String>>,
    mut hovered_region: Signal<Option<String>>,
) -> Element {
    let MarkerEntry {
        region,
        year,
        cx,
        cy,
        color,
        reported,
        tooltip,
    } = marker;

    let active = active_year == Some(year.as_str()) && active_region == Some(region.as_str());
    let radius = if active { 6 } else { 4 };
    let fill = if reported { color } else { "white" };
    let tooltip_y = cy - 15.0;

    rsx! {
        g {
            onmouseenter: move |_| {
                hovered_year.set(Some(year.clone()));
                hovered_region.set(Some(region.clone()));
            },
            onmouseleave: move |_| {
                hovered_year.set(None);
                hovered_region.set(None);
            },
            circle {
                cx: "{cx}",
                cy: "{cy}",
                r: "{radius}",
                fill,
                stroke: color,
                stroke_width: "1.5",
            }
            if active {
                text {
                    class: "trend__tooltip",
                    x: "{cx}",
                    y: "{tooltip_y}",
                    text_anchor: "middle",
                    fill: color,
                    "{tooltip}"
                }
            }
        }
    }
}
