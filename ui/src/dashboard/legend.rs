use dioxus::prelude::*;

use crate::core::{color::ColorMapping, format};

const BAR_WIDTH: f64 = 20.0;
const BAR_HEIGHT: f64 = 300.0;

/// Vertical gradient from the colour of the domain minimum (bottom) to the
/// colour of the maximum (top), with both bounds labelled.
#[component]
pub fn ColorScaleLegend(colors: Option<ColorMapping>) -> Element {
    let Some(colors) = colors else {
        return rsx! {};
    };

    let (lo, hi) = colors.domain();
    let low_color = colors.color(lo);
    let high_color = colors.color(hi);
    let low_label = format::format_value(lo);
    let high_label = format::format_value(hi);
    let label_x = BAR_WIDTH + 8.0;

    rsx! {
        svg {
            class: "legend",
            width: "80",
            height: "{BAR_HEIGHT + 20.0}",
            view_box: "0 -10 80 {BAR_HEIGHT + 20.0}",
            defs {
                linearGradient {
                    id: "legend-gradient",
                    x1: "0%",
                    y1: "100%",
                    x2: "0%",
                    y2: "0%",
                    stop { offset: "0%", stop_color: low_color }
                    stop { offset: "100%", stop_color: high_color }
                }
            }
            rect {
                x: "0",
                y: "0",
                width: "{BAR_WIDTH}",
                height: "{BAR_HEIGHT}",
                fill: "url(#legend-gradient)",
                stroke: "#999",
            }
            text {
                class: "legend__label",
                x: "{label_x}",
                y: "0",
                dominant_baseline: "central",
                "{high_label}"
            }
            text {
                class: "legend__label",
                x: "{label_x}",
                y: "{BAR_HEIGHT}",
                dominant_baseline: "central",
                "{low_label}"
            }
        }
    }
}
