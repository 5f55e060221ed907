use dioxus::prelude::*;

use crate::{
    core::{
        color::NEUTRAL_FILL,
        config::DashboardConfig,
        format,
        snapshot::DashboardSnapshot,
        state::DashboardState,
    },
    dashboard::{badge_width, RegionPath},
};

const ZOOM_IN: f64 = 1.2;
const ZOOM_OUT: f64 = 0.8;

#[derive(Clone)]
struct RegionEntry {
    name: String,
    d: String,
    fill: &'static str,
    stroke: &'static str,
    stroke_width: f64,
    tooltip: String,
}

#[component]
pub fn ChoroplethMap(
    paths: Vec<RegionPath>,
    snapshot: DashboardSnapshot,
    state: Signal<DashboardState>,
) -> Element {
    let viewport = use_context::<DashboardConfig>().map;
    let mut zoom = use_signal(|| viewport.min_zoom);
    let scale = zoom();
    let hovered = state.read().hovered.clone();

    let mut entries: Vec<(u8, RegionEntry)> = paths
        .iter()
        .map(|path| {
            let value = snapshot.map.get(&path.name);
            let highlighted = snapshot.highlighted.iter().any(|r| r == &path.name);
            let is_hovered = hovered.as_deref() == Some(path.name.as_str());
            let (layer, stroke, width) = if highlighted {
                (2, "#000", 3.0)
            } else if is_hovered {
                (1, "#333", 2.0)
            } else {
                (0, "#999", 0.5)
            };
            let tooltip = match value {
                Some(value) => format!("{}: {}", path.name, format::format_value(value)),
                None => path.name.clone(),
            };
            let entry = RegionEntry {
                name: path.name.clone(),
                d: path.d.clone(),
                fill: snapshot.fill_for(&path.name).unwrap_or(NEUTRAL_FILL),
                stroke,
                stroke_width: width / scale,
                tooltip,
            };
            (layer, entry)
        })
        .collect();
    // Emphasized outlines paint last so neighbours don't cover them.
    entries.sort_by_key(|(layer, _)| *layer);

    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    let transform = format!(
        "translate({:.2} {:.2}) scale({scale:.4})",
        cx - cx * scale,
        cy - cy * scale
    );
    let zoom_label = format::format_zoom(scale);
    let width = viewport.width;
    let height = viewport.height;
    let at_min = scale <= viewport.min_zoom;
    let at_max = scale >= viewport.max_zoom;

    rsx! {
        section { class: "dashboard-card map-card",
            div { class: "dashboard-card__header",
                h2 { "Map" }
                div { class: "map-card__zoom",
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        aria_label: "Zoom out",
                        disabled: at_min,
                        onclick: move |_| {
                            let next = (zoom() * ZOOM_OUT).max(viewport.min_zoom);
                            zoom.set(next);
                        },
                        "−"
                    }
                    span { class: "map-card__zoom-level", "{zoom_label}" }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        aria_label: "Zoom in",
                        disabled: at_max,
                        onclick: move |_| {
                            let next = (zoom() * ZOOM_IN).min(viewport.max_zoom);
                            zoom.set(next);
                        },
                        "+"
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| zoom.set(viewport.min_zoom),
                        "Reset"
                    }
                }
            }

            div { class: "map-card__canvas",
                svg {
                    class: "map",
                    view_box: "0 0 {width} {height}",
                    preserve_aspect_ratio: "xMidYMid meet",
                    g { transform: "{transform}",
                        for (_, entry) in entries.into_iter() {
                            {render_region(entry, state)}
                        }
                    }
                    FloatingLabels {
                        highlighted: snapshot.highlighted.clone(),
                        hovered: hovered.clone(),
                        width,
                    }
                }
            }
        }
    }
}

fn render_region(entry: RegionEntry, mut state: Signal<DashboardState>) -> Element {
    let RegionEntry {
        name,
        d,
        fill,
        stroke,
        stroke_width,
        tooltip,
    } = entry;

    let click_name = name.clone();
    let hover_name = name.clone();

    rsx! {
        path {
            class: "map__region",
            d: "{d}",
            fill,
            stroke,
            stroke_width: "{stroke_width}",
            onclick: move |_| state.with_mut(|s| s.select_region(&click_name)),
            onmouseenter: move |_| state.with_mut(|s| s.hover(Some(hover_name.clone()))),
            onmouseleave: move |_| state.with_mut(|s| s.hover(None)),
            title { "{tooltip}" }
        }
    }
}

/// Name badges drawn over the map, outside the zoom transform: first
/// highlighted region on the left, the hovered one in the middle, the second
/// highlighted on the right.
#[component]
pub fn FloatingLabels(highlighted: Vec<String>, hovered: Option<String>, width: f64) -> Element {
    let left = highlighted.first().cloned();
    let right = highlighted.get(1).cloned();

    rsx! {
        g { class: "map-labels",
            if let Some(label) = left {
                {render_badge(label, 20.0, "start")}
            }
            if let Some(label) = hovered {
                {render_badge(label, width / 2.0, "middle")}
            }
            if let Some(label) = right {
                {render_badge(label, width - 20.0, "end")}
            }
        }
    }
}

fn render_badge(label: String, anchor_x: f64, anchor: &'static str) -> Element {
    let badge = badge_width(&label);
    let x = match anchor {
        "start" => anchor_x,
        "end" => anchor_x - badge,
        _ => anchor_x - badge / 2.0,
    };
    let text_x = x + badge / 2.0;

    rsx! {
        g { class: "map-labels__badge",
            rect {
                x: "{x}",
                y: "20",
                width: "{badge}",
                height: "30",
                rx: "5",
            }
            text {
                x: "{text_x}",
                y: "35",
                text_anchor: "middle",
                dominant_baseline: "central",
                "{label}"
            }
        }
    }
}
