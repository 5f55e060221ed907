//! Formatting helpers for presenting survey values.

pub fn format_value(value: f64) -> String {
    format!("{value:.1}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_axis_percent(value: f64) -> String {
    format!("{value:.0}%")
}

pub fn format_zoom(scale: f64) -> String {
    format!("Zoom: {scale:.1}x")
}

pub fn format_sample_size(value: f64) -> String {
    format!("n = {value:.0}")
}

pub fn format_interval(low: Option<f64>, high: Option<f64>) -> Option<String> {
    match (low, high) {
        (Some(low), Some(high)) => Some(format!("95% CI {low:.1}–{high:.1}")),
        _ => None,
    }
}
