use dioxus::prelude::*;

use crate::core::{aggregate::RegionDetail, format};

#[component]
pub fn RegionDetailCard(detail: Option<RegionDetail>) -> Element {
    rsx! {
        section { class: "dashboard-card region-detail",
            match detail {
                Some(detail) => render_detail(&detail),
                None => rsx! {
                    p { class: "dashboard-card__placeholder",
                        "Hover a region to see its value, sample size and confidence interval."
                    }
                },
            }
        }
    }
}

fn render_detail(detail: &RegionDetail) -> Element {
    let value = format::format_percent(detail.value);
    let sample = detail.sample_size.map(format::format_sample_size);
    let interval = format::format_interval(detail.ci_low, detail.ci_high);

    rsx! {
        h3 { class: "region-detail__name", "{detail.region}" }
        strong { class: "region-detail__value", "{value}" }
        ul { class: "region-detail__facts",
            if let Some(sample) = sample {
                li { "{sample}" }
            }
            if let Some(interval) = interval {
                li { "{interval}" }
            }
        }
    }
}
