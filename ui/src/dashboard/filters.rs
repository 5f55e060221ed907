use dioxus::prelude::*;

use crate::core::{
    filters::FilterTuple,
    record::Dimension,
    state::DashboardState,
};

#[component]
pub fn FilterControls(mut state: Signal<DashboardState>, options: Vec<Vec<String>>) -> Element {
    let filters = state.read().filters.clone();
    let years = options.first().cloned().unwrap_or_default();

    let step_back = {
        let years = years.clone();
        move |_| state.with_mut(|s| s.move_year(&years, -1))
    };
    let step_forward = {
        let years = years.clone();
        move |_| state.with_mut(|s| s.move_year(&years, 1))
    };

    rsx! {
        div { class: "filters",
            div { class: "filters__row",
                div { class: "filters__year",
                    button {
                        r#type: "button",
                        class: "button button--ghost filters__step",
                        aria_label: "Previous year",
                        onclick: step_back,
                        "◀"
                    }
                    {render_select(Dimension::Year, &filters, &options, state)}
                    button {
                        r#type: "button",
                        class: "button button--ghost filters__step",
                        aria_label: "Next year",
                        onclick: step_forward,
                        "▶"
                    }
                }
                {render_select(Dimension::Category, &filters, &options, state)}
                {render_select(Dimension::Topic, &filters, &options, state)}
            }
            div { class: "filters__row",
                {render_select(Dimension::Question, &filters, &options, state)}
                {render_select(Dimension::Response, &filters, &options, state)}
            }
        }
    }
}

fn render_select(
    dimension: Dimension,
    filters: &FilterTuple,
    options: &[Vec<String>],
    mut state: Signal<DashboardState>,
) -> Element {
    let current = filters.get(dimension).unwrap_or_default().to_string();
    let disabled = dimension
        .upstream()
        .iter()
        .any(|d| filters.get(*d).is_none());
    let choices = options.get(dimension.index()).cloned().unwrap_or_default();
    let label = dimension.label();
    let wide = matches!(dimension, Dimension::Question | Dimension::Response);

    rsx! {
        select {
            class: if wide { "filters__select filters__select--wide" } else { "filters__select" },
            aria_label: "{label}",
            disabled,
            value: "{current}",
            onchange: move |evt: FormEvent| {
                let value = evt.value();
                state.with_mut(|s| s.set(dimension, Some(value)));
            },
            option { value: "", selected: current.is_empty(), "{label}" }
            for choice in choices.into_iter() {
                option {
                    key: "{choice}",
                    value: "{choice}",
                    selected: choice == current,
                    "{choice}"
                }
            }
        }
    }
}
