//! Date range picker with start and end date inputs.

use crate::state::AppState;
use cov_utils::dates::date_part;
use dioxus::prelude::*;

/// Date range picker for the observation window, bounded to
/// [earliest observation date, today].
#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let start = (state.start_date)();
    let end = (state.end_date)();
    let min = (state.min_date)();
    let max = (state.max_date)();
    let tooltip = state.codebook.read().description("date").to_string();

    let on_start_change = move |evt: Event<FormData>| {
        state.start_date.set(date_part(&evt.value()).to_string());
    };

    let on_end_change = move |evt: Event<FormData>| {
        state.end_date.set(date_part(&evt.value()).to_string());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            p {
                style: "margin: 0 0 4px 0;",
                title: "{tooltip}",
                strong { "Filter by Date Range:" }
            }
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                label {
                    "From: "
                    input {
                        r#type: "date",
                        value: "{start}",
                        min: "{min}",
                        max: "{max}",
                        onchange: on_start_change,
                    }
                }
                label {
                    "To: "
                    input {
                        r#type: "date",
                        value: "{end}",
                        min: "{min}",
                        max: "{max}",
                        onchange: on_end_change,
                    }
                }
            }
        }
    }
}
