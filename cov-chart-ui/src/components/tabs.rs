//! Tab groups for the time-aggregation mode and the displayed metric.

use crate::state::AppState;
use cov_owid::metric::{Measure, Metric};
use dioxus::prelude::*;

const TAB_STYLE: &str = "flex: 1; padding: 6px; font-weight: bold; background: #f9f9f9; \
     border: none; border-bottom: 1px solid #d6d6d6; cursor: pointer;";
const TAB_SELECTED_STYLE: &str = "flex: 1; padding: 6px; background: #119DFF; color: white; \
     border: none; border-top: 1px solid #d6d6d6; border-bottom: 1px solid #d6d6d6; cursor: pointer;";

/// Tab group switching between up-to-date totals and daily change.
#[component]
pub fn MeasureTabs() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.measure)();
    let tabs: Vec<(Measure, &str, bool)> = Measure::ALL
        .into_iter()
        .map(|measure| (measure, measure.tab_label(), measure == current))
        .collect();

    rsx! {
        div {
            style: "display: flex; height: 44px; margin-bottom: 4px;",
            for (measure, label, selected) in tabs.into_iter() {
                button {
                    key: "{label}",
                    style: if selected { TAB_SELECTED_STYLE } else { TAB_STYLE },
                    onclick: move |_| state.measure.set(measure),
                    "{label}"
                }
            }
        }
    }
}

/// Tab group selecting the displayed metric.
#[component]
pub fn MetricTabs() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.metric)();
    let tabs: Vec<(Metric, &str, bool)> = Metric::ALL
        .into_iter()
        .map(|metric| (metric, metric.tab_label(), metric == current))
        .collect();

    rsx! {
        div {
            style: "display: flex; height: 44px;",
            for (metric, label, selected) in tabs.into_iter() {
                button {
                    key: "{label}",
                    style: if selected { TAB_SELECTED_STYLE } else { TAB_STYLE },
                    onclick: move |_| state.metric.set(metric),
                    "{label}"
                }
            }
        }
    }
}
