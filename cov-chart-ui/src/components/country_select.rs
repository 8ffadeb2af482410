//! Country multi-select control.

use crate::state::AppState;
use dioxus::prelude::*;

/// Scrollable multi-select for the country filter.
///
/// Toggling a country updates the explicit selection, which takes precedence
/// over the continent filter. Clearing leaves an empty selection in place —
/// an empty list filters to no rows, it does not fall back to the continent.
#[component]
pub fn CountrySelect() -> Element {
    let mut state = use_context::<AppState>();
    let options = state.country_options.read().clone();
    let selected = (state.selected_countries)();
    let tooltip = state.codebook.read().description("location").to_string();

    let mut toggle = move |country: String| {
        let mut list = (state.selected_countries)().unwrap_or_default();
        if let Some(pos) = list.iter().position(|c| c == &country) {
            list.remove(pos);
        } else {
            list.push(country);
            list.sort();
        }
        state.selected_countries.set(Some(list));
    };

    let items: Vec<(String, bool)> = options
        .into_iter()
        .map(|country| {
            let checked = selected
                .as_ref()
                .is_some_and(|list| list.contains(&country));
            (country, checked)
        })
        .collect();

    rsx! {
        div {
            style: "margin: 8px 0;",
            p {
                style: "margin: 0 0 4px 0;",
                title: "{tooltip}",
                strong { "Filter by Country:" }
            }
            div {
                style: "max-height: 220px; overflow-y: auto; border: 1px solid #d6d6d6; border-radius: 4px; padding: 4px 8px; background: #fff;",
                for (country, checked) in items.into_iter() {
                    label {
                        key: "{country}",
                        style: "display: block; margin: 1px 0; font-size: 13px;",
                        input {
                            r#type: "checkbox",
                            checked: checked,
                            onchange: {
                                let country = country.clone();
                                move |_| toggle(country.clone())
                            },
                        }
                        " {country}"
                    }
                }
            }
            button {
                style: "margin-top: 4px; font-size: 12px;",
                onclick: move |_| state.selected_countries.set(Some(Vec::new())),
                "Clear selection"
            }
        }
    }
}
