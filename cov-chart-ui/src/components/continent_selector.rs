//! Continent radio selector.

use crate::state::AppState;
use cov_db::ALL_CONTINENTS;
use dioxus::prelude::*;

/// Radio control for the continent filter: "All" plus every distinct
/// continent in the dataset.
///
/// Changing the continent resets the country multi-select to that
/// continent's full country list (all countries for "All"). The derivation
/// is one-way: the country control never writes back here.
#[component]
pub fn ContinentSelector() -> Element {
    let mut state = use_context::<AppState>();
    let options = state.continent_options.read().clone();
    let selected = (state.continent)();
    let tooltip = state.codebook.read().description("continent").to_string();

    let mut select_continent = move |value: String| {
        let countries = state.db.read().as_ref().and_then(|db| {
            if value == ALL_CONTINENTS {
                db.query_country_options().ok()
            } else {
                db.query_countries_in_continent(&value).ok()
            }
        });
        if let Some(countries) = countries {
            state.selected_countries.set(Some(countries));
        } else {
            log::warn!("continent change before database load");
        }
        state.continent.set(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            p {
                style: "margin: 0 0 4px 0;",
                title: "{tooltip}",
                strong { "Filter by Continent:" }
            }
            label {
                style: "display: block; margin: 2px 0;",
                input {
                    r#type: "radio",
                    name: "continent-filter",
                    checked: selected == ALL_CONTINENTS,
                    onchange: move |_| select_continent(ALL_CONTINENTS.to_string()),
                }
                " All"
            }
            for continent in options.into_iter() {
                label {
                    key: "{continent}",
                    style: "display: block; margin: 2px 0;",
                    input {
                        r#type: "radio",
                        name: "continent-filter",
                        checked: selected == continent,
                        onchange: {
                            let continent = continent.clone();
                            move |_| select_continent(continent.clone())
                        },
                    }
                    " {continent}"
                }
            }
        }
    }
}
