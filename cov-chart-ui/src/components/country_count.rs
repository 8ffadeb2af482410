//! Selected-country count label.

use crate::state::AppState;
use dioxus::prelude::*;

/// Free-text label reporting how many countries are selected.
///
/// Wording matches the source dashboard, including its edge branches: no
/// selection reads "0 country." and anything that isn't more than one
/// country reads "1 country.".
#[component]
pub fn CountryCountLabel() -> Element {
    let state = use_context::<AppState>();
    let text = match (state.selected_countries)() {
        None => "The current selection contains 0 country.".to_string(),
        Some(list) if list.len() > 1 => {
            format!("The current selection contains {} countries.", list.len())
        }
        Some(_) => "The current selection contains 1 country.".to_string(),
    };

    rsx! {
        p {
            style: "margin: 8px 0 0 0; font-size: 12px; color: #666;",
            "{text}"
        }
    }
}
