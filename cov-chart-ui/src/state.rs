//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. Every filter control writes a signal here;
//! chart effects read them and re-run on any change.

use cov_db::{DataFilter, Database, ALL_CONTINENTS};
use cov_owid::codebook::Codebook;
use cov_owid::metric::{Measure, Metric};
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database instance (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Continent radio value; `ALL_CONTINENTS` means no restriction
    pub continent: Signal<String>,
    /// Explicitly selected countries. Overrides the continent filter when
    /// present; reset by the continent control (one-way derivation).
    pub selected_countries: Signal<Option<Vec<String>>>,
    /// Start of the date range filter ("YYYY-MM-DD")
    pub start_date: Signal<String>,
    /// End of the date range filter ("YYYY-MM-DD")
    pub end_date: Signal<String>,
    /// Earliest observation date, lower picker bound
    pub min_date: Signal<String>,
    /// Latest selectable date, upper picker bound
    pub max_date: Signal<String>,
    /// Time-aggregation tab: up-to-date total vs daily change
    pub measure: Signal<Measure>,
    /// Metric tab: cases, deaths, tests, hospital patients
    pub metric: Signal<Metric>,
    /// Distinct continents for the radio control
    pub continent_options: Signal<Vec<String>>,
    /// Distinct countries for the multi-select
    pub country_options: Signal<Vec<String>>,
    /// Column descriptions for control tooltips
    pub codebook: Signal<Codebook>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            continent: Signal::new(ALL_CONTINENTS.to_string()),
            selected_countries: Signal::new(None),
            start_date: Signal::new(String::new()),
            end_date: Signal::new(String::new()),
            min_date: Signal::new(String::new()),
            max_date: Signal::new(String::new()),
            measure: Signal::new(Measure::Total),
            metric: Signal::new(Metric::Cases),
            continent_options: Signal::new(Vec::new()),
            country_options: Signal::new(Vec::new()),
            codebook: Signal::new(Codebook::default()),
        }
    }

    /// Snapshot the filter controls as a [`DataFilter`].
    ///
    /// Reading the signals here subscribes the calling effect to all four
    /// filter inputs, so any control change re-runs it.
    pub fn filter(&self) -> DataFilter {
        DataFilter {
            continent: (self.continent)(),
            countries: (self.selected_countries)(),
            start_date: (self.start_date)(),
            end_date: (self.end_date)(),
        }
    }
}
