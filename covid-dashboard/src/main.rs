//! World COVID-19 Cases -- Country Comparison
//!
//! Browser dashboard over the OWID COVID-19 dataset: four summary cards, a
//! per-country time-series chart, a choropleth world map and a top-10 bar
//! chart, all reactive to continent / country / date-range filters and two
//! tab groups (total vs daily change; cases / deaths / tests / hospital
//! patients).
//!
//! Data flow:
//! 1. `build.rs` copies the cleaned fixture CSVs (produced by `cov-cli
//!    fetch`) into `OUT_DIR`, falling back to a small built-in sample.
//! 2. `include_str!` embeds the fixtures into the WASM binary.
//! 3. On mount: load the CSVs into an in-memory SQLite database, derive
//!    filter options and date bounds.
//! 4. On any filter change: re-run Filter -> Aggregate -> Chart-Build and
//!    re-render via D3.js.

use chrono::Utc;
use cov_chart_ui::components::{
    ChartContainer, ChartHeader, ContinentSelector, CountryCountLabel, CountrySelect,
    DateRangePicker, ErrorDisplay, LoadingSpinner, MeasureTabs, MetricTabs, SummaryCard,
};
use cov_chart_ui::js_bridge;
use cov_chart_ui::state::AppState;
use cov_db::Database;
use cov_owid::codebook::Codebook;
use cov_owid::metric::Metric;
use cov_utils::format::human_format;
use dioxus::prelude::*;

// Embed the cleaned fixtures at compile time.
const OBSERVATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/observations.csv"));
const LOCATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/locations.csv"));
const CODEBOOK_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/codebook.csv"));

/// DOM ids for the D3 chart container divs.
const LINE_CHART_ID: &str = "count-graph";
const MAP_CHART_ID: &str = "main-graph";
const BAR_CHART_ID: &str = "top-countries-graph";

/// Human-formatted values for the four summary cards.
#[derive(Clone, Default, PartialEq)]
struct CardValues {
    cases: String,
    deaths: String,
    tests: String,
    hosp_patients: String,
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("covid-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut cards: Signal<CardValues> = use_signal(CardValues::default);

    // ─── Effect 1: Load the embedded fixtures once on mount ───
    use_effect(move || {
        let db = match load_database() {
            Ok(db) => db,
            Err(e) => {
                state.error_msg.set(Some(format!("Failed to load dataset: {e}")));
                state.loading.set(false);
                return;
            }
        };

        let continents = db.query_continent_options().unwrap_or_default();
        let countries = db.query_country_options().unwrap_or_default();
        if countries.is_empty() {
            state.error_msg.set(Some("No observation data available.".to_string()));
            state.loading.set(false);
            return;
        }

        let (min_date, _) = db
            .query_date_range()
            .unwrap_or_else(|_| (String::new(), String::new()));
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

        state.codebook.set(Codebook::parse(CODEBOOK_CSV));
        state.continent_options.set(continents);
        // The continent control starts at "All", which derives a full
        // country selection.
        state.selected_countries.set(Some(countries.clone()));
        state.country_options.set(countries);
        state.min_date.set(min_date.clone());
        state.max_date.set(today.clone());
        state.start_date.set(min_date);
        state.end_date.set(today);
        state.db.set(Some(db));
        state.loading.set(false);

        // Initialize D3 chart scripts (one-time)
        js_bridge::init_charts();
    });

    // ─── Effect 2: Summary cards ───
    // Cases, deaths and tests are up-to-date totals; the hospital figure is
    // the summed instantaneous daily census over the subset.
    use_effect(move || {
        let filter = state.filter();
        let Some(db) = state.db.read().clone() else { return };

        let sum = |result: anyhow::Result<f64>| {
            result.unwrap_or_else(|e| {
                log::error!("summary card query failed: {e}");
                0.0
            })
        };
        cards.set(CardValues {
            cases: human_format(sum(db.query_total_sum(&filter, Metric::Cases))),
            deaths: human_format(sum(db.query_total_sum(&filter, Metric::Deaths))),
            tests: human_format(sum(db.query_total_sum(&filter, Metric::Tests))),
            hosp_patients: human_format(sum(db.query_new_sum(&filter, Metric::HospPatients))),
        });
    });

    // ─── Effect 3: Per-country time-series line chart ───
    use_effect(move || {
        let filter = state.filter();
        let measure = (state.measure)();
        let metric = (state.metric)();
        if (state.loading)() {
            return;
        }
        let Some(db) = state.db.read().clone() else { return };

        let series = match db.query_series(&filter, measure, metric) {
            Ok(series) => series,
            Err(e) => {
                log::error!("line chart query failed: {e}");
                return;
            }
        };

        let label = format!("{} {}", measure.title_prefix(), metric.display_name());
        let data_json = serde_json::to_string(&series).unwrap_or_default();
        let config_json = serde_json::json!({
            "title": format!(
                "{} {} over time across selected countries",
                measure.title_prefix(),
                metric.display_name()
            ),
            "yAxisLabel": label,
        })
        .to_string();

        js_bridge::render_line_chart(LINE_CHART_ID, &data_json, &config_json);
    });

    // ─── Effect 4: Choropleth map of total cases ───
    use_effect(move || {
        let filter = state.filter();
        if (state.loading)() {
            return;
        }
        let Some(db) = state.db.read().clone() else { return };

        let totals = match db.query_total_by_country(&filter, Metric::Cases) {
            Ok(totals) => totals,
            Err(e) => {
                log::error!("map query failed: {e}");
                return;
            }
        };

        // Blues for the full country universe, Purples for a subset
        let universe = state.country_options.read().len();
        let worldwide = universe > 0 && totals.len() >= universe;
        let (scheme, title) = if worldwide {
            ("Blues", "Map of COVID-19 Cases (all countries)")
        } else {
            ("Purples", "Map of COVID-19 Cases (selected countries)")
        };

        let data_json = serde_json::to_string(&totals).unwrap_or_default();
        let config_json = serde_json::json!({
            "title": title,
            "scheme": scheme,
        })
        .to_string();

        js_bridge::render_choropleth_map(MAP_CHART_ID, &data_json, &config_json);
    });

    // ─── Effect 5: Top-10 bar chart of average daily values ───
    use_effect(move || {
        let filter = state.filter();
        let metric = (state.metric)();
        if (state.loading)() {
            return;
        }
        let Some(db) = state.db.read().clone() else { return };

        let mut averages = match db.query_average_by_country(&filter, metric) {
            Ok(averages) => averages,
            Err(e) => {
                log::error!("bar chart query failed: {e}");
                return;
            }
        };

        let universe = state.country_options.read().len();
        let worldwide = universe > 0 && averages.len() >= universe;

        // Ascending sort, keep the tail: the 10 largest values
        averages.sort_by(|a, b| {
            a.value
                .partial_cmp(&b.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let top = averages.split_off(averages.len().saturating_sub(10));

        let title = format!(
            "Top {} Countries{} in terms of Average daily COVID {}",
            top.len(),
            if worldwide { " worldwide" } else { "" },
            metric.display_name()
        );
        let data_json = serde_json::to_string(&top).unwrap_or_default();
        let config_json = serde_json::json!({
            "title": title,
            "xAxisLabel": format!("Average daily {}", metric.display_name()),
            "color": "#119DFF",
        })
        .to_string();

        js_bridge::render_bar_chart(BAR_CHART_ID, &data_json, &config_json);
    });

    // ─── Render ───
    let card_values = cards.read().clone();

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 12px; \
                    font-family: system-ui, -apple-system, sans-serif; background: #F2F2F2;",

            ChartHeader {
                title: "World COVID-19 Cases".to_string(),
                subtitle: "Country Comparison".to_string(),
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;",

                    // Filter panel
                    div {
                        style: "flex: 1; min-width: 260px; background: #f9f9f9; \
                                border-radius: 5px; padding: 12px; \
                                box-shadow: 0 1px 3px rgba(0,0,0,0.15);",
                        DateRangePicker {}
                        ContinentSelector {}
                        CountrySelect {}
                        CountryCountLabel {}
                    }

                    // Cards, tabs and line chart
                    div {
                        style: "flex: 2; min-width: 480px;",
                        div {
                            style: "display: flex; margin-bottom: 12px;",
                            SummaryCard { label: "Total cases".to_string(), value: card_values.cases }
                            SummaryCard { label: "Total deaths".to_string(), value: card_values.deaths }
                            SummaryCard { label: "Total tests".to_string(), value: card_values.tests }
                            SummaryCard {
                                label: "Total hospital patients".to_string(),
                                value: card_values.hosp_patients,
                            }
                        }
                        div {
                            style: "background: #f9f9f9; border-radius: 5px; padding: 8px; \
                                    margin-bottom: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.15);",
                            MeasureTabs {}
                            MetricTabs {}
                        }
                        ChartContainer {
                            id: LINE_CHART_ID.to_string(),
                            loading: *state.loading.read(),
                            min_height: 460,
                        }
                    }
                }

                div {
                    style: "display: flex; gap: 16px; margin-top: 16px; flex-wrap: wrap;",
                    div {
                        style: "flex: 7; min-width: 420px;",
                        ChartContainer { id: MAP_CHART_ID.to_string(), min_height: 460 }
                    }
                    div {
                        style: "flex: 5; min-width: 320px;",
                        ChartContainer { id: BAR_CHART_ID.to_string(), min_height: 460 }
                    }
                }
            }
        }
    }
}

/// Create the in-memory database and load the embedded fixtures.
fn load_database() -> anyhow::Result<Database> {
    let db = Database::new()?;
    db.load_observations(OBSERVATIONS_CSV)?;
    db.load_locations(LOCATIONS_CSV)?;
    Ok(db)
}
