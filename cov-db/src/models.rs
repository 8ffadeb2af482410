//! Query result model structs for the dashboard.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend.

use serde::Serialize;

/// A (location, date, value) triple for the per-country time-series chart.
///
/// `value` is `None` where the source column has no reading for that day;
/// the chart skips undefined points rather than interpolating them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationDateValue {
    pub location: String,
    pub date: String,
    pub value: Option<f64>,
}

/// A per-country aggregate enriched with the ISO code from the location
/// reference (LEFT JOIN, so `iso_code` is `None` only when the reference
/// does not know the location).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationValue {
    pub location: String,
    pub iso_code: Option<String>,
    pub value: Option<f64>,
}

/// A per-continent aggregate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContinentValue {
    pub continent: String,
    pub value: Option<f64>,
}

/// A location reference row: location -> ISO code / continent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationRow {
    pub location: String,
    pub iso_code: String,
    pub continent: String,
}
