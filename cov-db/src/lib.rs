//! In-memory SQLite database layer for COVID observations.
//!
//! This crate loads cleaned observation and location-reference CSV data into
//! an in-memory SQLite database and exposes typed filter and aggregation
//! queries for consumption by the Dioxus/D3.js dashboard compiled to WASM
//! and by the native CLI.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in
//!   single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - Cleaned CSV fixtures loaded via `include_str!` in consuming crates
//! - Typed query methods returning serializable structs for JSON export
//!   to D3.js
//!
//! # Usage
//!
//! ```rust
//! use cov_db::{Database, DataFilter};
//! use cov_owid::metric::Metric;
//!
//! let db = Database::new().unwrap();
//! db.load_locations("location,iso_code,continent\nItaly,ITA,Europe\n").unwrap();
//! db.load_observations(
//!     "iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients\n\
//!      ITA,Europe,Italy,2020-03-01,1694,573,34,12,140,455,,23345,455,140\n",
//! ).unwrap();
//!
//! let filter = DataFilter::worldwide("2020-01-01", "2020-12-31");
//! let totals = db.query_total_by_country(&filter, Metric::Cases).unwrap();
//! assert_eq!(totals[0].iso_code.as_deref(), Some("ITA"));
//! ```
//!
//! # Tables
//!
//! - `observations` - one row per (location, date), all metric columns
//! - `locations` - location -> ISO code / continent reference
//!
//! Totals, daily sums and averages are derived on-the-fly via SQL
//! `GROUP BY location` / `GROUP BY continent` queries against the base
//! observation table; country-level results are LEFT JOINed back to the
//! `locations` reference so chart builders always have ISO codes.

pub mod filter;
mod loader;
pub mod models;
mod queries;
pub mod schema;

pub use filter::{DataFilter, ALL_CONTINENTS};

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database wrapping the cleaned COVID observation set.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with cleaned CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
