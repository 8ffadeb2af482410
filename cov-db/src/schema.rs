//! SQL schema definitions for the in-memory SQLite database.
//!
//! Contains CREATE TABLE statements for the observation and location tables.
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `observations` - one row per (location, date) with all metric columns,
///   including the derived `total_hosp_patients` / `total_icu_patients`
///   running totals computed by the cleaning pipeline
/// - `locations` - location -> ISO code / continent reference, unique per
///   location
///
/// Totals, daily sums and averages are derived on-the-fly via SQL
/// `GROUP BY` queries against the base observation table.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        location TEXT NOT NULL,
        date TEXT NOT NULL,
        iso_code TEXT NOT NULL,
        continent TEXT NOT NULL,
        total_cases REAL,
        new_cases REAL,
        total_deaths REAL,
        new_deaths REAL,
        icu_patients REAL,
        hosp_patients REAL,
        new_tests REAL,
        total_tests REAL,
        total_hosp_patients REAL,
        total_icu_patients REAL,
        PRIMARY KEY (location, date)
    );
    CREATE INDEX IF NOT EXISTS idx_obs_continent ON observations(continent);
    CREATE INDEX IF NOT EXISTS idx_obs_date ON observations(date);

    CREATE TABLE IF NOT EXISTS locations (
        location TEXT PRIMARY KEY,
        iso_code TEXT NOT NULL,
        continent TEXT NOT NULL
    );

    "#
}
