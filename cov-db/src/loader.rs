//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Each loader method parses CSV data from a string slice and inserts rows
//! into the corresponding table. The CSV formats match the fixture files
//! produced by the CLI fetch pipeline.
//!
//! # CSV Formats
//!
//! - **Observations** (has headers):
//!   `iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients`
//! - **Locations** (has headers): `location,iso_code,continent`
//!
//! Dates are "YYYY-MM-DD". Empty metric cells load as NULL.

use crate::Database;
use rusqlite::params;

impl Database {
    /// Load cleaned observations from CSV string.
    ///
    /// Rows with an empty location or date are skipped and counted. The
    /// (location, date) primary key with `INSERT OR REPLACE` keeps one row
    /// per pair even if the input carries duplicates.
    pub fn load_observations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let iso_code = r.get(0).unwrap_or("").trim();
            let continent = r.get(1).unwrap_or("").trim();
            let location = r.get(2).unwrap_or("").trim();
            let date = r.get(3).unwrap_or("").trim();

            if location.is_empty() || date.is_empty() {
                skipped += 1;
                continue;
            }

            let number = |idx: usize| -> Option<f64> {
                r.get(idx).and_then(|s| s.trim().parse().ok())
            };

            conn.execute(
                "INSERT OR REPLACE INTO observations
                 (location, date, iso_code, continent,
                  total_cases, new_cases, total_deaths, new_deaths,
                  icu_patients, hosp_patients, new_tests, total_tests,
                  total_hosp_patients, total_icu_patients)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    location,
                    date,
                    iso_code,
                    continent,
                    number(4),
                    number(5),
                    number(6),
                    number(7),
                    number(8),
                    number(9),
                    number(10),
                    number(11),
                    number(12),
                    number(13),
                ],
            )?;
            count += 1;
        }
        log::info!("loader: {} observations loaded, {} skipped", count, skipped);
        Ok(())
    }

    /// Load the location reference from CSV string.
    ///
    /// Expected format (with headers): `location,iso_code,continent`
    pub fn load_locations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let location = r.get(0).unwrap_or("").trim();
            let iso_code = r.get(1).unwrap_or("").trim();
            let continent = r.get(2).unwrap_or("").trim();

            if location.is_empty() {
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO locations (location, iso_code, continent)
                 VALUES (?1, ?2, ?3)",
                params![location, iso_code, continent],
            )?;
            count += 1;
        }
        log::info!("loader: {} locations loaded", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    const OBS_HEADER: &str = "iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients";

    #[test]
    fn load_observations_from_csv() {
        let db = Database::new().unwrap();
        let csv = format!(
            "{OBS_HEADER}\n\
             ITA,Europe,Italy,2020-03-01,1694,573,34,12,140,455,,23345,455,140\n\
             ITA,Europe,Italy,2020-03-02,2036,342,52,18,166,508,4325,27670,963,306\n"
        );
        db.load_observations(&csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let cases: f64 = conn
            .query_row(
                "SELECT total_cases FROM observations WHERE location = 'Italy' AND date = '2020-03-01'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((cases - 1694.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_observations_empty_cells_become_null() {
        let db = Database::new().unwrap();
        let csv = format!(
            "{OBS_HEADER}\n\
             FRA,Europe,France,2020-03-01,130,30,2,0,,,,,,\n"
        );
        db.load_observations(&csv).unwrap();

        let conn = db.conn.borrow();
        let tests: Option<f64> = conn
            .query_row(
                "SELECT new_tests FROM observations WHERE location = 'France'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(tests.is_none(), "Empty cell should load as NULL");
    }

    #[test]
    fn load_observations_replaces_duplicate_pairs() {
        let db = Database::new().unwrap();
        let csv = format!(
            "{OBS_HEADER}\n\
             ITA,Europe,Italy,2020-03-01,1694,573,34,12,140,455,,23345,455,140\n\
             ITA,Europe,Italy,2020-03-01,1700,579,34,12,140,455,,23345,455,140\n"
        );
        db.load_observations(&csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "One row per (location, date) pair");
    }

    #[test]
    fn load_observations_skips_incomplete_rows() {
        let db = Database::new().unwrap();
        let csv = format!(
            "{OBS_HEADER}\n\
             ,,,2020-03-01,1,1,1,1,,,,,,\n\
             ITA,Europe,Italy,,1,1,1,1,,,,,,\n\
             ITA,Europe,Italy,2020-03-01,1694,573,34,12,140,455,,23345,455,140\n"
        );
        db.load_observations(&csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Rows without location or date should be skipped");
    }

    #[test]
    fn load_locations_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
location,iso_code,continent
Brazil,BRA,South America
Italy,ITA,Europe
";
        db.load_locations(csv).unwrap();

        let locations = db.query_locations().unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location, "Brazil");
        assert_eq!(locations[1].iso_code, "ITA");
    }
}
