//! Typed filter and aggregation queries against the observation table.
//!
//! All aggregation queries take a [`DataFilter`] and compile it into the
//! WHERE clause, so filtering and aggregation happen in a single SQL pass.
//! Country-level aggregates are LEFT JOINed back to the `locations`
//! reference so chart builders always have ISO codes for any location the
//! reference knows.
//!
//! # NULL semantics
//!
//! Metric columns are sparse. Summed aggregates coalesce an all-NULL group
//! to 0, maximum aggregates keep it NULL, and averages drop the group
//! entirely — mirroring the skip-missing behavior of the source dashboard's
//! aggregation helpers.

use crate::models::{ContinentValue, LocationDateValue, LocationRow, LocationValue};
use crate::{DataFilter, Database};
use cov_owid::metric::{Measure, Metric};
use rusqlite::params_from_iter;

impl Database {
    // ───────────────────── Filtered series ─────────────────────

    /// Get the per-location time series of one column for the line chart.
    ///
    /// The column is selected by (measure, metric) — `new` mode falls back
    /// to the instantaneous column for hospital patients. Rows are ordered
    /// by (location, date); missing readings come back as `None`.
    pub fn query_series(
        &self,
        filter: &DataFilter,
        measure: Measure,
        metric: Metric,
    ) -> anyhow::Result<Vec<LocationDateValue>> {
        let column = measure.column_for(metric);
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT location, date, {column}
             FROM observations
             WHERE {clause}
             ORDER BY location, date"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(LocationDateValue {
                    location: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: series({column}) returned {} records", rows.len());
        Ok(rows)
    }

    // ───────────────────── Total (cumulative maxima) ─────────────────────

    /// Per-country total: maximum of the cumulative column over the subset.
    ///
    /// Cumulative columns are monotonic per location, so the maximum is the
    /// latest value in the range. A location whose column is entirely
    /// missing stays in the result with a NULL value.
    pub fn query_total_by_country(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<LocationValue>> {
        let column = metric.total_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT g.location, l.iso_code, g.value
             FROM (SELECT location, MAX({column}) AS value
                   FROM observations
                   WHERE {clause}
                   GROUP BY location) g
             LEFT JOIN locations l ON g.location = l.location
             ORDER BY g.location"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(LocationValue {
                    location: row.get(0)?,
                    iso_code: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: total_by_country({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Per-continent total: sum of the per-country maxima within each
    /// continent. An all-missing continent reports 0.
    pub fn query_total_by_continent(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<ContinentValue>> {
        let column = metric.total_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT continent, COALESCE(SUM(value), 0) AS total
             FROM (SELECT continent, location, MAX({column}) AS value
                   FROM observations
                   WHERE {clause}
                   GROUP BY continent, location)
             GROUP BY continent
             ORDER BY continent"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(ContinentValue {
                    continent: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: total_by_continent({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Collapse the per-country totals to one overall scalar.
    pub fn query_total_sum(&self, filter: &DataFilter, metric: Metric) -> anyhow::Result<f64> {
        let column = metric.total_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let total: f64 = conn.query_row(
            &format!(
                "SELECT COALESCE(SUM(value), 0)
                 FROM (SELECT location, MAX({column}) AS value
                       FROM observations
                       WHERE {clause}
                       GROUP BY location)"
            ),
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(total)
    }

    // ───────────────────── New (daily-delta sums) ─────────────────────

    /// Per-country sum of the daily column over the subset. A country whose
    /// column is entirely missing reports 0.
    pub fn query_new_by_country(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<LocationValue>> {
        let column = metric.delta_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT g.location, l.iso_code, g.value
             FROM (SELECT location, COALESCE(SUM({column}), 0) AS value
                   FROM observations
                   WHERE {clause}
                   GROUP BY location) g
             LEFT JOIN locations l ON g.location = l.location
             ORDER BY g.location"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(LocationValue {
                    location: row.get(0)?,
                    iso_code: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: new_by_country({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Per-continent sum of the daily column over the subset.
    pub fn query_new_by_continent(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<ContinentValue>> {
        let column = metric.delta_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT continent, COALESCE(SUM({column}), 0) AS value
             FROM observations
             WHERE {clause}
             GROUP BY continent
             ORDER BY continent"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(ContinentValue {
                    continent: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: new_by_continent({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Collapse the daily-delta sums to one overall scalar.
    pub fn query_new_sum(&self, filter: &DataFilter, metric: Metric) -> anyhow::Result<f64> {
        let column = metric.delta_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let total: f64 = conn.query_row(
            &format!(
                "SELECT COALESCE(SUM({column}), 0)
                 FROM observations
                 WHERE {clause}"
            ),
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(total)
    }

    // ───────────────────── Average (daily-delta means) ─────────────────────

    /// Per-country mean of the daily column over the subset. Countries with
    /// no readings for the column are dropped.
    pub fn query_average_by_country(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<LocationValue>> {
        let column = metric.delta_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT g.location, l.iso_code, g.value
             FROM (SELECT location, AVG({column}) AS value
                   FROM observations
                   WHERE {clause}
                   GROUP BY location) g
             LEFT JOIN locations l ON g.location = l.location
             WHERE g.value IS NOT NULL
             ORDER BY g.location"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(LocationValue {
                    location: row.get(0)?,
                    iso_code: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: average_by_country({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Per-continent mean of the daily column over the subset, dropping
    /// continents with no readings.
    pub fn query_average_by_continent(
        &self,
        filter: &DataFilter,
        metric: Metric,
    ) -> anyhow::Result<Vec<ContinentValue>> {
        let column = metric.delta_column();
        let (clause, params) = filter.where_clause();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT continent, AVG({column}) AS value
             FROM observations
             WHERE {clause}
             GROUP BY continent
             HAVING value IS NOT NULL
             ORDER BY continent"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(ContinentValue {
                    continent: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: average_by_continent({column}) returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    // ───────────────────── Reference and options ─────────────────────

    /// Get the full location reference, ordered by location.
    pub fn query_locations(&self) -> anyhow::Result<Vec<LocationRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT location, iso_code, continent FROM locations ORDER BY location",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LocationRow {
                    location: row.get(0)?,
                    iso_code: row.get(1)?,
                    continent: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Sorted distinct country names across all observations.
    pub fn query_country_options(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT DISTINCT location FROM observations ORDER BY location")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Sorted distinct continent names across all observations.
    pub fn query_continent_options(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT continent FROM observations WHERE continent <> '' ORDER BY continent",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Sorted distinct country names within one continent.
    pub fn query_countries_in_continent(&self, continent: &str) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT location FROM observations WHERE continent = ?1 ORDER BY location",
        )?;
        let rows = stmt
            .query_map([continent], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Get the (min, max) date range across all observations ("YYYY-MM-DD").
    pub fn query_date_range(&self) -> anyhow::Result<(String, String)> {
        let conn = self.conn.borrow();
        let (min_date, max_date) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM observations", [], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
        Ok((min_date, max_date))
    }
}

#[cfg(test)]
mod tests {
    use crate::{DataFilter, Database};
    use cov_owid::metric::{Measure, Metric};

    const OBS_HEADER: &str = "iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients";

    /// Three countries on two continents; Japan's row predates March to
    /// exercise the missing lower bound of the "All" branch. Italy has no
    /// testing data at all.
    fn test_db() -> Database {
        let db = Database::new().unwrap();
        let csv = format!(
            "{OBS_HEADER}\n\
             ITA,Europe,Italy,2020-03-01,100,10,5,1,2,5,,,5,2\n\
             ITA,Europe,Italy,2020-03-02,120,20,6,1,2,6,,,11,4\n\
             ITA,Europe,Italy,2020-03-03,150,30,8,2,3,7,,,18,7\n\
             FRA,Europe,France,2020-03-01,50,1,2,0,,,100,300,,\n\
             FRA,Europe,France,2020-03-02,52,2,2,0,,,200,500,,\n\
             JPN,Asia,Japan,2020-02-15,40,5,1,0,,,50,80,,\n"
        );
        db.load_observations(&csv).unwrap();
        db.load_locations(
            "location,iso_code,continent\n\
             France,FRA,Europe\n\
             Italy,ITA,Europe\n\
             Japan,JPN,Asia\n",
        )
        .unwrap();
        db
    }

    fn march() -> DataFilter {
        DataFilter::worldwide("2020-03-01", "2020-03-31")
    }

    #[test]
    fn total_by_country_carries_iso_codes() {
        let db = test_db();
        let totals = db.query_total_by_country(&march(), Metric::Cases).unwrap();
        assert_eq!(totals.len(), 3);
        // Ordered by location, every row enriched from the reference
        assert_eq!(totals[0].location, "France");
        assert_eq!(totals[0].iso_code.as_deref(), Some("FRA"));
        assert_eq!(totals[0].value, Some(52.0));
        assert_eq!(totals[2].iso_code.as_deref(), Some("JPN"));
    }

    #[test]
    fn continent_total_equals_sum_of_country_totals() {
        let db = test_db();
        let filter = march();
        let by_country = db.query_total_by_country(&filter, Metric::Cases).unwrap();
        let by_continent = db.query_total_by_continent(&filter, Metric::Cases).unwrap();

        let europe_from_countries: f64 = by_country
            .iter()
            .filter(|c| c.location == "France" || c.location == "Italy")
            .filter_map(|c| c.value)
            .sum();
        let europe = by_continent
            .iter()
            .find(|c| c.continent == "Europe")
            .unwrap();
        assert_eq!(europe.value, Some(europe_from_countries));
        assert_eq!(europe.value, Some(202.0));

        let asia = by_continent.iter().find(|c| c.continent == "Asia").unwrap();
        assert_eq!(asia.value, Some(40.0));
    }

    #[test]
    fn total_sum_collapses_per_country_maxima() {
        let db = test_db();
        let total = db.query_total_sum(&march(), Metric::Cases).unwrap();
        assert_eq!(total, 52.0 + 150.0 + 40.0);
    }

    #[test]
    fn new_sum_scalar_equals_sum_of_per_country_column() {
        let db = test_db();
        let filter = DataFilter::for_continent("Europe", "2020-03-01", "2020-03-31");
        let by_country = db.query_new_by_country(&filter, Metric::Cases).unwrap();
        let scalar = db.query_new_sum(&filter, Metric::Cases).unwrap();
        let column_sum: f64 = by_country.iter().filter_map(|c| c.value).sum();
        assert_eq!(scalar, column_sum);
        assert_eq!(scalar, 63.0);
    }

    #[test]
    fn new_reports_zero_for_all_missing_groups() {
        let db = test_db();
        let by_country = db.query_new_by_country(&march(), Metric::Tests).unwrap();
        let italy = by_country.iter().find(|c| c.location == "Italy").unwrap();
        assert_eq!(italy.value, Some(0.0), "All-missing group sums to 0");
        let france = by_country.iter().find(|c| c.location == "France").unwrap();
        assert_eq!(france.value, Some(300.0));
    }

    #[test]
    fn average_drops_groups_without_data() {
        let db = test_db();
        let averages = db.query_average_by_country(&march(), Metric::Tests).unwrap();
        assert!(averages.iter().all(|c| c.location != "Italy"));
        let france = averages.iter().find(|c| c.location == "France").unwrap();
        assert_eq!(france.value, Some(150.0));
    }

    #[test]
    fn average_by_continent_drops_empty_continents() {
        let db = test_db();
        // Japan's testing row is outside the March window for a named continent
        let filter = DataFilter::for_continent("Asia", "2020-03-01", "2020-03-31");
        let averages = db.query_average_by_continent(&filter, Metric::Tests).unwrap();
        assert!(averages.is_empty());
    }

    #[test]
    fn hosp_patients_new_mode_reads_instantaneous_column() {
        let db = test_db();
        let total = db.query_new_sum(&march(), Metric::HospPatients).unwrap();
        assert_eq!(total, 18.0);
    }

    #[test]
    fn series_for_country_list_is_sorted_and_exclusive() {
        let db = test_db();
        let filter =
            DataFilter::for_countries(vec!["Italy".to_string()], "2020-03-01", "2020-03-31");
        let series = db.query_series(&filter, Measure::Total, Metric::Cases).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|r| r.location == "Italy"));
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(series[2].value, Some(150.0));
    }

    #[test]
    fn filtering_is_idempotent() {
        let db = test_db();
        let filter =
            DataFilter::for_countries(vec!["Italy".to_string()], "2020-03-01", "2020-03-31");
        let first = db.query_series(&filter, Measure::New, Metric::Cases).unwrap();
        let second = db.query_series(&filter, Measure::New, Metric::Cases).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn all_continents_branch_ignores_lower_bound() {
        let db = test_db();
        // Japan's only row is 2020-02-15, before the nominal start date
        let series = db.query_series(&march(), Measure::New, Metric::Cases).unwrap();
        assert!(series.iter().any(|r| r.location == "Japan"));

        // A named continent applies both bounds
        let filter = DataFilter::for_continent("Asia", "2020-03-01", "2020-03-31");
        let series = db.query_series(&filter, Measure::New, Metric::Cases).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn country_list_overrides_continent_entirely() {
        let db = test_db();
        let filter = DataFilter {
            continent: "Asia".to_string(),
            countries: Some(vec!["Italy".to_string()]),
            start_date: "2020-03-01".to_string(),
            end_date: "2020-03-31".to_string(),
        };
        let totals = db.query_total_by_country(&filter, Metric::Cases).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].location, "Italy");
    }

    #[test]
    fn empty_country_list_selects_nothing() {
        let db = test_db();
        let filter = DataFilter::for_countries(Vec::new(), "2020-03-01", "2020-03-31");
        let series = db.query_series(&filter, Measure::New, Metric::Cases).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn option_lists_and_date_range() {
        let db = test_db();
        assert_eq!(db.query_country_options().unwrap(), ["France", "Italy", "Japan"]);
        assert_eq!(db.query_continent_options().unwrap(), ["Asia", "Europe"]);
        assert_eq!(
            db.query_countries_in_continent("Europe").unwrap(),
            ["France", "Italy"]
        );
        let (min_date, max_date) = db.query_date_range().unwrap();
        assert_eq!(min_date, "2020-02-15");
        assert_eq!(max_date, "2020-03-03");
    }

    #[test]
    fn worldwide_full_range_matches_whole_dataset_totals() {
        let db = test_db();
        let (min_date, max_date) = db.query_date_range().unwrap();
        let filter = DataFilter::worldwide(&min_date, &max_date);
        let cases = db.query_total_sum(&filter, Metric::Cases).unwrap();
        let deaths = db.query_total_sum(&filter, Metric::Deaths).unwrap();
        assert_eq!(cases, 242.0);
        assert_eq!(deaths, 8.0 + 2.0 + 1.0);
    }
}
