//! The active filter state and its compilation to SQL.
//!
//! Every chart and summary query starts from a [`DataFilter`]: the continent
//! selector value, the optional explicit country list, and the inclusive
//! date range. The filter compiles to a WHERE clause applied to the base
//! observation table, so filtering and aggregation happen in one pass.

/// Sentinel continent value meaning "no continent restriction".
pub const ALL_CONTINENTS: &str = "All";

/// The active filter: continent, optional explicit countries, date range.
///
/// Dates are "YYYY-MM-DD" strings; observations are day-granular and the
/// lexicographic ordering of this format is chronological, so both interval
/// endpoints are inclusive by plain string comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFilter {
    pub continent: String,
    /// When present, restricts to exactly these locations and the date range,
    /// ignoring `continent` entirely. An empty list selects nothing — the
    /// source dashboard behaves the same way when the country control is
    /// cleared, and that behavior is kept.
    pub countries: Option<Vec<String>>,
    pub start_date: String,
    pub end_date: String,
}

impl DataFilter {
    /// Filter covering all countries in a date range.
    pub fn worldwide(start_date: &str, end_date: &str) -> Self {
        Self {
            continent: ALL_CONTINENTS.to_string(),
            countries: None,
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// Filter restricted to an explicit country list and date range.
    pub fn for_countries(countries: Vec<String>, start_date: &str, end_date: &str) -> Self {
        Self {
            continent: ALL_CONTINENTS.to_string(),
            countries: Some(countries),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// Filter restricted to a continent and date range.
    pub fn for_continent(continent: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            continent: continent.to_string(),
            countries: None,
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// Compile to a WHERE clause over `observations` plus its bind values.
    ///
    /// Three branches, in precedence order:
    /// - explicit country list: `location IN (...) AND date BETWEEN start AND
    ///   end` — the continent value plays no part
    /// - continent = "All": upper date bound only. The missing lower bound
    ///   reproduces the source dashboard's observed behavior for this branch.
    /// - named continent: `continent = ? AND date BETWEEN start AND end`
    pub(crate) fn where_clause(&self) -> (String, Vec<String>) {
        if let Some(countries) = &self.countries {
            if countries.is_empty() {
                // IN () is not valid SQL; an empty selection matches nothing.
                return ("0 = 1".to_string(), Vec::new());
            }
            let placeholders = vec!["?"; countries.len()].join(", ");
            let clause = format!("location IN ({placeholders}) AND date >= ? AND date <= ?");
            let mut params = countries.clone();
            params.push(self.start_date.clone());
            params.push(self.end_date.clone());
            (clause, params)
        } else if self.continent == ALL_CONTINENTS {
            ("date <= ?".to_string(), vec![self.end_date.clone()])
        } else {
            (
                "continent = ? AND date >= ? AND date <= ?".to_string(),
                vec![
                    self.continent.clone(),
                    self.start_date.clone(),
                    self.end_date.clone(),
                ],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_list_overrides_continent() {
        let filter = DataFilter {
            continent: "Asia".to_string(),
            countries: Some(vec!["Italy".to_string(), "France".to_string()]),
            start_date: "2020-03-01".to_string(),
            end_date: "2020-03-31".to_string(),
        };
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "location IN (?, ?) AND date >= ? AND date <= ?");
        assert_eq!(params, vec!["Italy", "France", "2020-03-01", "2020-03-31"]);
    }

    #[test]
    fn test_all_continents_has_no_lower_date_bound() {
        let filter = DataFilter::worldwide("2020-03-01", "2020-03-31");
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "date <= ?");
        assert_eq!(params, vec!["2020-03-31"]);
    }

    #[test]
    fn test_continent_branch_applies_both_bounds() {
        let filter = DataFilter::for_continent("Europe", "2020-03-01", "2020-03-31");
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "continent = ? AND date >= ? AND date <= ?");
        assert_eq!(params, vec!["Europe", "2020-03-01", "2020-03-31"]);
    }

    #[test]
    fn test_empty_country_list_selects_nothing() {
        let filter = DataFilter::for_countries(Vec::new(), "2020-03-01", "2020-03-31");
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "0 = 1");
        assert!(params.is_empty());
    }
}
