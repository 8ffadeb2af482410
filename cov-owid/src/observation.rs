use chrono::naive::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Date format used throughout the OWID dataset: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Remote URL of the full OWID COVID-19 dataset (CSV).
pub const DATASET_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

/// Remote URL of the OWID codebook describing column semantics.
pub const CODEBOOK_URL: &str =
    "https://github.com/owid/covid-19-data/blob/master/public/data/owid-covid-codebook.csv?raw=true";

/// The column subset retained from the full OWID dataset, in fixture order.
pub const DATASET_COLUMNS: [&str; 12] = [
    "iso_code",
    "continent",
    "location",
    "date",
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
    "icu_patients",
    "hosp_patients",
    "new_tests",
    "total_tests",
];

/// Errors that can occur when fetching or parsing the dataset.
#[derive(Debug, PartialEq, Clone, Copy, Hash)]
pub enum DatasetError {
    HttpRequestError,
    HttpResponseParseError,
    MissingColumn,
    RecordCollectionError,
}

/// One observation row: a single (location, date) pair.
///
/// All metric fields are optional; the source dataset is sparse, especially
/// for hospitalization and testing columns. The `total_hosp_patients` and
/// `total_icu_patients` running totals are not present in the source; the
/// cleaning pipeline fills them in per location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub iso_code: String,
    pub continent: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_cases: Option<f64>,
    pub new_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
    pub icu_patients: Option<f64>,
    pub hosp_patients: Option<f64>,
    pub new_tests: Option<f64>,
    pub total_tests: Option<f64>,
    pub total_hosp_patients: Option<f64>,
    pub total_icu_patients: Option<f64>,
}

/// Resolved indices of the retained columns within a dataset header row.
///
/// The full OWID export carries dozens of columns whose order has shifted
/// over time, so rows are addressed by header name rather than position.
#[derive(Debug, Clone)]
pub struct ColumnIndices {
    by_name: HashMap<String, usize>,
}

impl ColumnIndices {
    /// Resolve the retained columns against a header record.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, DatasetError> {
        let mut by_name = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            by_name.insert(name.trim().to_string(), idx);
        }
        for column in DATASET_COLUMNS {
            if !by_name.contains_key(column) {
                log::warn!("dataset header is missing column '{}'", column);
                return Err(DatasetError::MissingColumn);
            }
        }
        Ok(Self { by_name })
    }

    fn get<'a>(&self, record: &'a StringRecord, column: &str) -> Option<&'a str> {
        self.by_name
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
    }
}

impl Observation {
    /// Parse a single dataset record using resolved column indices.
    ///
    /// Returns `None` for rows with an unparseable date or an empty location;
    /// missing numeric cells become `None` fields rather than dropping the row.
    pub fn from_record(record: &StringRecord, cols: &ColumnIndices) -> Option<Observation> {
        let location = cols.get(record, "location")?.to_string();
        if location.is_empty() {
            return None;
        }
        let date = NaiveDate::parse_from_str(cols.get(record, "date")?, DATE_FORMAT).ok()?;

        let number = |column: &str| -> Option<f64> {
            cols.get(record, column).and_then(|s| s.parse::<f64>().ok())
        };

        Some(Observation {
            iso_code: cols.get(record, "iso_code").unwrap_or("").to_string(),
            continent: cols.get(record, "continent").unwrap_or("").to_string(),
            location,
            date,
            total_cases: number("total_cases"),
            new_cases: number("new_cases"),
            total_deaths: number("total_deaths"),
            new_deaths: number("new_deaths"),
            icu_patients: number("icu_patients"),
            hosp_patients: number("hosp_patients"),
            new_tests: number("new_tests"),
            total_tests: number("total_tests"),
            total_hosp_patients: None,
            total_icu_patients: None,
        })
    }

    /// Parse a full OWID dataset CSV body into observations.
    ///
    /// Rows that fail to parse are skipped and counted rather than failing
    /// the whole dataset; the source routinely contains partial rows.
    pub fn parse_dataset(body: &str) -> Result<Vec<Observation>, DatasetError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|_| DatasetError::HttpResponseParseError)?
            .clone();
        let cols = ColumnIndices::from_headers(&headers)?;

        let mut observations = Vec::new();
        let mut skipped = 0u32;
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            match Observation::from_record(&record, &cols) {
                Some(obs) => observations.push(obs),
                None => skipped += 1,
            }
        }
        log::info!(
            "parsed {} observations, skipped {} malformed rows",
            observations.len(),
            skipped
        );
        if observations.is_empty() {
            return Err(DatasetError::RecordCollectionError);
        }
        Ok(observations)
    }
}

impl Ord for Observation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .cmp(&other.location)
            .then(self.date.cmp(&other.date))
    }
}

impl Eq for Observation {}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.date == other.date
    }
}

impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod test {
    use super::Observation;
    use chrono::NaiveDate;

    // Header order and extra columns mimic the live OWID export, which carries
    // many more columns than the retained subset.
    const STR_RESULT: &str = r#"iso_code,continent,location,date,total_cases,new_cases,new_cases_smoothed,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,population
ITA,Europe,Italy,2020-03-01,1694,573,,34,12,140,455,,23345,60461826
ITA,Europe,Italy,2020-03-02,2036,342,,52,18,166,508,4325,27670,60461826
FRA,Europe,France,2020-03-01,130,30,,2,0,,,,,65273511
,,,"not a date",1,1,,1,1,,,,,
"#;

    #[test]
    fn test_parse_dataset_by_header_name() {
        let observations = Observation::parse_dataset(STR_RESULT).unwrap();
        assert_eq!(observations.len(), 3, "malformed row should be skipped");
        assert_eq!(observations[0].location, "Italy");
        assert_eq!(observations[0].iso_code, "ITA");
        assert_eq!(
            observations[0].date,
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
        );
        assert_eq!(observations[0].total_cases, Some(1694.0));
        assert_eq!(observations[0].new_tests, None);
    }

    #[test]
    fn test_missing_cells_become_none() {
        let observations = Observation::parse_dataset(STR_RESULT).unwrap();
        let france = &observations[2];
        assert_eq!(france.location, "France");
        assert_eq!(france.icu_patients, None);
        assert_eq!(france.hosp_patients, None);
        assert_eq!(france.total_tests, None);
    }

    #[test]
    fn test_running_totals_start_unset() {
        let observations = Observation::parse_dataset(STR_RESULT).unwrap();
        assert!(observations
            .iter()
            .all(|o| o.total_hosp_patients.is_none() && o.total_icu_patients.is_none()));
    }

    #[test]
    fn test_ordering_is_location_then_date() {
        let mut observations = Observation::parse_dataset(STR_RESULT).unwrap();
        observations.sort();
        assert_eq!(observations[0].location, "France");
        assert_eq!(observations[1].location, "Italy");
        assert!(observations[1].date < observations[2].date);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let body = "iso_code,continent,location\nITA,Europe,Italy\n";
        assert!(Observation::parse_dataset(body).is_err());
    }
}
