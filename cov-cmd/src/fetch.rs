//! Fetch and clean the remote OWID dataset into fixture CSVs.

use cov_data::{clean, reference};
use cov_owid::observation::{Observation, CODEBOOK_URL, DATASET_URL};
use log::info;
use std::path::Path;

/// Headers of the cleaned observations fixture: the retained dataset columns
/// plus the two derived running-total columns.
const FIXTURE_COLUMNS: [&str; 14] = [
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
    "total_hosp_patients",
    "total_icu_patients",
];

/// Download the dataset and codebook, run the cleaning pipeline, and write
/// `observations.csv`, `locations.csv` and `codebook.csv` under `out_dir`.
///
/// The dataset export is large (tens of MB); the request allows several
/// minutes before timing out.
pub async fn run_fetch(out_dir: &str) -> anyhow::Result<()> {
    let out_path = Path::new(out_dir);
    std::fs::create_dir_all(out_path)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    info!("Downloading dataset from {}", DATASET_URL);
    let response = client.get(DATASET_URL).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("dataset request failed: {}", response.status());
    }
    let body = response.text().await?;
    info!("Downloaded {} bytes", body.len());

    let raw = Observation::parse_dataset(&body)
        .map_err(|e| anyhow::anyhow!("failed to parse dataset: {:?}", e))?;
    let observations = clean::clean_observations(raw);
    let locations = reference::build_reference(&observations);

    write_observations(&out_path.join("observations.csv"), &observations)?;
    write_locations(&out_path.join("locations.csv"), &locations)?;

    info!("Downloading codebook from {}", CODEBOOK_URL);
    match client.get(CODEBOOK_URL).send().await {
        Ok(response) if response.status().is_success() => {
            let codebook = response.text().await?;
            std::fs::write(out_path.join("codebook.csv"), codebook)?;
        }
        Ok(response) => {
            // Tooltips degrade gracefully without the codebook
            info!("Codebook request failed: {}", response.status());
        }
        Err(e) => {
            info!("Codebook request failed: {}", e);
        }
    }

    info!(
        "Fetch complete: {} observations, {} locations written to {}",
        observations.len(),
        locations.len(),
        out_dir
    );
    Ok(())
}

fn format_opt(value: Option<f64>) -> String {
    value.map_or(String::new(), |v| {
        if v.fract() == 0.0 {
            format!("{}", v as i64)
        } else {
            format!("{}", v)
        }
    })
}

/// Write the cleaned observations fixture (with headers).
pub fn write_observations(path: &Path, observations: &[Observation]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(FIXTURE_COLUMNS)?;
    for obs in observations {
        let record: [String; 14] = [
            obs.iso_code.clone(),
            obs.continent.clone(),
            obs.location.clone(),
            obs.date
                .format(cov_owid::observation::DATE_FORMAT)
                .to_string(),
            format_opt(obs.total_cases),
            format_opt(obs.new_cases),
            format_opt(obs.total_deaths),
            format_opt(obs.new_deaths),
            format_opt(obs.icu_patients),
            format_opt(obs.hosp_patients),
            format_opt(obs.new_tests),
            format_opt(obs.total_tests),
            format_opt(obs.total_hosp_patients),
            format_opt(obs.total_icu_patients),
        ];
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the location reference fixture (with headers).
pub fn write_locations(path: &Path, locations: &[reference::LocationRef]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["location", "iso_code", "continent"])?;
    for loc in locations {
        wtr.write_record([
            loc.location.as_str(),
            loc.iso_code.as_str(),
            loc.continent.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_opt() {
        assert_eq!(format_opt(None), "");
        assert_eq!(format_opt(Some(42.0)), "42");
        assert_eq!(format_opt(Some(12.5)), "12.5");
    }

    #[test]
    fn test_fixture_roundtrip_through_loader() {
        let observations = vec![Observation {
            iso_code: "ITA".to_string(),
            continent: "Europe".to_string(),
            location: "Italy".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            total_cases: Some(1694.0),
            new_cases: Some(573.0),
            total_deaths: Some(34.0),
            new_deaths: Some(12.0),
            icu_patients: Some(140.0),
            hosp_patients: Some(455.0),
            new_tests: None,
            total_tests: Some(23345.0),
            total_hosp_patients: Some(455.0),
            total_icu_patients: Some(140.0),
        }];

        let dir = std::env::temp_dir().join("cov-cmd-fixture-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("observations.csv");
        write_observations(&path, &observations).unwrap();

        let csv_data = std::fs::read_to_string(&path).unwrap();
        let db = cov_db::Database::new().unwrap();
        db.load_observations(&csv_data).unwrap();
        let (min_date, max_date) = db.query_date_range().unwrap();
        assert_eq!(min_date, "2020-03-01");
        assert_eq!(max_date, "2020-03-01");
    }
}
