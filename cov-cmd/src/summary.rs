//! Print aggregate summary tables from fetched fixtures.

use cov_db::{DataFilter, Database};
use cov_owid::metric::Metric;
use cov_utils::format::human_format;
use log::info;

/// Load the fixtures into the in-memory database and print Total / New /
/// Average tables for one metric over the full date range.
pub fn run_summary(
    observations_csv: &str,
    locations_csv: &str,
    metric: &str,
    level: &str,
) -> anyhow::Result<()> {
    let metric = Metric::from_key(metric)
        .ok_or_else(|| anyhow::anyhow!("unknown metric '{}' (expected one of cases, deaths, tests, hosp_patients)", metric))?;

    let observations = std::fs::read_to_string(observations_csv)?;
    let locations = std::fs::read_to_string(locations_csv)?;

    let db = Database::new()?;
    db.load_observations(&observations)?;
    db.load_locations(&locations)?;

    let (min_date, max_date) = db.query_date_range()?;
    info!("Summarizing {} from {} to {}", metric.key(), min_date, max_date);
    let filter = DataFilter::worldwide(&min_date, &max_date);

    println!(
        "{} summary, {} to {}\n",
        metric.display_name(),
        min_date,
        max_date
    );

    match level {
        "country" => {
            let totals = db.query_total_by_country(&filter, metric)?;
            let news = db.query_new_by_country(&filter, metric)?;
            let averages = db.query_average_by_country(&filter, metric)?;

            println!("{:<32} {:>6} {:>10} {:>10} {:>12}", "Country", "ISO", "Total", "New", "Avg daily");
            for (total, new) in totals.iter().zip(news.iter()) {
                let average = averages
                    .iter()
                    .find(|a| a.location == total.location)
                    .and_then(|a| a.value);
                println!(
                    "{:<32} {:>6} {:>10} {:>10} {:>12}",
                    total.location,
                    total.iso_code.as_deref().unwrap_or("-"),
                    total.value.map_or("-".to_string(), human_format),
                    new.value.map_or("-".to_string(), human_format),
                    average.map_or("-".to_string(), |v| format!("{:.1}", v)),
                );
            }
        }
        "continent" => {
            let totals = db.query_total_by_continent(&filter, metric)?;
            let news = db.query_new_by_continent(&filter, metric)?;
            let averages = db.query_average_by_continent(&filter, metric)?;

            println!("{:<20} {:>10} {:>10} {:>12}", "Continent", "Total", "New", "Avg daily");
            for (total, new) in totals.iter().zip(news.iter()) {
                let average = averages
                    .iter()
                    .find(|a| a.continent == total.continent)
                    .and_then(|a| a.value);
                println!(
                    "{:<20} {:>10} {:>10} {:>12}",
                    total.continent,
                    total.value.map_or("-".to_string(), human_format),
                    new.value.map_or("-".to_string(), human_format),
                    average.map_or("-".to_string(), |v| format!("{:.1}", v)),
                );
            }
        }
        other => anyhow::bail!("unknown level '{}' (expected country or continent)", other),
    }

    let overall = db.query_total_sum(&filter, metric)?;
    println!("\nOverall total: {}", human_format(overall));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_summary;

    #[test]
    fn test_unknown_metric_is_rejected() {
        let err = run_summary("nope.csv", "nope.csv", "bogus", "country").unwrap_err();
        assert!(err.to_string().contains("unknown metric"));
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let dir = std::env::temp_dir().join("cov-cmd-summary-test");
        std::fs::create_dir_all(&dir).unwrap();
        let obs = dir.join("observations.csv");
        let locs = dir.join("locations.csv");
        std::fs::write(
            &obs,
            "iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients\n\
             ITA,Europe,Italy,2020-03-01,100,10,5,1,,,,,,\n",
        )
        .unwrap();
        std::fs::write(&locs, "location,iso_code,continent\nItaly,ITA,Europe\n").unwrap();

        let err = run_summary(
            obs.to_str().unwrap(),
            locs.to_str().unwrap(),
            "cases",
            "bogus",
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown level"));
    }
}
