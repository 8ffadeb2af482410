//! Cleaning pipeline and reference tables for COVID observations.
//!
//! This crate transforms raw parsed dataset rows into the immutable,
//! de-duplicated observation table the dashboard and CLI work from.

/// The cleaning pipeline applied once after parsing the raw dataset.
pub mod clean {
    use cov_owid::observation::Observation;

    /// Pseudo-locations aggregating many countries; the data model represents
    /// individual countries only.
    pub const EXCLUDED_LOCATIONS: [&str; 2] = ["World", "International"];

    /// Sort by (location, date) and keep one row per (location, date) pair.
    pub fn dedup_and_sort(mut observations: Vec<Observation>) -> Vec<Observation> {
        observations.sort();
        observations.dedup();
        observations
    }

    /// Drop rows for aggregate pseudo-locations.
    pub fn drop_aggregate_locations(observations: Vec<Observation>) -> Vec<Observation> {
        observations
            .into_iter()
            .filter(|o| !EXCLUDED_LOCATIONS.contains(&o.location.as_str()))
            .collect()
    }

    /// Drop rows reporting a negative daily value.
    ///
    /// Screens `new_cases`, `new_deaths`, `new_tests` and `hosp_patients`.
    /// `icu_patients` is deliberately not screened, matching the source
    /// dashboard's cleaning steps.
    pub fn drop_negative_deltas(observations: Vec<Observation>) -> Vec<Observation> {
        let is_negative = |v: Option<f64>| v.is_some_and(|x| x < 0.0);
        observations
            .into_iter()
            .filter(|o| {
                !is_negative(o.new_cases)
                    && !is_negative(o.new_deaths)
                    && !is_negative(o.new_tests)
                    && !is_negative(o.hosp_patients)
            })
            .collect()
    }

    /// Fill `total_hosp_patients` / `total_icu_patients` as per-location
    /// running sums of the instantaneous daily counts.
    ///
    /// A missing daily value leaves that row's running total unset without
    /// resetting the accumulator. Input must already be sorted by
    /// (location, date).
    ///
    /// The running sum of an instantaneous census is not a count of distinct
    /// admitted patients; the source dashboard computes exactly this column,
    /// and it is reproduced as observed.
    pub fn add_running_totals(mut observations: Vec<Observation>) -> Vec<Observation> {
        let mut current_location: Option<String> = None;
        let mut hosp_acc = 0.0;
        let mut icu_acc = 0.0;

        for obs in observations.iter_mut() {
            if current_location.as_deref() != Some(obs.location.as_str()) {
                current_location = Some(obs.location.clone());
                hosp_acc = 0.0;
                icu_acc = 0.0;
            }
            obs.total_hosp_patients = obs.hosp_patients.map(|v| {
                hosp_acc += v;
                hosp_acc
            });
            obs.total_icu_patients = obs.icu_patients.map(|v| {
                icu_acc += v;
                icu_acc
            });
        }
        observations
    }

    /// Run the full cleaning pipeline in source order: dedup + sort, drop
    /// aggregate locations, drop negative daily values, fill running totals.
    pub fn clean_observations(observations: Vec<Observation>) -> Vec<Observation> {
        let raw_len = observations.len();
        let observations = dedup_and_sort(observations);
        let observations = drop_aggregate_locations(observations);
        let observations = drop_negative_deltas(observations);
        let observations = add_running_totals(observations);
        log::info!(
            "cleaned observations: {} rows in, {} rows out",
            raw_len,
            observations.len()
        );
        observations
    }
}

/// Location reference table and filter option lists, derived once from the
/// cleaned observation set.
pub mod reference {
    use cov_owid::observation::Observation;

    /// 1:1 mapping from location name to ISO code and continent.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LocationRef {
        pub location: String,
        pub iso_code: String,
        pub continent: String,
    }

    /// Build the location reference: unique per location, sorted by location.
    ///
    /// The first observation row for a location supplies its ISO code and
    /// continent; both are constant per location in the source dataset.
    pub fn build_reference(observations: &[Observation]) -> Vec<LocationRef> {
        let mut refs: Vec<LocationRef> = Vec::new();
        for obs in observations {
            if refs.last().map(|r| r.location.as_str()) != Some(obs.location.as_str()) {
                refs.push(LocationRef {
                    location: obs.location.clone(),
                    iso_code: obs.iso_code.clone(),
                    continent: obs.continent.clone(),
                });
            }
        }
        refs.sort_by(|a, b| a.location.cmp(&b.location));
        refs.dedup_by(|a, b| a.location == b.location);
        refs
    }

    /// Sorted distinct country names.
    pub fn country_options(observations: &[Observation]) -> Vec<String> {
        let mut countries: Vec<String> =
            observations.iter().map(|o| o.location.clone()).collect();
        countries.sort();
        countries.dedup();
        countries
    }

    /// Sorted distinct continent names; empty continents (carried by some
    /// aggregate rows in the source) are excluded.
    pub fn continent_options(observations: &[Observation]) -> Vec<String> {
        let mut continents: Vec<String> = observations
            .iter()
            .filter(|o| !o.continent.is_empty())
            .map(|o| o.continent.clone())
            .collect();
        continents.sort();
        continents.dedup();
        continents
    }
}
