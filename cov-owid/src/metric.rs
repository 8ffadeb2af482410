use serde::{Deserialize, Serialize};

/// The four metrics the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Cases,
    Deaths,
    Tests,
    HospPatients,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cases,
        Metric::Deaths,
        Metric::Tests,
        Metric::HospPatients,
    ];

    /// Stable key used for tab values and column derivation.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
            Metric::Tests => "tests",
            Metric::HospPatients => "hosp_patients",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Column holding the cumulative (monotonic) series for this metric.
    ///
    /// Hospital patients have no cumulative column in the source; the
    /// cleaning pipeline derives `total_hosp_patients` as a running sum.
    pub fn total_column(&self) -> &'static str {
        match self {
            Metric::Cases => "total_cases",
            Metric::Deaths => "total_deaths",
            Metric::Tests => "total_tests",
            Metric::HospPatients => "total_hosp_patients",
        }
    }

    /// Column holding the per-day series for this metric.
    ///
    /// Hospital patients have no "new_" column; the instantaneous daily
    /// count stands in for it, matching the source dashboard's fallback.
    pub fn delta_column(&self) -> &'static str {
        match self {
            Metric::Cases => "new_cases",
            Metric::Deaths => "new_deaths",
            Metric::Tests => "new_tests",
            Metric::HospPatients => "hosp_patients",
        }
    }

    /// Human wording for chart titles: "hosp_patients" -> "hospital patients".
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
            Metric::Tests => "tests",
            Metric::HospPatients => "hospital patients",
        }
    }

    /// Tab label shown in the metric tab group.
    pub fn tab_label(&self) -> &'static str {
        match self {
            Metric::Cases => "Cases",
            Metric::Deaths => "Deaths",
            Metric::Tests => "Tests",
            Metric::HospPatients => "Hospital patients",
        }
    }
}

/// Time-aggregation mode: up-to-date totals or daily change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    Total,
    New,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Total, Measure::New];

    pub fn key(&self) -> &'static str {
        match self {
            Measure::Total => "total",
            Measure::New => "new",
        }
    }

    pub fn from_key(key: &str) -> Option<Measure> {
        Measure::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Measure::Total => "Up-to-date Total",
            Measure::New => "Daily change",
        }
    }

    /// The observation column this measure reads for a given metric.
    pub fn column_for(&self, metric: Metric) -> &'static str {
        match self {
            Measure::Total => metric.total_column(),
            Measure::New => metric.delta_column(),
        }
    }

    /// Title prefix: "Total cases over time ..." / "New cases over time ...".
    pub fn title_prefix(&self) -> &'static str {
        match self {
            Measure::Total => "Total",
            Measure::New => "New",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Measure, Metric};

    #[test]
    fn test_hosp_patients_delta_fallback() {
        assert_eq!(Metric::HospPatients.delta_column(), "hosp_patients");
        assert_eq!(Metric::Cases.delta_column(), "new_cases");
    }

    #[test]
    fn test_total_column_uses_derived_running_totals() {
        assert_eq!(Metric::HospPatients.total_column(), "total_hosp_patients");
        assert_eq!(Metric::Tests.total_column(), "total_tests");
    }

    #[test]
    fn test_key_roundtrip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_key(metric.key()), Some(metric));
        }
        for measure in Measure::ALL {
            assert_eq!(Measure::from_key(measure.key()), Some(measure));
        }
        assert_eq!(Metric::from_key("nope"), None);
    }

    #[test]
    fn test_measure_column_selection() {
        assert_eq!(Measure::Total.column_for(Metric::Cases), "total_cases");
        assert_eq!(Measure::New.column_for(Metric::HospPatients), "hosp_patients");
    }
}
