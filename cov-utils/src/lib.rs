//! Shared utility functions for the COVID dashboard crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Strip an optional ISO time suffix ("2020-03-01T00:00:00" -> "2020-03-01").
    ///
    /// Date picker widgets sometimes hand back full timestamps; observations
    /// are day-granular, so only the calendar-day prefix matters.
    pub fn date_part(s: &str) -> &str {
        s.split('T').next().unwrap_or(s)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse_roundtrip() {
            let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
            let s = format_date(&date);
            assert_eq!(s, "2020-03-01");
            assert_eq!(parse_date(&s).unwrap(), date);
        }

        #[test]
        fn test_parse_rejects_compact_format() {
            assert!(parse_date("20200301").is_err());
        }

        #[test]
        fn test_date_part() {
            assert_eq!(date_part("2020-03-01T00:00:00"), "2020-03-01");
            assert_eq!(date_part("2020-03-01"), "2020-03-01");
        }
    }
}

/// Human-readable number formatting for summary cards.
pub mod format {
    const SUFFIXES: [&str; 6] = ["", "K", "M", "G", "T", "P"];

    /// Abbreviate a number with a metric suffix: 1500 -> "1K", 2300000 -> "2M".
    ///
    /// The magnitude is the base-1000 logarithm truncated toward zero, and the
    /// mantissa is truncated as well, so values just under a power of 1000
    /// stay unabbreviated (999999 -> "999999") and 1500 -> "1K", not "2K".
    pub fn human_format(num: f64) -> String {
        if num == 0.0 {
            return "0".to_string();
        }
        let magnitude = (num.log(1000.0).trunc() as i64).clamp(0, SUFFIXES.len() as i64 - 1);
        let mantissa = (num / 1000_f64.powi(magnitude as i32)).trunc() as i64;
        format!("{}{}", mantissa, SUFFIXES[magnitude as usize])
    }

    #[cfg(test)]
    mod tests {
        use super::human_format;

        #[test]
        fn test_zero() {
            assert_eq!(human_format(0.0), "0");
        }

        #[test]
        fn test_below_one_thousand() {
            assert_eq!(human_format(999.0), "999");
            assert_eq!(human_format(1.0), "1");
        }

        #[test]
        fn test_truncates_not_rounds() {
            assert_eq!(human_format(1500.0), "1K");
            assert_eq!(human_format(1999.0), "1K");
            assert_eq!(human_format(2_300_000.0), "2M");
        }

        #[test]
        fn test_float_log_magnitude_quirk() {
            // log1000(999999) is just under 1, so the value stays unabbreviated
            assert_eq!(human_format(999_999.0), "999999");
            assert_eq!(human_format(1_000_000.0), "1M");
        }

        #[test]
        fn test_large_magnitudes() {
            assert_eq!(human_format(5_000_000_000.0), "5G");
            assert_eq!(human_format(7_200_000_000_000.0), "7T");
        }
    }
}
