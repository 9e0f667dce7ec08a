// Utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a posting timestamp into a naive (timezone-dropped) datetime, if possible.
///
/// Offsets are discarded rather than converted, so a posting keeps the wall-clock
/// day it was published on.
pub fn parse_datetime(date_str: &str) -> Option<NaiveDateTime> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a numeric cell; blanks, `nan` and non-finite values are missing.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds to three decimals for display.
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_supported_timestamp_shapes() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_datetime("2024-03-05").unwrap().date(), d);
        assert_eq!(parse_datetime("05/03/2024").unwrap().date(), d);
        assert_eq!(parse_datetime("2024-03-05 08:30:00").unwrap().hour(), 8);
        assert_eq!(parse_datetime("2024-03-05T23:10:00+07:00").unwrap().date(), d);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn numbers_coerce_to_missing() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("thoả thuận"), None);
        assert_eq!(parse_number(""), None);
    }
}
