//! Timestamp utilities
//!
//! Show start times are stored and compared at whole-second precision so the
//! stored text form sorts the same way the instants do.

use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, Utc};

/// Display format used in show lists on detail and listing pages
pub const SHOW_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M";

/// Naive layouts accepted from the show form, interpreted as UTC
const NAIVE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Years whose RFC 3339 text is four digits without a sign
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Get current UTC timestamp, truncated to whole seconds
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Format a show start time for list rows (`05/21/2019, 21:30`)
pub fn format_start_time(value: &DateTime<Utc>) -> String {
    value.format(SHOW_TIME_FORMAT).to_string()
}

/// Long-form date patterns for page headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
            DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        }
    }
}

/// Format a timestamp using one of the named long-form patterns
pub fn format_datetime(value: &DateTime<Utc>, format: DateFormat) -> String {
    value.format(format.pattern()).to_string()
}

/// Parse a start time submitted through a form
///
/// Accepts RFC 3339 and the naive layouts browsers and the seed data use.
/// Naive values are taken as UTC. Returns `None` when nothing matches, or
/// when the UTC year falls outside 0..=9999: stored start times are compared
/// as text, which only orders correctly for four-digit years.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => NAIVE_INPUT_FORMATS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
            .map(|naive| naive.and_utc()),
    };

    parsed
        .filter(|value| STORABLE_YEARS.contains(&value.year()))
        .map(|value| value.trunc_subsecs(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn test_now_returns_recent_timestamp() {
        let timestamp = now();
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() < 4_102_444_800); // 2100-01-01 00:00:00 UTC
    }

    #[test]
    fn test_format_start_time() {
        assert_eq!(format_start_time(&sample()), "05/21/2019, 21:30");
    }

    #[test]
    fn test_format_datetime_medium() {
        assert_eq!(
            format_datetime(&sample(), DateFormat::Medium),
            "Tue 05, 21, 2019 9:30PM"
        );
    }

    #[test]
    fn test_format_datetime_full() {
        assert_eq!(
            format_datetime(&sample(), DateFormat::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
    }

    #[test]
    fn test_parse_start_time_layouts() {
        for raw in [
            "2019-05-21 21:30:00",
            "2019-05-21 21:30",
            "2019-05-21T21:30",
            "2019-05-21T21:30:00",
            "2019-05-21T21:30:00Z",
            "2019-05-21T23:30:00+02:00",
            "  2019-05-21 21:30:00 ",
        ] {
            assert_eq!(parse_start_time(raw), Some(sample()), "layout {raw}");
        }
    }

    #[test]
    fn test_parse_start_time_drops_subseconds() {
        let parsed = parse_start_time("2019-05-21T21:30:00.750Z").unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_start_time_rejects_garbage() {
        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("next tuesday"), None);
        assert_eq!(parse_start_time("2019-13-40 10:00"), None);
    }

    #[test]
    fn test_parse_start_time_rejects_years_beyond_four_digits() {
        assert_eq!(parse_start_time("+10000-01-01 20:00"), None);
        assert_eq!(parse_start_time("+10000-01-01T20:00:00Z"), None);
        assert_eq!(parse_start_time("-0001-06-01 20:00"), None);
        // In range locally, year 10000 once shifted to UTC
        assert_eq!(parse_start_time("9999-12-31T23:00:00-05:00"), None);

        let last = parse_start_time("9999-12-31 23:59").unwrap();
        assert_eq!(last, Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 0).unwrap());
    }
}
