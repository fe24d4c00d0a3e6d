//! Shared date/time parsing and formatting.
//!
//! Record dates arrive as raw strings from the client and may be missing
//! or unparseable. Parse failure is "unknown," never an error: the
//! formatting functions degrade to a `"Date TBD"` / `"Time TBD"`
//! placeholder, and the record-level variant preserves the raw string so
//! a reader can distinguish "no date" from "date we could not read."

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Placeholder for a missing or unreadable date.
pub const DATE_TBD: &str = "Date TBD";

/// Placeholder for a missing or unreadable time.
pub const TIME_TBD: &str = "Time TBD";

/// Parse a raw date string into a UTC instant.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`,
/// and bare `YYYY-MM-DD` (which resolves to midnight UTC).
pub fn parse_when(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `"YYYY-MM"` bucket key for a parseable date, `None` otherwise.
pub fn month_key(raw: &str) -> Option<String> {
    parse_when(raw).map(|dt| dt.format("%Y-%m").to_string())
}

/// Render a date as `"<weekday>, <month> <day>, <year>"`.
///
/// Missing and unparseable inputs both collapse to [`DATE_TBD`].
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        Some(s) => parse_when(s).map_or_else(|| DATE_TBD.to_string(), render_date),
        None => DATE_TBD.to_string(),
    }
}

/// Record-level date rendering: like [`format_date`], but a date that is
/// present yet unparseable keeps its raw string instead of the placeholder.
pub fn format_record_date(raw: Option<&str>) -> String {
    match raw {
        Some(s) => parse_when(s).map_or_else(|| s.to_string(), render_date),
        None => DATE_TBD.to_string(),
    }
}

/// Render a time as 24-hour `"HH:MM"`.
pub fn format_time(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return TIME_TBD.to_string();
    };
    let raw = raw.trim();

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(raw, fmt) {
            return t.format("%H:%M").to_string();
        }
    }

    // Times embedded in a full datetime string still count.
    parse_when(raw).map_or_else(
        || TIME_TBD.to_string(),
        |dt| dt.format("%H:%M").to_string(),
    )
}

/// Render an already-parsed instant as a date line.
pub fn render_date(when: DateTime<Utc>) -> String {
    when.format("%A, %B %-d, %Y").to_string()
}

/// Render an already-parsed instant as an `"HH:MM"` line.
pub fn render_time(when: DateTime<Utc>) -> String {
    when.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let dt = parse_when("2025-09-09").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-09-09 00:00:00");
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_when("2025-09-09T14:30:00Z").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "14:30");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_when("not-a-date").is_none());
        assert!(parse_when("").is_none());
        assert!(parse_when("tomorrow").is_none());
    }

    #[test]
    fn formats_full_weekday_month_day_year() {
        assert_eq!(
            format_date(Some("2025-09-09")),
            "Tuesday, September 9, 2025"
        );
    }

    #[test]
    fn missing_date_is_tbd() {
        assert_eq!(format_date(None), "Date TBD");
        assert_eq!(format_date(Some("???")), "Date TBD");
    }

    #[test]
    fn record_date_preserves_raw_on_parse_failure() {
        assert_eq!(format_record_date(Some("not-a-date")), "not-a-date");
        assert_eq!(format_record_date(None), "Date TBD");
        assert_eq!(
            format_record_date(Some("2025-09-09")),
            "Tuesday, September 9, 2025"
        );
    }

    #[test]
    fn formats_time_zero_padded() {
        assert_eq!(format_time(Some("9:05")), "09:05");
        assert_eq!(format_time(Some("14:30:15")), "14:30");
        assert_eq!(format_time(None), "Time TBD");
        assert_eq!(format_time(Some("noonish")), "Time TBD");
    }

    #[test]
    fn month_key_buckets_by_year_month() {
        assert_eq!(month_key("2025-09-09").as_deref(), Some("2025-09"));
        assert_eq!(month_key("not-a-date"), None);
    }
}
