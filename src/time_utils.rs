// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Millisecond precision keeps `created_at` ordering stable for contacts
/// added in quick succession.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time formatted with [`format_utc_rfc3339`].
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Parse a stored calendar date.
///
/// Accepts `YYYY-MM-DD` (what date inputs produce) and full RFC3339
/// timestamps, in which case the date in the timestamp's own offset is used.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Format a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_calendar_date("1990-06-15"),
            NaiveDate::from_ymd_opt(1990, 6, 15)
        );
        assert_eq!(
            parse_calendar_date(" 2024-02-29 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_parse_rfc3339_uses_own_offset() {
        assert_eq!(
            parse_calendar_date("2024-06-20T23:30:00-07:00"),
            NaiveDate::from_ymd_opt(2024, 6, 20)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("next tuesday"), None);
        assert_eq!(parse_calendar_date("2023-02-29"), None);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("18:30"), NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(
            parse_time_of_day("07:05:09"),
            NaiveTime::from_hms_opt(7, 5, 9)
        );
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(format_time_of_day(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "09:05");
    }

    #[test]
    fn test_format_utc_uses_z_suffix() {
        let date = DateTime::from_timestamp(1_718_000_000, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-06-10T06:13:20.000Z");
    }
}
