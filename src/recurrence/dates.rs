//! UTC calendar-day helpers
//!
//! Parsing of the ISO-8601 strings handed over by storage and API layers, and
//! the month-length rules the projection code needs.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{FinanceError, FinanceResult};

/// The UTC calendar day an instant falls on (start of day, time discarded)
pub fn utc_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Utc).date_naive()
}

/// Parse an ISO-8601 date or timestamp into a UTC calendar day
///
/// Accepts:
/// - `2026-02-11`
/// - RFC 3339 timestamps such as `2026-02-11T23:30:00-06:00` (converted to UTC first)
/// - naive timestamps such as `2026-02-11T08:00:00`, taken as UTC
pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(utc_day(&instant));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.date());
        }
    }

    Err(FinanceError::InvalidDate(format!(
        "'{}' is not an ISO-8601 date",
        s
    )))
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Last day of the month containing `date`: the first of the next month
/// minus one day
pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        // December of chrono's last representable year has no next month
        .unwrap_or_else(|| date.with_day(31).unwrap_or(date))
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    month_end(date).day()
}
