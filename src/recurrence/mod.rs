//! Recurrence engine
//!
//! Calendar arithmetic for recurring events. Every date is a UTC calendar day
//! ([`chrono::NaiveDate`]); zoned instants are normalized with [`utc_day`]
//! before any arithmetic, so results never depend on the local time zone.

pub mod dates;
pub mod schedule;

pub use dates::{days_in_month, is_leap_year, month_end, parse_date, utc_day};
pub use schedule::{
    advance_date, advance_instant, next_occurrence, next_occurrence_at, upcoming_occurrences,
};
