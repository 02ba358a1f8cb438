//! Date advancement and next-occurrence computation
//!
//! Monthly and yearly steps clamp the day of month to the last valid day of
//! the target month (Jan 31 + 1 month is Feb 28, or Feb 29 in a leap year),
//! rather than overflowing into the following month.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone};

use super::dates::utc_day;
use crate::error::{FinanceError, FinanceResult};
use crate::models::RecurrenceFrequency;

/// Advance a date by one step of `frequency`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use finance_core::models::RecurrenceFrequency;
/// use finance_core::recurrence::advance_date;
///
/// let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// let next = advance_date(jan_31, RecurrenceFrequency::Monthly).unwrap();
/// assert_eq!(next, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// ```
pub fn advance_date(date: NaiveDate, frequency: RecurrenceFrequency) -> FinanceResult<NaiveDate> {
    let advanced = match frequency {
        RecurrenceFrequency::Weekly => date.checked_add_days(Days::new(7)),
        RecurrenceFrequency::Biweekly => date.checked_add_days(Days::new(14)),
        RecurrenceFrequency::Monthly => date.checked_add_months(Months::new(1)),
        RecurrenceFrequency::Yearly => date.checked_add_months(Months::new(12)),
    };

    advanced.ok_or_else(|| {
        FinanceError::InvalidDate(format!("cannot advance {} by one {} step", date, frequency))
    })
}

/// Advance a zoned instant, normalizing it to its UTC day first
pub fn advance_instant<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    frequency: RecurrenceFrequency,
) -> FinanceResult<NaiveDate> {
    advance_date(utc_day(instant), frequency)
}

/// The first occurrence on or after `now`, starting from `seed`
///
/// A seed that is already on or after `now` is returned unchanged; this
/// catches a stale date up, it never forces an extra step.
///
/// Every step moves forward by at least seven days, so the loop runs at most
/// `(now - seed) / 7 + 1` times.
pub fn next_occurrence(
    seed: NaiveDate,
    frequency: RecurrenceFrequency,
    now: NaiveDate,
) -> FinanceResult<NaiveDate> {
    let mut current = seed;
    let mut steps = 0u32;

    while current < now {
        current = advance_date(current, frequency)?;
        steps += 1;
    }

    if steps > 0 {
        tracing::debug!(
            %seed,
            %now,
            %frequency,
            steps,
            next = %current,
            "caught up recurring date"
        );
    }

    Ok(current)
}

/// [`next_occurrence`] with `now` given as a zoned instant
pub fn next_occurrence_at<Tz: TimeZone>(
    seed: NaiveDate,
    frequency: RecurrenceFrequency,
    now: &DateTime<Tz>,
) -> FinanceResult<NaiveDate> {
    next_occurrence(seed, frequency, utc_day(now))
}

/// Every occurrence falling within `[from, until]`, in order
pub fn upcoming_occurrences(
    seed: NaiveDate,
    frequency: RecurrenceFrequency,
    from: NaiveDate,
    until: NaiveDate,
) -> FinanceResult<Vec<NaiveDate>> {
    let mut occurrences = Vec::new();
    if until < from {
        return Ok(occurrences);
    }

    let mut current = next_occurrence(seed, frequency, from)?;
    while current <= until {
        occurrences.push(current);
        current = advance_date(current, frequency)?;
    }

    Ok(occurrences)
}
