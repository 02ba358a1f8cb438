//! CLI commands for the recurrence engine

use crate::error::FinanceResult;
use crate::models::RecurrenceFrequency;
use crate::recurrence::{advance_date, next_occurrence, parse_date, upcoming_occurrences};

use super::date_or_today;

/// `finance next <seed> <frequency> [--now]`
pub fn run_next(seed: &str, frequency: &str, now: Option<&str>) -> FinanceResult<String> {
    let seed = parse_date(seed)?;
    let frequency: RecurrenceFrequency = frequency.parse()?;
    let now = date_or_today(now)?;

    Ok(next_occurrence(seed, frequency, now)?.to_string())
}

/// `finance advance <date> <frequency>`
pub fn run_advance(date: &str, frequency: &str) -> FinanceResult<String> {
    let date = parse_date(date)?;
    let frequency: RecurrenceFrequency = frequency.parse()?;

    Ok(advance_date(date, frequency)?.to_string())
}

/// `finance upcoming <seed> <frequency> --until <date> [--from]`
pub fn run_upcoming(
    seed: &str,
    frequency: &str,
    from: Option<&str>,
    until: &str,
) -> FinanceResult<String> {
    let seed = parse_date(seed)?;
    let frequency: RecurrenceFrequency = frequency.parse()?;
    let from = date_or_today(from)?;
    let until = parse_date(until)?;

    let dates: Vec<String> = upcoming_occurrences(seed, frequency, from, until)?
        .into_iter()
        .map(|d| d.to_string())
        .collect();
    Ok(dates.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_next() {
        assert_eq!(
            run_next("2025-10-15", "monthly", Some("2026-02-11")).unwrap(),
            "2026-02-15"
        );
        assert_eq!(
            run_next("2026-01-01", "biweekly", Some("2026-02-11")).unwrap(),
            "2026-02-12"
        );
        assert!(run_next("2026-01-01", "hourly", Some("2026-02-11")).is_err());
    }

    #[test]
    fn test_run_advance() {
        assert_eq!(run_advance("2026-01-31", "monthly").unwrap(), "2026-02-28");
        assert_eq!(run_advance("2026-01-31T23:30:00Z", "yearly").unwrap(), "2027-01-31");
        assert!(run_advance("31/01/2026", "monthly").unwrap_err().is_invalid_date());
    }

    #[test]
    fn test_run_upcoming() {
        let output =
            run_upcoming("2026-01-05", "weekly", Some("2026-02-01"), "2026-02-15").unwrap();
        assert_eq!(output, "2026-02-02\n2026-02-09");
        assert_eq!(
            run_upcoming("2026-01-05", "weekly", Some("2026-02-20"), "2026-02-15").unwrap(),
            ""
        );
    }
}
