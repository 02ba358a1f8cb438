//! CLI command handlers
//!
//! Each handler renders its result to a `String`; `main` prints it.

pub mod money;
pub mod report;
pub mod schedule;

use chrono::{NaiveDate, Utc};
use clap::ValueEnum;

use crate::error::FinanceResult;
use crate::recurrence::{parse_date, utc_day};

pub use money::{run_convert, run_format, run_parse, run_percent};
pub use report::{run_credit, run_project, run_report, ReportKind, ReportOptions};
pub use schedule::{run_advance, run_next, run_upcoming};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned text for the terminal
    #[default]
    Table,
    /// JSON envelope
    Json,
    /// YAML envelope, human-readable
    Yaml,
    /// CSV rows
    Csv,
}

/// Parse an optional date argument, defaulting to the current UTC day
pub fn date_or_today(arg: Option<&str>) -> FinanceResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(utc_day(&Utc::now())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_or_today() {
        assert_eq!(
            date_or_today(Some("2026-02-11")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 11).unwrap()
        );
        assert!(date_or_today(Some("mañana")).unwrap_err().is_invalid_date());
        assert_eq!(date_or_today(None).unwrap(), Utc::now().date_naive());
    }
}
