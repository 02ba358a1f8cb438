//! Recurrence frequency model
//!
//! The cadence at which a subscription or income stream repeats, plus the
//! conversions between cadences used for monthly and yearly totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{FinanceError, FinanceResult};

const WEEKS_PER_YEAR: i64 = 52;
const BIWEEKS_PER_YEAR: i64 = 26;
const MONTHS_PER_YEAR: i64 = 12;

/// How often a recurring event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    /// All frequencies, shortest first
    pub const ALL: [RecurrenceFrequency; 4] =
        [Self::Weekly, Self::Biweekly, Self::Monthly, Self::Yearly];

    pub fn description(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Occurrences of this frequency in one year
    pub const fn occurrences_per_year(&self) -> i64 {
        match self {
            Self::Weekly => WEEKS_PER_YEAR,
            Self::Biweekly => BIWEEKS_PER_YEAR,
            Self::Monthly => MONTHS_PER_YEAR,
            Self::Yearly => 1,
        }
    }

    /// Normalize an amount charged at this frequency to a monthly amount
    ///
    /// Weekly uses 52/12 and yearly uses 1/12, both rounded half-up to the
    /// cent. Bi-weekly is treated as exactly two charges per month.
    pub fn to_monthly_cents(&self, amount: Money) -> FinanceResult<Money> {
        let amount = amount.ensure_safe()?;
        match self {
            Self::Monthly => Ok(amount),
            Self::Biweekly => amount.checked_mul(2),
            Self::Weekly => amount.mul_div_half_up(WEEKS_PER_YEAR, MONTHS_PER_YEAR),
            Self::Yearly => amount.mul_div_half_up(1, MONTHS_PER_YEAR),
        }
    }

    /// Normalize an amount charged at this frequency to a yearly amount
    pub fn to_yearly_cents(&self, amount: Money) -> FinanceResult<Money> {
        amount.ensure_safe()?.checked_mul(self.occurrences_per_year())
    }
}

/// Normalize an amount to its monthly equivalent
pub fn to_monthly_cents(amount: Money, frequency: RecurrenceFrequency) -> FinanceResult<Money> {
    frequency.to_monthly_cents(amount)
}

/// Normalize an amount to its yearly equivalent
pub fn to_yearly_cents(amount: Money, frequency: RecurrenceFrequency) -> FinanceResult<Money> {
    frequency.to_yearly_cents(amount)
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl FromStr for RecurrenceFrequency {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            other => Err(FinanceError::InvalidFrequency(other.to_string())),
        }
    }
}
