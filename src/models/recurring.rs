//! Recurring event model
//!
//! Subscriptions and income streams: an amount charged (or received) at a
//! fixed frequency, with the date of the next occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::RecurrenceFrequency;
use super::money::{self, Money};
use crate::error::{FinanceError, FinanceResult};
use crate::recurrence;

/// Whether a recurring event takes money out or brings it in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringKind {
    #[default]
    Subscription,
    Income,
}

/// A subscription or income stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub name: String,
    pub amount: Money,
    pub frequency: RecurrenceFrequency,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub kind: RecurringKind,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl RecurringEvent {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        frequency: RecurrenceFrequency,
        next_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
            next_date,
            kind: RecurringKind::Subscription,
            active: true,
        }
    }

    pub fn subscription(
        name: impl Into<String>,
        amount: Money,
        frequency: RecurrenceFrequency,
        next_date: NaiveDate,
    ) -> Self {
        Self::new(name, amount, frequency, next_date)
    }

    pub fn income(
        name: impl Into<String>,
        amount: Money,
        frequency: RecurrenceFrequency,
        next_date: NaiveDate,
    ) -> Self {
        Self {
            kind: RecurringKind::Income,
            ..Self::new(name, amount, frequency, next_date)
        }
    }

    /// A copy of this event with `next_date` caught up to on/after `now`
    pub fn caught_up(&self, now: NaiveDate) -> FinanceResult<Self> {
        Ok(Self {
            next_date: recurrence::next_occurrence(self.next_date, self.frequency, now)?,
            ..self.clone()
        })
    }

    /// Monthly-equivalent amount
    pub fn monthly_amount(&self) -> FinanceResult<Money> {
        self.frequency.to_monthly_cents(self.amount)
    }

    /// Yearly-equivalent amount
    pub fn yearly_amount(&self) -> FinanceResult<Money> {
        self.frequency.to_yearly_cents(self.amount)
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecurringValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(RecurringValidationError::NegativeAmount);
        }
        if !self.amount.is_safe() {
            return Err(RecurringValidationError::UnsafeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for RecurringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} (next {})", self.name, self.amount, self.frequency, self.next_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    EmptyName,
    NegativeAmount,
    UnsafeAmount,
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Recurring event name cannot be empty"),
            Self::NegativeAmount => write!(f, "Recurring amount cannot be negative"),
            Self::UnsafeAmount => write!(f, "Recurring amount is out of range"),
        }
    }
}

impl std::error::Error for RecurringValidationError {}

impl From<RecurringValidationError> for FinanceError {
    fn from(err: RecurringValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Sum of the monthly equivalents of every active event
///
/// Used for aggregate monthly subscription cost and expected monthly income.
pub fn monthly_total<'a, I>(events: I) -> FinanceResult<Money>
where
    I: IntoIterator<Item = &'a RecurringEvent>,
{
    let monthly = events
        .into_iter()
        .filter(|e| e.active)
        .map(RecurringEvent::monthly_amount)
        .collect::<FinanceResult<Vec<_>>>()?;
    money::sum(monthly)
}

/// Sum of the yearly equivalents of every active event
pub fn yearly_total<'a, I>(events: I) -> FinanceResult<Money>
where
    I: IntoIterator<Item = &'a RecurringEvent>,
{
    let yearly = events
        .into_iter()
        .filter(|e| e.active)
        .map(RecurringEvent::yearly_amount)
        .collect::<FinanceResult<Vec<_>>>()?;
    money::sum(yearly)
}
