//! Transaction record model
//!
//! The plain-data view of a transaction that the analytics layer consumes.
//! Stored amounts are magnitudes; the direction lives in [`TransactionKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{FinanceError, FinanceResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "ingreso" => Ok(Self::Income),
            "expense" | "gasto" => Ok(Self::Expense),
            other => Err(FinanceError::Validation(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// A transaction as handed to the analytics layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date
    pub date: NaiveDate,

    /// Amount; treated as a magnitude regardless of its stored sign
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Money moved between the user's own accounts
    #[serde(default)]
    pub transfer: bool,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        amount: Money,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            kind,
            category: category.into(),
            description: String::new(),
            transfer: false,
        }
    }

    pub fn income(date: NaiveDate, amount: Money, category: impl Into<String>) -> Self {
        Self::new(date, amount, TransactionKind::Income, category)
    }

    pub fn expense(date: NaiveDate, amount: Money, category: impl Into<String>) -> Self {
        Self::new(date, amount, TransactionKind::Expense, category)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_transfer(mut self) -> Self {
        self.transfer = true;
        self
    }

    /// The stored amount as a non-negative magnitude
    ///
    /// Fails with `AmountOutOfRange` when the stored cents are not a safe
    /// integer, which deserialized records are not guaranteed to be.
    pub fn magnitude(&self) -> FinanceResult<Money> {
        self.amount.checked_abs()
    }

    /// The amount signed by direction (income positive, expense negative)
    pub fn signed_amount(&self) -> FinanceResult<Money> {
        let magnitude = self.magnitude()?;
        Ok(match self.kind {
            TransactionKind::Income => magnitude,
            TransactionKind::Expense => -magnitude,
        })
    }

    /// Check if this transaction falls within an inclusive date range
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} [{}]", self.date, self.kind, self.amount.abs(), self.category)
    }
}
