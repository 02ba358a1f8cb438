//! Error types for finance-core
//!
//! Every fallible operation in the crate returns a [`FinanceError`]. The money
//! and recurrence engines never substitute defaults for malformed input; they
//! raise and let the caller decide how to present the failure.

use thiserror::Error;

/// The main error type for finance-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinanceError {
    /// A decimal amount was missing, non-numeric, NaN or infinite
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A cents value (input or computed) left the safe integer range
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// A date could not be parsed or advanced
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A recurrence frequency could not be parsed
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Create an out-of-range error for a cents value
    pub fn out_of_range(cents: impl std::fmt::Display) -> Self {
        Self::AmountOutOfRange(format!("{} cents is not a safe integer", cents))
    }

    /// Check if this is an invalid amount error
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }

    /// Check if this is an out-of-range error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::AmountOutOfRange(_))
    }

    /// Check if this is a date error
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, Self::InvalidDate(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finance-core operations
pub type FinanceResult<T> = Result<T, FinanceError>;
