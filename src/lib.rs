//! finance-core - exact money arithmetic and recurrence engine
//!
//! This library is the computational core of a personal finance application.
//! Every amount is an integer count of cents; decimal strings and floats are
//! converted only at the boundary, with half-up rounding done in exact
//! decimal arithmetic.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `config`: Configuration and path management
//! - `models`: Money, percentages, frequencies, recurring events and records
//! - `recurrence`: UTC day normalization and recurring date arithmetic
//! - `display`: Localized currency formatting
//! - `reports`: Cash flow, categories, credit risk, projections and spikes
//! - `services`: CSV import
//! - `export`: Report export to CSV, JSON and YAML
//! - `cli`: Handlers behind the `finance` binary
//!
//! # Example
//!
//! ```rust
//! use finance_core::models::{money, Money};
//!
//! let total = money::sum([
//!     Money::parse("10.10")?,
//!     Money::parse("20.20")?,
//!     Money::parse("0.30")?,
//! ])?;
//! assert_eq!(total.cents(), 3060);
//! assert_eq!(total.to_major_units()?, 30.6);
//! # Ok::<(), finance_core::FinanceError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod recurrence;
pub mod reports;
pub mod services;

pub use error::{FinanceError, FinanceResult};
