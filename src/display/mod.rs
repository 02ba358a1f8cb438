//! Display formatting for terminal output
//!
//! Localized currency strings and the column helpers the reports use.

pub mod money;
pub mod report;

pub use money::{format_money, CurrencyFormat, SymbolPosition, DEFAULT_LOCALE};
pub use report::format_percentage;
