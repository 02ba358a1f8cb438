//! Service layer for finance-core
//!
//! Boundary services that turn external data into the models the engines
//! work on.

pub mod import;

pub use import::{ColumnMapping, ImportOutcome, RowError, TransactionImporter};
