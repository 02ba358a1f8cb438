//! Core data models for finance-core
//!
//! Money and percentages, recurrence frequencies and recurring events, and the
//! plain-data records the analytics layer consumes.

pub mod amount;
pub mod credit_card;
pub mod frequency;
pub mod money;
pub mod percent;
pub mod recurring;
pub mod transaction;

pub use amount::{resolve_amount_cents, AmountFields, AmountInput, LegacyAmount};
pub use credit_card::CreditCard;
pub use frequency::{to_monthly_cents, to_yearly_cents, RecurrenceFrequency};
pub use money::{Money, MAX_SAFE_CENTS};
pub use percent::{percentage, PercentOptions};
pub use recurring::{monthly_total, yearly_total, RecurringEvent, RecurringKind};
pub use transaction::{TransactionKind, TransactionRecord};
