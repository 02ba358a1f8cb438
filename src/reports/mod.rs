//! Reports module for finance-core
//!
//! Analytics built on the money and recurrence engines: cash flow, spending
//! by category, credit card risk, month-end projection and spending spikes.

pub mod anomalies;
pub mod cash_flow;
pub mod credit;
pub mod projection;
pub mod spending;

pub use anomalies::{detect_spikes, format_spikes, SpendingSpike, SpikeRule};
pub use cash_flow::CashFlowSummary;
pub use credit::{minimum_payment, CreditCardRisk, CreditPortfolio, RiskLevel};
pub use projection::{MonthProjection, ProjectionInput};
pub use spending::{CategoryBreakdown, CategorySpending};
