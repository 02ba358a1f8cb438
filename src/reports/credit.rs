//! Credit Card Risk Report
//!
//! Utilization, risk tier and minimum payment for credit cards, individually
//! and across a portfolio.

use serde::Serialize;
use std::fmt;

use crate::display::{format_percentage, CurrencyFormat};
use crate::error::FinanceResult;
use crate::models::{money, percentage, CreditCard, Money, PercentOptions};

/// Fixed floor of the minimum payment, in cents
pub const MINIMUM_PAYMENT_FLOOR: Money = Money::from_cents(2000);

/// Percent of the balance due as the minimum payment
pub const MINIMUM_PAYMENT_PERCENT: i64 = 3;

/// Risk tier derived from utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Tier for a utilization percentage: ≤30 low, ≤50 medium, ≤75 high
    pub fn from_utilization(utilization: f64) -> Self {
        if utilization <= 30.0 {
            Self::Low
        } else if utilization <= 50.0 {
            Self::Medium
        } else if utilization <= 75.0 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Greater of 3% of the balance or the fixed floor, never above the balance
///
/// A zero or credit balance owes nothing.
pub fn minimum_payment(balance: Money) -> FinanceResult<Money> {
    let balance = balance.ensure_safe()?;
    if !balance.is_positive() {
        return Ok(Money::zero());
    }
    let percent = balance.mul_div_half_up(MINIMUM_PAYMENT_PERCENT, 100)?;
    Ok(percent.max(MINIMUM_PAYMENT_FLOOR.min(balance)))
}

/// Risk analysis for one card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditCardRisk {
    pub name: String,
    pub balance: Money,
    pub limit: Money,
    /// Balance over limit as a percentage; exceeds 100 when over the limit
    pub utilization: f64,
    pub risk: RiskLevel,
    pub minimum_payment: Money,
    /// Limit minus balance; negative when over the limit
    pub available_credit: Money,
}

impl CreditCardRisk {
    pub fn analyze(card: &CreditCard) -> FinanceResult<Self> {
        let utilization = percentage(card.balance, card.limit, PercentOptions::unclamped())?;

        Ok(Self {
            name: card.name.clone(),
            balance: card.balance,
            limit: card.limit,
            utilization,
            risk: RiskLevel::from_utilization(utilization),
            minimum_payment: minimum_payment(card.balance)?,
            available_credit: card.limit.checked_sub(card.balance)?,
        })
    }

    pub fn format_terminal(&self, format: &CurrencyFormat) -> FinanceResult<String> {
        let mut output = String::new();
        let name = if self.name.is_empty() { "Credit Card" } else { &self.name };

        output.push_str(&format!("{}\n", name));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Balance", format.format(self.balance)?));
        output.push_str(&format!("{:<20} {:>19}\n", "Limit", format.format(self.limit)?));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Available",
            format.format(self.available_credit)?
        ));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Utilization",
            format_percentage(self.utilization)
        ));
        output.push_str(&format!("{:<20} {:>19}\n", "Risk", self.risk));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Minimum Payment",
            format.format(self.minimum_payment)?
        ));

        Ok(output)
    }
}

/// Risk across every card, with utilization over the combined limit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditPortfolio {
    pub cards: Vec<CreditCardRisk>,
    pub total_balance: Money,
    pub total_limit: Money,
    pub utilization: f64,
    pub risk: RiskLevel,
    pub total_minimum_payment: Money,
}

impl CreditPortfolio {
    pub fn analyze(cards: &[CreditCard]) -> FinanceResult<Self> {
        let analyzed = cards
            .iter()
            .map(CreditCardRisk::analyze)
            .collect::<FinanceResult<Vec<_>>>()?;

        let total_balance = money::sum(cards.iter().map(|c| c.balance))?;
        let total_limit = money::sum(cards.iter().map(|c| c.limit))?;
        let total_minimum_payment = money::sum(analyzed.iter().map(|c| c.minimum_payment))?;
        let utilization = percentage(total_balance, total_limit, PercentOptions::unclamped())?;

        tracing::debug!(
            cards = cards.len(),
            utilization,
            "analyzed credit portfolio"
        );

        Ok(Self {
            cards: analyzed,
            total_balance,
            total_limit,
            utilization,
            risk: RiskLevel::from_utilization(utilization),
            total_minimum_payment,
        })
    }

    /// The card with the highest utilization
    pub fn riskiest(&self) -> Option<&CreditCardRisk> {
        self.cards
            .iter()
            .max_by(|a, b| a.utilization.total_cmp(&b.utilization))
    }
}
