//! Spending anomaly detection
//!
//! Flags expenses that are unusually large compared to the average expense.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::display::CurrencyFormat;
use crate::display::report::truncate;
use crate::error::FinanceResult;
use crate::models::money::{self, decimal_to_f64};
use crate::models::{Money, TransactionRecord};

/// Threshold for calling an expense a spike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpikeRule {
    /// Flag expenses at least this many times the average
    pub multiplier: i64,
    /// Skip detection with fewer expense records than this
    pub min_samples: usize,
}

impl Default for SpikeRule {
    fn default() -> Self {
        Self {
            multiplier: 3,
            min_samples: 3,
        }
    }
}

/// An expense flagged as unusually large
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSpike {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Money,
    /// Average non-transfer expense the amount was compared against
    pub average: Money,
    /// `amount / average`, rounded to two decimals
    pub multiple: f64,
}

/// Find expenses at least `rule.multiplier` times the average expense
///
/// Transfers are excluded from both the average and the results. The
/// average is rounded half-up to the cent. Spikes come back largest first.
pub fn detect_spikes(
    records: &[TransactionRecord],
    rule: SpikeRule,
) -> FinanceResult<Vec<SpendingSpike>> {
    let expenses: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| r.kind.is_expense() && !r.transfer)
        .collect();

    if expenses.is_empty() || expenses.len() < rule.min_samples {
        tracing::debug!(
            samples = expenses.len(),
            min_samples = rule.min_samples,
            "too few expenses for spike detection"
        );
        return Ok(Vec::new());
    }

    let amounts = expenses
        .iter()
        .map(|r| r.magnitude())
        .collect::<FinanceResult<Vec<_>>>()?;
    let total = money::sum(amounts.iter().copied())?;
    let average = total.mul_div_half_up(1, expenses.len() as i64)?;
    if !average.is_positive() {
        return Ok(Vec::new());
    }
    let threshold = average.checked_mul(rule.multiplier)?;

    let mut spikes = expenses
        .into_iter()
        .zip(amounts)
        .filter(|(_, amount)| *amount >= threshold)
        .map(|(r, amount)| {
            let multiple = (Decimal::from(amount.cents()) / Decimal::from(average.cents()))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            Ok(SpendingSpike {
                date: r.date,
                category: r.category.clone(),
                description: r.description.clone(),
                amount,
                average,
                multiple: decimal_to_f64(multiple)?,
            })
        })
        .collect::<FinanceResult<Vec<_>>>()?;

    spikes.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.date.cmp(&b.date)));

    tracing::debug!(
        average = average.cents(),
        threshold = threshold.cents(),
        spikes = spikes.len(),
        "detected spending spikes"
    );

    Ok(spikes)
}

/// Format detected spikes for terminal display
pub fn format_spikes(spikes: &[SpendingSpike], format: &CurrencyFormat) -> FinanceResult<String> {
    let mut output = String::new();

    output.push_str("Spending Spikes\n");
    output.push_str(&"=".repeat(80));
    output.push('\n');

    if spikes.is_empty() {
        output.push_str("No unusual expenses found.\n");
        return Ok(output);
    }

    output.push_str(&format!(
        "{:<12} {:<20} {:<22} {:>14} {:>8}\n",
        "Date", "Category", "Description", "Amount", "x Avg"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for spike in spikes {
        output.push_str(&format!(
            "{:<12} {:<20} {:<22} {:>14} {:>8.2}\n",
            spike.date,
            truncate(&spike.category, 20),
            truncate(&spike.description, 22),
            format.format(spike.amount)?,
            spike.multiple
        ));
    }

    Ok(output)
}
