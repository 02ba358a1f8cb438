//! Cash Flow Report
//!
//! Income against expenses over a set of transaction records, with the
//! resulting savings rate.

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::{format_percentage, CurrencyFormat};
use crate::error::FinanceResult;
use crate::models::{percentage, Money, PercentOptions, TransactionKind, TransactionRecord};

/// Income, expenses and savings rate for a set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSummary {
    /// Sum of income magnitudes
    pub total_income: Money,
    /// Sum of expense magnitudes
    pub total_expenses: Money,
    /// Income minus expenses
    pub net: Money,
    /// `net / total_income` as a percentage; negative when spending exceeds income
    pub savings_rate: f64,
    pub transaction_count: usize,
}

impl CashFlowSummary {
    /// Summarize every record
    ///
    /// Stored amounts are treated as magnitudes; the record kind decides the
    /// direction.
    pub fn generate(records: &[TransactionRecord]) -> FinanceResult<Self> {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        for record in records {
            let amount = record.magnitude()?;
            match record.kind {
                TransactionKind::Income => total_income = total_income.checked_add(amount)?,
                TransactionKind::Expense => total_expenses = total_expenses.checked_add(amount)?,
            }
        }
        let net = total_income.checked_sub(total_expenses)?;
        let savings_rate = percentage(net, total_income, PercentOptions::unclamped())?;

        tracing::debug!(
            records = records.len(),
            income = total_income.cents(),
            expenses = total_expenses.cents(),
            "generated cash flow summary"
        );

        Ok(Self {
            total_income,
            total_expenses,
            net,
            savings_rate,
            transaction_count: records.len(),
        })
    }

    /// Summarize only the records dated within `[start, end]`
    pub fn for_range(
        records: &[TransactionRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> FinanceResult<Self> {
        let in_range: Vec<TransactionRecord> = records
            .iter()
            .filter(|r| r.is_within(start, end))
            .cloned()
            .collect();
        Self::generate(&in_range)
    }

    pub fn is_deficit(&self) -> bool {
        self.net.is_negative()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, format: &CurrencyFormat) -> FinanceResult<String> {
        let mut output = String::new();

        output.push_str("Cash Flow Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Income", format.format(self.total_income)?));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Expenses",
            format.format(self.total_expenses)?
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Net", format.format(self.net)?));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Savings Rate",
            format_percentage(self.savings_rate)
        ));
        output.push_str(&format!("{:<20} {:>19}\n", "Transactions", self.transaction_count));

        Ok(output)
    }
}
