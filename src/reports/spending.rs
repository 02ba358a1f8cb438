//! Spending Report
//!
//! Groups expense records by category and reports each category's share of
//! total spending.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::display::report::{format_bar, truncate};
use crate::display::{format_percentage, CurrencyFormat};
use crate::error::FinanceResult;
use crate::models::{money, percentage, Money, PercentOptions, TransactionRecord};

/// Bucket label for records without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    /// Sum of expense magnitudes in this category
    pub total: Money,
    pub transaction_count: usize,
    /// Share of total expenses, clamped to [0, 100]
    pub percentage: f64,
}

/// Expense totals by category, largest first
///
/// Percentages are rounded per bucket, so they may not add up to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategorySpending>,
    pub total_expenses: Money,
}

impl CategoryBreakdown {
    /// Build the breakdown from the expense records in `records`
    pub fn generate(records: &[TransactionRecord]) -> FinanceResult<Self> {
        Self::generate_with(records, PercentOptions::default())
    }

    /// Build the breakdown rounding percentages to `options.decimals`
    pub fn generate_with(
        records: &[TransactionRecord],
        options: PercentOptions,
    ) -> FinanceResult<Self> {
        let mut buckets: BTreeMap<&str, (Money, usize)> = BTreeMap::new();

        for record in records.iter().filter(|r| r.kind.is_expense()) {
            let name = match record.category.trim() {
                "" => UNCATEGORIZED,
                name => name,
            };
            let entry = buckets.entry(name).or_insert((Money::zero(), 0));
            entry.0 = entry.0.checked_add(record.magnitude()?)?;
            entry.1 += 1;
        }

        let total_expenses = money::sum(buckets.values().map(|(total, _)| *total))?;

        let mut categories = buckets
            .into_iter()
            .map(|(name, (total, count))| {
                Ok(CategorySpending {
                    category: name.to_string(),
                    total,
                    transaction_count: count,
                    percentage: percentage(total, total_expenses, options)?,
                })
            })
            .collect::<FinanceResult<Vec<_>>>()?;

        // Buckets come out of the map in name order, so a stable sort keeps
        // ties alphabetical
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        tracing::debug!(
            categories = categories.len(),
            total = total_expenses.cents(),
            "generated category breakdown"
        );

        Ok(Self {
            categories,
            total_expenses,
        })
    }

    /// The `limit` categories with the most spending
    pub fn top(&self, limit: usize) -> &[CategorySpending] {
        &self.categories[..limit.min(self.categories.len())]
    }

    pub fn get(&self, category: &str) -> Option<&CategorySpending> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, format: &CurrencyFormat) -> FinanceResult<String> {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n\n",
            format.format(self.total_expenses)?
        ));

        output.push_str(&format!(
            "{:<28} {:>14} {:>7} {:>8}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let max = self.categories.first().map(|c| c.percentage).unwrap_or(0.0);
        for category in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>14} {:>7} {:>8}  {}\n",
                truncate(&category.category, 28),
                format.format(category.total)?,
                category.transaction_count,
                format_percentage(category.percentage),
                format_bar(category.percentage, max, 16)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14} {:>7}\n",
            "TOTAL SPENDING",
            format.format(self.total_expenses)?,
            self.categories.iter().map(|c| c.transaction_count).sum::<usize>()
        ));

        Ok(output)
    }
}
