//! CSV Export functionality
//!
//! Spreadsheet-friendly exports of reports and transaction records. Amounts
//! are written both as integer cents and as exact major units.

use std::io::Write;

use csv::Writer;

use crate::error::{FinanceError, FinanceResult};
use crate::models::TransactionRecord;
use crate::reports::{CashFlowSummary, CategoryBreakdown, SpendingSpike};

fn export_err(e: impl std::fmt::Display) -> FinanceError {
    FinanceError::Export(e.to_string())
}

/// Export a cash flow summary as metric/value rows
pub fn export_cash_flow_csv<W: Write>(summary: &CashFlowSummary, writer: W) -> FinanceResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Metric", "Cents", "Amount"]).map_err(export_err)?;

    for (metric, amount) in [
        ("Income", summary.total_income),
        ("Expenses", summary.total_expenses),
        ("Net", summary.net),
    ] {
        csv.write_record([
            metric.to_string(),
            amount.cents().to_string(),
            amount.to_decimal().to_string(),
        ])
        .map_err(export_err)?;
    }

    csv.write_record([
        "Savings Rate".to_string(),
        String::new(),
        format!("{:.2}", summary.savings_rate),
    ])
    .map_err(export_err)?;
    csv.write_record([
        "Transactions".to_string(),
        String::new(),
        summary.transaction_count.to_string(),
    ])
    .map_err(export_err)?;

    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export a category breakdown, one row per category plus a total
pub fn export_categories_csv<W: Write>(report: &CategoryBreakdown, writer: W) -> FinanceResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Category", "Cents", "Amount", "Transaction Count", "Percentage"])
        .map_err(export_err)?;

    for category in &report.categories {
        csv.write_record([
            category.category.clone(),
            category.total.cents().to_string(),
            category.total.to_decimal().to_string(),
            category.transaction_count.to_string(),
            format!("{:.2}", category.percentage),
        ])
        .map_err(export_err)?;
    }

    let count: usize = report.categories.iter().map(|c| c.transaction_count).sum();
    csv.write_record([
        "TOTAL".to_string(),
        report.total_expenses.cents().to_string(),
        report.total_expenses.to_decimal().to_string(),
        count.to_string(),
        String::new(),
    ])
    .map_err(export_err)?;

    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export detected spending spikes
pub fn export_spikes_csv<W: Write>(spikes: &[SpendingSpike], writer: W) -> FinanceResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Date", "Category", "Description", "Cents", "Average Cents", "Multiple"])
        .map_err(export_err)?;

    for spike in spikes {
        csv.write_record([
            spike.date.to_string(),
            spike.category.clone(),
            spike.description.clone(),
            spike.amount.cents().to_string(),
            spike.average.cents().to_string(),
            format!("{:.2}", spike.multiple),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export records in the layout the importer reads by default
pub fn export_records_csv<W: Write>(records: &[TransactionRecord], writer: W) -> FinanceResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["date", "type", "category", "amount_cents", "description", "transfer"])
        .map_err(export_err)?;

    for record in records {
        csv.write_record([
            record.date.to_string(),
            record.kind.to_string(),
            record.category.clone(),
            record.magnitude()?.cents().to_string(),
            record.description.clone(),
            record.transfer.to_string(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}
