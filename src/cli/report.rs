//! CLI commands for reports
//!
//! Reports read transaction records from a CSV file and render as a
//! terminal table or one of the export formats.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use super::{date_or_today, OutputFormat};
use crate::config::Settings;
use crate::display::CurrencyFormat;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{
    export_cash_flow_csv, export_categories_csv, export_json, export_spikes_csv, export_yaml,
    ReportExport,
};
use crate::models::{CreditCard, Money, PercentOptions, RecurringEvent, TransactionRecord};
use crate::recurrence::parse_date;
use crate::reports::{
    detect_spikes, format_spikes, CashFlowSummary, CategoryBreakdown, CreditCardRisk,
    MonthProjection, ProjectionInput,
};
use crate::services::TransactionImporter;

/// Which report to generate from a transactions file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Income, expenses and savings rate
    #[value(alias = "cash-flow")]
    Cashflow,
    /// Spending by category
    Categories,
    /// Unusually large expenses
    #[value(alias = "spikes")]
    Anomalies,
}

impl ReportKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Cashflow => "cashflow",
            Self::Categories => "categories",
            Self::Anomalies => "anomalies",
        }
    }
}

/// Options shared by the transaction reports
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Only include records on or after this date
    pub start: Option<String>,
    /// Only include records on or before this date
    pub end: Option<String>,
    /// Show top N categories only
    pub top: Option<usize>,
}

/// `finance report <kind> --file <csv>`
pub fn run_report(
    settings: &Settings,
    kind: ReportKind,
    file: &Path,
    options: &ReportOptions,
) -> FinanceResult<String> {
    let outcome = TransactionImporter::new().import_file(file)?;
    for error in &outcome.errors {
        tracing::warn!(row = error.row, message = %error.message, "row skipped");
    }

    let records = filter_range(outcome.records, options)?;
    let currency = settings.currency_format()?;

    match kind {
        ReportKind::Cashflow => {
            let summary = CashFlowSummary::generate(&records)?;
            render(
                kind,
                &summary,
                options.format,
                &currency,
                |f| summary.format_terminal(f),
                |w| export_cash_flow_csv(&summary, w),
            )
        }
        ReportKind::Categories => {
            let percent = PercentOptions::default().with_decimals(settings.percent_decimals);
            let mut report = CategoryBreakdown::generate_with(&records, percent)?;
            if let Some(top) = options.top {
                report.categories.truncate(top);
            }
            render(
                kind,
                &report,
                options.format,
                &currency,
                |f| report.format_terminal(f),
                |w| export_categories_csv(&report, w),
            )
        }
        ReportKind::Anomalies => {
            let spikes = detect_spikes(&records, settings.spike_rule())?;
            render(
                kind,
                &spikes,
                options.format,
                &currency,
                |f| format_spikes(&spikes, f),
                |w| export_spikes_csv(&spikes, w),
            )
        }
    }
}

fn filter_range(
    records: Vec<TransactionRecord>,
    options: &ReportOptions,
) -> FinanceResult<Vec<TransactionRecord>> {
    let start = options.start.as_deref().map(parse_date).transpose()?;
    let end = options.end.as_deref().map(parse_date).transpose()?;

    Ok(records
        .into_iter()
        .filter(|r| start.map_or(true, |s| r.date >= s) && end.map_or(true, |e| r.date <= e))
        .collect())
}

fn render<T, F, C>(
    kind: ReportKind,
    report: &T,
    format: OutputFormat,
    currency: &CurrencyFormat,
    table: F,
    csv: C,
) -> FinanceResult<String>
where
    T: Serialize,
    F: FnOnce(&CurrencyFormat) -> FinanceResult<String>,
    C: FnOnce(&mut Vec<u8>) -> FinanceResult<()>,
{
    let mut buffer = Vec::new();
    let export = ReportExport::new(kind.name(), report);
    match format {
        OutputFormat::Table => return table(currency),
        OutputFormat::Csv => csv(&mut buffer)?,
        OutputFormat::Json => export_json(&export, &mut buffer, true)?,
        OutputFormat::Yaml => export_yaml(&export, &mut buffer)?,
    }
    String::from_utf8(buffer).map_err(|e| FinanceError::Export(e.to_string()))
}

/// `finance credit <balance> <limit>` with amounts in cents
pub fn run_credit(
    settings: &Settings,
    balance: i64,
    limit: i64,
    name: Option<&str>,
    format: OutputFormat,
) -> FinanceResult<String> {
    let card = CreditCard::new(
        name.unwrap_or_default(),
        Money::try_from_cents(balance)?,
        Money::try_from_cents(limit)?,
    );
    let risk = CreditCardRisk::analyze(&card)?;
    render_single("credit", &risk, format, |f| risk.format_terminal(f), settings)
}

/// `finance project <balance> <month-expenses>` with amounts in cents
///
/// `recurring` is an optional JSON file holding a list of recurring events
/// whose remaining occurrences this month adjust the projection.
pub fn run_project(
    settings: &Settings,
    balance: i64,
    month_expenses: i64,
    today: Option<&str>,
    recurring: Option<&Path>,
    format: OutputFormat,
) -> FinanceResult<String> {
    let input = ProjectionInput {
        current_balance: Money::try_from_cents(balance)?,
        month_expenses: Money::try_from_cents(month_expenses)?,
        today: date_or_today(today)?,
    };

    let mut projection = MonthProjection::project(input)?;
    if let Some(path) = recurring {
        projection = projection.with_upcoming_bills(&load_recurring(path)?)?;
    }

    render_single("projection", &projection, format, |f| projection.format_terminal(f), settings)
}

fn render_single<T, F>(
    name: &str,
    report: &T,
    format: OutputFormat,
    table: F,
    settings: &Settings,
) -> FinanceResult<String>
where
    T: Serialize,
    F: FnOnce(&CurrencyFormat) -> FinanceResult<String>,
{
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Table => return table(&settings.currency_format()?),
        OutputFormat::Json => export_json(&ReportExport::new(name, report), &mut buffer, true)?,
        OutputFormat::Yaml => export_yaml(&ReportExport::new(name, report), &mut buffer)?,
        OutputFormat::Csv => {
            return Err(FinanceError::Export(format!(
                "{} reports have no CSV layout; use table, json or yaml",
                name
            )))
        }
    }
    String::from_utf8(buffer).map_err(|e| FinanceError::Export(e.to_string()))
}

/// Read a JSON list of recurring events
pub fn load_recurring(path: &Path) -> FinanceResult<Vec<RecurringEvent>> {
    let file = File::open(path)
        .map_err(|e| FinanceError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let events: Vec<RecurringEvent> = serde_json::from_reader(BufReader::new(file))?;
    for event in &events {
        event.validate()?;
    }
    Ok(events)
}

/// Write rendered output to a file instead of stdout
pub fn write_output(path: &Path, contents: &str) -> FinanceResult<()> {
    let mut file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CSV: &str = "date,type,category,amount_cents,description,transfer
2026-02-01,income,Salario,2000000,Quincena,false
2026-02-02,expense,Café,1000,,false
2026-02-03,expense,Café,1000,,false
2026-02-04,expense,Café,1000,,false
2026-02-05,expense,Café,1000,,false
2026-02-06,expense,Electrónica,16000,Audífonos,false
2026-03-01,expense,Renta,800000,,false
";

    fn write_csv(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("movimientos.csv");
        std::fs::write(&path, CSV).unwrap();
        path
    }

    fn february() -> ReportOptions {
        ReportOptions {
            start: Some("2026-02-01".into()),
            end: Some("2026-02-28".into()),
            ..ReportOptions::default()
        }
    }

    #[test]
    fn test_cashflow_table() {
        let dir = TempDir::new().unwrap();
        let output = run_report(
            &Settings::default(),
            ReportKind::Cashflow,
            &write_csv(&dir),
            &february(),
        )
        .unwrap();
        assert!(output.contains("$20,000"));
        assert!(output.contains("$200"));
        assert!(output.contains("99%"));
    }

    #[test]
    fn test_categories_json() {
        let dir = TempDir::new().unwrap();
        let options = ReportOptions {
            format: OutputFormat::Json,
            top: Some(1),
            ..february()
        };
        let path = write_csv(&dir);
        let output =
            run_report(&Settings::default(), ReportKind::Categories, &path, &options).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report_type"], "categories");
        let categories = value["report"]["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0]["category"], "Electrónica");
        assert_eq!(categories[0]["percentage"], 80.0);
    }

    #[test]
    fn test_anomalies_csv() {
        let dir = TempDir::new().unwrap();
        let options = ReportOptions {
            format: OutputFormat::Csv,
            ..february()
        };
        let path = write_csv(&dir);
        let output =
            run_report(&Settings::default(), ReportKind::Anomalies, &path, &options).unwrap();
        assert!(output.contains("2026-02-06,Electrónica,Audífonos,16000,4000,4.00"));
    }

    #[test]
    fn test_categories_table_uses_configured_decimals() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tercios.csv");
        std::fs::write(
            &path,
            "date,type,category,amount_cents\n\
             2026-02-01,expense,Agua,100\n\
             2026-02-02,expense,Luz,100\n\
             2026-02-03,expense,Gas,100\n",
        )
        .unwrap();

        let settings = Settings {
            percent_decimals: 4,
            ..Settings::default()
        };
        let options = ReportOptions::default();
        let output = run_report(&settings, ReportKind::Categories, &path, &options).unwrap();
        assert!(output.contains("33.3333%"), "{}", output);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = run_report(
            &Settings::default(),
            ReportKind::Cashflow,
            &dir.path().join("nope.csv"),
            &ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
    }

    #[test]
    fn test_run_credit() {
        let settings = Settings::default();
        let output =
            run_credit(&settings, 80_000, 100_000, Some("Visa"), OutputFormat::Table).unwrap();
        assert!(output.contains("critical"));
        assert!(output.contains("$24"));

        assert!(run_credit(&Settings::default(), 1, 1, None, OutputFormat::Csv).is_err());
    }

    #[test]
    fn test_run_project_with_recurring() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recurring.json");
        let json = r#"[{"name": "Renta", "amount": 800000, "frequency": "monthly",
            "next_date": "2026-01-28"}]"#;
        std::fs::write(&path, json).unwrap();

        let output = run_project(
            &Settings::default(),
            820_000,
            100_000,
            Some("2026-02-20"),
            Some(path.as_path()),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report"]["upcoming_bills"], 800_000);
        assert_eq!(value["report"]["projected_balance"], -20_000);
        assert_eq!(value["report"]["overdraft_risk"], true);
    }

    #[test]
    fn test_load_recurring_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recurring.json");
        std::fs::write(
            &path,
            r#"[{"name": "", "amount": 100, "frequency": "monthly", "next_date": "2026-01-28"}]"#,
        )
        .unwrap();
        assert!(matches!(load_recurring(&path), Err(FinanceError::Validation(_))));
    }
}
