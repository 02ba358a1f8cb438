//! CSV Import service
//!
//! Reads transaction records from CSV exports. Amounts go through the
//! boundary adapter, so a file may carry integer `amount_cents` or legacy
//! decimal `amount` columns. Bad rows are collected rather than aborting the
//! whole import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{resolve_amount_cents, AmountFields, Money, TransactionKind, TransactionRecord};
use crate::recurrence::parse_date;

/// Column mapping configuration for CSV import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    /// Integer cents column; preferred over `amount_column` when both are set
    pub amount_cents_column: Option<usize>,
    /// Decimal major-units column
    pub amount_column: Option<usize>,
    /// `income`/`expense` column; without it the amount's sign decides
    pub kind_column: Option<usize>,
    pub category_column: Option<usize>,
    pub description_column: Option<usize>,
    pub transfer_column: Option<usize>,
    /// Date format tried before the ISO formats
    pub date_format: String,
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_cents_column: None,
            amount_column: Some(1),
            kind_column: None,
            category_column: None,
            description_column: None,
            transfer_column: None,
            date_format: "%d/%m/%Y".to_string(),
            has_header: true,
            delimiter: b',',
        }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout written by the export command:
    /// `date,type,category,amount_cents,description,transfer`
    pub fn standard() -> Self {
        Self {
            date_column: 0,
            kind_column: Some(1),
            category_column: Some(2),
            amount_cents_column: Some(3),
            amount_column: None,
            description_column: Some(4),
            transfer_column: Some(5),
            ..Self::default()
        }
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Detect column positions from a header row
    pub fn detect_from_headers(headers: &StringRecord) -> Self {
        let mut mapping = Self {
            amount_column: None,
            ..Self::default()
        };

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();
            let h = h.as_str();

            if matches!(h, "amount_cents" | "amountcents" | "cents") {
                mapping.amount_cents_column = Some(idx);
            } else if h.contains("date") || h == "fecha" {
                mapping.date_column = idx;
            } else if (h.contains("amount") || h == "monto") && mapping.amount_column.is_none() {
                mapping.amount_column = Some(idx);
            } else if matches!(h, "type" | "kind" | "tipo") {
                mapping.kind_column = Some(idx);
            } else if h.contains("category") || h == "categoria" || h == "categoría" {
                mapping.category_column = Some(idx);
            } else if h.contains("description")
                || h.contains("payee")
                || h.contains("memo")
                || h == "descripcion"
                || h == "descripción"
            {
                mapping.description_column = Some(idx);
            } else if h.contains("transfer") {
                mapping.transfer_column = Some(idx);
            }
        }

        mapping
    }
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based data row number, not counting the header
    pub row: usize,
    pub message: String,
}

/// Result of reading a CSV file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub records: Vec<TransactionRecord>,
    pub errors: Vec<RowError>,
}

impl ImportOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reads transaction records from CSV
#[derive(Debug, Clone, Default)]
pub struct TransactionImporter {
    mapping: Option<ColumnMapping>,
}

impl TransactionImporter {
    /// An importer that detects columns from the header row
    pub fn new() -> Self {
        Self::default()
    }

    /// An importer with a fixed column mapping
    pub fn with_mapping(mapping: ColumnMapping) -> Self {
        Self {
            mapping: Some(mapping),
        }
    }

    /// Import from a file on disk
    pub fn import_file(&self, path: &Path) -> FinanceResult<ImportOutcome> {
        let file = File::open(path).map_err(|e| {
            FinanceError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file)
    }

    /// Import from any reader
    pub fn import_reader<R: Read>(&self, reader: R) -> FinanceResult<ImportOutcome> {
        let (has_header, delimiter) = match &self.mapping {
            Some(mapping) => (mapping.has_header, mapping.delimiter),
            None => (true, b','),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(has_header)
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mapping = match &self.mapping {
            Some(mapping) => mapping.clone(),
            None => {
                let headers = reader.headers().map_err(|e| {
                    FinanceError::Import(format!("Failed to read CSV header: {}", e))
                })?;
                ColumnMapping::detect_from_headers(headers)
            }
        };

        if mapping.amount_cents_column.is_none() && mapping.amount_column.is_none() {
            return Err(FinanceError::Import(
                "CSV has neither an amount_cents nor an amount column".to_string(),
            ));
        }

        let mut outcome = ImportOutcome::default();
        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let parsed = result
                .map_err(|e| format!("Error reading CSV record: {}", e))
                .and_then(|record| parse_record(&record, &mapping).map_err(|e| e.to_string()));

            match parsed {
                Ok(record) => outcome.records.push(record),
                Err(message) => {
                    tracing::warn!(row, %message, "skipping CSV row");
                    outcome.errors.push(RowError { row, message });
                }
            }
        }

        tracing::debug!(
            imported = outcome.records.len(),
            rejected = outcome.errors.len(),
            "finished CSV import"
        );

        Ok(outcome)
    }
}

fn field<'r>(record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
    column
        .and_then(|col| record.get(col))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a single CSV record
fn parse_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> FinanceResult<TransactionRecord> {
    let date_str = field(record, Some(mapping.date_column))
        .ok_or_else(|| FinanceError::InvalidDate("missing date".to_string()))?;
    let date = parse_row_date(date_str, &mapping.date_format)?;

    let amount = parse_row_amount(record, mapping)?;

    let kind = match field(record, mapping.kind_column) {
        Some(kind) => kind.parse::<TransactionKind>()?,
        None if amount.is_negative() => TransactionKind::Expense,
        None => TransactionKind::Income,
    };

    let transfer = match field(record, mapping.transfer_column) {
        Some(flag) => parse_flag(flag)?,
        None => false,
    };

    Ok(TransactionRecord {
        date,
        amount: amount.abs(),
        kind,
        category: field(record, mapping.category_column).unwrap_or_default().to_string(),
        description: field(record, mapping.description_column)
            .unwrap_or_default()
            .to_string(),
        transfer,
    })
}

fn parse_row_amount(record: &StringRecord, mapping: &ColumnMapping) -> FinanceResult<Money> {
    let amount_cents = field(record, mapping.amount_cents_column)
        .map(|s| {
            s.parse::<i64>().map_err(|_| {
                FinanceError::InvalidAmount(format!("'{}' is not a whole number of cents", s))
            })
        })
        .transpose()?;

    let fields = match amount_cents {
        Some(cents) => AmountFields::from_cents(cents),
        None => match field(record, mapping.amount_column) {
            Some(text) => AmountFields::from_major_units(clean_amount(text)),
            None => AmountFields::default(),
        },
    };

    resolve_amount_cents(&fields)
}

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Strip currency symbols, whitespace and thousands separators; `(12.50)`
/// means negative
///
/// Anything else is left in place so that `Money::parse` rejects it.
fn clean_amount(s: &str) -> String {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let stripped: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let cleaned = if has_group_commas(&stripped) {
        stripped.replace(',', "")
    } else {
        stripped
    };

    if negative {
        format!("-{}", cleaned)
    } else {
        cleaned
    }
}

/// Commas only between groups of three integer digits, as in `-1,234,567.89`
fn has_group_commas(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (integral, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if !integral.contains(',') || fraction.contains(',') {
        return false;
    }

    let digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = integral.split(',');
    let leading = groups.next().unwrap_or("");
    (1..=3).contains(&leading.len())
        && digits(leading)
        && groups.all(|g| g.len() == 3 && digits(g))
}

fn parse_row_date(s: &str, primary_format: &str) -> FinanceResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Ok(date);
    }
    parse_date(s)
}

fn parse_flag(s: &str) -> FinanceResult<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "si" | "sí" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(FinanceError::Validation(format!(
            "'{}' is not a transfer flag",
            other
        ))),
    }
}
