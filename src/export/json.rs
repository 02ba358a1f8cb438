//! JSON Export functionality
//!
//! Wraps a report in a versioned envelope and writes it as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FinanceError, FinanceResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report plus the metadata needed to read it back later
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Which report this is, e.g. `cashflow`
    pub report_type: String,

    pub report: T,
}

impl<T> ReportExport<T> {
    pub fn new(report_type: impl Into<String>, report: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report_type: report_type.into(),
            report,
        }
    }
}

/// Write an export as JSON
pub fn export_json<W: Write, T: Serialize>(
    export: &ReportExport<T>,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}
