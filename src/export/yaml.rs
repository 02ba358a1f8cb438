//! YAML Export functionality
//!
//! Human-readable report export with a short header comment.

use serde::Serialize;
use std::io::Write;

use super::json::ReportExport;
use crate::error::{FinanceError, FinanceResult};

/// Write an export as YAML
pub fn export_yaml<W: Write, T: Serialize>(
    export: &ReportExport<T>,
    writer: &mut W,
) -> FinanceResult<()> {
    let header = format!(
        "# finance-core {} report\n# Generated: {}\n# App Version: {}\n\n",
        export.report_type, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreditCard, Money};
    use crate::reports::CreditCardRisk;

    #[test]
    fn test_export_yaml() {
        let card = CreditCard::new("Visa", Money::from_cents(80_000), Money::from_cents(100_000));
        let export = ReportExport::new("credit", CreditCardRisk::analyze(&card).unwrap());

        let mut output = Vec::new();
        export_yaml(&export, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# finance-core credit report"));
        assert!(text.contains("risk: critical"));

        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["report"]["utilization"], serde_yaml::Value::from(80.0));
    }
}
