//! Export module for finance-core
//!
//! Report export in multiple formats:
//! - CSV: spreadsheet-compatible rows
//! - JSON: machine-readable, wrapped in a versioned envelope
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{
    export_cash_flow_csv, export_categories_csv, export_records_csv, export_spikes_csv,
};
pub use self::json::{export_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
