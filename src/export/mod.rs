//! Export module for the expense tracker
//!
//! - CSV: expenses only (spreadsheet-compatible)
//! - JSON: full state, machine-readable
//! - YAML: full state, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
