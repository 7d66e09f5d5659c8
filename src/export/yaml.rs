//! YAML export
//!
//! Same content as the JSON export, in a human-readable layout.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::tracker::Tracker;

/// Export the full state to YAML
pub fn export_full_yaml<W: Write>(tracker: &Tracker, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_tracker(tracker);
    let map_err = |e: std::io::Error| ExpenseError::Export(e.to_string());

    writeln!(writer, "# Expense Tracker Export").map_err(map_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(map_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(map_err)?;
    writeln!(writer).map_err(map_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
