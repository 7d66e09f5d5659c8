//! JSON export
//!
//! The full tracked state (expenses, budget, preferences) with schema
//! versioning and summary metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money, Preferences};
use crate::tracker::Tracker;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Monthly budget
    pub budget: Money,

    /// Display preferences
    pub preferences: Preferences,

    /// All expenses, newest first
    pub expenses: Vec<Expense>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Summary of the exported data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    /// Sum of all expense amounts
    pub total_spent: Money,

    pub earliest_expense: Option<String>,

    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Snapshot the tracker state
    pub fn from_tracker(tracker: &Tracker) -> Self {
        let expenses: Vec<Expense> = tracker
            .expenses()
            .sorted_by_date_desc()
            .into_iter()
            .cloned()
            .collect();

        let format_date = |d: DateTime<Utc>| d.to_rfc3339_opts(SecondsFormat::Millis, true);
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(format_date),
            latest_expense: expenses.iter().map(|e| e.date).max().map(format_date),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            budget: tracker.budget(),
            preferences: tracker.preferences().clone(),
            expenses,
            metadata,
        }
    }
}

/// Export the full state to JSON
pub fn export_full_json<W: Write>(tracker: &Tracker, writer: &mut W, pretty: bool) -> ExpenseResult<()> {
    let export = FullExport::from_tracker(tracker);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
