//! User settings for the expense tracker
//!
//! Settings hold the knobs that are not part of the tracked state itself:
//! week start, date display format and how many recent expenses the dashboard
//! lists. Tracked state (expenses, budget, preferences) lives in the
//! key-value store.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::ExpenseError;
use crate::models::weekday_from_index;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// First day of week (0 = Sunday, 1 = Monday, ... 6 = Saturday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of expenses shown under "Recent Transactions"
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_first_day_of_week() -> u8 {
    0 // Sunday
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            first_day_of_week: default_first_day_of_week(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// The configured first day of the week
    pub fn week_start(&self) -> Weekday {
        weekday_from_index(self.first_day_of_week)
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.first_day_of_week > 6 {
            return Err(ExpenseError::Config(format!(
                "first_day_of_week must be between 0 (Sunday) and 6 (Saturday), got {}",
                self.first_day_of_week
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(ExpenseError::Config("date_format cannot be empty".into()));
        }
        Ok(())
    }
}
