//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the tracker.

pub mod budget;
pub mod expense;
pub mod export;
pub mod preferences;
pub mod report;

use std::io::{self, BufRead, Write};

use crate::config::{Settings, TrackerPaths};
use crate::display::format_category_list;
use crate::error::ExpenseResult;
use crate::models::Category;
use crate::storage::json_file_valid;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{
    handle_add_command, handle_delete_command, handle_list_command, AddArgs, DeleteArgs, ListArgs,
};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use preferences::{
    handle_currency_command, handle_page_command, handle_theme_command, CurrencyCommands,
    PageChoice, ThemeChoice,
};
pub use report::{handle_dashboard_command, handle_report_command, ReportArgs};

/// Ask a yes/no question on stdin
///
/// Only "y" or "yes" confirm. End of input counts as "no".
pub fn confirm_prompt(message: &str) -> ExpenseResult<bool> {
    print!("{} [y/N]: ", message);
    io::stdout().flush()?;

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    if read == 0 {
        return Ok(false);
    }

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Handle `categories`
pub fn handle_categories_command() -> ExpenseResult<()> {
    print!("{}", format_category_list(Category::all()));
    Ok(())
}

/// Handle `config`
pub fn handle_config_command(paths: &TrackerPaths, settings: &Settings, init: bool) -> ExpenseResult<()> {
    if init {
        settings.save(paths)?;
        println!("Settings written to {}", paths.settings_file().display());
        println!();
    }

    let store_file = paths.store_file();
    let store_state = if !store_file.exists() {
        "not created yet"
    } else if json_file_valid(&store_file) {
        "ok"
    } else {
        "unreadable"
    };

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Store file:     {} ({})", store_file.display(), store_state);
    println!("Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  First day of week: {}", settings.week_start());
    println!("  Date format:       {}", settings.date_format);
    println!("  Recent expenses:   {}", settings.recent_limit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_config_init_writes_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_config_command(&paths, &Settings::default(), true).unwrap();
        assert!(paths.settings_file().exists());
        assert!(json_file_valid(paths.settings_file()));
    }
}
