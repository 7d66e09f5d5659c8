//! Preference commands: currency, theme, start page

use clap::{Subcommand, ValueEnum};

use crate::display::format_currency_list;
use crate::error::ExpenseResult;
use crate::models::{Currency, Page};
use crate::tracker::Tracker;

/// Currency subcommands
#[derive(Subcommand, Debug)]
pub enum CurrencyCommands {
    /// List supported currencies
    List,

    /// Select the display currency
    Set {
        /// ISO code (e.g. EUR)
        code: String,
    },
}

/// Theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    /// Switch to the other theme
    Toggle,
}

/// Page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageChoice {
    Dashboard,
    Reports,
}

impl From<PageChoice> for Page {
    fn from(choice: PageChoice) -> Self {
        match choice {
            PageChoice::Dashboard => Page::Dashboard,
            PageChoice::Reports => Page::Reports,
        }
    }
}

/// Handle currency commands
pub fn handle_currency_command(tracker: &mut Tracker, cmd: CurrencyCommands) -> ExpenseResult<()> {
    match cmd {
        CurrencyCommands::List => {
            print!("{}", format_currency_list(Currency::all(), tracker.currency()));
        }
        CurrencyCommands::Set { code } => {
            let currency = tracker.set_currency(&code)?;
            println!("Currency set to {} ({})", currency.code, currency.name);
        }
    }
    Ok(())
}

/// Handle `theme`
pub fn handle_theme_command(tracker: &mut Tracker, choice: ThemeChoice) -> ExpenseResult<()> {
    let dark_mode = match choice {
        ThemeChoice::Dark => {
            tracker.set_dark_mode(true)?;
            true
        }
        ThemeChoice::Light => {
            tracker.set_dark_mode(false)?;
            false
        }
        ThemeChoice::Toggle => tracker.toggle_dark_mode()?,
    };

    println!("Theme: {}", if dark_mode { "dark" } else { "light" });
    Ok(())
}

/// Handle `page`
pub fn handle_page_command(tracker: &mut Tracker, choice: PageChoice) -> ExpenseResult<()> {
    let page = Page::from(choice);
    tracker.set_active_page(page)?;
    println!("The interactive UI will open on the {} page", page);
    Ok(())
}
