use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add_command, handle_budget_command, handle_categories_command, handle_config_command,
    handle_currency_command, handle_dashboard_command, handle_delete_command,
    handle_export_command, handle_list_command, handle_page_command, handle_report_command,
    handle_theme_command, AddArgs, BudgetCommands, CurrencyCommands, DeleteArgs, ExportArgs,
    ListArgs, PageChoice, ReportArgs, ThemeChoice,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::logging::{init_tracing, LogTarget};
use expense_tracker::tracker::Tracker;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Track expenses by category, keep an eye on a monthly budget, \
                  and see where the money goes with category reports and pie charts. \
                  Run without a command to print the dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard (default)
    Dashboard,

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Add an expense
    Add(AddArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Spending by category for a period
    Report(ReportArgs),

    /// Show or set the monthly budget
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// List or select the display currency
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Choose the color theme
    Theme {
        #[arg(value_enum)]
        choice: ThemeChoice,
    },

    /// Choose the page the TUI opens on
    Page {
        #[arg(value_enum)]
        choice: PageChoice,
    },

    /// List expense categories
    Categories,

    /// Export data to a file
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the default settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;

    match &cli.command {
        Some(Commands::Tui) => {
            paths.ensure_directories()?;
            init_tracing(LogTarget::File(paths.log_file()));
        }
        _ => init_tracing(LogTarget::Stderr),
    }

    if let Some(Commands::Config { init }) = &cli.command {
        let settings = Settings::load_or_create(&paths)?;
        handle_config_command(&paths, &settings, *init)?;
        return Ok(());
    }

    let mut tracker = Tracker::open(&paths)?;

    match cli.command {
        None | Some(Commands::Dashboard) => handle_dashboard_command(&tracker)?,
        Some(Commands::Tui) => expense_tracker::tui::run_tui(&mut tracker)?,
        Some(Commands::Add(args)) => handle_add_command(&mut tracker, args)?,
        Some(Commands::Delete(args)) => handle_delete_command(&mut tracker, args)?,
        Some(Commands::List(args)) => handle_list_command(&tracker, args)?,
        Some(Commands::Report(args)) => handle_report_command(&tracker, args)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut tracker, cmd)?,
        Some(Commands::Currency(cmd)) => handle_currency_command(&mut tracker, cmd)?,
        Some(Commands::Theme { choice }) => handle_theme_command(&mut tracker, choice)?,
        Some(Commands::Page { choice }) => handle_page_command(&mut tracker, choice)?,
        Some(Commands::Categories) => handle_categories_command()?,
        Some(Commands::Export(args)) => handle_export_command(&tracker, args)?,
        Some(Commands::Config { .. }) => {}
    }

    Ok(())
}
