//! Budget CLI commands
//!
//! Shows and edits the single monthly budget.

use clap::Subcommand;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, ReportPeriod};
use crate::reports::BudgetStatus;
use crate::tracker::Tracker;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show the monthly budget and how much of it is used
    Show,

    /// Set the monthly budget
    Set {
        /// Amount (e.g., "1500" or "1500.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle budget commands
pub fn handle_budget_command(tracker: &mut Tracker, cmd: BudgetCommands) -> ExpenseResult<()> {
    match cmd {
        BudgetCommands::Show => {
            let aggregator = tracker.aggregator();
            let spent = aggregator.total_for_period(tracker.expenses().as_slice(), ReportPeriod::Month);
            let status = BudgetStatus::new(tracker.budget(), spent);

            println!("Monthly budget: {}", tracker.format_amount(status.budget));
            println!("Spent:          {}", tracker.format_amount(status.spent));
            println!("Remaining:      {}", tracker.format_amount(status.remaining));
            match status.percentage_used {
                Some(pct) => println!("Used:           {:.1}% ({})", pct, status.health.label()),
                None => println!("Used:           no budget set"),
            }
        }
        BudgetCommands::Set { amount } => {
            let amount =
                Money::parse(&amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;
            tracker.set_budget(amount)?;
            println!("Monthly budget set to {}", tracker.format_amount(amount));
        }
    }
    Ok(())
}
