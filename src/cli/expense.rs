//! Expense CLI commands: add, delete, list

use clap::Args;
use tracing::warn;

use super::confirm_prompt;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, ExpenseId, ReportPeriod, DEFAULT_CATEGORY_ID};
use crate::services::ExpenseForm;
use crate::tracker::{DeleteOutcome, Tracker};

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (e.g. "12.50")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// What the money was spent on
    pub description: String,

    /// Category name or ID (default: Food)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Date of the expense (YYYY-MM-DD, default: now)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// ID of the expense to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of expenses to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Period to show: day, week, month or all
    #[arg(short, long, default_value = "all")]
    pub period: String,
}

/// Resolve the `--category` argument
///
/// Names must match a registered category. Numeric ids are taken as given;
/// ids outside the registry are reported under "Other".
pub fn resolve_category(input: Option<&str>) -> ExpenseResult<CategoryId> {
    let Some(input) = input else {
        return Ok(DEFAULT_CATEGORY_ID);
    };

    if let Ok(id) = input.trim().parse::<CategoryId>() {
        if Category::find(id).is_none() {
            warn!(id, "category id is not registered, it will be reported as Other");
        }
        return Ok(id);
    }

    Category::lookup(input).map(|c| c.id).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Unknown category '{}'. Run 'expense categories' to see the list",
            input.trim()
        ))
    })
}

/// Handle `add`
pub fn handle_add_command(tracker: &mut Tracker, args: AddArgs) -> ExpenseResult<()> {
    let category_id = resolve_category(args.category.as_deref())?;
    let mut form = ExpenseForm::new(args.amount, args.description).category(category_id);
    if let Some(date) = args.date {
        form = form.date(date);
    }

    let expense = tracker.add_expense(&form)?;
    println!(
        "Added expense {}: {} {} ({})",
        expense.id,
        tracker.format_amount(expense.amount),
        expense.description,
        expense.category().label()
    );
    Ok(())
}

/// Handle `delete`
pub fn handle_delete_command(tracker: &mut Tracker, args: DeleteArgs) -> ExpenseResult<()> {
    let id = ExpenseId::new(args.id.trim());
    let currency = tracker.currency();
    let date_format = tracker.settings().date_format.clone();

    let outcome = tracker.delete_expense(&id, |expense| {
        if args.yes {
            return true;
        }
        println!("About to delete:");
        print!("{}", format_expense_details(expense, currency, &date_format));
        confirm_prompt("Are you sure you want to delete this expense?").unwrap_or(false)
    })?;

    match outcome {
        DeleteOutcome::Deleted(expense) => {
            println!("Deleted expense {} ({})", expense.id, expense.description);
        }
        DeleteOutcome::Cancelled => println!("Deletion cancelled."),
        DeleteOutcome::NotFound => println!("No expense with id {}. Nothing deleted.", id),
    }
    Ok(())
}

/// Handle `list`
pub fn handle_list_command(tracker: &Tracker, args: ListArgs) -> ExpenseResult<()> {
    let period = ReportPeriod::from_selector(&args.period);
    let expenses = tracker.list_expenses(period, args.limit);

    println!("Expenses: {} ({})", period.label(), expenses.len());
    print!(
        "{}",
        format_expense_table(&expenses, tracker.currency(), &tracker.settings().date_format)
    );
    Ok(())
}
