//! Expense list formatting

use chrono::Local;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{Currency, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, in the order given
pub fn format_expense_table(expenses: &[&Expense], currency: &Currency, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|expense| ExpenseRow {
        id: expense.id.to_string(),
        date: expense
            .date
            .with_timezone(&Local)
            .format(date_format)
            .to_string(),
        description: truncate(&expense.description, 32),
        category: expense.category().label(),
        amount: currency.format(expense.amount),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());

    format!("{}\n", table)
}

/// Format the details of a single expense
pub fn format_expense_details(expense: &Expense, currency: &Currency, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.with_timezone(&Local).format(date_format)
    ));
    output.push_str(&format!("Amount:      {}\n", currency.format(expense.amount)));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category().label()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};
    use chrono::{TimeZone, Utc};

    fn expense() -> Expense {
        Expense::new(
            ExpenseId::new("1736500000000"),
            Money::from_cents(4_250),
            "Weekly groceries",
            1,
            Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_table_contents() {
        let expense = expense();
        let table = format_expense_table(&[&expense], Currency::default_currency(), "%Y-%m-%d");

        assert!(table.contains("1736500000000"));
        assert!(table.contains("Weekly groceries"));
        assert!(table.contains("Food"));
        assert!(table.contains("$42.50"));
        assert!(table.contains("Amount"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], Currency::default_currency(), "%Y-%m-%d"),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_details() {
        let gbp = Currency::find("GBP").unwrap();
        let details = format_expense_details(&expense(), gbp, "%Y-%m-%d");
        assert!(details.contains("£42.50"));
        assert!(details.contains("🍔 Food"));
    }
}
