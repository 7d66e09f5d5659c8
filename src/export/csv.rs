//! CSV export
//!
//! One row per expense, spreadsheet-friendly: amounts as plain decimals,
//! dates as ISO-8601 UTC.

use chrono::SecondsFormat;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

const HEADER: [&str; 6] = ["ID", "Date", "Description", "Category ID", "Category", "Amount"];

fn export_error(e: csv::Error) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Export expenses to CSV, in the order given
pub fn export_expenses_csv<'a, W, I>(expenses: I, writer: W) -> ExpenseResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Expense>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(export_error)?;

    let mut count = 0;
    for expense in expenses {
        csv_writer
            .write_record([
                expense.id.as_str(),
                expense
                    .date
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
                    .as_str(),
                expense.description.as_str(),
                expense.category_id.to_string().as_str(),
                expense.category().name,
                expense.amount.to_decimal_string().as_str(),
            ])
            .map_err(export_error)?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(count)
}
