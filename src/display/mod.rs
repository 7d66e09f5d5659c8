//! Display formatting for terminal output
//!
//! Tables for expenses and catalogs, and the text helpers used by the
//! report printers.

pub mod category;
pub mod expense;
pub mod report;

pub use category::{format_category_list, format_currency_list};
pub use expense::{format_expense_details, format_expense_table};
