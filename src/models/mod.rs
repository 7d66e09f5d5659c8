//! Core data models for the expense tracker
//!
//! This module contains the data structures of the tracking domain: expenses,
//! the fixed category and currency catalogs, money amounts, report periods,
//! and user preferences.

pub mod category;
pub mod currency;
pub mod expense;
pub mod money;
pub mod period;
pub mod preferences;

pub use category::{Category, CategoryId, CATEGORIES, DEFAULT_CATEGORY_ID};
pub use currency::{currency_symbol, format_amount, Currency, CURRENCIES, DEFAULT_CURRENCY};
pub use expense::{Expense, ExpenseId, ExpenseValidationError};
pub use money::{Money, MoneyParseError};
pub use period::{weekday_from_index, ReportPeriod};
pub use preferences::{Page, Preferences};
