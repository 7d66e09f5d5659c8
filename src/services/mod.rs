//! Service layer for the expense tracker
//!
//! Business rules that sit between user input and the stored state.

pub mod expense;

pub use expense::{ExpenseForm, DATE_INPUT_FORMAT, MISSING_FIELDS};
