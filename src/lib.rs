//! Expense Tracker - terminal personal expense tracker
//!
//! Records expenses in a fixed set of categories, tracks spending against a
//! single monthly budget, aggregates spending by period and category, and
//! draws category pie charts. State lives in a small string key-value store
//! backed by one JSON file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, categories, currencies, preferences)
//! - `storage`: Key-value store and the persisted state layout
//! - `services`: Expense form validation
//! - `reports`: Aggregation, pie chart geometry, dashboard and category reports
//! - `tracker`: The application state container
//! - `display`: Terminal formatting for the CLI
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal UI
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::TrackerPaths;
//! use expense_tracker::services::ExpenseForm;
//! use expense_tracker::tracker::Tracker;
//!
//! let paths = TrackerPaths::new()?;
//! let mut tracker = Tracker::open(&paths)?;
//! tracker.add_expense(&ExpenseForm::new("12.50", "Lunch"))?;
//! println!("{}", tracker.dashboard().budget.remaining);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tracker;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
pub use tracker::Tracker;
