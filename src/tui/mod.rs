//! Terminal User Interface module
//!
//! An interactive dashboard and reports UI built on ratatui, with dialogs
//! for adding expenses, editing the budget and confirming deletes.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod theme;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

pub use app::App;
pub use terminal::run_tui;
