//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog or to the page key bindings.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::event::Event;
use crate::models::Page;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    handle_normal_key(app, key);
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::AddExpense => {
            dialogs::expense::handle_key(app, key);
        }
        ActiveDialog::EditBudget => {
            dialogs::budget::handle_key(app, key);
        }
        ActiveDialog::ConfirmDelete(id) => {
            dialogs::confirm::handle_key(app, id, key);
        }
        ActiveDialog::None => {}
    }
}

/// Handle keys when no dialog is open
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Tab | KeyCode::BackTab => {
            let next = app.active_page.toggle();
            app.switch_page(next);
        }
        KeyCode::Char('1') => app.switch_page(Page::Dashboard),
        KeyCode::Char('2') => app.switch_page(Page::Reports),

        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('b') => app.open_dialog(ActiveDialog::EditBudget),

        KeyCode::Char('c') => match app.tracker.cycle_currency() {
            Ok(currency) => app.set_status(format!("Currency: {} ({})", currency.code, currency.name)),
            Err(e) => {
                warn!(error = %e, "failed to change currency");
                app.set_status(format!("Could not change currency: {}", e));
            }
        },

        KeyCode::Char('t') => match app.tracker.toggle_dark_mode() {
            Ok(dark) => app.set_status(if dark { "Dark mode on" } else { "Dark mode off" }),
            Err(e) => {
                warn!(error = %e, "failed to toggle dark mode");
                app.set_status(format!("Could not change theme: {}", e));
            }
        },

        _ => match app.active_page {
            Page::Dashboard => handle_dashboard_key(app, key),
            Page::Reports => handle_reports_key(app, key),
        },
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('d') | KeyCode::Delete => {
            let selected = app.selected_expense().map(|e| e.id.clone());
            match selected {
                Some(id) => app.open_dialog(ActiveDialog::ConfirmDelete(id)),
                None => app.set_status("Nothing to delete"),
            }
        }
        _ => {}
    }
}

fn handle_reports_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') | KeyCode::Right | KeyCode::Char('l') => app.next_period(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_period(),
        _ => {}
    }
}
