//! TUI Views module
//!
//! The dashboard and reports pages, the page tabs and the status bar.

pub mod dashboard;
pub mod reports;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;
use crate::models::Page;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_page {
        Page::Dashboard => dashboard::render(frame, app, layout.main),
        Page::Reports => reports::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let pages = Page::all();
    let titles: Vec<&str> = pages.iter().map(|p| p.title()).collect();
    let index = pages.iter().position(|p| *p == app.active_page).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(index)
        .block(
            Block::default()
                .title(" 💰 Expense Tracker ")
                .title_style(theme.title_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .style(theme.base())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::EditBudget => dialogs::budget::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => dialogs::confirm::render(frame, app, id),
        ActiveDialog::None => {}
    }
}
