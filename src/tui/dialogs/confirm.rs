//! Delete confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::ExpenseId;
use crate::tracker::DeleteOutcome;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the confirmation for deleting `id`
pub fn render(frame: &mut Frame, app: &App, id: &ExpenseId) {
    let theme = app.theme();
    let area = centered_rect_fixed(50, 8, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete Expense ")
        .title_style(
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning))
        .style(theme.base());

    let detail = match app.tracker.expenses().get(id) {
        Some(expense) => format!(
            "{} · {}",
            expense.description,
            app.tracker.format_amount(expense.amount)
        ),
        None => id.to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from("Are you sure you want to delete this expense?"),
        Line::from(Span::styled(detail, theme.muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(theme.healthy)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(theme.danger)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(theme.warning)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key events for the confirmation dialog
pub fn handle_key(app: &mut App, id: ExpenseId, key: KeyEvent) -> bool {
    let confirmed = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => return false,
    };

    app.close_dialog();
    match app.tracker.delete_expense(&id, |_| confirmed) {
        Ok(DeleteOutcome::Deleted(expense)) => {
            app.set_status(format!("Deleted {}", expense.description));
            app.clamp_selection();
        }
        Ok(DeleteOutcome::Cancelled) => app.set_status("Deletion cancelled"),
        Ok(DeleteOutcome::NotFound) => app.set_status("Expense no longer exists"),
        Err(e) => app.set_status(format!("Delete failed: {}", e)),
    }
    true
}
