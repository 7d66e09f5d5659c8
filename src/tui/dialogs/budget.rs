//! Edit budget dialog
//!
//! Dialog to edit the monthly budget

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Money, MoneyParseError};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// State for the edit budget dialog
#[derive(Debug, Clone, Default)]
pub struct BudgetDialogState {
    /// Budget when the dialog opened
    pub current_amount: Money,
    pub amount_input: TextInput,
    pub error_message: Option<String>,
}

impl BudgetDialogState {
    /// Initialize the dialog, pre-filled with the current budget
    pub fn init(&mut self, current_amount: Money) {
        self.current_amount = current_amount;
        let prefill = if current_amount.is_zero() {
            String::new()
        } else {
            current_amount.to_decimal_string()
        };
        self.amount_input = TextInput::new().content(prefill);
        self.error_message = None;
    }

    /// Only digits and a decimal point are accepted
    pub fn insert_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.amount_input.insert(c);
            self.error_message = None;
        }
    }

    /// Parse the input amount; a blank field means no budget
    pub fn parse_amount(&self) -> Result<Money, String> {
        let raw = self.amount_input.value().trim();
        if raw.is_empty() {
            return Ok(Money::zero());
        }
        Money::parse(raw).map_err(|e| match e {
            MoneyParseError::OutOfRange(_) => e.to_string(),
            MoneyParseError::InvalidFormat(_) => "Invalid amount format".to_string(),
        })
    }
}

/// Render the edit budget dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let state = &app.budget_dialog;
    let area = centered_rect_fixed(46, 9, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Monthly Budget ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(theme.base());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Current amount
            Constraint::Length(1), // Input
            Constraint::Length(1), // Error
            Constraint::Length(1), // Instructions
            Constraint::Min(0),
        ])
        .split(inner);

    let current_line = Line::from(vec![
        Span::styled("Current: ", theme.muted_style()),
        Span::raw(app.tracker.format_amount(state.current_amount)),
    ]);
    frame.render_widget(Paragraph::new(current_line), chunks[1]);

    let input = state
        .amount_input
        .clone()
        .label(format!("New ({})", app.tracker.currency().symbol))
        .focused(true);
    frame.render_widget(input, chunks[2]);

    if let Some(ref error) = state.error_message {
        let error_line = Line::from(Span::styled(error.as_str(), Style::default().fg(theme.danger)));
        frame.render_widget(Paragraph::new(error_line), chunks[3]);
    }

    let instructions = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(theme.healthy)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(theme.warning)),
        Span::raw(" Cancel  "),
        Span::styled("[Ctrl+U]", Style::default().fg(theme.accent)),
        Span::raw(" Clear"),
    ]);
    frame.render_widget(Paragraph::new(instructions), chunks[4]);
}

/// Handle key events for the edit budget dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            true
        }

        KeyCode::Enter => {
            match app.budget_dialog.parse_amount() {
                Ok(amount) => match app.tracker.set_budget(amount) {
                    Ok(()) => {
                        let formatted = app.tracker.format_amount(amount);
                        app.set_status(format!("Monthly budget set to {}", formatted));
                        app.close_dialog();
                    }
                    Err(e) => app.budget_dialog.error_message = Some(e.to_string()),
                },
                Err(e) => app.budget_dialog.error_message = Some(e),
            }
            true
        }

        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.budget_dialog.amount_input.clear();
            true
        }

        KeyCode::Char(c) => {
            app.budget_dialog.insert_char(c);
            true
        }

        KeyCode::Backspace => {
            app.budget_dialog.amount_input.backspace();
            true
        }

        KeyCode::Left => {
            app.budget_dialog.amount_input.move_left();
            true
        }

        KeyCode::Right => {
            app.budget_dialog.amount_input.move_right();
            true
        }

        _ => false,
    }
}
