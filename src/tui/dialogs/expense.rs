//! Add expense dialog
//!
//! Modal form with amount, description, category and date fields, tab
//! navigation, validation and save/cancel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::debug;

use crate::error::ExpenseError;
use crate::models::Category;
use crate::services::ExpenseForm;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::category_color;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Amount,
    Description,
    Category,
    Date,
}

impl ExpenseField {
    /// Next field (Tab)
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Amount,
        }
    }

    /// Previous field (Shift+Tab)
    pub fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Date,
            Self::Description => Self::Amount,
            Self::Category => Self::Description,
            Self::Date => Self::Category,
        }
    }
}

/// State for the add expense dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub amount_input: TextInput,
    pub description_input: TextInput,
    /// Index into the category registry
    pub category_index: usize,
    pub date_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    pub fn new() -> Self {
        Self {
            focused_field: ExpenseField::Amount,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            category_index: 0,
            date_input: TextInput::new().label("Date").placeholder("YYYY-MM-DD (today)"),
            error_message: None,
        }
    }

    pub fn category(&self) -> &'static Category {
        let categories = Category::all();
        &categories[self.category_index.min(categories.len() - 1)]
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % Category::all().len();
    }

    pub fn prev_category(&mut self) {
        let len = Category::all().len();
        self.category_index = (self.category_index + len - 1) % len;
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Description => Some(&mut self.description_input),
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Category => None,
        }
    }

    pub fn set_focus(&mut self, field: ExpenseField) {
        self.focused_field = field;
    }

    /// The form as submitted to the tracker
    pub fn to_form(&self) -> ExpenseForm {
        ExpenseForm::new(self.amount_input.value(), self.description_input.value())
            .category(self.category().id)
            .date(self.date_input.value())
    }
}

/// Render the add expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let state = &app.expense_form;
    let area = centered_rect_fixed(56, 13, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
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
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Category
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Instructions
            Constraint::Min(0),
        ])
        .split(inner);

    let focused = state.focused_field;
    frame.render_widget(
        state.amount_input.clone().focused(focused == ExpenseField::Amount),
        chunks[1],
    );
    frame.render_widget(
        state
            .description_input
            .clone()
            .focused(focused == ExpenseField::Description),
        chunks[2],
    );

    let category = state.category();
    let label_style = if focused == ExpenseField::Category {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent)
    };
    let category_line = Line::from(vec![
        Span::styled("Category", label_style),
        Span::raw(": "),
        Span::styled("◀ ", theme.muted_style()),
        Span::styled(category.label(), Style::default().fg(category_color(category))),
        Span::styled(" ▶", theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(category_line), chunks[3]);

    frame.render_widget(
        state.date_input.clone().focused(focused == ExpenseField::Date),
        chunks[4],
    );

    if let Some(ref error) = state.error_message {
        let error_line = Line::from(Span::styled(error.as_str(), Style::default().fg(theme.danger)));
        frame.render_widget(Paragraph::new(error_line), chunks[6]);
    }

    let instructions = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(theme.accent)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(theme.accent)),
        Span::raw(" Category  "),
        Span::styled("[Enter]", Style::default().fg(theme.healthy)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(theme.warning)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(instructions), chunks[8]);
}

/// Handle key events for the add expense dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            true
        }

        KeyCode::Enter => {
            save_expense(app);
            true
        }

        KeyCode::Tab => {
            let next = app.expense_form.focused_field.next();
            app.expense_form.set_focus(next);
            true
        }

        KeyCode::BackTab => {
            let prev = app.expense_form.focused_field.prev();
            app.expense_form.set_focus(prev);
            true
        }

        _ if app.expense_form.focused_field == ExpenseField::Category => match key.code {
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                app.expense_form.next_category();
                true
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                app.expense_form.prev_category();
                true
            }
            _ => false,
        },

        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.expense_form.focused_input() {
                input.clear();
            }
            true
        }

        KeyCode::Char(c) => {
            if let Some(input) = app.expense_form.focused_input() {
                input.insert(c);
            }
            app.expense_form.error_message = None;
            true
        }

        KeyCode::Backspace => {
            if let Some(input) = app.expense_form.focused_input() {
                input.backspace();
            }
            true
        }

        KeyCode::Delete => {
            if let Some(input) = app.expense_form.focused_input() {
                input.delete();
            }
            true
        }

        KeyCode::Left => {
            if let Some(input) = app.expense_form.focused_input() {
                input.move_left();
            }
            true
        }

        KeyCode::Right => {
            if let Some(input) = app.expense_form.focused_input() {
                input.move_right();
            }
            true
        }

        KeyCode::Home => {
            if let Some(input) = app.expense_form.focused_input() {
                input.move_start();
            }
            true
        }

        KeyCode::End => {
            if let Some(input) = app.expense_form.focused_input() {
                input.move_end();
            }
            true
        }

        _ => false,
    }
}

fn save_expense(app: &mut App) {
    let form = app.expense_form.to_form();
    match app.tracker.add_expense(&form) {
        Ok(expense) => {
            let amount = app.tracker.format_amount(expense.amount);
            app.set_status(format!("Added {} for {}", amount, expense.description));
            app.selected_expense_index = 0;
            app.close_dialog();
        }
        Err(e) => {
            debug!(error = %e, "expense form rejected");
            app.expense_form.error_message = Some(message_for(&e));
        }
    }
}

/// User-facing text for a form error
fn message_for(error: &ExpenseError) -> String {
    match error {
        ExpenseError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::MISSING_FIELDS;
    use crate::storage::Storage;
    use crate::tracker::Tracker;
    use crate::tui::app::ActiveDialog;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_field_cycle() {
        let mut field = ExpenseField::Amount;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, ExpenseField::Amount);
        assert_eq!(ExpenseField::Amount.prev(), ExpenseField::Date);
    }

    #[test]
    fn test_category_wraps() {
        let mut state = ExpenseFormState::new();
        state.prev_category();
        assert!(state.category().is_other());
        state.next_category();
        assert_eq!(state.category().id, 1);
    }

    #[test]
    fn test_submit_adds_expense() {
        let mut tracker = Tracker::with_storage(Storage::in_memory(), Settings::default()).unwrap();
        {
            let mut app = App::new(&mut tracker);
            app.open_dialog(ActiveDialog::AddExpense);

            type_text(&mut app, "12.50");
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "Lunch");
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Enter);

            assert!(!app.has_dialog());
        }

        assert_eq!(tracker.expenses().len(), 1);
        let expense = tracker.expenses().iter().next().unwrap();
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category_id, 2);
    }

    #[test]
    fn test_blank_form_shows_error() {
        let mut tracker = Tracker::with_storage(Storage::in_memory(), Settings::default()).unwrap();
        {
            let mut app = App::new(&mut tracker);
            app.open_dialog(ActiveDialog::AddExpense);
            press(&mut app, KeyCode::Enter);

            assert!(app.has_dialog());
            assert_eq!(app.expense_form.error_message.as_deref(), Some(MISSING_FIELDS));
        }
        assert!(tracker.expenses().is_empty());
    }
}
