//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! It borrows the tracker from the controller that launched the UI.

use tracing::warn;

use crate::models::{Expense, ExpenseId, Page, ReportPeriod};
use crate::reports::{CategoryReport, DashboardReport};
use crate::tracker::Tracker;

use super::dialogs::budget::BudgetDialogState;
use super::dialogs::expense::ExpenseFormState;
use super::theme::Theme;

/// Ticks a status message stays visible (250 ms each)
const STATUS_TICKS: u8 = 16;

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    EditBudget,
    ConfirmDelete(ExpenseId),
    Help,
}

/// Main application state
pub struct App<'a> {
    /// The tracker being displayed and edited
    pub tracker: &'a mut Tracker,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Page shown in the main area
    pub active_page: Page,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Period shown on the reports page
    pub report_period: ReportPeriod,

    /// Selected row in the recent transactions list
    pub selected_expense_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Remaining ticks before the status message is cleared
    status_ticks: u8,

    /// Add expense form state
    pub expense_form: ExpenseFormState,

    /// Edit budget dialog state
    pub budget_dialog: BudgetDialogState,
}

impl<'a> App<'a> {
    /// Create a new App instance, opening on the persisted page
    pub fn new(tracker: &'a mut Tracker) -> Self {
        let active_page = tracker.active_page();
        Self {
            tracker,
            should_quit: false,
            active_page,
            active_dialog: ActiveDialog::default(),
            report_period: ReportPeriod::Month,
            selected_expense_index: 0,
            status_message: None,
            status_ticks: 0,
            expense_form: ExpenseFormState::new(),
            budget_dialog: BudgetDialogState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn theme(&self) -> Theme {
        Theme::for_dark_mode(self.tracker.dark_mode())
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Count down the status message on each tick
    pub fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// Switch page and remember it for the next launch
    pub fn switch_page(&mut self, page: Page) {
        self.active_page = page;
        if let Err(e) = self.tracker.set_active_page(page) {
            warn!(error = %e, "failed to persist active page");
            self.set_status(format!("Could not save page: {}", e));
        }
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddExpense => self.expense_form = ExpenseFormState::new(),
            ActiveDialog::EditBudget => self.budget_dialog.init(self.tracker.budget()),
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn dashboard(&self) -> DashboardReport {
        self.tracker.dashboard()
    }

    pub fn category_report(&self) -> CategoryReport {
        self.tracker.category_report(self.report_period)
    }

    /// Expenses listed under "Recent Transactions", newest first
    pub fn recent_expenses(&self) -> Vec<&Expense> {
        let limit = self.tracker.settings().recent_limit;
        self.tracker
            .expenses()
            .sorted_by_date_desc()
            .into_iter()
            .take(limit)
            .collect()
    }

    /// The highlighted recent expense
    pub fn selected_expense(&self) -> Option<&Expense> {
        self.recent_expenses()
            .get(self.selected_expense_index)
            .copied()
    }

    pub fn move_up(&mut self) {
        self.selected_expense_index = self.selected_expense_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.recent_expenses().len();
        if self.selected_expense_index + 1 < count {
            self.selected_expense_index += 1;
        }
    }

    /// Keep the selection inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let count = self.recent_expenses().len();
        if self.selected_expense_index >= count {
            self.selected_expense_index = count.saturating_sub(1);
        }
    }

    pub fn next_period(&mut self) {
        self.report_period = self.report_period.next();
    }

    pub fn prev_period(&mut self) {
        self.report_period = self.report_period.previous();
    }
}
