//! Application state
//!
//! [`Tracker`] owns the expenses, the budget, the preferences and the
//! settings. The top-level controller (a CLI command or the TUI loop) owns
//! the tracker and hands it to views by reference. Every mutation is written
//! to storage before the in-memory state changes, so what is on screen always
//! matches what is on disk.

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::config::{Settings, TrackerPaths};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Currency, Expense, ExpenseId, Money, Page, Preferences, ReportPeriod};
use crate::reports::{Aggregator, CategoryReport, DashboardReport};
use crate::services::ExpenseForm;
use crate::storage::{ExpenseStore, Storage};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The record was removed
    Deleted(Expense),
    /// The confirmation was declined; nothing changed
    Cancelled,
    /// No record has that id; nothing changed
    NotFound,
}

/// The expense tracker state container
pub struct Tracker {
    storage: Storage,
    settings: Settings,
    expenses: ExpenseStore,
    budget: Money,
    preferences: Preferences,
}

impl Tracker {
    /// Open the tracker over the data directory
    pub fn open(paths: &TrackerPaths) -> ExpenseResult<Self> {
        let settings = Settings::load_or_create(paths)?;
        let storage = Storage::open(paths)?;
        Self::with_storage(storage, settings)
    }

    /// Tracker over an already opened storage
    pub fn with_storage(storage: Storage, settings: Settings) -> ExpenseResult<Self> {
        let state = storage.load_state()?;
        Ok(Self {
            storage,
            settings,
            expenses: state.expenses,
            budget: state.budget,
            preferences: state.preferences,
        })
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.expenses
    }

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The active display currency
    pub fn currency(&self) -> &'static Currency {
        self.preferences.currency()
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }

    pub fn active_page(&self) -> Page {
        self.preferences.active_page
    }

    /// Format an amount in the active currency
    pub fn format_amount(&self, amount: Money) -> String {
        self.currency().format(amount)
    }

    /// Aggregator for the current local time and configured week start
    pub fn aggregator(&self) -> Aggregator<Local> {
        Aggregator::local(self.settings.week_start())
    }

    /// Dashboard for the current time
    pub fn dashboard(&self) -> DashboardReport {
        self.dashboard_with(&self.aggregator())
    }

    pub fn dashboard_with<Tz: TimeZone>(&self, aggregator: &Aggregator<Tz>) -> DashboardReport {
        DashboardReport::generate(
            aggregator,
            &self.expenses,
            self.budget,
            self.settings.recent_limit,
        )
    }

    /// Category report for the current time
    pub fn category_report(&self, period: ReportPeriod) -> CategoryReport {
        CategoryReport::generate(&self.aggregator(), self.expenses.as_slice(), period)
    }

    /// Expenses inside `period`, newest first, at most `limit` of them
    pub fn list_expenses(&self, period: ReportPeriod, limit: Option<usize>) -> Vec<&Expense> {
        let bound = self.aggregator().lower_bound(period);
        self.expenses
            .sorted_by_date_desc()
            .into_iter()
            .filter(|e| bound.map_or(true, |b| e.date >= b))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Validate a form and store the new expense
    pub fn add_expense(&mut self, form: &ExpenseForm) -> ExpenseResult<Expense> {
        self.add_expense_at(form, &Local::now())
    }

    /// Validate a form and store the new expense, created at `now`
    pub fn add_expense_at<Tz: TimeZone>(
        &mut self,
        form: &ExpenseForm,
        now: &DateTime<Tz>,
    ) -> ExpenseResult<Expense> {
        let expense = form.build(now, &self.expenses)?;
        let updated = self.expenses.clone().append(expense.clone());
        self.storage.save_expenses(&updated)?;
        self.expenses = updated;

        info!(id = %expense.id, amount = %expense.amount, category = expense.category().name, "added expense");
        Ok(expense)
    }

    /// Delete an expense after confirmation
    ///
    /// `confirm` is only asked when the record exists.
    pub fn delete_expense<F>(&mut self, id: &ExpenseId, confirm: F) -> ExpenseResult<DeleteOutcome>
    where
        F: FnOnce(&Expense) -> bool,
    {
        let Some(expense) = self.expenses.get(id).cloned() else {
            return Ok(DeleteOutcome::NotFound);
        };

        if !confirm(&expense) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let updated = self.expenses.clone().remove(id);
        self.storage.save_expenses(&updated)?;
        self.expenses = updated;

        info!(id = %expense.id, "deleted expense");
        Ok(DeleteOutcome::Deleted(expense))
    }

    /// Set the monthly budget
    pub fn set_budget(&mut self, amount: Money) -> ExpenseResult<()> {
        if amount.is_negative() {
            return Err(ExpenseError::Validation("Budget cannot be negative".into()));
        }
        if amount > Money::MAX {
            return Err(ExpenseError::Validation(format!(
                "Budget cannot exceed {}",
                self.format_amount(Money::MAX)
            )));
        }
        self.storage.save_budget(amount)?;
        self.budget = amount;
        info!(budget = %amount, "budget updated");
        Ok(())
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> ExpenseResult<()> {
        self.storage.save_dark_mode(dark_mode)?;
        self.preferences.dark_mode = dark_mode;
        info!(dark_mode, "theme updated");
        Ok(())
    }

    /// Flip dark mode, returning the new value
    pub fn toggle_dark_mode(&mut self) -> ExpenseResult<bool> {
        let dark_mode = !self.preferences.dark_mode;
        self.set_dark_mode(dark_mode)?;
        Ok(dark_mode)
    }

    /// Select a display currency from the catalog
    pub fn set_currency(&mut self, code: &str) -> ExpenseResult<&'static Currency> {
        let currency =
            Currency::find(code).ok_or_else(|| ExpenseError::currency_not_found(code.trim()))?;
        self.storage.save_currency(currency.code)?;
        self.preferences.currency = currency.code.to_string();
        info!(currency = currency.code, "currency updated");
        Ok(currency)
    }

    /// Switch to the next currency in the catalog
    pub fn cycle_currency(&mut self) -> ExpenseResult<&'static Currency> {
        let next = self.currency().next();
        self.set_currency(next.code)
    }

    pub fn set_active_page(&mut self, page: Page) -> ExpenseResult<()> {
        self.storage.save_active_page(page)?;
        self.preferences.active_page = page;
        Ok(())
    }
}
