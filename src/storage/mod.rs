//! Storage layer for the expense tracker
//!
//! Maps the persisted key layout (`expenses`, `budget`, `darkMode`,
//! `currency`, `activePage`) onto typed state. Values that are missing fall
//! back to defaults. A corrupt `expenses` value is an error so user data is
//! never silently replaced; the other keys fall back with a warning.

pub mod expenses;
pub mod file_io;
pub mod kv;

pub use expenses::ExpenseStore;
pub use file_io::{json_file_valid, read_json, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use tracing::{debug, warn};

use crate::config::paths::TrackerPaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Currency, Expense, Money, Page, Preferences, DEFAULT_CURRENCY};
use kv::{KEY_ACTIVE_PAGE, KEY_BUDGET, KEY_CURRENCY, KEY_DARK_MODE, KEY_EXPENSES};

/// Monthly budget used when none has been stored
pub const DEFAULT_BUDGET: Money = Money::from_cents(200_000);

/// Everything read from the store at startup
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    pub expenses: ExpenseStore,
    pub budget: Money,
    pub preferences: Preferences,
}

impl Default for LoadedState {
    fn default() -> Self {
        Self {
            expenses: ExpenseStore::new(),
            budget: DEFAULT_BUDGET,
            preferences: Preferences::default(),
        }
    }
}

/// Storage coordinator over a key-value backend
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Open the file-backed store in the data directory
    pub fn open(paths: &TrackerPaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        let store = FileStore::open(paths.store_file())?;
        Ok(Self::with_store(Box::new(store)))
    }

    /// Storage over an arbitrary backend
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Storage that keeps nothing on disk
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Read all tracked state
    pub fn load_state(&self) -> ExpenseResult<LoadedState> {
        Ok(LoadedState {
            expenses: self.load_expenses()?,
            budget: self.load_budget()?,
            preferences: self.load_preferences()?,
        })
    }

    /// Read the expense collection
    ///
    /// Records with a negative amount are skipped.
    pub fn load_expenses(&self) -> ExpenseResult<ExpenseStore> {
        let Some(raw) = self.store.get(KEY_EXPENSES)? else {
            return Ok(ExpenseStore::new());
        };

        let records: Vec<Expense> = serde_json::from_str(&raw).map_err(|e| {
            ExpenseError::Storage(format!("Stored expenses could not be read: {}", e))
        })?;

        let total = records.len();
        let store: ExpenseStore = records
            .into_iter()
            .filter(|expense| {
                if expense.amount.is_negative() {
                    warn!(id = %expense.id, amount = %expense.amount, "skipping stored expense with negative amount");
                    false
                } else {
                    true
                }
            })
            .collect();

        debug!(loaded = store.len(), stored = total, "loaded expenses");
        Ok(store)
    }

    /// Read the monthly budget
    pub fn load_budget(&self) -> ExpenseResult<Money> {
        let Some(raw) = self.store.get(KEY_BUDGET)? else {
            return Ok(DEFAULT_BUDGET);
        };

        match Money::parse(&raw) {
            Ok(budget) if !budget.is_negative() => Ok(budget),
            _ => {
                warn!(value = %raw, "stored budget is not a valid amount, using default");
                Ok(DEFAULT_BUDGET)
            }
        }
    }

    /// Read dark mode, currency and active page
    pub fn load_preferences(&self) -> ExpenseResult<Preferences> {
        let dark_mode = self.store.get(KEY_DARK_MODE)?.as_deref() == Some("true");

        let currency = match self.store.get(KEY_CURRENCY)? {
            None => DEFAULT_CURRENCY.to_string(),
            Some(code) => match Currency::find(&code) {
                Some(currency) => currency.code.to_string(),
                None => {
                    warn!(code = %code, "stored currency is not in the catalog, using USD");
                    DEFAULT_CURRENCY.to_string()
                }
            },
        };

        let active_page = match self.store.get(KEY_ACTIVE_PAGE)? {
            None => Page::default(),
            Some(raw) => Page::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "stored page is unknown, using dashboard");
                Page::default()
            }),
        };

        Ok(Preferences {
            dark_mode,
            currency,
            active_page,
        })
    }

    /// Persist the expense collection
    pub fn save_expenses(&mut self, expenses: &ExpenseStore) -> ExpenseResult<()> {
        let raw = serde_json::to_string(expenses.as_slice())?;
        self.store.set(KEY_EXPENSES, raw)?;
        debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }

    /// Persist the monthly budget
    pub fn save_budget(&mut self, budget: Money) -> ExpenseResult<()> {
        self.store.set(KEY_BUDGET, budget.to_decimal_string())
    }

    pub fn save_dark_mode(&mut self, dark_mode: bool) -> ExpenseResult<()> {
        self.store.set(KEY_DARK_MODE, dark_mode.to_string())
    }

    pub fn save_currency(&mut self, code: &str) -> ExpenseResult<()> {
        self.store.set(KEY_CURRENCY, code.to_string())
    }

    pub fn save_active_page(&mut self, page: Page) -> ExpenseResult<()> {
        self.store.set(KEY_ACTIVE_PAGE, page.as_str().to_string())
    }

    /// Persist every preference key
    pub fn save_preferences(&mut self, preferences: &Preferences) -> ExpenseResult<()> {
        self.save_dark_mode(preferences.dark_mode)?;
        self.save_currency(&preferences.currency)?;
        self.save_active_page(preferences.active_page)
    }

    /// Raw value under a key, for diagnostics
    pub fn raw(&self, key: &str) -> ExpenseResult<Option<String>> {
        self.store.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn memory(entries: &[(&str, &str)]) -> Storage {
        Storage::with_store(Box::new(MemoryStore::with_entries(
            entries.iter().map(|(k, v)| (*k, *v)),
        )))
    }

    #[test]
    fn test_empty_store_defaults() {
        let state = Storage::in_memory().load_state().unwrap();
        assert!(state.expenses.is_empty());
        assert_eq!(state.budget, Money::from_cents(200_000));
        assert!(!state.preferences.dark_mode);
        assert_eq!(state.preferences.currency, "USD");
        assert_eq!(state.preferences.active_page, Page::Dashboard);
    }

    #[test]
    fn test_reads_persisted_layout() {
        let storage = memory(&[
            (
                "expenses",
                r#"[{"amount":12.5,"description":"Lunch","categoryId":1,"date":"2025-01-10T05:00:00.000Z","id":"1736485200000"}]"#,
            ),
            ("budget", "1500.5"),
            ("darkMode", "true"),
            ("currency", "EUR"),
        ]);

        let state = storage.load_state().unwrap();
        assert_eq!(state.expenses.len(), 1);
        assert_eq!(state.expenses.as_slice()[0].amount, Money::from_cents(1250));
        assert_eq!(state.budget, Money::from_cents(150_050));
        assert!(state.preferences.dark_mode);
        assert_eq!(state.preferences.currency, "EUR");
    }

    #[test]
    fn test_dark_mode_only_for_exact_true() {
        for value in ["TRUE", "1", "yes", "false", ""] {
            let prefs = memory(&[("darkMode", value)]).load_preferences().unwrap();
            assert!(!prefs.dark_mode, "{:?} should not enable dark mode", value);
        }
    }

    #[test]
    fn test_bad_budget_and_currency_fall_back() {
        let storage = memory(&[("budget", "lots"), ("currency", "XYZ"), ("activePage", "x")]);
        let state = storage.load_state().unwrap();
        assert_eq!(state.budget, DEFAULT_BUDGET);
        assert_eq!(state.preferences.currency, "USD");
        assert_eq!(state.preferences.active_page, Page::Dashboard);

        let negative = memory(&[("budget", "-5")]);
        assert_eq!(negative.load_budget().unwrap(), DEFAULT_BUDGET);
    }

    #[test]
    fn test_corrupt_expenses_is_error() {
        let storage = memory(&[("expenses", "not json")]);
        let err = storage.load_expenses().unwrap_err();
        assert!(matches!(err, ExpenseError::Storage(_)));
    }

    #[test]
    fn test_negative_records_skipped() {
        let storage = memory(&[(
            "expenses",
            r#"[{"amount":-3,"description":"refund","categoryId":1,"date":"2025-01-10T05:00:00.000Z","id":"1"},
                {"amount":"7.25","description":"book","categoryId":7,"date":"2025-01-10T05:00:00.000Z","id":"2"}]"#,
        )]);

        let expenses = storage.load_expenses().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses.as_slice()[0].id.as_str(), "2");
        assert_eq!(expenses.as_slice()[0].amount, Money::from_cents(725));
    }

    #[test]
    fn test_unreadable_category_ids_fall_back_to_other() {
        let storage = memory(&[(
            "expenses",
            r#"[{"amount":4,"description":"a","categoryId":null,"date":"2025-01-10T05:00:00.000Z","id":"1"},
                {"amount":5,"description":"b","categoryId":-1,"date":"2025-01-10T05:00:00.000Z","id":"2"},
                {"amount":6,"description":"c","categoryId":"3","date":"2025-01-10T05:00:00.000Z","id":"3"}]"#,
        )]);

        let expenses = storage.load_expenses().unwrap();
        assert_eq!(expenses.len(), 3);
        let names: Vec<&str> = expenses.iter().map(|e| e.category().name).collect();
        assert_eq!(names, vec!["Other", "Other", "Entertainment"]);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let expense = Expense::new(
            ExpenseId::new("1736485200000"),
            Money::from_cents(5000),
            "Groceries",
            1,
            Utc.with_ymd_and_hms(2025, 1, 10, 5, 0, 0).unwrap(),
        );
        let expenses = ExpenseStore::new().append(expense);

        {
            let mut storage = Storage::open(&paths).unwrap();
            storage.save_expenses(&expenses).unwrap();
            storage.save_budget(Money::from_cents(150_000)).unwrap();
            storage
                .save_preferences(&Preferences {
                    dark_mode: true,
                    currency: "GBP".into(),
                    active_page: Page::Reports,
                })
                .unwrap();
        }

        let storage = Storage::open(&paths).unwrap();
        assert_eq!(storage.raw("budget").unwrap().as_deref(), Some("1500"));
        assert_eq!(storage.raw("darkMode").unwrap().as_deref(), Some("true"));

        let state = storage.load_state().unwrap();
        assert_eq!(state.expenses, expenses);
        assert_eq!(state.budget, Money::from_cents(150_000));
        assert_eq!(state.preferences.currency, "GBP");
        assert_eq!(state.preferences.active_page, Page::Reports);
    }
}
