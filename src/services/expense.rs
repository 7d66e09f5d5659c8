//! Expense form service
//!
//! Turns raw form input into a validated [`Expense`] with a fresh identifier
//! and timestamp. Nothing is created when validation fails.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::period::local_midnight;
use crate::models::{CategoryId, Expense, Money, MoneyParseError, DEFAULT_CATEGORY_ID};
use crate::storage::ExpenseStore;

/// Message shown when a required field is blank
pub const MISSING_FIELDS: &str = "Please fill in all fields";

/// Format accepted for the optional date field
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Raw input for a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    pub category_id: CategoryId,
    /// Optional `YYYY-MM-DD`; the expense is dated at local midnight of that day
    pub date: Option<String>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category_id: DEFAULT_CATEGORY_ID,
            date: None,
        }
    }
}

impl ExpenseForm {
    pub fn new(amount: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the date; blank input means "now"
    pub fn date(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        self.date = if date.trim().is_empty() { None } else { Some(date) };
        self
    }

    /// Validated amount
    pub fn parse_amount(&self) -> ExpenseResult<Money> {
        let amount = Money::parse(&self.amount).map_err(|e| match e {
            MoneyParseError::OutOfRange(_) => ExpenseError::Validation(e.to_string()),
            MoneyParseError::InvalidFormat(_) => {
                ExpenseError::Validation(format!("Invalid amount: {}", self.amount.trim()))
            }
        })?;
        if amount.is_negative() {
            return Err(ExpenseError::Validation("Amount cannot be negative".into()));
        }
        Ok(amount)
    }

    /// Validated date, if one was given
    pub fn parse_date(&self) -> ExpenseResult<Option<NaiveDate>> {
        match &self.date {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT)
                .map(Some)
                .map_err(|_| {
                    ExpenseError::Validation(format!(
                        "Invalid date '{}': expected YYYY-MM-DD",
                        raw.trim()
                    ))
                }),
        }
    }

    /// Validate the form and build the expense
    ///
    /// The identifier is derived from `now` and made unique against
    /// `existing`.
    pub fn build<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        existing: &ExpenseStore,
    ) -> ExpenseResult<Expense> {
        if self.amount.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ExpenseError::Validation(MISSING_FIELDS.into()));
        }

        let amount = self.parse_amount()?;
        let now_utc = now.with_timezone(&Utc);
        let date = match self.parse_date()? {
            Some(day) => local_midnight(now, day),
            None => now_utc,
        };

        Ok(Expense::new(
            existing.next_id(now_utc),
            amount,
            self.description.trim(),
            self.category_id,
            date,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_build_valid_expense() {
        let expense = ExpenseForm::new("12.50", "  Lunch ")
            .category(3)
            .build(&now(), &ExpenseStore::new())
            .unwrap();

        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category_id, 3);
        assert_eq!(expense.date, now());
        assert_eq!(expense.id.as_str(), now().timestamp_millis().to_string());
    }

    #[test]
    fn test_default_category_is_food() {
        let expense = ExpenseForm::new("5", "Snack")
            .build(&now(), &ExpenseStore::new())
            .unwrap();
        assert_eq!(expense.category().name, "Food");
    }

    #[test]
    fn test_missing_fields() {
        for form in [ExpenseForm::new("", "Lunch"), ExpenseForm::new("10", "   ")] {
            let err = form.build(&now(), &ExpenseStore::new()).unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains(MISSING_FIELDS));
        }
    }

    #[test]
    fn test_invalid_and_negative_amounts() {
        let err = ExpenseForm::new("ten", "Lunch")
            .build(&now(), &ExpenseStore::new())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));

        let err = ExpenseForm::new("-3", "Lunch")
            .build(&now(), &ExpenseStore::new())
            .unwrap_err();
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let err = ExpenseForm::new("90000000000000000", "Yacht")
            .build(&now(), &ExpenseStore::new())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_extra_fraction_digits_round() {
        let expense = ExpenseForm::new("19.999", "Book")
            .build(&now(), &ExpenseStore::new())
            .unwrap();
        assert_eq!(expense.amount, Money::from_cents(2000));
    }

    #[test]
    fn test_explicit_date_is_local_midnight() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let local_now = offset.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();

        let expense = ExpenseForm::new("20", "Books")
            .date("2025-01-10")
            .build(&local_now, &ExpenseStore::new())
            .unwrap();

        assert_eq!(expense.date, Utc.with_ymd_and_hms(2025, 1, 10, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = ExpenseForm::new("20", "Books")
            .date("10/01/2025")
            .build(&now(), &ExpenseStore::new())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_blank_date_means_now() {
        let form = ExpenseForm::new("1", "Gum").date("  ");
        assert_eq!(form.date, None);
    }
}
