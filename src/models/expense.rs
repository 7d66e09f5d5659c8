//! Expense model
//!
//! An expense is an immutable record: once created it can only be deleted.
//! The serialized field names (`amount`, `description`, `categoryId`, `date`,
//! `id`) are the persisted layout shared with existing data files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, CategoryId};
use super::money::Money;

/// Unique identifier of an expense
///
/// Identifiers are opaque strings. New ones are derived from the creation
/// time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wrap an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier derived from a creation instant (milliseconds since epoch)
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp_millis().to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Amount spent (non-negative)
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Category id; unknown ids are reported under "Other"
    #[serde(default, deserialize_with = "lenient_category_id::deserialize")]
    pub category_id: CategoryId,

    /// When the expense happened
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,

    /// Unique identifier
    pub id: ExpenseId,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: ExpenseId,
        amount: Money,
        description: impl Into<String>,
        category_id: CategoryId,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category_id,
            date,
            id,
        }
    }

    /// The category of this expense, resolved with the "Other" fallback
    pub fn category(&self) -> &'static Category {
        Category::by_id(self.category_id)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.id.as_str().is_empty() {
            return Err(ExpenseValidationError::MissingId);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category().name
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    EmptyDescription,
    MissingId,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::MissingId => write!(f, "Expense is missing an id"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
///
/// Reading accepts any RFC 3339 timestamp.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Category ids as other clients have written them
///
/// Integers and numeric strings are taken as ids. Anything else (`null`,
/// negative or fractional numbers, text) becomes the unregistered id 0, which
/// resolves to "Other" instead of failing the whole collection.
pub mod lenient_category_id {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    use crate::models::category::CategoryId;

    const UNRESOLVED: CategoryId = 0;

    struct CategoryIdVisitor;

    impl<'de> Visitor<'de> for CategoryIdVisitor {
        type Value = CategoryId;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a category id")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<CategoryId, E> {
            Ok(CategoryId::try_from(v).unwrap_or(UNRESOLVED))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<CategoryId, E> {
            Ok(CategoryId::try_from(v).unwrap_or(UNRESOLVED))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<CategoryId, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(CategoryId::MAX) {
                Ok(v as CategoryId)
            } else {
                Ok(UNRESOLVED)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<CategoryId, E> {
            Ok(v.trim().parse().unwrap_or(UNRESOLVED))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<CategoryId, E> {
            Ok(UNRESOLVED)
        }

        fn visit_unit<E: de::Error>(self) -> Result<CategoryId, E> {
            Ok(UNRESOLVED)
        }

        fn visit_none<E: de::Error>(self) -> Result<CategoryId, E> {
            Ok(UNRESOLVED)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CategoryId, D::Error> {
        deserializer.deserialize_any(CategoryIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Expense {
        Expense::new(
            ExpenseId::new("1736500000000"),
            Money::from_cents(1250),
            "Lunch",
            1,
            Utc.with_ymd_and_hms(2025, 1, 10, 5, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_id_from_instant() {
        let instant = Utc.timestamp_millis_opt(1736500000123).unwrap();
        assert_eq!(ExpenseId::from_instant(instant).as_str(), "1736500000123");
    }

    #[test]
    fn test_category_resolution() {
        let mut expense = sample();
        assert_eq!(expense.category().name, "Food");

        expense.category_id = 99;
        assert_eq!(expense.category().name, "Other");
    }

    #[test]
    fn test_validation() {
        assert!(sample().validate().is_ok());

        let mut negative = sample();
        negative.amount = Money::from_cents(-1);
        assert!(matches!(
            negative.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));

        let mut blank = sample();
        blank.description = "   ".into();
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyDescription));
    }

    #[test]
    fn test_persisted_layout() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": 12.5,
                "description": "Lunch",
                "categoryId": 1,
                "date": "2025-01-10T05:00:00.000Z",
                "id": "1736500000000"
            })
        );
    }

    #[test]
    fn test_reads_existing_records() {
        let json = r#"{"amount":"30","description":"Taxi","categoryId":99,
                       "date":"2025-01-10T18:45:12.345Z","id":"1736534712345"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount.cents(), 3000);
        assert_eq!(expense.category().name, "Other");
        assert_eq!(expense.date.timestamp_millis(), 1736534712345);
    }

    #[test]
    fn test_loose_category_ids() {
        let read = |category: &str| -> Expense {
            let json = format!(
                r#"{{"amount":5,"description":"Misc","categoryId":{},"date":"2025-01-10T00:00:00Z","id":"1"}}"#,
                category
            );
            serde_json::from_str(&json).unwrap()
        };

        assert_eq!(read(r#""3""#).category().name, "Entertainment");
        assert_eq!(read("2.0").category().name, "Transportation");
        for unresolved in ["null", "-1", "2.5", r#""abc""#, "true", "4294967296"] {
            let expense = read(unresolved);
            assert_eq!(expense.category_id, 0, "{}", unresolved);
            assert!(expense.category().is_other());
        }
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let json = r#"{"amount":5,"description":"Misc","date":"2025-01-10T00:00:00Z","id":"1"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.category_id, 0);
        assert!(expense.category().is_other());
    }
}
