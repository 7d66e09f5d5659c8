//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that sums over many expenses
//! are exact. On the wire an amount is a plain JSON number in major units
//! (`50`, `12.5`), which is the format the persisted store has always used.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Largest magnitude accepted from input: one trillion major units
const MAX_CENTS: i64 = 100_000_000_000_000;

impl Money {
    /// Largest amount accepted from user input or the persisted store
    pub const MAX: Money = Money(MAX_CENTS);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_decimal_string(), "10.5");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_major_minor(major: i64, cents: i64) -> Self {
        Self(major * 100 + cents)
    }

    /// Create a Money amount from a floating-point major-unit value
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` for
    /// NaN, infinite, or out-of-range input.
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Whether the magnitude is within [`Money::MAX`]
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -MAX_CENTS && self.0 <= MAX_CENTS
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a floating-point major-unit value
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// This amount as a percentage of `total`
    ///
    /// Returns `None` when `total` is zero instead of producing a non-finite value.
    pub fn percentage_of(&self, total: Money) -> Option<f64> {
        if total.is_zero() {
            None
        } else {
            Some(self.0 as f64 / total.0 as f64 * 100.0)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", ".5", "1,250.00".
    /// Extra fraction digits round half away from zero, like [`Money::from_major`].
    /// Magnitudes above [`Money::MAX`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let s: String = s.chars().filter(|c| *c != ',').collect();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = if let Some((whole, fraction)) = s.split_once('.') {
            if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
                return Err(invalid());
            }

            let whole: i64 = if whole.is_empty() {
                0
            } else {
                parse_digits(whole).ok_or_else(invalid)?
            };

            let fraction_cents: i64 = match fraction.len() {
                0 => 0,
                1 => parse_digits(fraction).ok_or_else(invalid)? * 10,
                _ => {
                    if !fraction.chars().all(|c| c.is_ascii_digit()) {
                        return Err(invalid());
                    }
                    let digits = parse_digits(&fraction[..2]).ok_or_else(invalid)?;
                    let round_up = fraction.as_bytes()[2] >= b'5';
                    digits + i64::from(round_up)
                }
            };

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(fraction_cents))
                .ok_or_else(invalid)?
        } else {
            parse_digits(&s)
                .and_then(|whole| whole.checked_mul(100))
                .ok_or_else(invalid)?
        };

        if cents > MAX_CENTS {
            return Err(MoneyParseError::OutOfRange(original.trim().to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Shortest decimal representation in major units
    ///
    /// `2000` for whole amounts, `1500.5` or `12.05` otherwise. This is the
    /// format used for the persisted budget value.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let major = self.major().abs();
        let minor = self.minor_part();
        if minor == 0 {
            format!("{}{}", sign, major)
        } else if minor % 10 == 0 {
            format!("{}{}.{}", sign, major, minor / 10)
        } else {
            format!("{}{}.{:02}", sign, major, minor)
        }
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() {
        return Some(0);
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.minor_part() == 0 {
            serializer.serialize_i64(self.major())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .filter(Money::is_within_limit)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .filter(Money::is_within_limit)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_major(v).ok_or_else(|| E::custom(format!("invalid amount: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// Arithmetic saturates at the i64 bounds so large totals never wrap sign.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount is too large: {} (maximum {})", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(12.5), Some(Money::from_cents(1250)));
        assert_eq!(Money::from_major(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("1,250.00").unwrap().cents(), 125000);
        assert_eq!(Money::parse(" 7 ").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12.3x").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1e3").is_err());
        assert!(Money::parse("1.23x").is_err());
    }

    #[test]
    fn test_parse_rounds_extra_fraction_digits() {
        assert_eq!(Money::parse("19.999").unwrap().cents(), 2000);
        assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse("-0.125").unwrap().cents(), -13);
    }

    #[test]
    fn test_string_and_number_forms_agree() {
        for raw in ["0.125", "19.999", "12.5", "3.14159"] {
            let from_string: Money = serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
            let from_number: Money = serde_json::from_str(raw).unwrap();
            assert_eq!(from_string, from_number, "{}", raw);
        }
    }

    #[test]
    fn test_amount_ceiling() {
        assert_eq!(Money::parse("1000000000000").unwrap(), Money::MAX);
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(Money::parse("1000000000000.01").is_err());
        assert_eq!(Money::from_major(1e13), None);
        assert!(serde_json::from_str::<Money>("90000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("\"90000000000000000\"").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!((huge + huge).cents(), i64::MAX);
        let total: Money = [huge, huge, Money::MAX].iter().sum();
        assert!(total.is_positive());
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(200000).to_decimal_string(), "2000");
        assert_eq!(Money::from_cents(150050).to_decimal_string(), "1500.5");
        assert_eq!(Money::from_cents(1205).to_decimal_string(), "12.05");
        assert_eq!(Money::from_cents(-350).to_decimal_string(), "-3.5");
    }

    #[test]
    fn test_percentage_of() {
        let part = Money::from_cents(2500);
        assert_eq!(part.percentage_of(Money::from_cents(10000)), Some(25.0));
        assert_eq!(part.percentage_of(Money::zero()), None);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Money::from_cents(5000)).unwrap(), "50");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_deserialization_accepts_numbers_and_strings() {
        let m: Money = serde_json::from_str("50").unwrap();
        assert_eq!(m.cents(), 5000);
        let m: Money = serde_json::from_str("12.34").unwrap();
        assert_eq!(m.cents(), 1234);
        let m: Money = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(m.cents(), 1999);
        assert!(serde_json::from_str::<Money>("\"lots\"").is_err());
    }
}
