//! Currency catalog and amount formatting
//!
//! Only display symbols are mapped; amounts are never converted between
//! currencies. Formatting follows the en-US conventions (grouping commas,
//! leading symbol, leading minus sign).

use serde::Serialize;
use std::fmt;

use super::money::Money;

/// A supported display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Currency {
    /// ISO 4217 code
    pub code: &'static str,
    /// Catalog symbol
    pub symbol: &'static str,
    /// Display name
    pub name: &'static str,
    /// Prefix used when formatting amounts (disambiguated for shared symbols)
    #[serde(skip)]
    format_prefix: &'static str,
    /// Number of minor-unit digits shown when formatting
    #[serde(skip)]
    minor_digits: u8,
}

/// The currency catalog
pub const CURRENCIES: [Currency; 8] = [
    Currency {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
        format_prefix: "$",
        minor_digits: 2,
    },
    Currency {
        code: "EUR",
        symbol: "€",
        name: "Euro",
        format_prefix: "€",
        minor_digits: 2,
    },
    Currency {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
        format_prefix: "£",
        minor_digits: 2,
    },
    Currency {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
        format_prefix: "¥",
        minor_digits: 0,
    },
    Currency {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
        format_prefix: "CA$",
        minor_digits: 2,
    },
    Currency {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
        format_prefix: "A$",
        minor_digits: 2,
    },
    Currency {
        code: "CNY",
        symbol: "¥",
        name: "Chinese Yuan",
        format_prefix: "CN¥",
        minor_digits: 2,
    },
    Currency {
        code: "INR",
        symbol: "₹",
        name: "Indian Rupee",
        format_prefix: "₹",
        minor_digits: 2,
    },
];

/// Currency used when nothing has been chosen yet
pub const DEFAULT_CURRENCY: &str = "USD";

/// Symbol returned for codes missing from the catalog
pub const FALLBACK_SYMBOL: &str = "$";

impl Currency {
    /// All supported currencies
    pub fn all() -> &'static [Currency] {
        &CURRENCIES
    }

    /// Find a currency by ISO code (case-insensitive)
    pub fn find(code: &str) -> Option<&'static Currency> {
        let code = code.trim();
        CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// The default currency (USD)
    pub fn default_currency() -> &'static Currency {
        &CURRENCIES[0]
    }

    /// The next currency in catalog order, wrapping around
    pub fn next(&self) -> &'static Currency {
        let index = CURRENCIES
            .iter()
            .position(|c| c.code == self.code)
            .unwrap_or(0);
        &CURRENCIES[(index + 1) % CURRENCIES.len()]
    }

    /// Format an amount in this currency
    ///
    /// ```
    /// use expense_tracker::models::{Currency, Money};
    /// let usd = Currency::find("USD").unwrap();
    /// assert_eq!(usd.format(Money::from_cents(123456)), "$1,234.56");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let negative = amount.is_negative();
        let cents = amount.cents().unsigned_abs();

        let body = if self.minor_digits == 0 {
            // Round half away from zero to whole units
            group_thousands((cents + 50) / 100)
        } else {
            format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
        };

        if negative && cents != 0 {
            format!("-{}{}", self.format_prefix, body)
        } else {
            format!("{}{}", self.format_prefix, body)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

/// Look up the display symbol for a currency code, falling back to `$`
pub fn currency_symbol(code: &str) -> &'static str {
    Currency::find(code)
        .map(|c| c.symbol)
        .unwrap_or(FALLBACK_SYMBOL)
}

/// Format an amount for a currency code; unknown codes format as USD
pub fn format_amount(amount: Money, code: &str) -> String {
    Currency::find(code)
        .unwrap_or_else(Currency::default_currency)
        .format(amount)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
