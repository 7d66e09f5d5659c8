//! Application preferences
//!
//! Dark mode, display currency, and the page the interactive UI shows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::{Currency, DEFAULT_CURRENCY};

/// Top-level pages of the interactive UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Dashboard,
    Reports,
}

impl Page {
    /// All pages in navigation order
    pub fn all() -> &'static [Page] {
        &[Page::Dashboard, Page::Reports]
    }

    /// Page identifier as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Reports => "reports",
        }
    }

    /// Title shown in navigation
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "📊 Dashboard",
            Page::Reports => "📈 Reports",
        }
    }

    /// Parse a page identifier
    pub fn parse(s: &str) -> Option<Page> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Some(Page::Dashboard),
            "reports" => Some(Page::Reports),
            _ => None,
        }
    }

    /// The other page
    pub fn toggle(&self) -> Page {
        match self {
            Page::Dashboard => Page::Reports,
            Page::Reports => Page::Dashboard,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences, persisted on every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Dark color theme
    pub dark_mode: bool,
    /// ISO code of the display currency
    pub currency: String,
    /// Page shown when the interactive UI opens
    pub active_page: Page,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            currency: DEFAULT_CURRENCY.to_string(),
            active_page: Page::default(),
        }
    }
}

impl Preferences {
    /// The active currency, defaulting to USD for codes outside the catalog
    pub fn currency(&self) -> &'static Currency {
        Currency::find(&self.currency).unwrap_or_else(Currency::default_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.currency, "USD");
        assert_eq!(prefs.active_page, Page::Dashboard);
    }

    #[test]
    fn test_page_parse() {
        assert_eq!(Page::parse("Reports"), Some(Page::Reports));
        assert_eq!(Page::parse("dashboard"), Some(Page::Dashboard));
        assert_eq!(Page::parse("settings"), None);
        assert_eq!(Page::Dashboard.toggle(), Page::Reports);
    }

    #[test]
    fn test_currency_resolution() {
        let mut prefs = Preferences::default();
        prefs.currency = "GBP".into();
        assert_eq!(prefs.currency().symbol, "£");

        prefs.currency = "???".into();
        assert_eq!(prefs.currency().code, "USD");
    }
}
