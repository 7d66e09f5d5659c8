//! Catalog formatting: categories and currencies

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, Currency};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Icon")]
    icon: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Color")]
    color: &'static str,
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
}

/// Format the category registry
pub fn format_category_list(categories: &[Category]) -> String {
    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id,
        icon: c.icon,
        name: c.name,
        color: c.color,
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format the currency catalog, marking the active one
pub fn format_currency_list(currencies: &[Currency], active: &Currency) -> String {
    let rows = currencies.iter().map(|c| CurrencyRow {
        active: if c.code == active.code { "*" } else { "" },
        code: c.code,
        symbol: c.symbol,
        name: c.name,
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
