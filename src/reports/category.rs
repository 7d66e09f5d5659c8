//! Category report
//!
//! Spending by category for a selectable period, laid out as a pie chart
//! with a legend.

use chrono::TimeZone;
use svg::Document;

use super::chart::{pie_slices, render_svg, ChartTheme, PieSlice};
use super::summary::{breakdown_total, Aggregator, CategoryTotal};
use crate::display::report::{format_bar, separator};
use crate::models::{Currency, Expense, Money, ReportPeriod};

const WIDTH: usize = 64;

/// The category report view model
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub period: ReportPeriod,
    pub breakdown: Vec<CategoryTotal>,
    pub total: Money,
    pub slices: Vec<PieSlice>,
}

impl CategoryReport {
    /// Build the report for `period`
    pub fn generate<Tz: TimeZone>(
        aggregator: &Aggregator<Tz>,
        expenses: &[Expense],
        period: ReportPeriod,
    ) -> Self {
        let breakdown = aggregator.breakdown_by_category(expenses, period);
        let total = breakdown_total(&breakdown);
        let slices = pie_slices(&breakdown);

        Self {
            period,
            breakdown,
            total,
            slices,
        }
    }

    /// Whether nothing was spent in the period
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Number of categories with spending
    pub fn category_count(&self) -> usize {
        self.breakdown.len()
    }

    /// SVG pie chart for this report
    pub fn to_svg(&self, dark_mode: bool) -> Document {
        render_svg(&self.slices, ChartTheme::for_dark_mode(dark_mode))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let mut output = String::new();

        output.push_str(&format!("📈 Expense Analysis: {}\n", self.period.label()));
        output.push_str(&"═".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total: {}   ({} categories)\n\n",
            currency.format(self.total),
            self.category_count()
        ));

        if self.is_empty() {
            output.push_str("No expenses recorded for this period\n");
            return output;
        }

        output.push_str(&format!("  {:<20}{:>14} {:>8}\n", "Category", "Amount", "Share"));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for slice in &self.slices {
            output.push_str(&format!(
                "  {:<20}{:>14} {:>7.1}%  {}\n",
                slice.category.label(),
                currency.format(slice.amount),
                slice.percentage,
                format_bar(slice.percentage, 100.0, 16)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::{DateTime, Duration, Utc, Weekday};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap()
    }

    fn expenses() -> Vec<Expense> {
        [(1_000, 1, 0), (2_000, 2, 1), (7_000, 3, 2), (9_999, 4, 60)]
            .iter()
            .enumerate()
            .map(|(i, (cents, category, days_ago))| {
                Expense::new(
                    ExpenseId::new(i.to_string()),
                    Money::from_cents(*cents),
                    "item",
                    *category,
                    now() - Duration::days(*days_ago),
                )
            })
            .collect()
    }

    #[test]
    fn test_month_report() {
        let agg = Aggregator::new(now(), Weekday::Sun);
        let report = CategoryReport::generate(&agg, &expenses(), ReportPeriod::Month);

        assert_eq!(report.total, Money::from_cents(10_000));
        assert_eq!(report.category_count(), 3);
        assert!((report.slices[2].span() - 252.0).abs() < 1e-6);

        let text = report.format_terminal(Currency::default_currency());
        assert!(text.contains("This Month"));
        assert!(text.contains("70.0%"));
    }

    #[test]
    fn test_all_time_includes_old_expenses() {
        let agg = Aggregator::new(now(), Weekday::Sun);
        let report = CategoryReport::generate(&agg, &expenses(), ReportPeriod::All);
        assert_eq!(report.category_count(), 4);
        assert_eq!(report.total, Money::from_cents(19_999));
    }

    #[test]
    fn test_empty_period() {
        let agg = Aggregator::new(now(), Weekday::Sun);
        let report = CategoryReport::generate(&agg, &[], ReportPeriod::Day);

        assert!(report.is_empty());
        assert_eq!(report.total, Money::zero());
        let text = report.format_terminal(Currency::default_currency());
        assert!(text.contains("No expenses recorded for this period"));
        assert!(report.to_svg(false).to_string().contains("0 cats"));
    }
}
