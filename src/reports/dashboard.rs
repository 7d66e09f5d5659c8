//! Dashboard report
//!
//! Everything the dashboard page shows: budget status for the current month,
//! period summary cards, this month's spending by category and the most
//! recent expenses.

use chrono::{Local, TimeZone};

use super::summary::{breakdown_total, Aggregator, CategoryTotal};
use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::models::{Category, Currency, Expense, Money, ReportPeriod};
use crate::storage::ExpenseStore;

/// Percentage above which the budget is flagged as nearly spent
pub const WARNING_THRESHOLD: f64 = 75.0;
/// Percentage above which the budget is flagged as critical
pub const DANGER_THRESHOLD: f64 = 90.0;

const WIDTH: usize = 64;

/// How close spending is to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    Healthy,
    Warning,
    Danger,
}

impl BudgetHealth {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "On track",
            Self::Warning => "Approaching limit",
            Self::Danger => "Over 90% of budget",
        }
    }
}

/// Budget overview for the current month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spending; negative once overspent
    pub remaining: Money,
    /// Spending as a percentage of the budget, absent for a zero budget
    pub percentage_used: Option<f64>,
    pub health: BudgetHealth,
}

impl BudgetStatus {
    pub fn new(budget: Money, spent: Money) -> Self {
        let percentage_used = spent.percentage_of(budget);
        let health = match percentage_used {
            Some(pct) if pct > DANGER_THRESHOLD => BudgetHealth::Danger,
            Some(pct) if pct > WARNING_THRESHOLD => BudgetHealth::Warning,
            Some(_) => BudgetHealth::Healthy,
            None if spent.is_positive() => BudgetHealth::Danger,
            None => BudgetHealth::Healthy,
        };

        Self {
            budget,
            spent,
            remaining: budget - spent,
            percentage_used,
            health,
        }
    }

    /// Fill ratio of the progress bar, clamped to [0, 1]
    pub fn bar_ratio(&self) -> f64 {
        match self.percentage_used {
            Some(pct) => (pct / 100.0).clamp(0.0, 1.0),
            None if self.spent.is_positive() => 1.0,
            None => 0.0,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Totals for the summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    pub today: Money,
    pub week: Money,
    pub month: Money,
    pub all_time: Money,
}

impl PeriodTotals {
    pub fn get(&self, period: ReportPeriod) -> Money {
        match period {
            ReportPeriod::Day => self.today,
            ReportPeriod::Week => self.week,
            ReportPeriod::Month => self.month,
            ReportPeriod::All => self.all_time,
        }
    }
}

/// A category's spending with its share of the period total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    pub category: &'static Category,
    pub amount: Money,
    /// Share of the period total, 0 when the total is zero
    pub share: f64,
}

impl CategoryShare {
    /// Shares for a breakdown
    pub fn from_breakdown(breakdown: &[CategoryTotal]) -> Vec<CategoryShare> {
        let total = breakdown_total(breakdown);
        breakdown
            .iter()
            .map(|entry| CategoryShare {
                category: entry.category,
                amount: entry.amount,
                share: entry.amount.percentage_of(total).unwrap_or(0.0),
            })
            .collect()
    }
}

/// The dashboard view model
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub budget: BudgetStatus,
    pub totals: PeriodTotals,
    /// Spending by category for the current month
    pub month_breakdown: Vec<CategoryShare>,
    /// Newest expenses first
    pub recent: Vec<Expense>,
    pub expense_count: usize,
}

impl DashboardReport {
    /// Build the dashboard
    pub fn generate<Tz: TimeZone>(
        aggregator: &Aggregator<Tz>,
        expenses: &ExpenseStore,
        budget: Money,
        recent_limit: usize,
    ) -> Self {
        let all = expenses.as_slice();
        let totals = PeriodTotals {
            today: aggregator.total_for_period(all, ReportPeriod::Day),
            week: aggregator.total_for_period(all, ReportPeriod::Week),
            month: aggregator.total_for_period(all, ReportPeriod::Month),
            all_time: aggregator.total_for_period(all, ReportPeriod::All),
        };

        let month_breakdown =
            CategoryShare::from_breakdown(&aggregator.breakdown_by_category(all, ReportPeriod::Month));

        let recent = expenses
            .sorted_by_date_desc()
            .into_iter()
            .take(recent_limit)
            .cloned()
            .collect();

        Self {
            budget: BudgetStatus::new(budget, totals.month),
            totals,
            month_breakdown,
            recent,
            expense_count: expenses.len(),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency: &Currency, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str("💰 Expense Tracker\n");
        output.push_str(&"═".repeat(WIDTH));
        output.push_str("\n\n");

        output.push_str("Monthly Budget\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("  {:<12}{:>16}\n", "Budget:", currency.format(self.budget.budget)));
        output.push_str(&format!("  {:<12}{:>16}\n", "Spent:", currency.format(self.budget.spent)));
        output.push_str(&format!(
            "  {:<12}{:>16}\n",
            "Remaining:",
            currency.format(self.budget.remaining)
        ));
        let used = match self.budget.percentage_used {
            Some(pct) => format!("{} used", format_percentage(pct)),
            None => "no budget set".to_string(),
        };
        output.push_str(&format!(
            "  [{}] {} ({})\n\n",
            format_bar(self.budget.bar_ratio(), 1.0, 30),
            used,
            self.budget.health.label()
        ));

        output.push_str("Expense Summary\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for period in ReportPeriod::all() {
            output.push_str(&format!(
                "  {:<12}{:>16}\n",
                period.label(),
                currency.format(self.totals.get(*period))
            ));
        }
        output.push('\n');

        output.push_str("Spending by Category (This Month)\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        if self.month_breakdown.is_empty() {
            output.push_str("  No expenses recorded this month\n");
        }
        for entry in &self.month_breakdown {
            output.push_str(&format!(
                "  {:<20}{:>14} {:>6}  {}\n",
                entry.category.label(),
                currency.format(entry.amount),
                format_percentage(entry.share),
                format_bar(entry.share, 100.0, 16)
            ));
        }
        output.push('\n');

        output.push_str("Recent Transactions\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("  No expenses yet. Add one with `expense add <amount> <description>`\n");
        }
        for expense in &self.recent {
            output.push_str(&format!(
                "  {:<11} {:<24} {:<18}{:>12}\n",
                expense.date.with_timezone(&Local).format(date_format),
                truncate(&expense.description, 24),
                expense.category().label(),
                currency.format(expense.amount)
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

    fn expense(id: &str, cents: i64, category_id: u32, date: DateTime<Utc>) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            Money::from_cents(cents),
            format!("item {}", id),
            category_id,
            date,
        )
    }

    #[test]
    fn test_budget_health_levels() {
        let budget = Money::from_cents(10_000);
        assert_eq!(BudgetStatus::new(budget, Money::from_cents(5_000)).health, BudgetHealth::Healthy);
        assert_eq!(BudgetStatus::new(budget, Money::from_cents(7_500)).health, BudgetHealth::Healthy);
        assert_eq!(BudgetStatus::new(budget, Money::from_cents(7_600)).health, BudgetHealth::Warning);
        assert_eq!(BudgetStatus::new(budget, Money::from_cents(9_000)).health, BudgetHealth::Warning);
        assert_eq!(BudgetStatus::new(budget, Money::from_cents(9_100)).health, BudgetHealth::Danger);
    }

    #[test]
    fn test_zero_budget_has_no_percentage() {
        let empty = BudgetStatus::new(Money::zero(), Money::zero());
        assert_eq!(empty.percentage_used, None);
        assert_eq!(empty.health, BudgetHealth::Healthy);
        assert_eq!(empty.bar_ratio(), 0.0);

        let spent = BudgetStatus::new(Money::zero(), Money::from_cents(100));
        assert_eq!(spent.percentage_used, None);
        assert_eq!(spent.health, BudgetHealth::Danger);
        assert_eq!(spent.bar_ratio(), 1.0);
    }

    #[test]
    fn test_overspent_bar_is_clamped() {
        let status = BudgetStatus::new(Money::from_cents(10_000), Money::from_cents(25_000));
        assert!(status.is_over_budget());
        assert_eq!(status.remaining, Money::from_cents(-15_000));
        assert_eq!(status.bar_ratio(), 1.0);
    }

    #[test]
    fn test_scenario_fifty_of_hundred() {
        let store = ExpenseStore::new().append(expense("1", 5_000, 1, now()));
        let agg = Aggregator::new(now(), Weekday::Sun);

        let report = DashboardReport::generate(&agg, &store, Money::from_cents(10_000), 5);

        assert_eq!(report.totals.today, Money::from_cents(5_000));
        assert_eq!(report.budget.remaining, Money::from_cents(5_000));
        assert_eq!(report.budget.percentage_used, Some(50.0));
        assert_eq!(report.month_breakdown.len(), 1);
        assert_eq!(report.month_breakdown[0].category.name, "Food");
        assert_eq!(report.month_breakdown[0].share, 100.0);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut store = ExpenseStore::new();
        for day in 0..8 {
            store = store.append(expense(&day.to_string(), 100, 2, now() - Duration::days(day)));
        }
        let agg = Aggregator::new(now(), Weekday::Sun);

        let report = DashboardReport::generate(&agg, &store, Money::from_cents(10_000), 5);
        let ids: Vec<&str> = report.recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(report.expense_count, 8);
    }

    #[test]
    fn test_format_terminal() {
        let store = ExpenseStore::new().append(expense("1", 123_456, 99, now()));
        let agg = Aggregator::new(now(), Weekday::Sun);
        let report = DashboardReport::generate(&agg, &store, Money::from_cents(200_000), 5);

        let usd = Currency::find("USD").unwrap();
        let text = report.format_terminal(usd, "%Y-%m-%d");
        assert!(text.contains("$2,000.00"));
        assert!(text.contains("$1,234.56"));
        assert!(text.contains("Other"));
        assert!(text.contains("Recent Transactions"));
    }

    #[test]
    fn test_format_terminal_empty() {
        let agg = Aggregator::new(now(), Weekday::Sun);
        let report = DashboardReport::generate(&agg, &ExpenseStore::new(), Money::zero(), 5);

        let text = report.format_terminal(Currency::default_currency(), "%Y-%m-%d");
        assert!(text.contains("No expenses recorded this month"));
        assert!(text.contains("no budget set"));
    }
}
