//! Spending aggregation
//!
//! Totals and per-category breakdowns over a report period. Both are pure
//! functions of the expenses, the period, the reference instant and the
//! configured first day of the week, all carried by an [`Aggregator`].

use chrono::{DateTime, Local, TimeZone, Utc, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::models::{Category, CategoryId, Expense, Money, ReportPeriod, CATEGORIES};

/// Spending accumulated for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: &'static Category,
    pub amount: Money,
}

impl CategoryTotal {
    pub fn category_id(&self) -> CategoryId {
        self.category.id
    }
}

/// Aggregation relative to a fixed "now"
#[derive(Debug, Clone)]
pub struct Aggregator<Tz: TimeZone> {
    now: DateTime<Tz>,
    week_start: Weekday,
}

impl Aggregator<Local> {
    /// Aggregator for the current local time
    pub fn local(week_start: Weekday) -> Self {
        Self::new(Local::now(), week_start)
    }
}

impl<Tz: TimeZone> Aggregator<Tz> {
    pub fn new(now: DateTime<Tz>, week_start: Weekday) -> Self {
        Self { now, week_start }
    }

    /// The reference instant
    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Inclusive lower bound of `period`, `None` for all time
    pub fn lower_bound(&self, period: ReportPeriod) -> Option<DateTime<Utc>> {
        period.lower_bound(&self.now, self.week_start)
    }

    /// Expenses falling inside `period`, in input order
    pub fn filter<'a>(&self, expenses: &'a [Expense], period: ReportPeriod) -> Vec<&'a Expense> {
        match self.lower_bound(period) {
            Some(bound) => expenses.iter().filter(|e| e.date >= bound).collect(),
            None => expenses.iter().collect(),
        }
    }

    /// Sum of the amounts inside `period`; zero for an empty set
    pub fn total_for_period(&self, expenses: &[Expense], period: ReportPeriod) -> Money {
        let total: Money = self.filter(expenses, period).into_iter().map(|e| e.amount).sum();
        debug!(period = period.as_str(), total = %total, "total for period");
        total
    }

    /// Total for a free-form selector; unknown selectors mean all time
    pub fn total_for_selector(&self, expenses: &[Expense], selector: &str) -> Money {
        self.total_for_period(expenses, ReportPeriod::from_selector(selector))
    }

    /// Spending per category inside `period`
    ///
    /// Categories are returned in registry order and only when their amount is
    /// positive. Expenses whose category id is not registered count toward
    /// "Other", so the amounts always add up to [`Self::total_for_period`].
    pub fn breakdown_by_category(
        &self,
        expenses: &[Expense],
        period: ReportPeriod,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = CATEGORIES
            .iter()
            .map(|category| CategoryTotal {
                category,
                amount: Money::zero(),
            })
            .collect();
        let other = totals.len() - 1;

        for expense in self.filter(expenses, period) {
            let slot = totals
                .iter()
                .position(|t| t.category.id == expense.category_id)
                .unwrap_or(other);
            totals[slot].amount += expense.amount;
        }

        totals.retain(|t| t.amount.is_positive());
        debug!(
            period = period.as_str(),
            categories = totals.len(),
            "breakdown by category"
        );
        totals
    }
}

/// Sum of the amounts in a breakdown
pub fn breakdown_total(breakdown: &[CategoryTotal]) -> Money {
    breakdown.iter().map(|t| t.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<Utc> {
        // Wednesday
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap()
    }

    fn aggregator() -> Aggregator<Utc> {
        Aggregator::new(now(), Weekday::Sun)
    }

    fn expense(id: &str, cents: i64, category_id: CategoryId, date: DateTime<Utc>) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            Money::from_cents(cents),
            format!("expense {}", id),
            category_id,
            date,
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("today", 5_000, 1, now() - Duration::hours(2)),
            expense("sunday", 2_000, 2, Utc.with_ymd_and_hms(2025, 1, 12, 9, 0, 0).unwrap()),
            expense("saturday", 1_000, 3, Utc.with_ymd_and_hms(2025, 1, 11, 23, 0, 0).unwrap()),
            expense("month", 700, 99, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            expense("old", 300, 1, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()),
        ]
    }

    /// Small deterministic generator for property checks
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }
    }

    fn random_expenses(seed: u64, count: usize) -> Vec<Expense> {
        let mut rng = Lcg(seed);
        (0..count)
            .map(|i| {
                let cents = (rng.next() % 100_000) as i64;
                let category_id = (rng.next() % 12) as CategoryId;
                let offset_hours = (rng.next() % (24 * 90)) as i64;
                expense(
                    &i.to_string(),
                    cents,
                    category_id,
                    now() - Duration::hours(offset_hours),
                )
            })
            .collect()
    }

    #[test]
    fn test_total_for_each_period() {
        let expenses = sample();
        let agg = aggregator();

        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::Day), Money::from_cents(5_000));
        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::Week), Money::from_cents(7_000));
        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::Month), Money::from_cents(8_700));
        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::All), Money::from_cents(9_000));
    }

    #[test]
    fn test_largest_amounts_do_not_overflow() {
        let largest = Money::parse("1000000000000").unwrap();
        let expenses = vec![
            expense("a", largest.cents(), 1, now()),
            expense("b", largest.cents(), 1, now()),
            expense("c", i64::MAX, 99, now()),
        ];
        let agg = aggregator();

        let total = agg.total_for_period(&expenses, ReportPeriod::All);
        assert!(total.is_positive());
        assert_eq!(total.cents(), i64::MAX);

        let breakdown = agg.breakdown_by_category(&expenses, ReportPeriod::All);
        assert_eq!(breakdown[0].amount.cents(), largest.cents() * 2);
        assert!(breakdown.iter().all(|entry| entry.amount.is_positive()));
    }

    #[test]
    fn test_empty_total_is_zero() {
        for period in ReportPeriod::all() {
            assert_eq!(aggregator().total_for_period(&[], *period), Money::zero());
            assert!(aggregator().breakdown_by_category(&[], *period).is_empty());
        }
    }

    #[test]
    fn test_unknown_selector_is_all() {
        let expenses = sample();
        let agg = aggregator();
        let everything: Money = expenses.iter().map(|e| e.amount).sum();

        assert_eq!(agg.total_for_selector(&expenses, "fortnight"), everything);
        assert_eq!(agg.total_for_selector(&expenses, ""), everything);
    }

    #[test]
    fn test_week_start_is_configurable() {
        let expenses = sample();
        let monday = Aggregator::new(now(), Weekday::Mon);

        // Monday start drops Sunday the 12th
        assert_eq!(
            monday.total_for_period(&expenses, ReportPeriod::Week),
            Money::from_cents(5_000)
        );
    }

    #[test]
    fn test_bounds_use_local_midnight() {
        // 01:00 on the 15th at UTC+2 is still the 14th in UTC
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = offset.with_ymd_and_hms(2025, 1, 15, 1, 0, 0).unwrap();
        let agg = Aggregator::new(local_now, Weekday::Sun);

        let bound = agg.lower_bound(ReportPeriod::Day).unwrap();
        assert_eq!(bound, Utc.with_ymd_and_hms(2025, 1, 14, 22, 0, 0).unwrap());

        let just_after = expense("a", 100, 1, bound);
        let just_before = expense("b", 100, 1, bound - Duration::seconds(1));
        let expenses = vec![just_after, just_before];
        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::Day), Money::from_cents(100));
    }

    #[test]
    fn test_breakdown_registry_order_and_other() {
        let expenses = sample();
        let breakdown = aggregator().breakdown_by_category(&expenses, ReportPeriod::Month);

        let names: Vec<&str> = breakdown.iter().map(|t| t.category.name).collect();
        assert_eq!(names, vec!["Food", "Transportation", "Entertainment", "Other"]);
        assert_eq!(breakdown[3].amount, Money::from_cents(700));
    }

    #[test]
    fn test_scenario_spent_today() {
        let expenses = vec![expense("1", 5_000, 1, now())];
        let agg = aggregator();

        assert_eq!(agg.total_for_period(&expenses, ReportPeriod::Day), Money::from_cents(5_000));
        let breakdown = agg.breakdown_by_category(&expenses, ReportPeriod::Month);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category.name, "Food");
        assert_eq!(breakdown[0].amount, Money::from_cents(5_000));
    }

    #[test]
    fn test_scenario_unknown_category_goes_to_other() {
        let expenses = vec![expense("1", 1_000, 99, now())];
        let breakdown = aggregator().breakdown_by_category(&expenses, ReportPeriod::All);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category.name, "Other");
        assert_eq!(breakdown[0].amount, Money::from_cents(1_000));
    }

    #[test]
    fn test_property_conservation_and_positivity() {
        let agg = aggregator();
        for seed in 0..50 {
            let expenses = random_expenses(seed, (seed as usize % 40) + 1);
            for period in ReportPeriod::all() {
                let total = agg.total_for_period(&expenses, *period);
                let breakdown = agg.breakdown_by_category(&expenses, *period);

                assert!(!total.is_negative());
                assert_eq!(breakdown_total(&breakdown), total, "seed {} {:?}", seed, period);
                assert!(breakdown.iter().all(|t| t.amount.is_positive()));

                let expected: Money = agg
                    .filter(&expenses, *period)
                    .into_iter()
                    .map(|e| e.amount)
                    .sum();
                assert_eq!(total, expected);
            }

            let everything: Money = expenses.iter().map(|e| e.amount).sum();
            assert_eq!(agg.total_for_period(&expenses, ReportPeriod::All), everything);
        }
    }

    #[test]
    fn test_property_breakdown_in_registry_order() {
        let agg = aggregator();
        for seed in 100..120 {
            let expenses = random_expenses(seed, 30);
            let breakdown = agg.breakdown_by_category(&expenses, ReportPeriod::All);
            let indices: Vec<usize> = breakdown.iter().map(|t| t.category.index()).collect();
            let mut sorted = indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(indices, sorted);
        }
    }
}
