//! Report periods
//!
//! A report period selects a window ending "now": the current day, week,
//! month, or all of time. Selectors are parsed leniently: anything that is not
//! a known period means "all".

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
    Weekday,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A time window for aggregation, relative to the current instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Since the start of the current calendar day
    Day,
    /// Since the start of the current week
    Week,
    /// Since the first day of the current month (reports default)
    #[default]
    Month,
    /// No lower bound
    All,
}

impl ReportPeriod {
    /// All periods in selector order
    pub fn all() -> &'static [Self] {
        &[Self::Day, Self::Week, Self::Month, Self::All]
    }

    /// Parse a period selector
    ///
    /// Unknown selectors map to [`ReportPeriod::All`]; an unfiltered window is
    /// the defined behavior for them, not an error.
    ///
    /// ```
    /// use expense_tracker::models::ReportPeriod;
    /// assert_eq!(ReportPeriod::from_selector("week"), ReportPeriod::Week);
    /// assert_eq!(ReportPeriod::from_selector("fortnight"), ReportPeriod::All);
    /// ```
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "day" | "today" => Self::Day,
            "week" => Self::Week,
            "month" => Self::Month,
            "all" => Self::All,
            other => {
                tracing::debug!(selector = other, "unrecognized period selector, using all");
                Self::All
            }
        }
    }

    /// Selector string for this period
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::All => "All Time",
        }
    }

    /// The next period in selector order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::All,
            Self::All => Self::Day,
        }
    }

    /// The previous period in selector order, wrapping around
    pub fn previous(&self) -> Self {
        match self {
            Self::Day => Self::All,
            Self::Week => Self::Day,
            Self::Month => Self::Week,
            Self::All => Self::Month,
        }
    }

    /// Inclusive lower bound of this period relative to `now`
    ///
    /// Bounds are computed at local midnight in `now`'s time zone and returned
    /// as UTC instants. `All` has no bound.
    pub fn lower_bound<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        week_start: Weekday,
    ) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start_date = match self {
            Self::Day => today,
            Self::Week => today - Duration::days(days_since_week_start(today.weekday(), week_start)),
            Self::Month => today.with_day(1).unwrap_or(today),
            Self::All => return None,
        };
        Some(local_midnight(now, start_date))
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Number of days between `week_start` and `weekday` going backwards (0-6)
pub fn days_since_week_start(weekday: Weekday, week_start: Weekday) -> i64 {
    let day = weekday.num_days_from_sunday() as i64;
    let start = week_start.num_days_from_sunday() as i64;
    (day - start).rem_euclid(7)
}

/// Map a settings value (0 = Sunday .. 6 = Saturday) to a weekday
pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Midnight of `date` in the time zone of `reference`, as a UTC instant
///
/// When midnight does not exist locally (a DST gap) the current UTC offset of
/// `reference` is applied to the naive time instead.
pub fn local_midnight<Tz: TimeZone>(reference: &DateTime<Tz>, date: NaiveDate) -> DateTime<Utc> {
    let naive = NaiveDateTime::new(date, NaiveTime::default());
    match reference.timezone().from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => {
            let offset = reference.offset().fix().local_minus_utc() as i64;
            Utc.from_utc_datetime(&(naive - Duration::seconds(offset)))
        }
    }
}
