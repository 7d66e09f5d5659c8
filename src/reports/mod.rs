//! Reports for the expense tracker
//!
//! Aggregation over report periods, pie chart geometry, and the dashboard
//! and category report view models built on them.

pub mod category;
pub mod chart;
pub mod dashboard;
pub mod summary;

pub use category::CategoryReport;
pub use chart::{
    arc_path, pie_slices, render_svg, save_svg, sector_path, slice_at_angle, ChartTheme, PieSlice,
    CENTER_RADIUS, CHART_SIZE, PIE_RADIUS, VIEW_BOX,
};
pub use dashboard::{BudgetHealth, BudgetStatus, CategoryShare, DashboardReport, PeriodTotals};
pub use summary::{breakdown_total, Aggregator, CategoryTotal};
