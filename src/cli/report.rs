//! CLI commands for the dashboard and the category report

use clap::Args;
use std::path::PathBuf;

use crate::error::ExpenseResult;
use crate::models::ReportPeriod;
use crate::reports::save_svg;
use crate::tracker::Tracker;

/// Arguments for `report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Period to report on: day, week, month or all
    #[arg(short, long, default_value = "month")]
    pub period: String,

    /// Write the pie chart to an SVG file
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,
}

/// Print the dashboard
pub fn handle_dashboard_command(tracker: &Tracker) -> ExpenseResult<()> {
    let report = tracker.dashboard();
    print!(
        "{}",
        report.format_terminal(tracker.currency(), &tracker.settings().date_format)
    );
    Ok(())
}

/// Handle `report`
pub fn handle_report_command(tracker: &Tracker, args: ReportArgs) -> ExpenseResult<()> {
    let period = ReportPeriod::from_selector(&args.period);
    let report = tracker.category_report(period);

    print!("{}", report.format_terminal(tracker.currency()));

    if let Some(path) = args.svg {
        let document = report.to_svg(tracker.dark_mode());
        save_svg(&path, &document)?;
        if report.is_empty() {
            println!("Chart written to {} (no data)", path.display());
        } else {
            println!("Chart written to {}", path.display());
        }
    }

    Ok(())
}
