//! Reports page
//!
//! Period selector, a pie chart of spending by category drawn on a canvas,
//! and a legend with amounts and percentages.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Cell, Paragraph, Row, Table, Tabs,
    },
    Frame,
};

use crate::display::report::format_percentage;
use crate::models::ReportPeriod;
use crate::reports::{slice_at_angle, CategoryReport, PieSlice, CENTER_RADIUS, PIE_RADIUS};
use crate::tui::app::App;
use crate::tui::layout::ReportsLayout;
use crate::tui::theme::{category_color, Theme};

/// Render the reports page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let layout = ReportsLayout::new(area);
    let report = app.category_report();

    render_period_tabs(frame, app.report_period, &theme, layout.periods);
    render_chart(frame, app, &report, &theme, layout.chart);
    render_legend(frame, app, &report, &theme, layout.legend);
}

fn render_period_tabs(frame: &mut Frame, selected: ReportPeriod, theme: &Theme, area: Rect) {
    let periods = ReportPeriod::all();
    let titles: Vec<&str> = periods.iter().map(|p| p.label()).collect();
    let index = periods.iter().position(|p| *p == selected).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(index)
        .block(
            Block::default()
                .title(" Period (p / ← →) ")
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .style(theme.base())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

/// Points of the donut sampled on a `step` grid, bucketed by slice
///
/// Coordinates are chart units with y pointing up; angles run clockwise
/// from 12 o'clock to match the slice layout.
pub fn sample_pie(slices: &[PieSlice], step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); slices.len()];
    if slices.is_empty() || step.is_nan() || step <= 0.0 {
        return buckets;
    }

    let steps = (PIE_RADIUS / step).ceil() as i64;
    for i in -steps..=steps {
        for j in -steps..=steps {
            let (x, y) = (i as f64 * step, j as f64 * step);
            let r = x.hypot(y);
            if r > PIE_RADIUS || r < CENTER_RADIUS {
                continue;
            }

            let angle = x.atan2(y).to_degrees();
            if let Some(slice) = slice_at_angle(slices, angle) {
                if let Some(index) = slices.iter().position(|s| std::ptr::eq(s, slice)) {
                    buckets[index].push((x, y));
                }
            }
        }
    }
    buckets
}

fn render_chart(frame: &mut Frame, app: &App, report: &CategoryReport, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(format!(" Spending by Category: {} ", report.period.label()))
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(theme.base());

    if report.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses recorded for this period",
                theme.muted_style(),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    // Braille cells are 2 dots wide and 4 tall; keep dots square
    let dots_x = f64::from(inner.width.max(1)) * 2.0;
    let dots_y = f64::from(inner.height.max(1)) * 4.0;
    let half_height = PIE_RADIUS + 1.0;
    let half_width = (half_height * dots_x / dots_y).max(half_height);
    let half_height = half_width * dots_y / dots_x;
    let step = (2.0 * half_height / dots_y).min(2.0 * half_width / dots_x);

    let buckets = sample_pie(&report.slices, step);
    let total = app.tracker.format_amount(report.total);
    let caption = format!("{} cats", report.category_count());
    let text_color = theme.text;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme.background)
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .paint(|ctx| {
            for (slice, coords) in report.slices.iter().zip(&buckets) {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: category_color(slice.category),
                });
            }
            ctx.layer();
            let total_x = -(total.chars().count() as f64) * step;
            ctx.print(
                total_x,
                1.0,
                Line::styled(total.clone(), Style::default().fg(text_color)),
            );
            let caption_x = -(caption.chars().count() as f64) * step;
            ctx.print(
                caption_x,
                -2.0,
                Line::styled(caption.clone(), Style::default().fg(text_color)),
            );
        });

    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut Frame, app: &App, report: &CategoryReport, theme: &Theme, area: Rect) {
    let header = Row::new(vec!["", "Category", "Amount", "Share"])
        .style(theme.muted_style().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .slices
        .iter()
        .map(|slice| {
            Row::new(vec![
                Cell::from("■").style(Style::default().fg(category_color(slice.category))),
                Cell::from(slice.category.label()),
                Cell::from(app.tracker.format_amount(slice.amount)),
                Cell::from(format_percentage(slice.percentage)),
            ])
        })
        .collect();

    let footer = Row::new(vec![
        Cell::from(""),
        Cell::from("Total"),
        Cell::from(app.tracker.format_amount(report.total)),
        Cell::from(""),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(2),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(
            Block::default()
                .title(" Legend ")
                .title_style(theme.title_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .style(theme.base());

    frame.render_widget(table, area);
}
