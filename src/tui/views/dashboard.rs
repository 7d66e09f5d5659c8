//! Dashboard page
//!
//! Budget overview with a gauge, summary cards, this month's spending by
//! category, and the most recent expenses.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::report::{format_percentage, truncate};
use crate::models::Money;
use crate::reports::{BudgetStatus, CategoryShare, DashboardReport};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;
use crate::tui::theme::{category_color, Theme};

/// Render the dashboard page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let layout = DashboardLayout::new(area);
    let report = app.dashboard();

    render_budget(frame, app, &report.budget, &theme, layout.budget);
    render_cards(frame, app, &report, &theme, layout.cards);
    render_categories(frame, app, &report.month_breakdown, &theme, layout.categories);
    render_recent(frame, app, &theme, layout.recent);
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(theme.base())
}

fn render_budget(frame: &mut Frame, app: &App, status: &BudgetStatus, theme: &Theme, area: Rect) {
    let block = panel(" Monthly Budget ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amounts
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let health_color = theme.health_color(status.health);
    let remaining_color = if status.is_over_budget() {
        theme.danger
    } else {
        theme.healthy
    };

    let amounts = Line::from(vec![
        Span::styled("Budget ", theme.muted_style()),
        Span::raw(app.tracker.format_amount(status.budget)),
        Span::styled("   Spent ", theme.muted_style()),
        Span::raw(app.tracker.format_amount(status.spent)),
        Span::styled("   Remaining ", theme.muted_style()),
        Span::styled(
            app.tracker.format_amount(status.remaining),
            Style::default()
                .fg(remaining_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(amounts), rows[0]);

    let label = match status.percentage_used {
        Some(pct) => format!("{} used", format_percentage(pct)),
        None => "no budget set".to_string(),
    };
    let gauge = Gauge::default()
        .ratio(status.bar_ratio())
        .label(Span::styled(label, Style::default().fg(theme.text)))
        .gauge_style(Style::default().fg(health_color).bg(theme.highlight));
    frame.render_widget(gauge, rows[2]);
}

fn render_cards(frame: &mut Frame, app: &App, report: &DashboardReport, theme: &Theme, areas: [Rect; 4]) {
    let cards = [
        (" Today ", report.totals.today),
        (" This Week ", report.totals.week),
        (" This Month ", report.totals.month),
        (" All Time ", report.totals.all_time),
    ];

    for ((title, amount), area) in cards.into_iter().zip(areas) {
        let card = Paragraph::new(Line::from(Span::styled(
            app.tracker.format_amount(amount),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(panel(title, theme));
        frame.render_widget(card, area);
    }
}

fn render_categories(
    frame: &mut Frame,
    app: &App,
    shares: &[CategoryShare],
    theme: &Theme,
    area: Rect,
) {
    let block = panel(" Spending by Category ", theme);

    if shares.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No expenses recorded this month",
            theme.muted_style(),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = shares
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.category.label())
                    .style(Style::default().fg(category_color(share.category))),
                Cell::from(app.tracker.format_amount(share.amount)),
                Cell::from(format_percentage(share.share)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(12),
        Constraint::Length(7),
    ];
    frame.render_widget(Table::new(rows, widths).block(block), area);
}

fn render_recent(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = panel(" Recent Transactions (a: add, d: delete) ", theme);
    let recent = app.recent_expenses();

    if recent.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No expenses yet. Press 'a' to add one.",
            theme.muted_style(),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let date_format = &app.tracker.settings().date_format;
    let description_width = area.width.saturating_sub(44).max(8) as usize;

    let rows: Vec<Row> = recent
        .iter()
        .map(|expense| {
            let category = expense.category();
            Row::new(vec![
                Cell::from(expense.date.with_timezone(&Local).format(date_format).to_string()),
                Cell::from(truncate(&expense.description, description_width)),
                Cell::from(category.label()).style(Style::default().fg(category_color(category))),
                Cell::from(format_amount_cell(app, expense.amount)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Min(8),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Date", "Description", "Category", "Amount"])
                .style(theme.muted_style().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .highlight_style(theme.selected_style())
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected_expense_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn format_amount_cell(app: &App, amount: Money) -> Line<'static> {
    Line::from(format!("-{}", app.tracker.format_amount(amount))).alignment(Alignment::Right)
}
