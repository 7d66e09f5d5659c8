//! Help dialog
//!
//! Shows keyboard shortcuts for the current page

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Page;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::theme::Theme;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(theme.base());

    let paragraph = Paragraph::new(help_lines(app.active_page, &theme))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(page: Page, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys", theme),
        Line::from(""),
        key_line("q", "Quit", theme),
        key_line("?", "Show/hide help", theme),
        key_line("Tab", "Switch page", theme),
        key_line("1 / 2", "Dashboard / Reports", theme),
        key_line("a", "Add expense", theme),
        key_line("b", "Edit monthly budget", theme),
        key_line("c", "Next currency", theme),
        key_line("t", "Toggle dark mode", theme),
        Line::from(""),
    ];

    match page {
        Page::Dashboard => {
            lines.push(heading("Dashboard", theme));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Select recent expense", theme));
            lines.push(key_line("d", "Delete selected expense", theme));
        }
        Page::Reports => {
            lines.push(heading("Reports", theme));
            lines.push(Line::from(""));
            lines.push(key_line("p / →", "Next period", theme));
            lines.push(key_line("←", "Previous period", theme));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.muted_style(),
    )));

    lines
}

fn heading(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.warning)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, description: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}", key), Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::raw(description.to_string()),
    ])
}
