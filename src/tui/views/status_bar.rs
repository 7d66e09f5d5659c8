//! Status bar view
//!
//! Shows the active currency and theme, transient messages, and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let currency = app.tracker.currency();

    let mut spans = vec![
        Span::styled(
            format!(" {} {} ", currency.symbol, currency.code),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::raw(if app.tracker.dark_mode() { "dark" } else { "light" }),
        Span::raw(" │ "),
        Span::raw(format!("{} expenses", app.tracker.expenses().len())),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(theme.warning)));
    }

    let hints = " q:Quit  ?:Help  Tab:Page  t:Theme  c:Currency ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, theme.muted_style()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme.base());
    frame.render_widget(paragraph, area);
}
