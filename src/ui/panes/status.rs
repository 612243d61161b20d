//! Status bar rendering with keybindings and the active profile

use crate::parser::profile::Profile;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
///
/// `last_ok` is `None` before the first analysis.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    profile: Profile,
    analyses: usize,
    last_ok: Option<bool>,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: profile badge and status message
    let badge_bg = match last_ok {
        Some(false) => DEFAULT_THEME.error,
        Some(true) => DEFAULT_THEME.success,
        None => DEFAULT_THEME.primary,
    };

    let left_spans = vec![
        Span::styled(
            format!(" {} ", profile.name().to_uppercase()),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" #{} ", analyses),
            Style::default()
                .bg(DEFAULT_THEME.bar_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            "| ",
            Style::default()
                .bg(DEFAULT_THEME.bar_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            message.to_string(),
            Style::default().bg(DEFAULT_THEME.bar_bg).fg(match last_ok {
                Some(false) => DEFAULT_THEME.error,
                _ => DEFAULT_THEME.fg,
            }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings = [
        (" ↵ ", " analyze "),
        (" ⇥ ", " focus "),
        (" ↑/↓ ", " scroll "),
        (" F2 ", " profile "),
        (" ^L ", " clear "),
        (" esc ", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
