//! Output transcript pane rendering

use super::utils::{pane_block, render_scrolled_list};
use crate::session::Transcript;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::ListItem,
    Frame,
};

/// Render the transcript of every analysis report
pub fn render_transcript_pane(
    frame: &mut Frame,
    area: Rect,
    transcript: &Transcript,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let items: Vec<ListItem> = transcript
        .lines()
        .iter()
        .map(|line| ListItem::new(line.as_str()).style(line_style(line)))
        .collect();

    render_scrolled_list(
        frame,
        area,
        pane_block(" Output ", is_focused),
        items,
        "(type a line and press Enter)",
        scroll_offset,
    );
}

fn line_style(line: &str) -> Style {
    if line.starts_with('[') {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    } else if line.starts_with("Parse error") {
        Style::default().fg(DEFAULT_THEME.error)
    } else if line.starts_with("Parsed:") {
        Style::default().fg(DEFAULT_THEME.success)
    } else if line.starts_with("Token:") {
        Style::default().fg(DEFAULT_THEME.fg)
    } else {
        // Lexer warnings, notes and progress lines
        Style::default().fg(DEFAULT_THEME.secondary)
    }
}
