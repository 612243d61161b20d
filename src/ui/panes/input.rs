//! Input line rendering

use super::utils::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PROMPT: &str = "> ";

/// Render the input line and place the terminal cursor at `cursor` (a char index)
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let prompt_width = PROMPT.chars().count();

    // Scroll horizontally so the cursor stays visible
    let room = inner_width.saturating_sub(prompt_width + 1);
    let skip = cursor.saturating_sub(room);
    let visible: String = input.chars().skip(skip).collect();

    let line = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(visible, Style::default().fg(DEFAULT_THEME.fg)),
    ]);

    let paragraph = Paragraph::new(line).block(pane_block(" Enter JavaScript code ", true));
    frame.render_widget(paragraph, area);

    let x = area.x + 1 + (prompt_width + cursor - skip) as u16;
    frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
}
