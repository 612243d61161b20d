//! Token listing pane rendering

use super::utils::{pane_block, render_scrolled_list};
use crate::session::Analysis;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
    Frame,
};

/// Render the tokens (and lexer warnings) of the latest analysis
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    analysis: Option<&Analysis>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let mut items: Vec<ListItem> = Vec::new();

    if let Some(analysis) = analysis {
        for token in &analysis.tokens {
            let kind_style = Style::default()
                .fg(DEFAULT_THEME.token_color(token.kind))
                .add_modifier(Modifier::BOLD);
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<12}", token.kind.name()), kind_style),
                Span::styled(token.value_text(), Style::default().fg(DEFAULT_THEME.fg)),
            ])));
        }

        for warning in &analysis.warnings {
            items.push(
                ListItem::new(format!("! {}", warning))
                    .style(Style::default().fg(DEFAULT_THEME.error)),
            );
        }
    }

    let title = match analysis {
        Some(a) => format!(" Tokens ({}) ", a.tokens.len()),
        None => " Tokens ".to_string(),
    };

    render_scrolled_list(
        frame,
        area,
        pane_block(&title, is_focused),
        items,
        "(no tokens)",
        scroll_offset,
    );
}
