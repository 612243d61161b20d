//! Syntax tree pane rendering

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

/// Render the outline of the latest program, or its parse error
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    analysis: Option<&Analysis>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let mut items: Vec<ListItem> = Vec::new();

    match analysis.map(|a| (a, &a.outcome)) {
        Some((analysis, Ok(_))) => {
            for line in analysis.tree_lines() {
                items.push(ListItem::new(outline_line(line)));
            }
            for note in &analysis.notes {
                items.push(
                    ListItem::new(format!("note: {}", note))
                        .style(Style::default().fg(DEFAULT_THEME.secondary)),
                );
            }
        }
        Some((_, Err(err))) => {
            items.push(
                ListItem::new(err.to_string()).style(
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }
        None => {}
    }

    render_scrolled_list(
        frame,
        area,
        pane_block(" Syntax Tree ", is_focused),
        items,
        "(nothing parsed yet)",
        scroll_offset,
    );
}

/// Node name in the primary color, its detail in the default color
fn outline_line(line: String) -> Line<'static> {
    let indent = line.len() - line.trim_start().len();
    let body = &line[indent..];
    let (node, detail) = body.split_once(' ').unwrap_or((body, ""));

    Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(
            node.to_string(),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
        Span::raw(" "),
        Span::styled(detail.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}
