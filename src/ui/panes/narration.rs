//! Narration pane: the captions the engines produced, newest at the bottom

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn render_narration_pane(frame: &mut Frame, area: Rect, lines: &[String]) {
    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    if lines.is_empty() {
        let paragraph = Paragraph::new("(nothing yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Always follow the tail
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let skip = lines.len().saturating_sub(visible_height);
    let last = lines.len() - 1;

    let items: Vec<ListItem> = lines
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| {
            let style = if i == last {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(line.as_str()).style(style)
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
