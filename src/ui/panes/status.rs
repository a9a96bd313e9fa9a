//! Status bar with run state and keybindings

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// What the status bar shows
pub struct StatusRenderData<'a> {
    pub title: &'a str,
    pub checkpoints: usize,
    pub last: Option<&'static str>,
    pub delay: Duration,
    pub paused: bool,
    pub finished: bool,
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.status_bg);
    let left_spans = vec![
        Span::styled(
            format!(" #{} ", data.checkpoints),
            Style::default()
                .bg(if data.finished {
                    DEFAULT_THEME.success
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(format!("{} ", data.title), bar.fg(DEFAULT_THEME.fg)),
        Span::styled(
            data.last.map(|l| format!("[{}]", l)).unwrap_or_default(),
            bar.fg(DEFAULT_THEME.comment),
        ),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar)
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" \u{23b5} ", key_style),
        Span::styled(" pause ", desc_style),
        Span::styled("\u{2502}", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" +/- ", key_style),
        Span::styled(format!(" {}ms ", data.delay.as_millis()), desc_style),
        Span::styled("\u{2502}", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let badge = if data.finished {
        Some((" DONE ", DEFAULT_THEME.success))
    } else if data.paused {
        Some((" PAUSED ", DEFAULT_THEME.secondary))
    } else {
        None
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("\u{2502}", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar)
            .alignment(Alignment::Right),
        layout[1],
    );
}
