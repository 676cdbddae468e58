//! Bottom help bar with key hints and the focused element

use super::{muted, truncate, PageView};
use crate::focus::describe;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS: &[(&str, &str)] = &[
    ("Tab", "focus"),
    ("Enter", "activate"),
    ("←→", "keys"),
    ("/", "search"),
    ("s", "sidebar"),
    ("Esc", "close"),
    ("q", "quit"),
];

pub fn draw_help_bar(frame: &mut Frame, area: Rect, view: &PageView, navigation: Option<&str>) {
    let mut spans = Vec::new();
    for (key, label) in HINTS {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {} ", label), muted()));
    }

    if let Some(path) = navigation {
        spans.push(Span::styled(
            format!(" → {} ", path),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(focus) = view.focus {
        spans.push(Span::styled(
            format!(" {}", truncate(&describe(view.doc, focus), 32)),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
