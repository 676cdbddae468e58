//! Sidebar: logo, collapse toggle and navigation links

use super::{muted, truncate, PageView};
use counselflow_ui::NodeId;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Glyph for a lucide icon class
fn icon_glyph(classes: &str) -> &'static str {
    let icon = classes
        .split_whitespace()
        .find_map(|c| c.strip_prefix("lucide-"))
        .unwrap_or("");
    match icon {
        "layout-dashboard" => "▦",
        "briefcase" => "▣",
        "file-text" => "≡",
        "building" => "▥",
        "scale" => "⚖",
        "chevron-left" => "«",
        "chevron-right" => "»",
        _ => "•",
    }
}

fn first(view: &PageView, scope: NodeId, selector: &str) -> Option<NodeId> {
    view.doc.query_selector(scope, selector).ok().flatten()
}

pub fn draw_sidebar(frame: &mut Frame, area: Rect, view: &PageView) {
    let doc = view.doc;
    let Some(sidebar) = first(view, doc.root(), "aside") else {
        return;
    };
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    let logo = first(view, sidebar, "h1").filter(|l| !view.is_invisible(*l));
    let title = logo
        .map(|l| format!(" {} ", truncate(&view.text(l), inner_width.saturating_sub(2))))
        .unwrap_or_default();

    if let Some(toggle) = first(view, sidebar, "button") {
        let glyph = if view.state.sidebar_collapsed { "»" } else { "«" };
        lines.push(Line::from(Span::styled(
            format!(" {} ", glyph),
            view.styled(toggle, Style::default().fg(Color::Cyan)),
        )));
        lines.push(Line::from(""));
    }

    let links = doc.query_selector_all(sidebar, "nav a").unwrap_or_default();
    for link in links {
        let icon = first(view, link, "svg");
        let glyph = icon
            .and_then(|i| doc.attribute(i, "class"))
            .map(icon_glyph)
            .unwrap_or("•");
        let icon_style = match icon {
            Some(i) => view.styled(i, Style::default().fg(Color::Yellow)),
            None => Style::default().fg(Color::Yellow),
        };

        let mut spans = vec![Span::raw(" "), Span::styled(glyph, icon_style)];
        if let Some(label) = first(view, link, "span").filter(|l| !view.is_invisible(*l)) {
            let text = truncate(&view.text(label), inner_width.saturating_sub(4));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(text, Style::default().fg(Color::White)));
        }
        lines.push(Line::from(spans));
    }

    if doc.has_class(sidebar, "mobile-open") {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" mobile", muted())));
    }

    let border = if doc.style(sidebar, "transition").is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        muted()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
