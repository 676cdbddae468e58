//! Main content: page title, quick actions, tabs and the active panel

use super::{draw_table, muted, PageView};
use counselflow_ui::controller::parse_percent;
use counselflow_ui::NodeId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

fn main_node(view: &PageView) -> Option<NodeId> {
    view.doc.query_selector(view.doc.root(), "main").ok().flatten()
}

pub fn draw_content(frame: &mut Frame, area: Rect, view: &PageView) {
    let Some(main) = main_node(view) else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let title = view
        .doc
        .query_selector(main, "h2")
        .ok()
        .flatten()
        .map(|h| view.text(h))
        .unwrap_or_default();
    let mut spans = vec![Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Ok(Some(bar)) = view.doc.query_selector(main, ".progress-bar") {
        spans.push(Span::raw("   "));
        spans.extend(progress_spans(view, bar));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    render_quick_actions(frame, chunks[1], view, main);
    render_tabs(frame, chunks[2], view, main);
    render_panel(frame, chunks[3], view, main);
}

const PROGRESS_CELLS: usize = 10;

/// `Label ███░░ 40%`, the bar following the element's CSS width
fn progress_spans(view: &PageView, bar: NodeId) -> Vec<Span<'static>> {
    let percent = view.doc.style(bar, "width").map(parse_percent).unwrap_or(0).min(100);
    let filled = percent as usize * PROGRESS_CELLS / 100;
    let label = view.doc.attribute(bar, "aria-label").unwrap_or("Progress");
    vec![
        Span::styled(format!("{} ", label), muted()),
        Span::styled(
            format!(
                "{}{}",
                "█".repeat(filled),
                "░".repeat(PROGRESS_CELLS - filled)
            ),
            view.styled(bar, Style::default().fg(Color::Blue)),
        ),
        Span::styled(format!(" {}%", percent), muted()),
    ]
}

fn quick_action_label(view: &PageView, node: NodeId) -> String {
    let doc = view.doc;
    if doc.tag(node) == Some("input") {
        let mark = if doc.has_attribute(node, "checked") { "x" } else { " " };
        let label = doc.attribute(node, "aria-label").unwrap_or("");
        return format!("[{}] {}", mark, label);
    }
    let text = match doc.query_selector(node, ".button-loading") {
        Ok(Some(loading)) if doc.has_attribute(node, "aria-busy") => view.text(loading),
        _ => view.text(node),
    };
    format!("[ {} ]", text)
}

fn render_quick_actions(frame: &mut Frame, area: Rect, view: &PageView, main: NodeId) {
    let controls = view
        .doc
        .query_selector_all(
            main,
            ".quick-actions button, .quick-actions input[type=checkbox]",
        )
        .unwrap_or_default();
    let mut spans = vec![Span::raw(" ")];
    for control in controls {
        let base = if view.doc.has_attribute(control, "disabled") {
            muted()
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(
            quick_action_label(view, control),
            view.styled(control, base),
        ));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, view: &PageView, main: NodeId) {
    let doc = view.doc;
    let Ok(Some(list)) = doc.query_selector(main, "[role=\"tablist\"]") else {
        return;
    };
    let tabs: Vec<NodeId> = doc
        .children(list)
        .iter()
        .copied()
        .filter(|t| doc.attribute(*t, "role") == Some("tab"))
        .collect();
    let selected = tabs
        .iter()
        .position(|t| doc.attribute(*t, "aria-selected") == Some("true"))
        .unwrap_or(0);
    let titles: Vec<Line> = tabs
        .iter()
        .map(|t| Line::from(Span::styled(view.text(*t), view.styled(*t, Style::default()))))
        .collect();

    let widget = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM).border_style(muted()))
        .select(selected)
        .style(muted())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(widget, area);
}

/// The first visible tab panel in the page
fn visible_panel(view: &PageView) -> Option<NodeId> {
    view.doc
        .query_selector_all(view.doc.root(), "[role=\"tabpanel\"]")
        .unwrap_or_default()
        .into_iter()
        .find(|p| !view.doc.is_hidden(*p))
}

fn render_panel(frame: &mut Frame, area: Rect, view: &PageView, main: NodeId) {
    let doc = view.doc;
    let panel = visible_panel(view);
    let table = match panel {
        Some(panel) => doc.query_selector(panel, "table").ok().flatten(),
        // No tab panels at all: the first table on the page
        None => doc.query_selector(main, "table").ok().flatten(),
    };
    if let Some(table) = table {
        draw_table(frame, area, view, table);
        return;
    }

    let mut lines = Vec::new();
    if let Some(panel) = panel {
        if let Ok(Some(heading)) = doc.query_selector(panel, "h3") {
            lines.push(Line::from(Span::styled(
                view.text(heading),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }
        for paragraph in doc.query_selector_all(panel, "p").unwrap_or_default() {
            lines.push(Line::from(view.text(paragraph)));
        }
    }
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(muted()));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use counselflow_ui::dom::{Document, El};
    use counselflow_ui::model::UiState;

    #[test]
    fn test_progress_spans_follow_width() {
        let mut doc = Document::new();
        let bar = doc.build(
            doc.body(),
            El::new("div")
                .class("progress-bar")
                .attr("aria-label", "Capacity")
                .style("width", "60%"),
        );
        let state = UiState::default();
        let view = PageView {
            doc: &doc,
            state: &state,
            focus: None,
        };
        let text: String = progress_spans(&view, bar)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "Capacity ██████░░░░ 60%");
    }

    #[test]
    fn test_checkbox_label_shows_state() {
        let mut doc = Document::new();
        let checkbox = doc.build(
            doc.body(),
            El::new("input")
                .attr("type", "checkbox")
                .attr("aria-label", "Show archived"),
        );
        doc.set_attribute(checkbox, "checked", "");
        let state = UiState::default();
        let view = PageView {
            doc: &doc,
            state: &state,
            focus: None,
        };
        assert_eq!(quick_action_label(&view, checkbox), "[x] Show archived");
    }
}
