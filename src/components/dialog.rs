//! Modal dialog: title, text or form body and the form's buttons

use super::{centered_popup, muted, truncate, PageView};
use counselflow_ui::NodeId;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 18;

fn field_style(view: &PageView, control: NodeId) -> Style {
    let doc = view.doc;
    let base = if doc.has_class(control, "border-red-500") {
        Style::default().fg(Color::Red)
    } else if doc.has_class(control, "border-green-500") {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    view.styled(control, base)
}

fn form_lines(view: &PageView, form: NodeId, width: usize) -> Vec<Line<'static>> {
    let doc = view.doc;
    let mut lines = Vec::new();
    for field in doc.query_selector_all(form, ".form-field").unwrap_or_default() {
        let Ok(Some(control)) = doc.query_selector(field, "input, textarea, select") else {
            continue;
        };
        let mut label = doc
            .query_selector(field, "label")
            .ok()
            .flatten()
            .map(|l| view.text(l))
            .unwrap_or_default();
        if doc.has_attribute(control, "required") {
            label.push_str(" *");
        }

        let value_width = width.saturating_sub(LABEL_WIDTH + 3);
        let mut value = truncate(&doc.control_value(control), value_width.saturating_sub(2));
        if doc.tag(control) == Some("select") {
            value = format!("‹ {} ›", value);
        } else if view.is_focused(control) {
            value.push('▏');
        }
        let padded = format!("{:<w$}", value, w = value_width);

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<w$} ", truncate(&label, LABEL_WIDTH), w = LABEL_WIDTH),
                muted(),
            ),
            Span::styled(padded, field_style(view, control)),
        ]));
        if doc.attribute(control, "aria-invalid") == Some("true") {
            lines.push(Line::from(Span::styled(
                format!("{:w$} invalid value", "", w = LABEL_WIDTH),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let mut buttons = vec![Span::raw(" ")];
    for button in doc
        .query_selector_all(form, ".form-actions button")
        .unwrap_or_default()
    {
        let base = if doc.attribute(button, "type") == Some("submit") {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        buttons.push(Span::styled(
            format!("[ {} ]", view.text(button)),
            view.styled(button, base),
        ));
        buttons.push(Span::raw("  "));
    }
    lines.push(Line::from(buttons));
    lines
}

/// Draw the modal rooted at `root` over the whole screen
pub fn draw_modal(frame: &mut Frame, area: Rect, view: &PageView, root: NodeId) {
    let doc = view.doc;
    let title = doc
        .query_selector(root, ".modal-title")
        .ok()
        .flatten()
        .map(|t| view.text(t))
        .unwrap_or_default();
    let inner_width = DIALOG_WIDTH.saturating_sub(4) as usize;

    let body = doc.query_selector(root, ".modal-body").ok().flatten();
    let form = body.and_then(|b| doc.query_selector(b, "form").ok().flatten());
    let lines = match (body, form) {
        (_, Some(form)) => form_lines(view, form, inner_width),
        (Some(body), None) => vec![Line::from(view.text(body))],
        (None, None) => Vec::new(),
    };

    let close_style = match doc.query_selector(root, ".modal-close").ok().flatten() {
        Some(close) => view.styled(close, Style::default().fg(Color::Yellow)),
        None => Style::default().fg(Color::Yellow),
    };
    let height = (lines.len() as u16 + 4).max(7);
    let popup = centered_popup(area, DIALOG_WIDTH, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" × ", close_style),
        ]));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, popup);
}
