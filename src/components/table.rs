//! Data table rendering
//!
//! Headers show the `aria-sort` direction, hidden rows are skipped and
//! the search empty-state row spans the table.

use super::{muted, truncate, PageView};
use counselflow_ui::dom::Document;
use counselflow_ui::NodeId;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Column width cap, in display columns
const MAX_COLUMN_WIDTH: usize = 30;

fn sort_marker(doc: &Document, header: NodeId) -> &'static str {
    match doc.attribute(header, "aria-sort") {
        Some("ascending") => " ▲",
        Some("descending") => " ▼",
        _ => "",
    }
}

/// Cell text; an action cell with only an icon shows its glyph
fn cell_text(view: &PageView, cell: NodeId) -> String {
    let text = view.text(cell);
    if !text.is_empty() {
        return text;
    }
    if view.doc.query_selector(cell, "svg").ok().flatten().is_some() {
        return "✎".to_string();
    }
    String::new()
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }
    widths
        .into_iter()
        .map(|w| w.clamp(3, MAX_COLUMN_WIDTH))
        .collect()
}

pub fn draw_table(frame: &mut Frame, area: Rect, view: &PageView, table: NodeId) {
    let doc = view.doc;
    let header_nodes = doc.query_selector_all(table, "thead th").unwrap_or_default();
    let headers: Vec<String> = header_nodes
        .iter()
        .map(|h| format!("{}{}", view.text(*h), sort_marker(doc, *h)))
        .collect();

    let body_rows: Vec<NodeId> = doc
        .query_selector_all(table, "tbody tr")
        .unwrap_or_default()
        .into_iter()
        .filter(|r| !doc.is_hidden(*r))
        .collect();

    let cells: Vec<Vec<(NodeId, String)>> = body_rows
        .iter()
        .map(|row| {
            doc.children(*row)
                .iter()
                .filter(|c| doc.tag(**c) == Some("td"))
                .map(|c| (*c, cell_text(view, *c)))
                .collect()
        })
        .collect();

    let texts: Vec<Vec<String>> = cells
        .iter()
        .map(|row| row.iter().map(|(_, t)| t.clone()).collect())
        .collect();
    let widths = column_widths(&headers, &texts);

    let header = Row::new(header_nodes.iter().zip(&headers).zip(&widths).map(
        |((node, text), width)| {
            Cell::from(truncate(text, *width)).style(view.styled(
                *node,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        },
    ))
    .bottom_margin(1);

    let rows: Vec<Row> = body_rows
        .iter()
        .zip(&cells)
        .map(|(row, row_cells)| {
            if doc.has_class(*row, "empty-state") {
                let message = row_cells.first().map(|(_, t)| t.as_str()).unwrap_or("");
                return Row::new(vec![Cell::from(Span::styled(message.to_string(), muted()))]);
            }
            let mut style = if doc.has_class(*row, "selected") {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            style = view.styled(*row, style);

            let row_widgets = row_cells.iter().zip(&widths).map(|((cell, text), width)| {
                // Icons and badges inside a cell can hold focus on their own
                let focused = view
                    .focus
                    .is_some_and(|f| doc.is_inclusive_ancestor(*cell, f));
                let cell_style = if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Cell::from(Line::from(truncate(text, *width))).style(cell_style)
            });
            Row::new(row_widgets).style(style)
        })
        .collect();

    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|w| Constraint::Length(*w as u16))
        .collect();
    let visible = body_rows
        .iter()
        .filter(|r| !doc.has_class(**r, "empty-state"))
        .count();
    let title = format!(" {} of {} ", visible, total_rows(doc, table));

    let widget = Table::new(rows, constraints).header(header).column_spacing(2).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(muted())
            .title(title),
    );
    frame.render_widget(widget, area);
}

fn total_rows(doc: &Document, table: NodeId) -> usize {
    doc.query_selector_all(table, "tbody tr")
        .unwrap_or_default()
        .into_iter()
        .filter(|r| !doc.has_class(*r, "empty-state"))
        .count()
}
