//! Top bar: mobile menu button, search box and the profile dropdown

use super::{muted, truncate, PageView};
use counselflow_ui::NodeId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const PROFILE_WIDTH: u16 = 20;

fn header_node(view: &PageView) -> Option<NodeId> {
    view.doc.query_selector(view.doc.root(), "header").ok().flatten()
}

pub fn draw_header(frame: &mut Frame, area: Rect, view: &PageView) {
    let doc = view.doc;
    let Some(header) = header_node(view) else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(10),
            Constraint::Length(PROFILE_WIDTH),
        ])
        .split(area);

    if let Ok(Some(menu)) = doc.query_selector(header, ".mobile-menu-button") {
        let button = Paragraph::new(Line::from(Span::styled(
            view.text(menu),
            view.styled(menu, Style::default().fg(Color::White)),
        )))
        .block(Block::default().borders(Borders::ALL).border_style(muted()));
        frame.render_widget(button, chunks[0]);
    }

    if let Ok(Some(search)) = doc.query_selector(header, "input") {
        let value = doc.value(search);
        let width = chunks[1].width.saturating_sub(4) as usize;
        let line = if value.is_empty() {
            Line::from(Span::styled(
                truncate(doc.attribute(search, "placeholder").unwrap_or(""), width),
                muted(),
            ))
        } else {
            let mut text = truncate(value, width.saturating_sub(1));
            if view.is_focused(search) {
                text.push('▏');
            }
            Line::from(Span::styled(text, Style::default().fg(Color::White)))
        };
        let border = if view.is_focused(search) {
            Style::default().fg(Color::Cyan)
        } else {
            muted()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");
        frame.render_widget(Paragraph::new(line).block(block), chunks[1]);
    }

    if let Ok(Some(profile)) = doc.query_selector(header, ".profile-menu") {
        let open = doc.attribute(profile, "aria-expanded") == Some("true");
        let label = format!(
            "{} {}",
            truncate(&view.text(profile), PROFILE_WIDTH as usize - 5),
            if open { "▴" } else { "▾" }
        );
        let widget = Paragraph::new(Line::from(Span::styled(
            label,
            view.styled(profile, Style::default().fg(Color::White)),
        )))
        .block(Block::default().borders(Borders::ALL).border_style(muted()));
        frame.render_widget(widget, chunks[2]);
    }
}

/// Open dropdown menu, drawn over the content below the header
pub fn draw_dropdown_menu(frame: &mut Frame, header: Rect, view: &PageView) {
    let doc = view.doc;
    let Ok(Some(menu)) = doc.query_selector(doc.root(), ".dropdown-menu") else {
        return;
    };
    let items = doc
        .query_selector_all(menu, "[role=\"menuitem\"]")
        .unwrap_or_default();
    let width = PROFILE_WIDTH.min(header.width);
    let height = (items.len() as u16 + 2).min(frame.area().height.saturating_sub(header.bottom()));
    let area = Rect::new(header.right().saturating_sub(width), header.bottom(), width, height);

    let lines: Vec<Line> = items
        .iter()
        .map(|item| {
            let base = if view.text(*item) == "Sign Out" {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!(" {}", truncate(&view.text(*item), (width as usize).saturating_sub(3))),
                view.styled(*item, base),
            ))
        })
        .collect();

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
