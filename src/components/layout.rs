//! Layout calculations for the preview

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the page preview
pub struct PageLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub content: Rect,
    pub help: Rect,
}

/// Centered popup area, clamped to `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Terminal columns for a CSS width such as `"256px"`
pub fn columns_for_width(width: Option<&str>, fallback: u16) -> u16 {
    width
        .and_then(|w| w.trim().strip_suffix("px"))
        .and_then(|px| px.trim().parse::<u16>().ok())
        .map(|px| (px / 10).max(6))
        .unwrap_or(fallback)
}

pub fn calculate_page_layout(area: Rect, sidebar_width: u16) -> PageLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(rows[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    PageLayout {
        sidebar: columns[0],
        header: main[0],
        content: main[1],
        help: rows[1],
    }
}
