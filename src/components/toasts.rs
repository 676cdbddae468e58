//! Toast stack in the top-right corner

use super::{truncate, PageView};
use counselflow_ui::model::{ToastKind, ToastMessage};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_TOAST_WIDTH: u16 = 44;

fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Info => Color::Blue,
    }
}

pub fn draw_toasts<'a>(
    frame: &mut Frame,
    area: Rect,
    view: &PageView,
    toasts: impl Iterator<Item = &'a ToastMessage>,
) {
    let doc = view.doc;
    let mut y = area.y + 1;
    for toast in toasts {
        if y + 3 > area.bottom() {
            break;
        }
        let width = (toast.text.width() as u16 + 8)
            .min(MAX_TOAST_WIDTH)
            .min(area.width);
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);

        let close = doc
            .query_selector(
                doc.root(),
                &format!("[data-toast-id=\"{}\"] .toast-close", toast.id.0),
            )
            .ok()
            .flatten();
        let close_style = match close {
            Some(close) => view.styled(close, Style::default().fg(Color::White)),
            None => Style::default().fg(Color::White),
        };

        let color = kind_color(toast.kind);
        let text = truncate(&toast.text, width.saturating_sub(6) as usize);
        let line = Line::from(vec![
            Span::styled(text, Style::default().fg(Color::White)),
            Span::raw(" "),
            Span::styled("×", close_style),
        ]);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", toast.formatted_time())),
            ),
            rect,
        );
        y += 3;
    }
}
