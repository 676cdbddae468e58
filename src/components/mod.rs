//! Drawing components for the page preview
//!
//! Everything here reads the enhanced [`Document`]: what the controller
//! changed in the markup (widths, classes, hidden rows, open menus) is
//! what ends up on screen.

pub mod content;
pub mod dialog;
pub mod header;
pub mod layout;
pub mod sidebar;
pub mod status;
pub mod table;
pub mod toasts;

pub use content::draw_content;
pub use dialog::draw_modal;
pub use header::{draw_dropdown_menu, draw_header};
pub use layout::{calculate_page_layout, centered_popup, columns_for_width};
pub use sidebar::draw_sidebar;
pub use status::draw_help_bar;
pub use table::draw_table;
pub use toasts::draw_toasts;

use counselflow_ui::dom::Document;
use counselflow_ui::model::UiState;
use counselflow_ui::NodeId;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthStr;

/// Read-only view handed to every drawing function
pub struct PageView<'a> {
    pub doc: &'a Document,
    pub state: &'a UiState,
    pub focus: Option<NodeId>,
}

impl PageView<'_> {
    pub fn is_focused(&self, node: NodeId) -> bool {
        self.focus == Some(node)
    }

    /// `base`, reversed when `node` has focus
    pub fn styled(&self, node: NodeId, base: Style) -> Style {
        if self.is_focused(node) {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    /// Whether the element is invisible through `display` or `opacity`
    pub fn is_invisible(&self, node: NodeId) -> bool {
        self.doc.is_hidden(node) || self.doc.style(node, "opacity") == Some("0")
    }

    pub fn text(&self, node: NodeId) -> String {
        self.doc.text_content(node).trim().to_string()
    }
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Cut `text` to `width` display columns, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_display_columns() {
        assert_eq!(truncate("Acme Merger", 20), "Acme Merger");
        assert_eq!(truncate("Acme Merger", 6), "Acme …");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }
}
