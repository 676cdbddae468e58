//! Root component of the preview
//!
//! Owns the [`UiController`] and a keyboard focus. Key presses become
//! DOM events delivered to the focused element, so the preview goes
//! through exactly the listeners a browser click or key press would.

use crate::component::Component;
use crate::components::{
    calculate_page_layout, columns_for_width, draw_content, draw_dropdown_menu, draw_header,
    draw_help_bar, draw_modal, draw_sidebar, draw_toasts, PageView,
};
use crate::focus::{focus_targets, is_checkbox, is_editable, link_target, select_options};
use anyhow::Result;
use counselflow_ui::controller::SENTINEL_ATTR;
use counselflow_ui::{Action, DomEvent, EventKind, NodeId, UiController};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Sidebar columns before the controller has set a width
const DEFAULT_SIDEBAR_COLUMNS: u16 = 25;

pub struct App {
    controller: UiController,
    focus: Option<NodeId>,
    /// Focus to restore once the open modal closes
    return_focus: Option<NodeId>,
    /// Last navigation the page requested
    pub navigation: Option<String>,
    pub should_quit: bool,
    last_tick: Instant,
}

impl App {
    pub fn new(controller: UiController) -> Self {
        Self {
            controller,
            focus: None,
            return_focus: None,
            navigation: None,
            should_quit: false,
            last_tick: Instant::now(),
        }
    }

    fn focus_scope(&self) -> NodeId {
        match self.controller.current_modal() {
            Some(modal) => modal.root,
            None => self.controller.document().body(),
        }
    }

    fn targets(&self) -> Vec<NodeId> {
        focus_targets(self.controller.document(), self.focus_scope())
    }

    /// Move focus, delivering blur and focus events
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        if node == self.focus {
            return;
        }
        if let Some(old) = self.focus {
            self.controller.dispatch(DomEvent::blur(old));
        }
        self.focus = node;
        if let Some(new) = node {
            self.controller.dispatch(DomEvent::focus(new));
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let targets = self.targets();
        if targets.is_empty() {
            return;
        }
        let next = match self.focus.and_then(|f| targets.iter().position(|t| *t == f)) {
            Some(i) if forward => (i + 1) % targets.len(),
            Some(i) => (i + targets.len() - 1) % targets.len(),
            None => 0,
        };
        self.set_focus(Some(targets[next]));
    }

    /// Keep focus on a live stop after the document changed
    fn sync_focus(&mut self) {
        let targets = self.targets();
        if self.focus.is_some_and(|f| targets.contains(&f)) {
            return;
        }
        if let Some(restored) = self.return_focus.filter(|f| targets.contains(f)) {
            self.return_focus = None;
            self.focus = Some(restored);
            return;
        }
        let doc = self.controller.document();
        let in_modal = self.controller.current_modal().is_some();
        self.focus = targets
            .iter()
            .copied()
            .find(|t| in_modal && (is_editable(doc, *t) || doc.tag(*t) == Some("select")))
            .or_else(|| targets.first().copied());
    }

    /// Arrow keys move a tab group's selection; focus follows it
    fn follow_active_tab(&mut self) {
        let doc = self.controller.document();
        let Some(focus) = self.focus else {
            return;
        };
        if doc.attribute(focus, "role") != Some("tab")
            || doc.attribute(focus, "aria-selected") == Some("true")
        {
            return;
        }
        let active = doc.parent(focus).and_then(|list| {
            doc.children(list)
                .iter()
                .copied()
                .find(|t| doc.attribute(*t, "aria-selected") == Some("true"))
        });
        if active.is_some() {
            self.focus = active;
        }
    }

    fn find_enhanced(&self, sentinel: &str) -> Option<NodeId> {
        let doc = self.controller.document();
        doc.query_selector_all(doc.root(), &format!("[{}]", SENTINEL_ATTR))
            .ok()?
            .into_iter()
            .find(|n| self.controller.is_enhanced(*n, sentinel) && !doc.is_hidden(*n))
    }

    fn edit_value(&mut self, field: NodeId, edit: impl FnOnce(&mut String)) {
        let doc = self.controller.document_mut();
        let mut value = doc.value(field).to_string();
        edit(&mut value);
        doc.set_value(field, value);
    }

    fn toggle_checkbox(&mut self, checkbox: NodeId) {
        let doc = self.controller.document_mut();
        if doc.has_attribute(checkbox, "checked") {
            doc.remove_attribute(checkbox, "checked");
        } else {
            doc.set_attribute(checkbox, "checked", "");
        }
    }

    fn cycle_select(&mut self, select: NodeId, forward: bool) {
        let doc = self.controller.document();
        let options = select_options(doc, select);
        if options.is_empty() {
            return;
        }
        let value = doc.control_value(select);
        let current = options.iter().position(|o| *o == value).unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        let value = options[next].clone();
        self.controller.document_mut().set_value(select, value);
    }

    /// Run the controller's timers for `by` of elapsed time
    pub fn advance(&mut self, by: Duration) {
        self.controller.advance(by);
        self.settle();
    }

    fn settle(&mut self) {
        if let Some(path) = self.controller.take_navigation() {
            info!("Page navigation: {}", path);
            self.navigation = Some(path);
        }
        self.sync_focus();
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        let report = self.controller.initialize();
        for failure in &report.failures {
            warn!("Enhancement failed: {}", failure);
        }
        info!(enhanced = report.total(), "Page enhanced");
        self.sync_focus();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let editable = self
            .focus
            .filter(|f| is_editable(self.controller.document(), *f));
        if let Some(field) = editable {
            match key.code {
                KeyCode::Char(c) => {
                    self.edit_value(field, |v| v.push(c));
                    return Ok(Some(Action::Dispatch(DomEvent::input(field))));
                }
                KeyCode::Backspace => {
                    self.edit_value(field, |v| {
                        v.pop();
                    });
                    return Ok(Some(Action::Dispatch(DomEvent::input(field))));
                }
                KeyCode::Enter => {
                    return Ok(Some(Action::Dispatch(DomEvent::key_down(field, "Enter"))));
                }
                _ => {}
            }
        }

        let select = self
            .focus
            .filter(|f| self.controller.document().tag(*f) == Some("select"));
        if let Some(select) = select {
            if let KeyCode::Left | KeyCode::Right = key.code {
                self.cycle_select(select, key.code == KeyCode::Right);
                return Ok(Some(Action::Dispatch(DomEvent::input(select))));
            }
        }

        if let (Some(focus), KeyCode::Enter | KeyCode::Char(' ')) = (self.focus, key.code) {
            let doc = self.controller.document();
            if is_checkbox(doc, focus) {
                self.toggle_checkbox(focus);
                return Ok(Some(Action::Dispatch(DomEvent::change(focus))));
            }
            if doc.listeners().count_on(focus, EventKind::Click) == 0 {
                if let Some(href) = link_target(doc, focus) {
                    return Ok(Some(Action::Navigate(href.to_string())));
                }
            }
        }

        let body = self.controller.document().body();
        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                None
            }
            KeyCode::Left => self
                .focus
                .map(|f| Action::Dispatch(DomEvent::key_down(f, "ArrowLeft"))),
            KeyCode::Right => self
                .focus
                .map(|f| Action::Dispatch(DomEvent::key_down(f, "ArrowRight"))),
            KeyCode::Home => self
                .focus
                .map(|f| Action::Dispatch(DomEvent::key_down(f, "Home"))),
            KeyCode::End => self
                .focus
                .map(|f| Action::Dispatch(DomEvent::key_down(f, "End"))),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.focus.map(|f| Action::Dispatch(DomEvent::click(f)))
            }
            KeyCode::Esc => Some(Action::Dispatch(DomEvent::key_down(body, "Escape"))),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('s') => self
                .find_enhanced("sidebar-toggle")
                .map(|t| Action::Dispatch(DomEvent::click(t))),
            KeyCode::Char('m') => self
                .find_enhanced("mobile-sidebar-toggle")
                .map(|t| Action::Dispatch(DomEvent::click(t))),
            KeyCode::Char('/') => {
                let search = self.find_enhanced("search");
                if search.is_some() {
                    self.set_focus(search);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;
                self.advance(elapsed);
            }
            Action::Resize(..) => {}
            other => {
                let had_modal = self.controller.current_modal().is_some();
                let before = self.focus;
                self.controller.perform(other);
                if !had_modal && self.controller.current_modal().is_some() {
                    self.return_focus = before;
                    self.focus = None;
                }
                self.follow_active_tab();
                self.settle();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let doc = self.controller.document();
        let view = PageView {
            doc,
            state: self.controller.state(),
            focus: self.focus,
        };

        let sidebar_width = doc
            .query_selector(doc.root(), "aside")?
            .map(|aside| columns_for_width(doc.style(aside, "width"), DEFAULT_SIDEBAR_COLUMNS))
            .unwrap_or(0);
        let layout = calculate_page_layout(area, sidebar_width);

        draw_sidebar(frame, layout.sidebar, &view);
        draw_header(frame, layout.header, &view);
        draw_content(frame, layout.content, &view);
        draw_help_bar(frame, layout.help, &view, self.navigation.as_deref());
        draw_dropdown_menu(frame, layout.header, &view);
        if let Some(modal) = self.controller.current_modal() {
            draw_modal(frame, area, &view, modal.root);
        }
        draw_toasts(frame, area, &view, self.controller.toasts());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counselflow_ui::page::matters_page;
    use counselflow_ui::services::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut app = App::new(UiController::new(matters_page(), MemoryStore::new()));
        app.init().unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut current = app.handle_key_event(key).unwrap();
        while let Some(action) = current {
            current = app.update(action).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn visible_rows(app: &App) -> usize {
        let doc = app.controller.document();
        doc.query_selector_all(doc.root(), "tbody tr")
            .unwrap()
            .into_iter()
            .filter(|r| !doc.is_hidden(*r) && !doc.has_class(*r, "empty-state"))
            .count()
    }

    fn focus_node(app: &mut App, selector: &str) -> NodeId {
        let doc = app.controller.document();
        let node = doc.query_selector(doc.root(), selector).unwrap().unwrap();
        app.set_focus(Some(node));
        node
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap()
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_focused_on_first_stop() {
        let app = app();
        let doc = app.controller.document();
        let focus = app.focus.unwrap();
        assert_eq!(doc.attribute(focus, "title"), Some("Collapse sidebar"));
    }

    #[test]
    fn test_sidebar_shortcut() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert!(app.controller.state().sidebar_collapsed);
        press(&mut app, KeyCode::Char('s'));
        assert!(!app.controller.state().sidebar_collapsed);
    }

    #[test]
    fn test_tab_key_cycles_focus() {
        let mut app = app();
        let first = app.focus;
        press(&mut app, KeyCode::Tab);
        assert_ne!(app.focus, first);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, first);
    }

    #[test]
    fn test_typing_in_search_filters_after_debounce() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "acme");
        assert_eq!(visible_rows(&app), 4);

        app.advance(Duration::from_millis(300));
        assert_eq!(visible_rows(&app), 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_quits_outside_text_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quick_action_modal_round_trip() {
        let mut app = app();
        let button = focus_node(&mut app, "[data-modal-form=\"new-matter\"]");
        press(&mut app, KeyCode::Enter);

        let modal = app.controller.current_modal().unwrap();
        let root = modal.root;
        let focus = app.focus.unwrap();
        let doc = app.controller.document();
        assert!(doc.is_inclusive_ancestor(root, focus));
        assert!(is_editable(doc, focus) || doc.tag(focus) == Some("select"));

        press(&mut app, KeyCode::Esc);
        assert!(app.controller.current_modal().is_none());
        assert_eq!(app.focus, Some(button));
    }

    #[test]
    fn test_arrow_keys_move_tab_and_focus() {
        let mut app = app();
        let active = focus_node(&mut app, "[data-tab=\"active\"]");
        press(&mut app, KeyCode::Right);

        let doc = app.controller.document();
        let focus = app.focus.unwrap();
        assert_ne!(focus, active);
        assert_eq!(doc.attribute(focus, "data-tab"), Some("pending"));
        assert_eq!(doc.attribute(focus, "aria-selected"), Some("true"));
    }

    #[test]
    fn test_sign_out_records_navigation() {
        let mut app = app();
        focus_node(&mut app, ".profile-menu");
        press(&mut app, KeyCode::Enter);

        let doc = app.controller.document();
        let sign_out = doc
            .query_selector_all(doc.root(), "[role=\"menuitem\"]")
            .unwrap()
            .into_iter()
            .find(|item| doc.text_content(*item).trim() == "Sign Out")
            .unwrap();
        app.set_focus(Some(sign_out));
        press(&mut app, KeyCode::Enter);
        assert!(app.navigation.is_none());

        app.advance(Duration::from_millis(1000));
        assert_eq!(app.navigation.as_deref(), Some("../login/"));
    }

    #[test]
    fn test_space_flips_checkbox() {
        let mut app = app();
        let checkbox = focus_node(&mut app, "input[type=checkbox]");
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.document().has_attribute(checkbox, "checked"));
        assert!(app.controller.toasts().any(|t| t.text == "Toggle ON"));

        press(&mut app, KeyCode::Enter);
        assert!(!app.controller.document().has_attribute(checkbox, "checked"));
        assert!(app.controller.toasts().any(|t| t.text == "Toggle OFF"));
    }

    #[test]
    fn test_enter_follows_nav_link() {
        let mut app = app();
        focus_node(&mut app, "a[href=\"../contracts/\"]");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.navigation.as_deref(), Some("../contracts/"));
    }

    #[test]
    fn test_draw_shows_page() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("CounselFlow"));
        assert!(text.contains("Acme Merger"));
        assert!(text.contains("New Matter"));
        assert!(text.contains("[ Generate Report ]"));
        assert!(text.contains("Matter capacity ████░░░░░░ 40%"));

        press(&mut app, KeyCode::Char('s'));
        app.advance(Duration::from_millis(300));
        let collapsed = screen(&mut app);
        assert!(!collapsed.contains("Dashboard"));
    }
}
