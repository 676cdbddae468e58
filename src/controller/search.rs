//! Search inputs filtering the page's first table

use super::UiController;
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{Role, ToastKind};
use crate::services::TimerTask;
use tracing::debug;

const EMPTY_STATE: &str = "empty-state";

impl UiController {
    pub(super) fn init_search(&mut self) -> Result<usize> {
        let mut count = 0;
        for input in self.find_role(Role::SearchInput)? {
            if !self.mark(input, Role::SearchInput.sentinel()) {
                continue;
            }
            self.doc
                .add_listener(input, Listener::on(EventKind::Input, Action::SearchInput(input)));
            self.doc.add_listener(
                input,
                Listener::on(EventKind::KeyDown, Action::SearchKey { input, key: None }),
            );
            count += 1;
        }
        Ok(count)
    }

    /// Restart the debounce window for `input`
    pub(super) fn schedule_search(&mut self, input: NodeId) {
        let generation = self.search_generations.entry(input).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.timers.schedule(
            self.settings.search_debounce,
            TimerTask::RunSearch { input, generation },
        );
    }

    /// Filter rows by the input's current text
    ///
    /// An empty query restores every row. Returns the toast to show, if any.
    pub fn perform_search(&mut self, input: NodeId) -> Result<Option<Action>> {
        if !self.doc.contains(input) {
            return Ok(None);
        }
        let query = self.doc.value(input).trim().to_string();
        let root = self.doc.root();
        let Some(tbody) = self.doc.query_selector(root, "table tbody")? else {
            debug!("Search without a table to filter");
            return Ok(None);
        };

        let rows: Vec<NodeId> = self
            .doc
            .children(tbody)
            .iter()
            .copied()
            .filter(|r| self.doc.tag(*r) == Some("tr") && !self.doc.has_class(*r, EMPTY_STATE))
            .collect();

        if query.is_empty() {
            for row in rows {
                self.doc.set_style(row, "display", "");
            }
            self.hide_empty_state(tbody)?;
            return Ok(None);
        }

        let needle = query.to_lowercase();
        let mut visible = 0;
        for row in rows {
            let matched = self.doc.text_content(row).to_lowercase().contains(&needle);
            self.doc
                .set_style(row, "display", if matched { "" } else { "none" });
            if matched {
                visible += 1;
            }
        }
        debug!(query = %query, visible, "Search applied");

        if visible == 0 {
            self.show_empty_state(tbody, &format!("No results found for \"{}\"", query))?;
        } else {
            self.hide_empty_state(tbody)?;
        }
        Ok(Some(Action::ShowToast {
            message: format!("Search results for \"{}\"", query),
            kind: ToastKind::Success,
        }))
    }

    fn show_empty_state(&mut self, tbody: NodeId, message: &str) -> Result<()> {
        if let Some(existing) = self.doc.query_selector(tbody, ".empty-state")? {
            if let Some(cell) = self.doc.query_selector(existing, "p")? {
                self.doc.set_text(cell, message);
            }
            return Ok(());
        }
        self.doc.build(
            tbody,
            El::new("tr").class(EMPTY_STATE).child(
                El::new("td")
                    .attr("colspan", "100%")
                    .class("text-center py-8 text-gray-500")
                    .child(El::new("p").text(message)),
            ),
        );
        Ok(())
    }

    fn hide_empty_state(&mut self, tbody: NodeId) -> Result<()> {
        if let Some(existing) = self.doc.query_selector(tbody, ".empty-state")? {
            self.doc.remove(existing);
        }
        Ok(())
    }
}
