//! Table rows and sortable headers
//!
//! Row selection is handled here. Sorting itself is left to a
//! [`SortDelegate`]; the controller only tracks `aria-sort` and reports
//! the request.

use super::UiController;
use crate::action::Action;
use crate::dom::{EventKind, Listener, NodeId};
use crate::error::{Result, UiError};
use crate::model::Role;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn aria_value(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.aria_value())
    }
}

/// A header click asking for the table to be sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub table: NodeId,
    /// Zero-based column index
    pub column: usize,
    pub label: String,
    pub direction: SortDirection,
}

/// Receives sort intents from enhanced tables
pub trait SortDelegate {
    fn sort_requested(&mut self, request: &SortRequest);
}

/// Delegate that ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSort;

impl SortDelegate for NoopSort {
    fn sort_requested(&mut self, _request: &SortRequest) {}
}

impl<F: FnMut(&SortRequest)> SortDelegate for F {
    fn sort_requested(&mut self, request: &SortRequest) {
        self(request)
    }
}

impl UiController {
    pub(super) fn init_tables(&mut self) -> Result<usize> {
        let mut count = 0;
        for table in self.find_role(Role::Table)? {
            count += self.enhance_table(table)?;
        }
        Ok(count)
    }

    /// Make rows selectable and headers sortable
    ///
    /// Returns how many rows and headers were newly enhanced. Rows added
    /// later are picked up by calling this again.
    pub fn enhance_table(&mut self, table: NodeId) -> Result<usize> {
        if !self.doc.contains(table) {
            return Err(UiError::not_found(format!("table {}", table)));
        }
        self.mark(table, Role::Table.sentinel());

        let mut count = 0;
        for row in self.doc.query_selector_all(table, "tbody tr")? {
            if self.doc.has_class(row, "empty-state") || !self.mark(row, "table-row") {
                continue;
            }
            self.doc.set_style(row, "cursor", "pointer");
            self.doc.add_listener(
                row,
                Listener::on(EventKind::Click, Action::SelectRow { table, row }),
            );
            count += 1;
        }
        for header in self.doc.query_selector_all(table, "th")? {
            if !self.mark(header, "table-header") {
                continue;
            }
            self.doc.set_style(header, "cursor", "pointer");
            self.doc.add_listener(
                header,
                Listener::on(EventKind::Click, Action::SortColumn { table, header }),
            );
            count += 1;
        }
        debug!(%table, enhanced = count, "Table enhanced");
        Ok(count)
    }

    /// Select `row`, deselecting the table's previous selection
    ///
    /// Returns the 1-based position of the row in its body.
    pub fn select_row(&mut self, table: NodeId, row: NodeId) -> Result<usize> {
        if !self.doc.contains(row) {
            return Err(UiError::not_found(format!("row {}", row)));
        }
        if let Some(previous) = self.state.selected_row_by_table.get(&table).copied() {
            self.doc.remove_class(previous, "selected");
            self.doc.remove_attribute(previous, "aria-selected");
        }
        for stale in self.doc.query_selector_all(table, "tr.selected")? {
            self.doc.remove_class(stale, "selected");
            self.doc.remove_attribute(stale, "aria-selected");
        }
        self.doc.add_class(row, "selected");
        self.doc.set_attribute(row, "aria-selected", "true");
        self.state.selected_row_by_table.insert(table, row);

        let position = self
            .doc
            .parent(row)
            .map(|body| {
                self.doc
                    .children(body)
                    .iter()
                    .filter(|r| self.doc.tag(**r) == Some("tr"))
                    .position(|r| *r == row)
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        Ok(position + 1)
    }

    /// Flip the header's sort direction and notify the delegate
    pub(super) fn request_sort(&mut self, table: NodeId, header: NodeId) -> Result<SortRequest> {
        let row = self
            .doc
            .parent(header)
            .ok_or_else(|| UiError::not_found(format!("header row of {}", header)))?;
        let headers: Vec<NodeId> = self
            .doc
            .children(row)
            .iter()
            .copied()
            .filter(|h| self.doc.tag(*h) == Some("th"))
            .collect();
        let column = headers.iter().position(|h| *h == header).unwrap_or(0);

        let direction = match self.doc.attribute(header, "aria-sort") {
            Some("ascending") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        for other in headers.iter().filter(|h| **h != header) {
            self.doc.remove_attribute(*other, "aria-sort");
        }
        self.doc
            .set_attribute(header, "aria-sort", direction.aria_value());

        let request = SortRequest {
            table,
            column,
            label: self.doc.text_content(header),
            direction,
        };
        debug!(%table, column, %direction, "Sort requested");
        self.sort.sort_requested(&request);
        Ok(request)
    }
}
