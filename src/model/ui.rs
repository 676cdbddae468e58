//! UI state - the ephemeral state owned by the controller
//!
//! Only `sidebar_collapsed` outlives the page session; it is mirrored to
//! the key-value store under [`SIDEBAR_COLLAPSED_KEY`].

use crate::dom::NodeId;
use crate::model::modal::ModalId;
use std::collections::BTreeMap;
use std::fmt;

/// Storage key for the persisted sidebar flag
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Identifies a tab group (one active-selection slot)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub String);

/// Identifies a tab within its group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-local UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_collapsed: bool,
    pub mobile_sidebar_open: bool,
    pub active_modal: Option<ModalId>,
    pub active_tab_by_group: BTreeMap<GroupId, TabId>,
    /// Trigger of the currently open dropdown
    pub open_dropdown: Option<NodeId>,
    pub selected_row_by_table: BTreeMap<NodeId, NodeId>,
}

impl UiState {
    pub fn active_tab(&self, group: &GroupId) -> Option<&TabId> {
        self.active_tab_by_group.get(group)
    }

    pub fn selected_row(&self, table: NodeId) -> Option<NodeId> {
        self.selected_row_by_table.get(&table).copied()
    }
}

/// Parse a persisted flag (`"true"` / `"false"`)
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
