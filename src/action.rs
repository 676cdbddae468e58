//! Action enum - everything a listener or the preview shell can trigger
//!
//! Listeners store an action template. When an event is dispatched the
//! template is bound against it ([`Action::bind`]), which fills in the
//! event target or key and may drop the action entirely (a backdrop
//! listener ignores clicks that started inside the dialog).

use crate::dom::{DomEvent, NodeId};
use crate::model::{GroupId, TabId, ToastId, ToastKind};
use std::fmt;

/// All possible actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // Preview shell lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers and redraws
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Leave the preview
    Quit,
    /// Deliver an input event to the document (preview key mapping)
    Dispatch(DomEvent),

    // ─────────────────────────────────────────────────────────────────────────
    // Sidebar
    // ─────────────────────────────────────────────────────────────────────────
    ToggleSidebar,
    ToggleMobileSidebar,

    // ─────────────────────────────────────────────────────────────────────────
    // Dropdowns
    // ─────────────────────────────────────────────────────────────────────────
    /// Open or close the dropdown owned by this trigger
    ToggleDropdown(NodeId),
    /// A menu item was chosen
    SelectDropdownItem(String),
    /// Document click, used to close menus on outside clicks
    DocumentClick { target: Option<NodeId> },

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Run the `data-action` invocation declared on this element
    Invoke(NodeId),
    CloseModal,
    /// Click that reached the backdrop; closes only if it started there
    BackdropClick { backdrop: NodeId, target: Option<NodeId> },

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────────
    ShowToast { message: String, kind: ToastKind },
    DismissToast(ToastId),

    // ─────────────────────────────────────────────────────────────────────────
    // Tabs
    // ─────────────────────────────────────────────────────────────────────────
    ActivateTab { group: GroupId, tab: TabId },
    /// Keyboard navigation within a tab group
    TabKey {
        group: GroupId,
        tab: TabId,
        key: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────────────────────
    SelectRow { table: NodeId, row: NodeId },
    SortColumn { table: NodeId, header: NodeId },

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────
    FocusField(NodeId),
    BlurField(NodeId),
    ValidateField(NodeId),
    /// Submit button clicked; delivers a submit event to its form
    RequestSubmit(NodeId),
    /// A form submit event reached the document
    SubmitForm { form: Option<NodeId> },

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Search text changed; runs after the debounce delay
    SearchInput(NodeId),
    /// Key pressed in a search input; Enter searches immediately
    SearchKey { input: NodeId, key: Option<String> },

    // ─────────────────────────────────────────────────────────────────────────
    // Buttons & widgets
    // ─────────────────────────────────────────────────────────────────────────
    /// Click on a button no other handler owns
    ButtonPress(NodeId),
    /// Checkbox or switch changed state
    ToggleChanged(NodeId),
    BadgeClick(NodeId),
    AdvanceProgress(NodeId),
    /// Click on a clickable row, card or list item
    InteractiveClick(NodeId),

    // ─────────────────────────────────────────────────────────────────────────
    // Icons & global keys
    // ─────────────────────────────────────────────────────────────────────────
    IconPress(NodeId),
    /// Document keydown (Escape closes modal and menus)
    DocumentKey { key: Option<String> },

    /// Request to leave the page
    Navigate(String),
}

impl Action {
    /// Specialise a listener template for a concrete event
    pub fn bind(self, event: &DomEvent) -> Option<Action> {
        match self {
            Action::DocumentClick { .. } => Some(Action::DocumentClick {
                target: Some(event.target),
            }),
            Action::BackdropClick { backdrop, .. } => {
                (event.target == backdrop).then_some(Action::BackdropClick {
                    backdrop,
                    target: Some(event.target),
                })
            }
            Action::TabKey { group, tab, .. } => Some(Action::TabKey {
                group,
                tab,
                key: event.key.clone(),
            }),
            Action::SearchKey { input, .. } => Some(Action::SearchKey {
                input,
                key: event.key.clone(),
            }),
            Action::SubmitForm { .. } => Some(Action::SubmitForm {
                form: Some(event.target),
            }),
            Action::DocumentKey { .. } => Some(Action::DocumentKey {
                key: event.key.clone(),
            }),
            other => Some(other),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::Dispatch(event) => write!(f, "Dispatch({:?}, {})", event.kind, event.target),
            Action::ToggleSidebar => write!(f, "ToggleSidebar"),
            Action::ToggleMobileSidebar => write!(f, "ToggleMobileSidebar"),
            Action::ToggleDropdown(n) => write!(f, "ToggleDropdown({})", n),
            Action::SelectDropdownItem(item) => write!(f, "SelectDropdownItem({})", item),
            Action::DocumentClick { .. } => write!(f, "DocumentClick"),
            Action::Invoke(n) => write!(f, "Invoke({})", n),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::BackdropClick { backdrop, .. } => write!(f, "BackdropClick({})", backdrop),
            Action::ShowToast { message, kind } => write!(f, "ShowToast({}, {})", kind, message),
            Action::DismissToast(id) => write!(f, "DismissToast({})", id.0),
            Action::ActivateTab { group, tab } => write!(f, "ActivateTab({}, {})", group, tab),
            Action::TabKey { group, tab, key } => {
                write!(f, "TabKey({}, {}, {:?})", group, tab, key)
            }
            Action::SelectRow { table, row } => write!(f, "SelectRow({}, {})", table, row),
            Action::SortColumn { table, header } => write!(f, "SortColumn({}, {})", table, header),
            Action::FocusField(n) => write!(f, "FocusField({})", n),
            Action::BlurField(n) => write!(f, "BlurField({})", n),
            Action::ValidateField(n) => write!(f, "ValidateField({})", n),
            Action::RequestSubmit(n) => write!(f, "RequestSubmit({})", n),
            Action::SubmitForm { form } => write!(f, "SubmitForm({:?})", form),
            Action::SearchInput(n) => write!(f, "SearchInput({})", n),
            Action::SearchKey { input, key } => write!(f, "SearchKey({}, {:?})", input, key),
            Action::IconPress(n) => write!(f, "IconPress({})", n),
            Action::ButtonPress(n) => write!(f, "ButtonPress({})", n),
            Action::ToggleChanged(n) => write!(f, "ToggleChanged({})", n),
            Action::BadgeClick(n) => write!(f, "BadgeClick({})", n),
            Action::AdvanceProgress(n) => write!(f, "AdvanceProgress({})", n),
            Action::InteractiveClick(n) => write!(f, "InteractiveClick({})", n),
            Action::DocumentKey { key } => write!(f, "DocumentKey({:?})", key),
            Action::Navigate(path) => write!(f, "Navigate({})", path),
        }
    }
}
