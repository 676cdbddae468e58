//! UI enhancement controller
//!
//! Scans an already rendered [`Document`] for interactive surfaces,
//! attaches listeners and owns the resulting [`UiState`].
//!
//! # Idempotence
//!
//! Every enhanced element carries the sentinel attribute
//! `data-cf-enhanced` listing the roles it was enhanced for. A repeated
//! [`UiController::initialize`] skips anything already marked, so running
//! it twice never double-attaches a handler.
//!
//! # Event flow
//!
//! `dispatch` collects the bound actions along the bubbling path and
//! feeds each through `update`, following any returned action the same
//! way the preview shell's main loop does. Handler errors are logged and
//! swallowed: enhancement is best-effort and must never break the page.

mod buttons;
mod dropdowns;
mod fields;
mod icons;
mod modals;
mod search;
mod sidebar;
mod tables;
mod tabs;
mod toasts;
mod widgets;

#[cfg(test)]
mod tests;

pub use buttons::{ButtonKind, QuickAction};
pub use icons::IconKind;
pub use tables::{NoopSort, SortDelegate, SortDirection, SortRequest};
pub use tabs::TabGroup;
pub use widgets::parse_percent;

use crate::action::Action;
use buttons::LoadingButton;
use crate::dom::{Document, DomEvent, EventKind, Listener, NodeId};
use crate::error::{Result, UiError};
use crate::model::ui::parse_flag;
use crate::model::{
    ModalSlot, OpenModal, Role, RoleMap, ToastId, ToastKind, ToastMessage, UiState,
    DEFAULT_TOAST_DURATION, SIDEBAR_COLLAPSED_KEY,
};
use crate::services::{KeyValueStore, Scheduler, TimerTask};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Attribute recording which roles an element was enhanced for
pub const SENTINEL_ATTR: &str = "data-cf-enhanced";

/// Marker attribute on the root element of an open modal
pub const MODAL_ROOT_ATTR: &str = "data-modal-root";

/// Tunables for timed behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub toast_duration: Duration,
    pub search_debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            toast_duration: DEFAULT_TOAST_DURATION,
            search_debounce: Duration::from_millis(300),
        }
    }
}

/// Outcome of one `initialize` run
#[derive(Debug, Default)]
pub struct InitReport {
    /// Newly enhanced element count per initializer
    pub enhanced: BTreeMap<&'static str, usize>,
    /// Initializers that failed; the rest still ran
    pub failures: Vec<UiError>,
}

impl InitReport {
    pub fn total(&self) -> usize {
        self.enhanced.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct ActiveToast {
    message: ToastMessage,
    node: NodeId,
}

/// The controller: one per page
pub struct UiController {
    doc: Document,
    state: UiState,
    roles: RoleMap,
    store: Box<dyn KeyValueStore>,
    timers: Scheduler,
    modals: ModalSlot,
    toasts: BTreeMap<ToastId, ActiveToast>,
    next_toast: u64,
    tab_groups: Vec<TabGroup>,
    search_generations: HashMap<NodeId, u64>,
    loading_buttons: HashMap<NodeId, LoadingButton>,
    sort: Box<dyn SortDelegate>,
    settings: ControllerSettings,
    initialized: bool,
    document_listeners: bool,
    pending_navigation: Option<String>,
}

impl UiController {
    /// Create a controller over `doc`, restoring persisted state from `store`
    pub fn new(doc: Document, store: impl KeyValueStore + 'static) -> Self {
        let sidebar_collapsed = parse_flag(store.get(SIDEBAR_COLLAPSED_KEY).as_deref());
        Self {
            doc,
            state: UiState {
                sidebar_collapsed,
                ..UiState::default()
            },
            roles: RoleMap::default(),
            store: Box::new(store),
            timers: Scheduler::new(),
            modals: ModalSlot::new(),
            toasts: BTreeMap::new(),
            next_toast: 0,
            tab_groups: Vec::new(),
            search_generations: HashMap::new(),
            loading_buttons: HashMap::new(),
            sort: Box::new(NoopSort),
            settings: ControllerSettings::default(),
            initialized: false,
            document_listeners: false,
            pending_navigation: None,
        }
    }

    pub fn with_roles(mut self, roles: RoleMap) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_sort_delegate(mut self, delegate: impl SortDelegate + 'static) -> Self {
        self.sort = Box::new(delegate);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for page code that changes markup or field values
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_modal(&self) -> Option<&OpenModal> {
        self.modals.current()
    }

    /// Toasts still in the document, oldest first
    pub fn toasts(&self) -> impl Iterator<Item = &ToastMessage> {
        self.toasts.values().map(|t| &t.message)
    }

    pub fn tab_groups(&self) -> &[TabGroup] {
        &self.tab_groups
    }

    /// Take the navigation requested by the page, if any
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Enhance the document; safe to call any number of times
    pub fn initialize(&mut self) -> InitReport {
        let first = !self.initialized;
        info!(first, "Initializing UI controller");

        let mut report = InitReport::default();
        self.run_stage(&mut report, "toasts", Self::init_toast_container);
        self.run_stage(&mut report, "document", Self::init_document_listeners);
        self.run_stage(&mut report, "sidebar", Self::init_sidebar);
        self.run_stage(&mut report, "dropdowns", Self::init_dropdowns);
        self.run_stage(&mut report, "tabs", Self::init_tabs);
        self.run_stage(&mut report, "forms", Self::init_forms);
        self.run_stage(&mut report, "tables", Self::init_tables);
        self.run_stage(&mut report, "search", Self::init_search);
        self.run_stage(&mut report, "invocations", Self::init_invocations);
        self.run_stage(&mut report, "buttons", Self::init_buttons);
        self.run_stage(&mut report, "toggles", Self::init_toggles);
        self.run_stage(&mut report, "badges", Self::init_badges);
        self.run_stage(&mut report, "progress", Self::init_progress);
        self.run_stage(&mut report, "interactive", Self::init_interactive);
        self.run_stage(&mut report, "icons", Self::init_icons);

        if let Err(e) = self.apply_sidebar_state(false) {
            warn!("Could not apply sidebar state: {}", e);
            report.failures.push(UiError::InitFailed {
                stage: "sidebar-state",
                reason: e.to_string(),
            });
        }

        self.initialized = true;
        info!(
            enhanced = report.total(),
            failures = report.failures.len(),
            "UI controller ready"
        );

        if first {
            self.show_toast("CounselFlow ready", ToastKind::Success, None);
        }
        report
    }

    fn run_stage(
        &mut self,
        report: &mut InitReport,
        stage: &'static str,
        init: fn(&mut Self) -> Result<usize>,
    ) {
        match init(self) {
            Ok(count) => {
                debug!(stage, count, "Initializer finished");
                report.enhanced.insert(stage, count);
            }
            Err(e) => {
                warn!(stage, "Initializer failed: {}", e);
                report.failures.push(UiError::InitFailed {
                    stage,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Escape, outside-click and submit listeners at document scope
    fn init_document_listeners(&mut self) -> Result<usize> {
        if self.document_listeners {
            return Ok(0);
        }
        self.doc.add_document_listener(Listener::on(
            EventKind::KeyDown,
            Action::DocumentKey { key: None },
        ));
        self.doc.add_document_listener(Listener::on(
            EventKind::Click,
            Action::DocumentClick { target: None },
        ));
        self.doc.add_document_listener(Listener::on(
            EventKind::Submit,
            Action::SubmitForm { form: None },
        ));
        self.document_listeners = true;
        Ok(3)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Role lookup and sentinels
    // ─────────────────────────────────────────────────────────────────────────

    /// Every element matching any of the role's selectors, in selector order
    fn find_role(&self, role: Role) -> Result<Vec<NodeId>> {
        self.find_role_in(self.doc.root(), role)
    }

    fn find_role_in(&self, scope: NodeId, role: Role) -> Result<Vec<NodeId>> {
        let mut found = Vec::new();
        for selector in self.roles.compile(role)? {
            for node in self.doc.select_all(scope, &selector) {
                let node = if role.lifts_to_button() {
                    self.doc
                        .closest(node, "button, [role=\"button\"]")?
                        .unwrap_or(node)
                } else {
                    node
                };
                if !found.contains(&node) {
                    found.push(node);
                }
            }
        }
        Ok(found)
    }

    /// First match of the highest-priority selector that matches anything
    fn first_role(&self, role: Role) -> Result<Option<NodeId>> {
        for selector in self.roles.compile(role)? {
            if let Some(node) = self.doc.select_all(self.doc.root(), &selector).first() {
                return Ok(Some(*node));
            }
        }
        Ok(None)
    }

    pub fn is_enhanced(&self, node: NodeId, sentinel: &str) -> bool {
        self.doc
            .attribute(node, SENTINEL_ATTR)
            .is_some_and(|v| v.split_whitespace().any(|s| s == sentinel))
    }

    /// Record `sentinel` on `node`; false if it was already there
    fn mark(&mut self, node: NodeId, sentinel: &str) -> bool {
        if self.is_enhanced(node, sentinel) {
            return false;
        }
        let updated = match self.doc.attribute(node, SENTINEL_ATTR) {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, sentinel),
            _ => sentinel.to_string(),
        };
        self.doc.set_attribute(node, SENTINEL_ATTR, updated);
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Deliver an event; returns how many listener actions it triggered
    pub fn dispatch(&mut self, event: DomEvent) -> usize {
        let actions = self.doc.actions_for(&event);
        let fired = actions.len();
        for action in actions {
            self.perform(action);
        }
        fired
    }

    /// Run `action` and every follow-up it produces
    pub fn perform(&mut self, action: Action) {
        let mut current = Some(action);
        while let Some(action) = current.take() {
            debug!("Action: {}", action);
            match self.update(action) {
                Ok(next) => current = next,
                Err(e) if e.is_benign() => debug!("Skipped: {}", e),
                Err(e) => warn!("Action failed: {}", e),
            }
        }
    }

    /// Process one action, optionally producing a follow-up
    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::Resize(..) | Action::Quit => Ok(None),
            Action::Dispatch(event) => {
                self.dispatch(event);
                Ok(None)
            }

            Action::ToggleSidebar => match self.toggle_sidebar() {
                Ok(_) => Ok(None),
                Err(e) => {
                    warn!("Sidebar toggle failed: {}", e);
                    Ok(Some(Action::ShowToast {
                        message: "Could not save sidebar state".to_string(),
                        kind: ToastKind::Error,
                    }))
                }
            },
            Action::ToggleMobileSidebar => {
                self.toggle_mobile_sidebar()?;
                Ok(None)
            }

            Action::ToggleDropdown(trigger) => self.toggle_dropdown(trigger),
            Action::SelectDropdownItem(label) => self.select_dropdown_item(&label),
            Action::DocumentClick { target } => {
                self.handle_document_click(target)?;
                Ok(None)
            }

            Action::Invoke(node) => self.invoke(node),
            Action::CloseModal => {
                self.close_modal();
                Ok(None)
            }
            Action::BackdropClick { .. } => {
                self.close_modal();
                Ok(None)
            }

            Action::ShowToast { message, kind } => {
                self.show_toast(message, kind, None);
                Ok(None)
            }
            Action::DismissToast(id) => {
                self.remove_toast(id);
                Ok(None)
            }

            Action::ActivateTab { group, tab } => {
                let label = self.activate_tab(&group, &tab)?;
                Ok(Some(Action::ShowToast {
                    message: format!("Switched to: {}", label),
                    kind: ToastKind::Info,
                }))
            }
            Action::TabKey { group, tab, key } => {
                Ok(self.tab_key_target(&group, &tab, key.as_deref()))
            }

            Action::SelectRow { table, row } => {
                let number = self.select_row(table, row)?;
                Ok(Some(Action::ShowToast {
                    message: format!("Row {} selected", number),
                    kind: ToastKind::Info,
                }))
            }
            Action::SortColumn { table, header } => {
                let request = self.request_sort(table, header)?;
                Ok(Some(Action::ShowToast {
                    message: format!("Sorting by {}", request.label),
                    kind: ToastKind::Info,
                }))
            }

            Action::FocusField(field) => {
                self.highlight_field(field, true);
                Ok(None)
            }
            Action::BlurField(field) => {
                self.highlight_field(field, false);
                Ok(None)
            }
            Action::ValidateField(field) => {
                self.validate_form_input(field);
                Ok(None)
            }
            Action::RequestSubmit(form) => {
                self.dispatch(DomEvent::submit(form));
                Ok(None)
            }
            Action::SubmitForm { form } => match form {
                Some(form) => self.submit_form(form),
                None => Ok(None),
            },

            Action::SearchInput(input) => {
                self.schedule_search(input);
                Ok(None)
            }
            Action::SearchKey { input, key } => {
                if key.as_deref() == Some("Enter") {
                    Ok(self.perform_search(input)?)
                } else {
                    Ok(None)
                }
            }

            Action::ButtonPress(button) => self.press_button(button),
            Action::ToggleChanged(toggle) => Ok(self.toggle_changed(toggle)),
            Action::BadgeClick(badge) => Ok(self.badge_clicked(badge)),
            Action::AdvanceProgress(bar) => Ok(self.advance_progress(bar)),
            Action::InteractiveClick(node) => Ok(self.interactive_clicked(node)),

            Action::IconPress(icon) => Ok(self.press_icon(icon)),
            Action::DocumentKey { key } => {
                if key.as_deref() == Some("Escape") {
                    self.close_modal();
                    self.close_all_dropdowns()?;
                }
                Ok(None)
            }

            Action::Navigate(path) => {
                info!("Navigation requested: {}", path);
                self.pending_navigation = Some(path);
                Ok(None)
            }
        }
    }

    /// Advance virtual time by `by`, running every timer that comes due
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.timers.now() + by;
        let mut ran = 0;
        while let Some(task) = self.timers.pop_due(deadline) {
            ran += 1;
            if let Err(e) = self.run_task(task) {
                debug!("Timer task skipped: {}", e);
            }
        }
        self.timers.settle(deadline);
        ran
    }

    fn run_task(&mut self, task: TimerTask) -> Result<()> {
        match task {
            TimerTask::ExpireToast(id) => {
                self.remove_toast(id);
            }
            TimerTask::HideSidebarLabels => self.hide_sidebar_labels()?,
            TimerTask::FinishSidebarAnimation => self.finish_sidebar_animation()?,
            TimerTask::RunSearch { input, generation } => {
                if self.search_generations.get(&input) == Some(&generation) {
                    if let Some(follow_up) = self.perform_search(input)? {
                        self.perform(follow_up);
                    }
                }
            }
            TimerTask::ReleaseIcon(icon) => {
                if self.doc.contains(icon) {
                    self.doc.set_style(icon, "transform", "scale(1)");
                }
            }
            TimerTask::ReleaseButton(button) => {
                if self.doc.contains(button) {
                    self.doc.set_style(button, "transform", "");
                }
            }
            TimerTask::FinishButton {
                button,
                message,
                kind,
            } => {
                if self.finish_loading(button) {
                    self.show_toast(message, kind, None);
                }
            }
            TimerTask::RestoreBackground { node, color } => {
                if self.doc.contains(node) {
                    self.doc.set_style(node, "background-color", color);
                }
            }
            TimerTask::ShowToast { message, kind } => {
                self.show_toast(message, kind, None);
            }
            TimerTask::Navigate(path) => self.perform(Action::Navigate(path)),
        }
        Ok(())
    }
}
