//! Buttons no other role claimed
//!
//! Quick actions are recognised by their label first. Everything else is
//! classified by its text into a [`ButtonKind`]; slow kinds run through a
//! loading state that swaps the button's content for a spinner until
//! their timer fires.

use super::UiController;
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{FormSpec, ModalDescriptor, Role, ToastKind};
use crate::services::TimerTask;
use std::time::Duration;
use tracing::debug;

const PRESS_DURATION: Duration = Duration::from_millis(100);
const SKIPPED_CONTAINERS: &str = ".toast-container, .dropdown-menu";

/// Labelled shortcuts found on the CounselFlow pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    NewMatter,
    FileDispute,
    AddEntity,
    GenerateReport,
    AddContract,
    Import,
    Export,
    ChangePlan,
    UpdatePaymentMethod,
    AddNewCard,
}

impl QuickAction {
    const LABELS: &'static [(&'static str, QuickAction)] = &[
        ("New Matter", QuickAction::NewMatter),
        ("File Dispute", QuickAction::FileDispute),
        ("Add Entity", QuickAction::AddEntity),
        ("Generate Report", QuickAction::GenerateReport),
        ("Add Contract", QuickAction::AddContract),
        ("Import", QuickAction::Import),
        ("Export", QuickAction::Export),
        ("Change Plan", QuickAction::ChangePlan),
        ("Update Payment Method", QuickAction::UpdatePaymentMethod),
        ("Add New Card", QuickAction::AddNewCard),
    ];

    /// First quick action whose label appears in the button text
    pub fn from_text(text: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .find(|(label, _)| text.contains(label))
            .map(|(_, action)| *action)
    }

    /// Title and form of the modal this action opens, if it opens one
    pub fn modal(&self) -> Option<(&'static str, FormSpec)> {
        match self {
            QuickAction::NewMatter => Some(("Create New Matter", FormSpec::new_matter())),
            QuickAction::FileDispute => Some(("File New Dispute", FormSpec::new_dispute())),
            QuickAction::AddEntity => Some(("Add New Entity", FormSpec::new_entity())),
            QuickAction::AddContract => Some(("Add New Contract", FormSpec::new_contract())),
            QuickAction::ChangePlan => {
                Some(("Change Subscription Plan", FormSpec::plan_change()))
            }
            QuickAction::UpdatePaymentMethod => {
                Some(("Update Payment Method", FormSpec::payment_method()))
            }
            QuickAction::AddNewCard => Some(("Add New Card", FormSpec::new_card())),
            QuickAction::GenerateReport | QuickAction::Import | QuickAction::Export => None,
        }
    }
}

/// What a generic button appears to do, judged by its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Submit,
    Cancel,
    Delete,
    Save,
    Add,
    Edit,
    View,
    Search,
    Download,
    Upload,
    Generic,
}

impl ButtonKind {
    /// `text` is matched case-insensitively; earlier kinds win
    pub fn classify(text: &str, is_submit: bool) -> Self {
        let text = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if is_submit || has(&["submit", "send"]) {
            ButtonKind::Submit
        } else if has(&["cancel", "close", "dismiss"]) {
            ButtonKind::Cancel
        } else if has(&["delete", "remove", "trash"]) {
            ButtonKind::Delete
        } else if has(&["save", "update", "confirm"]) {
            ButtonKind::Save
        } else if has(&["add", "create", "new", "+"]) {
            ButtonKind::Add
        } else if has(&["edit", "modify", "pencil"]) {
            ButtonKind::Edit
        } else if has(&["view", "details", "show"]) {
            ButtonKind::View
        } else if has(&["search", "filter", "find"]) {
            ButtonKind::Search
        } else if has(&["download", "export"]) {
            ButtonKind::Download
        } else if has(&["upload", "import", "browse"]) {
            ButtonKind::Upload
        } else {
            ButtonKind::Generic
        }
    }

    /// Loading label, how long it shows and the toast that ends it
    pub fn loading(&self) -> Option<(&'static str, Duration, &'static str)> {
        let ms = Duration::from_millis;
        match self {
            ButtonKind::Submit => Some(("Submitting...", ms(1500), "Submitted successfully!")),
            ButtonKind::Delete => Some(("Deleting...", ms(1000), "Item deleted successfully!")),
            ButtonKind::Save => Some(("Saving...", ms(1200), "Saved successfully!")),
            ButtonKind::Search => Some(("Searching...", ms(1000), "Search completed!")),
            ButtonKind::Download => Some(("Downloading...", ms(2000), "Download completed!")),
            _ => None,
        }
    }
}

/// Content a loading button set aside
#[derive(Debug)]
pub(super) struct LoadingButton {
    text: String,
    /// Original children with their previous `display`
    children: Vec<(NodeId, Option<String>)>,
    indicator: NodeId,
}

impl UiController {
    /// Runs after every specific initializer; buttons with a click
    /// listener already belong to one of them
    pub(super) fn init_buttons(&mut self) -> Result<usize> {
        let mut count = 0;
        for button in self.find_role(Role::Button)? {
            if self.is_enhanced(button, Role::Button.sentinel())
                || self.doc.listeners().count_on(button, EventKind::Click) > 0
                || self.doc.closest(button, SKIPPED_CONTAINERS)?.is_some()
            {
                continue;
            }
            self.mark(button, Role::Button.sentinel());
            self.doc.add_listener(
                button,
                Listener::on(EventKind::Click, Action::ButtonPress(button)),
            );
            count += 1;
        }
        Ok(count)
    }

    /// Visible label, falling back to `aria-label` and `title`
    pub fn button_label(&self, button: NodeId) -> String {
        let text = self.doc.text_content(button);
        if !text.is_empty() {
            return text;
        }
        ["aria-label", "title"]
            .iter()
            .find_map(|a| self.doc.attribute(button, a))
            .unwrap_or("")
            .to_string()
    }

    pub fn is_loading(&self, button: NodeId) -> bool {
        self.loading_buttons.contains_key(&button)
    }

    pub(super) fn press_button(&mut self, button: NodeId) -> Result<Option<Action>> {
        if !self.doc.contains(button) || self.doc.has_attribute(button, "disabled") {
            return Ok(None);
        }
        self.doc.set_style(button, "transform", "scale(0.95)");
        self.timers
            .schedule(PRESS_DURATION, TimerTask::ReleaseButton(button));

        let label = self.button_label(button);
        if let Some(quick) = QuickAction::from_text(&label) {
            debug!(%button, ?quick, "Quick action");
            return self.run_quick_action(quick);
        }

        let is_submit = self.doc.attribute(button, "type") == Some("submit");
        let kind = ButtonKind::classify(&label, is_submit);
        debug!(%button, ?kind, "Button pressed");

        if kind == ButtonKind::Submit {
            if let Some(form) = self.doc.closest(button, "form")? {
                return Ok(Some(Action::RequestSubmit(form)));
            }
        }
        if let Some((text, delay, done)) = kind.loading() {
            self.start_loading(button, text)?;
            self.timers.schedule(
                delay,
                TimerTask::FinishButton {
                    button,
                    message: done.to_string(),
                    kind: ToastKind::Success,
                },
            );
            return Ok(None);
        }

        let message = match kind {
            ButtonKind::Cancel => {
                self.close_modal();
                self.close_all_dropdowns()?;
                "Action cancelled".to_string()
            }
            ButtonKind::Add => "Add functionality activated".to_string(),
            ButtonKind::Edit => "Edit mode activated".to_string(),
            ButtonKind::View => "Opening details...".to_string(),
            ButtonKind::Upload => "Upload dialog opened".to_string(),
            _ => format!("Action: {}", label.to_lowercase()),
        };
        Ok(Some(Action::ShowToast {
            message,
            kind: ToastKind::Info,
        }))
    }

    fn run_quick_action(&mut self, quick: QuickAction) -> Result<Option<Action>> {
        if let Some((title, form)) = quick.modal() {
            self.open_modal(ModalDescriptor::form(title, form))?;
            return Ok(None);
        }
        let (first, follow_up) = match quick {
            QuickAction::GenerateReport => (
                "Generating report...",
                Some((Duration::from_millis(2000), "Report generated successfully!")),
            ),
            QuickAction::Export => (
                "Export started...",
                Some((Duration::from_millis(1500), "Export completed!")),
            ),
            _ => ("Import functionality activated", None),
        };
        if let Some((delay, message)) = follow_up {
            self.timers.schedule(
                delay,
                TimerTask::ShowToast {
                    message: message.to_string(),
                    kind: ToastKind::Success,
                },
            );
        }
        Ok(Some(Action::ShowToast {
            message: first.to_string(),
            kind: ToastKind::Info,
        }))
    }

    /// Swap the button's content for a spinner and `text`
    fn start_loading(&mut self, button: NodeId, text: &str) -> Result<()> {
        if self.is_loading(button) {
            return Ok(());
        }
        let children: Vec<(NodeId, Option<String>)> = self
            .doc
            .children(button)
            .iter()
            .map(|c| (*c, self.doc.style(*c, "display").map(String::from)))
            .collect();
        for (child, _) in &children {
            self.doc.set_style(*child, "display", "none");
        }
        let saved_text = self.doc.own_text(button).to_string();
        self.doc.set_text(button, "");

        let indicator = self.doc.build(
            button,
            El::new("span")
                .class("button-loading")
                .child(El::new("svg").class("animate-spin h-4 w-4 mr-2 inline"))
                .text(text),
        );
        self.doc.set_attribute(button, "disabled", "");
        self.doc.set_attribute(button, "aria-busy", "true");
        self.loading_buttons.insert(
            button,
            LoadingButton {
                text: saved_text,
                children,
                indicator,
            },
        );
        Ok(())
    }

    /// Put the content back; false if the button was not loading
    pub(super) fn finish_loading(&mut self, button: NodeId) -> bool {
        let Some(saved) = self.loading_buttons.remove(&button) else {
            return false;
        };
        if !self.doc.contains(button) {
            return false;
        }
        self.doc.remove(saved.indicator);
        self.doc.set_text(button, saved.text);
        for (child, display) in saved.children {
            self.doc.set_style(child, "display", display.unwrap_or_default());
        }
        self.doc.remove_attribute(button, "disabled");
        self.doc.remove_attribute(button, "aria-busy");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_order() {
        assert_eq!(ButtonKind::classify("Send", false), ButtonKind::Submit);
        assert_eq!(ButtonKind::classify("Save", true), ButtonKind::Submit);
        assert_eq!(ButtonKind::classify("Close panel", false), ButtonKind::Cancel);
        assert_eq!(ButtonKind::classify("Remove party", false), ButtonKind::Delete);
        // "update" is checked before "add"
        assert_eq!(ButtonKind::classify("Update address", false), ButtonKind::Save);
        assert_eq!(ButtonKind::classify("+", false), ButtonKind::Add);
        assert_eq!(ButtonKind::classify("View", false), ButtonKind::View);
        assert_eq!(ButtonKind::classify("Browse files", false), ButtonKind::Upload);
        assert_eq!(ButtonKind::classify("Archive", false), ButtonKind::Generic);
    }

    #[test]
    fn test_quick_action_labels() {
        assert_eq!(QuickAction::from_text("New Matter"), Some(QuickAction::NewMatter));
        assert_eq!(
            QuickAction::from_text("Update Payment Method"),
            Some(QuickAction::UpdatePaymentMethod)
        );
        assert_eq!(QuickAction::from_text("Export CSV"), Some(QuickAction::Export));
        assert!(QuickAction::from_text("new matter").is_none());
        assert!(QuickAction::GenerateReport.modal().is_none());
        assert_eq!(
            QuickAction::ChangePlan.modal().map(|(title, _)| title),
            Some("Change Subscription Plan")
        );
    }
}
