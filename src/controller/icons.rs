//! Clickable icons

use super::UiController;
use crate::action::Action;
use crate::dom::{EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{Role, ToastKind};
use crate::services::TimerTask;
use std::time::Duration;
use tracing::debug;

const CLICKABLE_PARENT: &str = "button, a, [onclick], [role=\"button\"], .cursor-pointer";
const OWNING_CONTROL: &str = "button, a, [role=\"button\"]";
const SKIPPED_CONTAINERS: &str = ".toast-container, .dropdown-menu";
const PRESS_DURATION: Duration = Duration::from_millis(100);

/// What an icon appears to stand for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Edit,
    Delete,
    Download,
    Upload,
    Search,
    Filter,
    Settings,
    Refresh,
    Close,
    Menu,
    Generic,
}

impl IconKind {
    /// Classify by the icon's classes and the text of its clickable parent
    pub fn classify(classes: &str, parent_text: &str) -> Self {
        let classes = classes.to_lowercase();
        let text = parent_text.to_lowercase();
        let has = |needles: &[&str], word: &str| {
            needles.iter().any(|n| classes.contains(n)) || text.contains(word)
        };
        let close_class = classes
            .split_whitespace()
            .any(|c| c == "x" || c.ends_with("-x") || c.contains("close"));

        if has(&["edit", "pencil"], "edit") {
            IconKind::Edit
        } else if has(&["delete", "trash", "remove"], "delete") {
            IconKind::Delete
        } else if has(&["download"], "download") {
            IconKind::Download
        } else if has(&["upload"], "upload") {
            IconKind::Upload
        } else if has(&["search"], "search") {
            IconKind::Search
        } else if has(&["filter"], "filter") {
            IconKind::Filter
        } else if has(&["settings", "gear"], "settings") {
            IconKind::Settings
        } else if has(&["refresh", "reload"], "refresh") {
            IconKind::Refresh
        } else if close_class || text.contains("close") {
            IconKind::Close
        } else if has(&["menu", "hamburger"], "menu") {
            IconKind::Menu
        } else {
            IconKind::Generic
        }
    }

    pub fn feedback(&self) -> (&'static str, ToastKind) {
        match self {
            IconKind::Edit => ("Edit mode activated", ToastKind::Info),
            IconKind::Delete => ("Item deleted", ToastKind::Success),
            IconKind::Download => ("Download started", ToastKind::Info),
            IconKind::Upload => ("Upload dialog opened", ToastKind::Info),
            IconKind::Search => ("Search activated", ToastKind::Info),
            IconKind::Filter => ("Filter applied", ToastKind::Info),
            IconKind::Settings => ("Settings opened", ToastKind::Info),
            IconKind::Refresh => ("Refreshing...", ToastKind::Info),
            IconKind::Close => ("Closed", ToastKind::Info),
            IconKind::Menu => ("Menu toggled", ToastKind::Info),
            IconKind::Generic => ("Icon action triggered", ToastKind::Info),
        }
    }
}

impl UiController {
    /// Only icons outside any button or link are enhanced; inside one, the
    /// control owns the click
    pub(super) fn init_icons(&mut self) -> Result<usize> {
        let mut count = 0;
        for icon in self.find_role(Role::Icon)? {
            if self.is_enhanced(icon, Role::Icon.sentinel()) {
                continue;
            }
            let parent = self.doc.closest(icon, CLICKABLE_PARENT)?;
            if parent.is_none() && !self.doc.has_class(icon, "cursor-pointer") {
                continue;
            }
            if self.doc.closest(icon, OWNING_CONTROL)?.is_some()
                || self.doc.closest(icon, SKIPPED_CONTAINERS)?.is_some()
            {
                continue;
            }

            self.mark(icon, Role::Icon.sentinel());
            self.doc.set_style(icon, "cursor", "pointer");
            self.doc.add_listener(
                icon,
                Listener::on(EventKind::Click, Action::IconPress(icon)).stopping(),
            );
            count += 1;
        }
        Ok(count)
    }

    pub fn icon_kind(&self, icon: NodeId) -> IconKind {
        let classes = self.doc.attribute(icon, "class").unwrap_or("");
        let parent_text = self
            .doc
            .closest(icon, CLICKABLE_PARENT)
            .ok()
            .flatten()
            .map(|p| self.doc.text_content(p))
            .unwrap_or_default();
        IconKind::classify(classes, &parent_text)
    }

    pub(super) fn press_icon(&mut self, icon: NodeId) -> Option<Action> {
        if !self.doc.contains(icon) {
            return None;
        }
        let kind = self.icon_kind(icon);
        debug!(%icon, ?kind, "Icon pressed");
        self.doc.set_style(icon, "transform", "scale(0.9)");
        self.timers
            .schedule(PRESS_DURATION, TimerTask::ReleaseIcon(icon));

        let (message, kind) = kind.feedback();
        Some(Action::ShowToast {
            message: message.to_string(),
            kind,
        })
    }
}
