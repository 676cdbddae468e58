//! Toggles, status badges, progress bars and clickable rows and cards

use super::UiController;
use crate::action::Action;
use crate::dom::{EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{Role, ToastKind};
use crate::services::TimerTask;
use std::time::Duration;
use tracing::debug;

const PROGRESS_STEP: u32 = 20;
const FLASH_COLOR: &str = "#e5e7eb";
const FLASH_DURATION: Duration = Duration::from_millis(200);

/// Leading integer of a CSS width such as `"40%"`, like `parseInt`
pub fn parse_percent(width: &str) -> u32 {
    let digits: String = width
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

impl UiController {
    pub(super) fn init_toggles(&mut self) -> Result<usize> {
        self.enhance_each(Role::Toggle, |c, node| {
            c.doc.add_listener(
                node,
                Listener::on(EventKind::Change, Action::ToggleChanged(node)),
            );
        })
    }

    pub(super) fn init_badges(&mut self) -> Result<usize> {
        self.enhance_each(Role::StatusBadge, |c, node| {
            c.doc.set_style(node, "cursor", "pointer");
            c.doc
                .add_listener(node, Listener::on(EventKind::Click, Action::BadgeClick(node)));
        })
    }

    pub(super) fn init_progress(&mut self) -> Result<usize> {
        self.enhance_each(Role::Progress, |c, node| {
            c.doc.add_listener(
                node,
                Listener::on(EventKind::Click, Action::AdvanceProgress(node)),
            );
        })
    }

    /// Elements that already handle clicks are left alone
    pub(super) fn init_interactive(&mut self) -> Result<usize> {
        let mut count = 0;
        for node in self.find_role(Role::Interactive)? {
            if self.is_enhanced(node, Role::Interactive.sentinel())
                || self.doc.listeners().count_on(node, EventKind::Click) > 0
            {
                continue;
            }
            self.mark(node, Role::Interactive.sentinel());
            if self.doc.style(node, "cursor").is_none()
                && self.doc.closest(node, "button, a")?.is_none()
            {
                self.doc.set_style(node, "cursor", "pointer");
            }
            self.doc.add_listener(
                node,
                Listener::on(EventKind::Click, Action::InteractiveClick(node)),
            );
            count += 1;
        }
        Ok(count)
    }

    fn enhance_each(&mut self, role: Role, attach: fn(&mut Self, NodeId)) -> Result<usize> {
        let mut count = 0;
        for node in self.find_role(role)? {
            if self.mark(node, role.sentinel()) {
                attach(self, node);
                count += 1;
            }
        }
        Ok(count)
    }

    pub(super) fn toggle_changed(&self, toggle: NodeId) -> Option<Action> {
        if !self.doc.contains(toggle) {
            return None;
        }
        let on = self.doc.has_attribute(toggle, "checked") || self.doc.has_class(toggle, "active");
        debug!(%toggle, on, "Toggle changed");
        Some(if on {
            Action::ShowToast {
                message: "Toggle ON".to_string(),
                kind: ToastKind::Success,
            }
        } else {
            Action::ShowToast {
                message: "Toggle OFF".to_string(),
                kind: ToastKind::Info,
            }
        })
    }

    pub(super) fn badge_clicked(&self, badge: NodeId) -> Option<Action> {
        if !self.doc.contains(badge) {
            return None;
        }
        Some(Action::ShowToast {
            message: format!("Status: {}", self.doc.text_content(badge)),
            kind: ToastKind::Info,
        })
    }

    /// Widen the bar by one step, capped at 100%
    pub(super) fn advance_progress(&mut self, bar: NodeId) -> Option<Action> {
        if !self.doc.contains(bar) {
            return None;
        }
        let current = self.doc.style(bar, "width").map(parse_percent).unwrap_or(0);
        let next = (current + PROGRESS_STEP).min(100);
        self.doc.set_style(bar, "width", format!("{}%", next));
        self.doc
            .set_style(bar, "transition", "width 0.5s ease-out");
        Some(Action::ShowToast {
            message: format!("Progress: {}%", next),
            kind: ToastKind::Info,
        })
    }

    pub(super) fn interactive_clicked(&mut self, node: NodeId) -> Option<Action> {
        if !self.doc.contains(node) {
            return None;
        }
        let color = self
            .doc
            .style(node, "background-color")
            .unwrap_or("")
            .to_string();
        self.doc.set_style(node, "background-color", FLASH_COLOR);
        self.timers
            .schedule(FLASH_DURATION, TimerTask::RestoreBackground { node, color });

        let message = match self.doc.tag(node) {
            Some("td" | "tr") => "Table row selected".to_string(),
            _ if self.doc.has_class(node, "card") => "Card selected".to_string(),
            _ if self.doc.has_class(node, "list-item") => "List item selected".to_string(),
            _ => format!(
                "{} action triggered",
                self.doc.attribute(node, "data-action").unwrap_or("generic")
            ),
        };
        Some(Action::ShowToast {
            message,
            kind: ToastKind::Info,
        })
    }
}
