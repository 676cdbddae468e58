//! Toast notifications

use super::{ActiveToast, UiController};
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{ToastId, ToastKind, ToastMessage};
use crate::services::TimerTask;
use chrono::Local;
use std::time::Duration;
use tracing::debug;

const CONTAINER_SELECTOR: &str = ".toast-container";

impl UiController {
    pub(super) fn init_toast_container(&mut self) -> Result<usize> {
        if self.toast_container()?.is_some() {
            return Ok(0);
        }
        self.create_toast_container();
        Ok(1)
    }

    fn toast_container(&self) -> Result<Option<NodeId>> {
        self.doc.query_selector(self.doc.root(), CONTAINER_SELECTOR)
    }

    fn create_toast_container(&mut self) -> NodeId {
        let body = self.doc.body();
        self.doc.build(
            body,
            El::new("div")
                .class("toast-container fixed top-4 right-4 z-50 space-y-2")
                .attr("aria-live", "polite"),
        )
    }

    /// Append a toast that removes itself after `duration`
    ///
    /// `None` uses the configured default duration.
    pub fn show_toast(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Option<Duration>,
    ) -> ToastId {
        let text = message.into();
        let duration = duration.unwrap_or(self.settings.toast_duration);
        self.next_toast += 1;
        let id = ToastId(self.next_toast);

        let container = match self.toast_container() {
            Ok(Some(container)) => container,
            _ => self.create_toast_container(),
        };
        let node = self.doc.build(
            container,
            El::new("div")
                .class("toast px-6 py-3 rounded-lg shadow-lg text-white")
                .class(kind.background_class())
                .attr("role", "status")
                .attr("data-toast-id", id.0.to_string())
                .child(
                    El::new("div")
                        .class("flex items-center justify-between")
                        .child(El::new("span").class("toast-message").text(text.as_str()))
                        .child(
                            El::new("button")
                                .class("toast-close ml-4")
                                .attr("aria-label", "Dismiss")
                                .text("×"),
                        ),
                ),
        );
        if let Ok(Some(close)) = self.doc.query_selector(node, ".toast-close") {
            self.doc.add_listener(
                close,
                Listener::on(EventKind::Click, Action::DismissToast(id)).stopping(),
            );
        }

        self.timers.schedule(duration, TimerTask::ExpireToast(id));
        debug!(id = id.0, %kind, "Toast: {}", text);
        self.toasts.insert(
            id,
            ActiveToast {
                message: ToastMessage {
                    id,
                    text,
                    kind,
                    created_at: Local::now(),
                    duration,
                },
                node,
            },
        );
        id
    }

    /// Remove a toast; false if it was already gone
    pub fn remove_toast(&mut self, id: ToastId) -> bool {
        match self.toasts.remove(&id) {
            Some(toast) => {
                self.doc.remove(toast.node);
                true
            }
            None => false,
        }
    }
}
