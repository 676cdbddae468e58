//! Modal dialogs and `data-action` invocation points

use super::{UiController, MODAL_ROOT_ATTR};
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{FormSpec, ModalBody, ModalDescriptor, ModalId, OpenModal, Role, ToastKind};
use std::time::Duration;
use tracing::{debug, info};

impl UiController {
    /// Open a modal, replacing the current one if any
    pub fn open_modal(&mut self, descriptor: ModalDescriptor) -> Result<ModalId> {
        self.close_modal();
        let id = self.modals.allocate_id();

        let body = match &descriptor.body {
            ModalBody::Text(text) => El::new("p").class("text-gray-600").text(text.as_str()),
            ModalBody::Form(form) => form.render(),
        };
        let markup = El::new("div")
            .class("modal-backdrop fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50")
            .attr(MODAL_ROOT_ATTR, id.0.to_string())
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .child(
                El::new("div")
                    .class("modal-content bg-white rounded-lg shadow-xl max-w-md w-full mx-4")
                    .child(
                        El::new("div")
                            .class("modal-header flex items-center justify-between p-6 border-b")
                            .child(
                                El::new("h2")
                                    .class("modal-title text-lg font-semibold")
                                    .text(descriptor.title.as_str()),
                            )
                            .child(
                                El::new("button")
                                    .class("modal-close text-gray-400")
                                    .attr("aria-label", "Close")
                                    .text("×"),
                            ),
                    )
                    .child(El::new("div").class("modal-body p-6").child(body)),
            );

        let body_node = self.doc.body();
        let root = self.doc.build(body_node, markup);
        self.doc.add_listener(
            root,
            Listener::on(
                EventKind::Click,
                Action::BackdropClick {
                    backdrop: root,
                    target: None,
                },
            ),
        );
        if let Some(content) = self.doc.query_selector(root, ".modal-content")? {
            self.doc
                .add_listener(content, Listener::barrier(EventKind::Click));
        }
        if let Some(close) = self.doc.query_selector(root, ".modal-close")? {
            self.doc.add_listener(
                close,
                Listener::on(EventKind::Click, Action::CloseModal).stopping(),
            );
        }
        for form in self.doc.query_selector_all(root, "form")? {
            self.enhance_form(form)?;
        }
        self.enhance_invocations(root)?;

        info!(id = id.0, title = %descriptor.title, "Modal opened");
        self.modals.replace(OpenModal {
            id,
            title: descriptor.title,
            root,
            on_submit: descriptor.on_submit,
        });
        self.state.active_modal = Some(id);
        Ok(id)
    }

    /// Close the current modal; false if none was open
    pub fn close_modal(&mut self) -> bool {
        let Some(modal) = self.modals.take() else {
            return false;
        };
        let detached = self.doc.remove(modal.root);
        self.state.active_modal = None;
        debug!(id = modal.id.0, detached, "Modal closed");
        true
    }

    pub(super) fn modal_contains(&self, node: NodeId) -> bool {
        self.modals
            .current()
            .is_some_and(|m| self.doc.is_inclusive_ancestor(m.root, node))
    }

    pub(super) fn init_invocations(&mut self) -> Result<usize> {
        let root = self.doc.root();
        self.enhance_invocations(root)
    }

    fn enhance_invocations(&mut self, scope: NodeId) -> Result<usize> {
        let mut count = 0;
        for node in self.find_role_in(scope, Role::Invocation)? {
            if self.mark(node, Role::Invocation.sentinel()) {
                self.doc.add_listener(
                    node,
                    Listener::on(EventKind::Click, Action::Invoke(node)).stopping(),
                );
                count += 1;
            }
        }
        Ok(count)
    }

    /// Run the operation named by the element's `data-action`
    pub(super) fn invoke(&mut self, node: NodeId) -> Result<Option<Action>> {
        let attr = |name: &str| self.doc.attribute(node, name).map(String::from);
        let Some(action) = attr("data-action") else {
            return Ok(None);
        };

        match action.as_str() {
            "openModal" => {
                let title = attr("data-modal-title")
                    .unwrap_or_else(|| self.doc.text_content(node));
                let form_name = attr("data-modal-form");
                let body = attr("data-modal-body").unwrap_or_default();
                let descriptor = match form_name.as_deref().and_then(FormSpec::builtin) {
                    Some(form) => ModalDescriptor::form(title, form),
                    None => {
                        if let Some(name) = form_name {
                            debug!("Unknown built-in form '{}'", name);
                        }
                        ModalDescriptor::text(title, body)
                    }
                };
                self.open_modal(descriptor)?;
                Ok(None)
            }
            "closeModal" => {
                self.close_modal();
                Ok(None)
            }
            "showToast" => {
                let message = attr("data-toast-message")
                    .unwrap_or_else(|| self.doc.text_content(node));
                let kind = attr("data-toast-kind")
                    .and_then(|k| k.parse::<ToastKind>().ok())
                    .unwrap_or_default();
                let duration = attr("data-toast-duration")
                    .and_then(|d| d.parse::<u64>().ok())
                    .map(Duration::from_millis);
                self.show_toast(message, kind, duration);
                Ok(None)
            }
            "toggleSidebar" => Ok(Some(Action::ToggleSidebar)),
            other => {
                debug!("Unknown data-action '{}'", other);
                Ok(None)
            }
        }
    }
}
