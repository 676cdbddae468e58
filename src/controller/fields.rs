//! Form enhancement, live validation and submission

use super::UiController;
use crate::action::Action;
use crate::dom::{EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{FormData, Role, ToastKind};
use crate::services::check_field;
use tracing::{debug, info};

const INVALID_CLASS: &str = "border-red-500";
const VALID_CLASS: &str = "border-green-500";

impl UiController {
    pub(super) fn init_forms(&mut self) -> Result<usize> {
        let mut count = 0;
        for form in self.find_role(Role::Form)? {
            count += self.enhance_form(form)?;
        }
        Ok(count)
    }

    /// Attach field and submit listeners; returns newly enhanced fields
    pub(super) fn enhance_form(&mut self, form: NodeId) -> Result<usize> {
        self.mark(form, Role::Form.sentinel());

        let mut count = 0;
        for field in self.find_role_in(form, Role::FormField)? {
            if !self.mark(field, Role::FormField.sentinel()) {
                continue;
            }
            self.doc
                .add_listener(field, Listener::on(EventKind::Focus, Action::FocusField(field)));
            self.doc
                .add_listener(field, Listener::on(EventKind::Blur, Action::BlurField(field)));
            self.doc.add_listener(
                field,
                Listener::on(EventKind::Input, Action::ValidateField(field)),
            );
            count += 1;
        }

        for button in self.doc.query_selector_all(form, "button[type=submit]")? {
            if self.mark(button, "submit") {
                self.doc.add_listener(
                    button,
                    Listener::on(EventKind::Click, Action::RequestSubmit(form)).stopping(),
                );
            }
        }
        debug!(%form, fields = count, "Form enhanced");
        Ok(count)
    }

    pub(super) fn highlight_field(&mut self, field: NodeId, focused: bool) {
        if focused {
            self.doc.set_style(field, "border-color", "#3b82f6");
            self.doc
                .set_style(field, "box-shadow", "0 0 0 3px rgba(59, 130, 246, 0.1)");
            self.doc.set_style(field, "transition", "all 0.2s ease-out");
        } else {
            self.doc.set_style(field, "border-color", "");
            self.doc.set_style(field, "box-shadow", "");
        }
    }

    /// Validate one control and update its markers
    ///
    /// Marker classes are only applied when the field has a value or is
    /// required; `aria-invalid` always mirrors the result.
    pub fn validate_form_input(&mut self, input: NodeId) -> bool {
        let value = self.doc.control_value(input).trim().to_string();
        let required = self.doc.has_attribute(input, "required");
        let input_type = match self.doc.tag(input) {
            Some("input") => Some(self.doc.attribute(input, "type").unwrap_or("text")),
            _ => None,
        };
        let name = self
            .doc
            .attribute(input, "name")
            .or_else(|| self.doc.attribute(input, "id"))
            .unwrap_or("field");

        let result = check_field(name, input_type, required, &value);
        if let Err(e) = &result {
            debug!("{}", e);
        }
        let valid = result.is_ok();

        self.doc.remove_class(input, INVALID_CLASS);
        self.doc.remove_class(input, VALID_CLASS);
        if !value.is_empty() || required {
            self.doc
                .add_class(input, if valid { VALID_CLASS } else { INVALID_CLASS });
        }
        self.doc
            .set_attribute(input, "aria-invalid", if valid { "false" } else { "true" });
        valid
    }

    pub(super) fn submit_form(&mut self, form: NodeId) -> Result<Option<Action>> {
        let fields = self.find_role_in(form, Role::FormField)?;
        let mut valid = true;
        for field in &fields {
            valid &= self.validate_form_input(*field);
        }
        if !valid {
            info!(%form, "Form rejected: invalid fields");
            return Ok(Some(Action::ShowToast {
                message: "Please correct the highlighted fields".to_string(),
                kind: ToastKind::Error,
            }));
        }

        let mut data = FormData::new();
        for field in &fields {
            if let Some(name) = self.doc.attribute(*field, "name").map(String::from) {
                data.insert(name, self.doc.control_value(*field));
            }
        }
        info!(%form, fields = data.len(), "Form submitted");

        if self.modal_contains(form) {
            if let Some(hook) = self
                .modals
                .current_mut()
                .and_then(|modal| modal.on_submit.as_mut())
            {
                hook(&data);
            }
            self.close_modal();
        }
        Ok(Some(Action::ShowToast {
            message: "Form submitted successfully!".to_string(),
            kind: ToastKind::Success,
        }))
    }
}
