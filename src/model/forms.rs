//! Form descriptions rendered into modal bodies
//!
//! The built-in forms cover the quick actions on the matters,
//! entities, disputes and contracts pages plus the billing page's plan
//! and payment card dialogs.

use crate::dom::El;

/// Input flavour of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    TextArea,
    Select(Vec<String>),
}

impl FieldKind {
    fn input_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Email => Some("email"),
            FieldKind::Tel => Some("tel"),
            FieldKind::Number => Some("number"),
            FieldKind::Date => Some("date"),
            FieldKind::TextArea | FieldKind::Select(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    /// Initial value; for a select, the option rendered `selected`
    pub default_value: Option<String>,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: None,
            default_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    fn render(&self, form_id: &str) -> El {
        let control_id = format!("{}-{}", form_id, self.name);
        let mut control = match &self.kind {
            FieldKind::TextArea => El::new("textarea").attr("rows", "3"),
            FieldKind::Select(options) => El::new("select").children(options.iter().map(|o| {
                let option = El::new("option").attr("value", o.as_str()).text(o.as_str());
                if self.default_value.as_deref() == Some(o.as_str()) {
                    option.attr("selected", "")
                } else {
                    option
                }
            })),
            other => El::new("input").attr("type", other.input_type().unwrap_or("text")),
        };
        match (&self.kind, &self.default_value) {
            (FieldKind::Select(_), _) | (_, None) => {}
            (FieldKind::TextArea, Some(value)) => control = control.text(value.as_str()),
            (_, Some(value)) => control = control.attr("value", value.as_str()),
        }
        if let Some(placeholder) = &self.placeholder {
            control = control.attr("placeholder", placeholder.as_str());
        }
        control = control
            .id(control_id.as_str())
            .attr("name", self.name.as_str())
            .class("w-full border border-gray-300 rounded-md px-3 py-2");
        if self.required {
            control = control.attr("required", "");
        }

        El::new("div")
            .class("form-field")
            .child(
                El::new("label")
                    .attr("for", control_id)
                    .class("block text-sm font-medium text-gray-700 mb-1")
                    .text(self.label.as_str()),
            )
            .child(control)
    }
}

/// A complete form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub id: String,
    pub fields: Vec<FieldSpec>,
    pub submit_label: String,
}

impl FormSpec {
    pub fn new(id: &str, submit_label: &str) -> Self {
        Self {
            id: id.to_string(),
            fields: Vec::new(),
            submit_label: submit_label.to_string(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a built-in form by its `data-modal-form` name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "new-matter" => Some(Self::new_matter()),
            "new-dispute" => Some(Self::new_dispute()),
            "new-entity" => Some(Self::new_entity()),
            "new-contract" => Some(Self::new_contract()),
            "plan-change" => Some(Self::plan_change()),
            "payment-method" => Some(Self::payment_method()),
            "new-card" => Some(Self::new_card()),
            _ => None,
        }
    }

    pub fn new_matter() -> Self {
        Self::new("new-matter", "Create Matter")
            .field(FieldSpec::new("title", "Matter Title", FieldKind::Text).required())
            .field(FieldSpec::new(
                "client",
                "Client",
                options(&["TechCorp Limited", "Global Industries", "Innovation Partners"]),
            ))
            .field(FieldSpec::new(
                "matter_type",
                "Matter Type",
                options(&[
                    "Corporate Law",
                    "Intellectual Property",
                    "Contract Review",
                    "Compliance",
                    "Litigation",
                ]),
            ))
            .field(FieldSpec::new("description", "Description", FieldKind::TextArea))
    }

    pub fn new_dispute() -> Self {
        Self::new("new-dispute", "Create Dispute")
            .field(FieldSpec::new("title", "Dispute Title", FieldKind::Text).required())
            .field(FieldSpec::new(
                "dispute_type",
                "Dispute Type",
                options(&[
                    "Contract Dispute",
                    "Employment Dispute",
                    "Commercial Dispute",
                    "IP Dispute",
                    "Regulatory Dispute",
                ]),
            ))
            .field(FieldSpec::new("parties", "Parties Involved", FieldKind::Text))
            .field(FieldSpec::new("description", "Description", FieldKind::TextArea))
    }

    pub fn new_entity() -> Self {
        Self::new("new-entity", "Add Entity")
            .field(FieldSpec::new("name", "Entity Name", FieldKind::Text).required())
            .field(FieldSpec::new(
                "entity_type",
                "Entity Type",
                options(&[
                    "Corporation",
                    "Limited Liability Company",
                    "Partnership",
                    "Sole Proprietorship",
                    "Non-Profit",
                ]),
            ))
            .field(FieldSpec::new("jurisdiction", "Jurisdiction", FieldKind::Text))
            .field(FieldSpec::new("registration", "Registration Number", FieldKind::Text))
            .field(FieldSpec::new("contact_email", "Contact Email", FieldKind::Email))
    }

    pub fn new_contract() -> Self {
        Self::new("new-contract", "Create Contract")
            .field(FieldSpec::new("title", "Contract Title", FieldKind::Text).required())
            .field(FieldSpec::new(
                "contract_type",
                "Contract Type",
                options(&[
                    "Service Agreement",
                    "Non-Disclosure Agreement",
                    "Employment Contract",
                    "Supply Agreement",
                    "License Agreement",
                ]),
            ))
            .field(FieldSpec::new("counterparty", "Counterparty", FieldKind::Text))
            .field(FieldSpec::new("value", "Contract Value", FieldKind::Number))
    }

    pub fn plan_change() -> Self {
        Self::new("plan-change", "Change Plan").field(
            FieldSpec::new(
                "plan",
                "Plan",
                options(&[
                    "Basic - $99/month",
                    "Professional - $299/month",
                    "Enterprise - $999/month",
                ]),
            )
            .value("Professional - $299/month")
            .required(),
        )
    }

    pub fn payment_method() -> Self {
        Self::card_form("payment-method", "Update Payment Method")
    }

    pub fn new_card() -> Self {
        Self::card_form("new-card", "Add Card")
    }

    fn card_form(id: &str, submit_label: &str) -> Self {
        Self::new(id, submit_label)
            .field(
                FieldSpec::new("card_number", "Card Number", FieldKind::Text)
                    .placeholder("1234 5678 9012 3456")
                    .required(),
            )
            .field(
                FieldSpec::new("expiry", "Expiry Date", FieldKind::Text)
                    .placeholder("MM/YY")
                    .required(),
            )
            .field(
                FieldSpec::new("cvc", "CVC", FieldKind::Text)
                    .placeholder("123")
                    .required(),
            )
            .field(
                FieldSpec::new("cardholder", "Cardholder Name", FieldKind::Text)
                    .placeholder("Full name on card")
                    .required(),
            )
    }

    /// Render as a `<form>` element
    pub fn render(&self) -> El {
        El::new("form")
            .class("modal-form space-y-4")
            .attr("data-form", self.id.as_str())
            .children(self.fields.iter().map(|f| f.render(&self.id)))
            .child(
                El::new("div")
                    .class("form-actions flex justify-end space-x-3")
                    .child(
                        El::new("button")
                            .attr("type", "button")
                            .attr("data-action", "closeModal")
                            .class("px-4 py-2 border border-gray-300 rounded-md")
                            .text("Cancel"),
                    )
                    .child(
                        El::new("button")
                            .attr("type", "submit")
                            .class("px-4 py-2 bg-blue-600 text-white rounded-md")
                            .text(self.submit_label.as_str()),
                    ),
            )
    }
}

fn options(values: &[&str]) -> FieldKind {
    FieldKind::Select(values.iter().map(|v| v.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(FormSpec::builtin("new-matter"), Some(FormSpec::new_matter()));
        assert!(FormSpec::builtin("new-invoice").is_none());
    }

    #[test]
    fn test_render_marks_required_fields() {
        let mut doc = Document::new();
        let form = doc.build(doc.body(), FormSpec::new_entity().render());

        let required = doc.query_selector_all(form, "[required]").unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(doc.attribute(required[0], "name"), Some("name"));

        let email = doc.query_selector(form, "input[type=email]").unwrap().unwrap();
        assert_eq!(doc.attribute(email, "name"), Some("contact_email"));

        let submit = doc.query_selector(form, "button[type=submit]").unwrap().unwrap();
        assert_eq!(doc.text_content(submit), "Add Entity");
    }

    #[test]
    fn test_select_lists_options() {
        let mut doc = Document::new();
        let form = doc.build(doc.body(), FormSpec::new_contract().render());
        let options = doc.query_selector_all(form, "select option").unwrap();
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_plan_change_preselects_professional() {
        let mut doc = Document::new();
        let form = doc.build(doc.body(), FormSpec::builtin("plan-change").unwrap().render());
        let select = doc.query_selector(form, "select").unwrap().unwrap();
        assert_eq!(doc.control_value(select), "Professional - $299/month");
        assert_eq!(doc.query_selector_all(form, "option[selected]").unwrap().len(), 1);
    }

    #[test]
    fn test_card_forms_share_fields() {
        let payment = FormSpec::payment_method();
        let card = FormSpec::new_card();
        assert_eq!(payment.fields, card.fields);
        assert_ne!(payment.id, card.id);

        let mut doc = Document::new();
        let form = doc.build(doc.body(), payment.render());
        let expiry = doc.query_selector(form, "input[name=expiry]").unwrap().unwrap();
        assert_eq!(doc.attribute(expiry, "placeholder"), Some("MM/YY"));
        assert_eq!(doc.query_selector_all(form, "[required]").unwrap().len(), 4);
    }
}
