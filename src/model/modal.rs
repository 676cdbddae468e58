//! Modal descriptors and the single current-modal slot
//!
//! Only one modal is ever current. Opening a new one replaces the old
//! one, so there is no stack to leak.

use crate::dom::NodeId;
use crate::model::forms::FormSpec;
use std::collections::BTreeMap;
use std::fmt;

/// Submitted form values keyed by field name
pub type FormData = BTreeMap<String, String>;

/// Callback invoked with the values of a submitted modal form
pub type SubmitHook = Box<dyn FnMut(&FormData)>;

/// Identifier of an opened modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(pub u64);

/// What a modal renders in its body
#[derive(Debug, Clone, PartialEq)]
pub enum ModalBody {
    Text(String),
    Form(FormSpec),
}

/// Everything needed to open a modal
pub struct ModalDescriptor {
    pub title: String,
    pub body: ModalBody,
    pub on_submit: Option<SubmitHook>,
}

impl ModalDescriptor {
    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: ModalBody::Text(body.into()),
            on_submit: None,
        }
    }

    pub fn form(title: impl Into<String>, form: FormSpec) -> Self {
        Self {
            title: title.into(),
            body: ModalBody::Form(form),
            on_submit: None,
        }
    }

    pub fn on_submit(mut self, hook: impl FnMut(&FormData) + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for ModalDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalDescriptor")
            .field("title", &self.title)
            .field("body", &self.body)
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

/// A modal that is currently in the document
pub struct OpenModal {
    pub id: ModalId,
    pub title: String,
    /// The backdrop element carrying the modal-root marker
    pub root: NodeId,
    pub on_submit: Option<SubmitHook>,
}

impl fmt::Debug for OpenModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenModal")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("root", &self.root)
            .finish()
    }
}

/// Holds at most one open modal
#[derive(Debug, Default)]
pub struct ModalSlot {
    current: Option<OpenModal>,
    next_id: u64,
}

impl ModalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ModalId {
        self.next_id += 1;
        ModalId(self.next_id)
    }

    /// Install `modal`, returning the one it replaces
    pub fn replace(&mut self, modal: OpenModal) -> Option<OpenModal> {
        self.current.replace(modal)
    }

    pub fn take(&mut self) -> Option<OpenModal> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&OpenModal> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenModal> {
        self.current.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
