//! Model layer - state owned by the controller
//!
//! - `UiState` - sidebar, tab, dropdown, selection and modal state
//! - `ModalSlot` - the single current modal
//! - `ToastMessage` - transient notifications
//! - `RoleMap` - declarative role → selector mapping
//! - `FormSpec` - forms rendered into modal bodies

pub mod forms;
pub mod modal;
pub mod roles;
pub mod toast;
pub mod ui;

pub use forms::{FieldKind, FieldSpec, FormSpec};
pub use modal::{FormData, ModalBody, ModalDescriptor, ModalId, ModalSlot, OpenModal};
pub use roles::{Role, RoleMap};
pub use toast::{ToastId, ToastKind, ToastMessage, DEFAULT_TOAST_DURATION};
pub use ui::{GroupId, TabId, UiState, SIDEBAR_COLLAPSED_KEY};
