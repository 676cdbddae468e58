//! counselflow-ui - progressive enhancement for CounselFlow pages
//!
//! A headless document model plus the controller that enhances it:
//! collapsible sidebar, dropdowns, tabs, modals, toasts, forms, tables,
//! search inputs, buttons, toggles, badges, progress bars and icons.
//! The binary renders a demo page in the terminal and drives the same
//! controller from key presses.

pub mod action;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod model;
pub mod page;
pub mod services;

pub use action::Action;
pub use config::Config;
pub use controller::{ControllerSettings, InitReport, UiController};
pub use dom::{Document, DomEvent, El, EventKind, NodeId};
pub use error::{Result, UiError};
