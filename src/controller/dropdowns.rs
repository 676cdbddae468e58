//! Dropdown menus
//!
//! Menus are generated next to their trigger when opened and removed
//! again when closed, so a closed dropdown leaves no listeners behind.

use super::UiController;
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::{Role, ToastKind};
use crate::services::TimerTask;
use std::time::Duration;
use tracing::{debug, info};

const MENU_SELECTOR: &str = ".dropdown-menu";
const TRIGGER_SELECTOR: &str = "[aria-haspopup=\"true\"]";
const CHEVRON_SELECTOR: &str = ".lucide-chevron-down, [class*=\"chevron-down\"]";
const SIGN_OUT_DELAY: Duration = Duration::from_millis(1000);

const PROFILE_ITEMS: &[&str] = &[
    "View Profile",
    "Settings",
    "Billing",
    "Help & Support",
    "Sign Out",
];
const GENERIC_ITEMS: &[&str] = &["Action 1", "Action 2"];

impl UiController {
    pub(super) fn init_dropdowns(&mut self) -> Result<usize> {
        let mut count = 0;
        for trigger in self.find_role(Role::DropdownTrigger)? {
            if !self.mark(trigger, Role::DropdownTrigger.sentinel()) {
                continue;
            }
            self.doc.set_attribute(trigger, "aria-haspopup", "true");
            if !self.doc.has_attribute(trigger, "aria-expanded") {
                self.doc.set_attribute(trigger, "aria-expanded", "false");
            }
            self.doc.add_listener(
                trigger,
                Listener::on(EventKind::Click, Action::ToggleDropdown(trigger)).stopping(),
            );
            count += 1;
        }
        Ok(count)
    }

    pub(super) fn toggle_dropdown(&mut self, trigger: NodeId) -> Result<Option<Action>> {
        let was_open = self.doc.attribute(trigger, "aria-expanded") == Some("true");
        self.close_all_dropdowns()?;
        if was_open {
            return Ok(None);
        }

        self.doc.set_attribute(trigger, "aria-expanded", "true");
        if let Some(chevron) = self.doc.query_selector(trigger, CHEVRON_SELECTOR)? {
            self.doc.set_style(chevron, "transform", "rotate(180deg)");
        }

        let items = self.dropdown_items(trigger)?;
        let menu = El::new("div")
            .class("dropdown-menu absolute right-0 top-full mt-2 w-48 bg-white rounded-md shadow-lg border border-gray-200 py-1 z-50")
            .attr("role", "menu")
            .children(items.iter().map(|label| {
                El::new("a")
                    .class("dropdown-item flex items-center px-4 py-2 text-sm text-gray-700")
                    .attr("role", "menuitem")
                    .text(*label)
            }));

        let host = self.doc.parent(trigger).unwrap_or(self.doc.body());
        self.doc.set_style(host, "position", "relative");
        let menu = self.doc.build(host, menu);
        self.doc.add_listener(menu, Listener::barrier(EventKind::Click));
        for item in self.doc.children(menu).to_vec() {
            let label = self.doc.own_text(item).to_string();
            self.doc.add_listener(
                item,
                Listener::on(EventKind::Click, Action::SelectDropdownItem(label)).stopping(),
            );
        }

        self.state.open_dropdown = Some(trigger);
        debug!(%trigger, items = items.len(), "Dropdown opened");
        Ok(Some(Action::ShowToast {
            message: "Dropdown opened".to_string(),
            kind: ToastKind::Info,
        }))
    }

    /// Close every open menu; returns how many menus were removed
    pub fn close_all_dropdowns(&mut self) -> Result<usize> {
        let root = self.doc.root();
        for trigger in self.doc.query_selector_all(root, TRIGGER_SELECTOR)? {
            self.doc.set_attribute(trigger, "aria-expanded", "false");
            if let Some(chevron) = self.doc.query_selector(trigger, CHEVRON_SELECTOR)? {
                self.doc.set_style(chevron, "transform", "rotate(0deg)");
            }
        }
        let menus = self.doc.query_selector_all(root, MENU_SELECTOR)?;
        for menu in &menus {
            self.doc.remove(*menu);
        }
        self.state.open_dropdown = None;
        Ok(menus.len())
    }

    /// Profile triggers get the account menu, everything else a generic one
    fn dropdown_items(&self, trigger: NodeId) -> Result<&'static [&'static str]> {
        let text = self.doc.text_content(trigger).to_lowercase();
        let has_avatar = self
            .doc
            .query_selector(trigger, "[class*=\"rounded-full\"]")?
            .is_some();
        if text.contains("user") || text.contains("demo") || has_avatar {
            Ok(PROFILE_ITEMS)
        } else {
            Ok(GENERIC_ITEMS)
        }
    }

    pub(super) fn select_dropdown_item(&mut self, label: &str) -> Result<Option<Action>> {
        info!("Dropdown item selected: {}", label);
        self.close_all_dropdowns()?;

        let destination = match label.to_lowercase().as_str() {
            "view profile" => "../profile/",
            "settings" => "../settings/",
            "billing" => "../billing/",
            "help & support" => "../help-support/",
            "sign out" => {
                self.timers.schedule(
                    SIGN_OUT_DELAY,
                    TimerTask::Navigate("../login/".to_string()),
                );
                return Ok(Some(Action::ShowToast {
                    message: "Signing out...".to_string(),
                    kind: ToastKind::Info,
                }));
            }
            _ => {
                return Ok(Some(Action::ShowToast {
                    message: format!("Selected: {}", label),
                    kind: ToastKind::Info,
                }))
            }
        };
        Ok(Some(Action::Navigate(destination.to_string())))
    }

    /// Outside clicks close open menus
    pub(super) fn handle_document_click(&mut self, target: Option<NodeId>) -> Result<()> {
        if self.state.open_dropdown.is_none() {
            return Ok(());
        }
        if let Some(target) = target {
            let inside_menu = self.doc.closest(target, MENU_SELECTOR)?.is_some();
            let on_trigger = self.doc.closest(target, TRIGGER_SELECTOR)?.is_some();
            if inside_menu || on_trigger {
                return Ok(());
            }
        }
        self.close_all_dropdowns()?;
        Ok(())
    }
}
