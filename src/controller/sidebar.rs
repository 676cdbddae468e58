//! Sidebar collapse and mobile toggle

use super::UiController;
use crate::action::Action;
use crate::dom::{EventKind, Listener, NodeId};
use crate::error::Result;
use crate::model::ui::format_flag;
use crate::model::{Role, ToastKind, SIDEBAR_COLLAPSED_KEY};
use crate::services::TimerTask;
use std::time::Duration;
use tracing::{debug, info};

pub(super) const COLLAPSED_WIDTH: &str = "64px";
pub(super) const EXPANDED_WIDTH: &str = "256px";
const COLLAPSED_PADDING: &str = "md:pl-16";
const EXPANDED_PADDING: &str = "md:pl-64";
const TRANSITION: &str = "all 0.3s ease-in-out";
const LABEL_HIDE_DELAY: Duration = Duration::from_millis(200);
const ANIMATION_DURATION: Duration = Duration::from_millis(300);

impl UiController {
    pub(super) fn init_sidebar(&mut self) -> Result<usize> {
        let mut count = 0;
        for toggle in self.find_role(Role::SidebarToggle)? {
            if self.mark(toggle, Role::SidebarToggle.sentinel()) {
                self.doc.add_listener(
                    toggle,
                    Listener::on(EventKind::Click, Action::ToggleSidebar).stopping(),
                );
                count += 1;
            }
        }
        for toggle in self.find_role(Role::MobileSidebarToggle)? {
            if self.mark(toggle, Role::MobileSidebarToggle.sentinel()) {
                self.doc.add_listener(
                    toggle,
                    Listener::on(EventKind::Click, Action::ToggleMobileSidebar).stopping(),
                );
                count += 1;
            }
        }
        Ok(count)
    }

    /// Flip the collapsed flag, persist it and restyle the sidebar
    ///
    /// The flag is written first. When the store rejects the write the
    /// state is left untouched and the error is returned.
    pub fn toggle_sidebar(&mut self) -> Result<bool> {
        let collapsed = !self.state.sidebar_collapsed;
        self.store.set(SIDEBAR_COLLAPSED_KEY, format_flag(collapsed))?;
        self.state.sidebar_collapsed = collapsed;
        info!(collapsed, "Sidebar toggled");

        self.apply_sidebar_state(true)?;
        let message = if collapsed {
            "Sidebar collapsed"
        } else {
            "Sidebar expanded"
        };
        self.show_toast(message, ToastKind::Info, None);
        Ok(collapsed)
    }

    pub fn toggle_mobile_sidebar(&mut self) -> Result<bool> {
        let open = !self.state.mobile_sidebar_open;
        self.state.mobile_sidebar_open = open;
        if let Some(sidebar) = self.first_role(Role::Sidebar)? {
            if open {
                self.doc.add_class(sidebar, "mobile-open");
            } else {
                self.doc.remove_class(sidebar, "mobile-open");
            }
        }
        self.show_toast("Mobile sidebar toggled", ToastKind::Info, None);
        Ok(open)
    }

    /// Bring the sidebar markup in line with `state.sidebar_collapsed`
    pub(super) fn apply_sidebar_state(&mut self, animate: bool) -> Result<()> {
        let Some(sidebar) = self.first_role(Role::Sidebar)? else {
            debug!("No sidebar in document");
            return Ok(());
        };
        let main = self.first_role(Role::MainContent)?;
        let labels = self.sidebar_labels(sidebar)?;
        let logo = self.sidebar_logo()?;
        let chevrons = self.find_role(Role::Chevron)?;
        let titled = self.find_role(Role::SidebarTitled)?;
        let collapsed = self.state.sidebar_collapsed;

        if animate {
            self.doc.set_style(sidebar, "transition", TRANSITION);
            if let Some(main) = main {
                self.doc.set_style(main, "transition", TRANSITION);
            }
            self.timers
                .schedule(ANIMATION_DURATION, TimerTask::FinishSidebarAnimation);
        }

        if collapsed {
            self.doc.add_class(sidebar, "sidebar-collapsed");
            self.doc.set_style(sidebar, "width", COLLAPSED_WIDTH);
        } else {
            self.doc.remove_class(sidebar, "sidebar-collapsed");
            self.doc.set_style(sidebar, "width", EXPANDED_WIDTH);
        }

        for label in &labels {
            if collapsed {
                self.doc.set_style(*label, "opacity", "0");
                self.doc.set_style(*label, "transform", "translateX(-10px)");
                if !animate {
                    self.doc.set_style(*label, "display", "none");
                }
            } else {
                self.doc.set_style(*label, "display", "");
                self.doc.set_style(*label, "opacity", "1");
                self.doc.set_style(*label, "transform", "translateX(0)");
            }
        }
        if collapsed && animate && !labels.is_empty() {
            self.timers
                .schedule(LABEL_HIDE_DELAY, TimerTask::HideSidebarLabels);
        }

        if let Some(logo) = logo {
            self.doc
                .set_style(logo, "opacity", if collapsed { "0" } else { "1" });
        }
        for chevron in chevrons {
            let rotation = if collapsed { "rotate(180deg)" } else { "rotate(0deg)" };
            self.doc.set_style(chevron, "transform", rotation);
        }

        if let Some(main) = main {
            let (add, remove) = if collapsed {
                (COLLAPSED_PADDING, EXPANDED_PADDING)
            } else {
                (EXPANDED_PADDING, COLLAPSED_PADDING)
            };
            self.doc.remove_class(main, remove);
            self.doc.add_class(main, add);
        }

        let title = if collapsed {
            "Expand sidebar"
        } else {
            "Collapse sidebar"
        };
        for button in titled {
            if self.doc.has_attribute(button, "title") {
                self.doc.set_attribute(button, "title", title);
            }
            if self.doc.has_attribute(button, "aria-label") {
                self.doc.set_attribute(button, "aria-label", title);
            }
        }
        Ok(())
    }

    /// Labels declared by role plus plain text spans inside the sidebar
    fn sidebar_labels(&self, sidebar: NodeId) -> Result<Vec<NodeId>> {
        let mut labels = self.find_role_in(sidebar, Role::SidebarLabel)?;
        for span in self.doc.query_selector_all(sidebar, "nav span")? {
            if self.doc.has_class(span, "sr-only") || self.doc.own_text(span).trim().is_empty() {
                continue;
            }
            if !labels.contains(&span) {
                labels.push(span);
            }
        }
        Ok(labels)
    }

    fn sidebar_logo(&self) -> Result<Option<NodeId>> {
        Ok(self
            .find_role(Role::Logo)?
            .into_iter()
            .find(|node| self.doc.text_content(*node).contains("CounselFlow")))
    }

    pub(super) fn hide_sidebar_labels(&mut self) -> Result<()> {
        if !self.state.sidebar_collapsed {
            return Ok(());
        }
        let Some(sidebar) = self.first_role(Role::Sidebar)? else {
            return Ok(());
        };
        for label in self.sidebar_labels(sidebar)? {
            self.doc.set_style(label, "display", "none");
        }
        Ok(())
    }

    pub(super) fn finish_sidebar_animation(&mut self) -> Result<()> {
        if let Some(sidebar) = self.first_role(Role::Sidebar)? {
            self.doc.set_style(sidebar, "transition", "");
        }
        if let Some(main) = self.first_role(Role::MainContent)? {
            self.doc.set_style(main, "transition", "");
        }
        Ok(())
    }
}
