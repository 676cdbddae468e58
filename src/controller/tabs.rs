//! Tab groups
//!
//! A group is a tab-list container plus the tabs found inside it. At
//! most one tab per group is active; activation shows the panel named by
//! the tab's `aria-controls` and hides the group's other panels.

use super::UiController;
use crate::action::Action;
use crate::dom::{El, EventKind, Listener, NodeId};
use crate::error::{Result, UiError};
use crate::model::{GroupId, Role, TabId};
use tracing::debug;

/// An enhanced tab group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    pub id: GroupId,
    pub container: NodeId,
    pub tabs: Vec<(TabId, NodeId)>,
    /// Generated container for placeholder panels, once created
    pub panels: Option<NodeId>,
}

impl TabGroup {
    pub fn tab_node(&self, tab: &TabId) -> Option<NodeId> {
        self.tabs.iter().find(|(id, _)| id == tab).map(|(_, n)| *n)
    }

    fn position(&self, tab: &TabId) -> Option<usize> {
        self.tabs.iter().position(|(id, _)| id == tab)
    }
}

/// Lowercase, alphanumerics kept, runs of anything else become one `-`
fn slug(text: &str) -> String {
    let mut out = String::new();
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

impl UiController {
    pub(super) fn init_tabs(&mut self) -> Result<usize> {
        let tab_selectors = self.roles.compile(Role::Tab)?;
        let mut count = 0;

        for container in self.find_role(Role::TabList)? {
            if self.is_enhanced(container, Role::TabList.sentinel()) {
                continue;
            }
            let nested = self.tab_groups.iter().any(|g| {
                self.doc.is_inclusive_ancestor(g.container, container)
                    || self.doc.is_inclusive_ancestor(container, g.container)
            });
            if nested {
                continue;
            }

            let Some(nodes) = tab_selectors
                .iter()
                .map(|s| self.doc.select_all(container, s))
                .find(|found| !found.is_empty())
            else {
                continue;
            };

            self.mark(container, Role::TabList.sentinel());
            let group = self.register_group(container, &nodes);
            debug!(group = %group.id, tabs = group.tabs.len(), "Tab group enhanced");

            let initial = group
                .tabs
                .iter()
                .find(|(_, node)| self.doc.attribute(*node, "aria-selected") == Some("true"))
                .or_else(|| group.tabs.first())
                .map(|(id, _)| id.clone());
            let group_id = group.id.clone();
            count += group.tabs.len();
            self.tab_groups.push(group);

            if let Some(initial) = initial {
                self.activate_tab(&group_id, &initial)?;
            }
        }
        Ok(count)
    }

    fn register_group(&mut self, container: NodeId, nodes: &[NodeId]) -> TabGroup {
        let id = match self
            .doc
            .attribute(container, "data-tab-group")
            .or_else(|| self.doc.attribute(container, "id"))
            .filter(|v| !v.is_empty())
        {
            Some(existing) => existing.to_string(),
            None => self.doc.generate_id("tabs"),
        };
        self.doc.set_attribute(container, "data-tab-group", id.as_str());
        if !self.doc.has_attribute(container, "role") {
            self.doc.set_attribute(container, "role", "tablist");
        }
        let group_id = GroupId::new(id);

        let mut tabs: Vec<(TabId, NodeId)> = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            let mut name = self
                .doc
                .attribute(*node, "data-tab")
                .or_else(|| self.doc.attribute(*node, "id"))
                .filter(|v| !v.is_empty())
                .map(String::from)
                .unwrap_or_else(|| slug(&self.doc.text_content(*node)));
            if name.is_empty() || tabs.iter().any(|(t, _)| t.as_str() == name) {
                name = format!("tab-{}", index + 1);
            }
            let tab = TabId::new(name.as_str());

            self.doc.set_attribute(*node, "data-tab", name);
            self.doc.set_attribute(*node, "role", "tab");
            self.mark(*node, Role::Tab.sentinel());
            self.doc.add_listener(
                *node,
                Listener::on(
                    EventKind::Click,
                    Action::ActivateTab {
                        group: group_id.clone(),
                        tab: tab.clone(),
                    },
                ),
            );
            self.doc.add_listener(
                *node,
                Listener::on(
                    EventKind::KeyDown,
                    Action::TabKey {
                        group: group_id.clone(),
                        tab: tab.clone(),
                        key: None,
                    },
                ),
            );
            tabs.push((tab, *node));
        }

        TabGroup {
            id: group_id,
            container,
            tabs,
            panels: None,
        }
    }

    fn group_index(&self, group: &GroupId) -> Result<usize> {
        self.tab_groups
            .iter()
            .position(|g| &g.id == group)
            .ok_or_else(|| UiError::not_found(format!("tab group '{}'", group)))
    }

    /// Make `tab` the only active tab of `group`, returning its label
    pub fn activate_tab(&mut self, group: &GroupId, tab: &TabId) -> Result<String> {
        let index = self.group_index(group)?;
        let active = self.tab_groups[index]
            .tab_node(tab)
            .ok_or_else(|| UiError::not_found(format!("tab '{}' in group '{}'", tab, group)))?;
        let tabs = self.tab_groups[index].tabs.clone();

        for (_, node) in &tabs {
            let is_active = *node == active;
            self.doc.set_attribute(
                *node,
                "aria-selected",
                if is_active { "true" } else { "false" },
            );
            self.doc
                .set_attribute(*node, "tabindex", if is_active { "0" } else { "-1" });
            if is_active {
                self.doc.add_class(*node, "active");
            } else {
                self.doc.remove_class(*node, "active");
            }
            if let Some(panel) = self.panel_for(*node) {
                self.doc
                    .set_style(panel, "display", if is_active { "block" } else { "none" });
                self.doc.set_attribute(
                    panel,
                    "aria-hidden",
                    if is_active { "false" } else { "true" },
                );
            }
        }

        if self.panel_for(active).is_none() {
            self.create_placeholder_panel(index, active)?;
        }

        self.state
            .active_tab_by_group
            .insert(group.clone(), tab.clone());
        debug!(%group, %tab, "Tab activated");
        Ok(self.doc.text_content(active))
    }

    fn panel_for(&self, tab: NodeId) -> Option<NodeId> {
        self.doc
            .attribute(tab, "aria-controls")
            .and_then(|id| self.doc.element_by_id(id))
    }

    fn create_placeholder_panel(&mut self, index: usize, tab: NodeId) -> Result<NodeId> {
        let container = match self.tab_groups[index].panels.filter(|p| self.doc.contains(*p)) {
            Some(existing) => existing,
            None => {
                let panels = self
                    .doc
                    .build_detached(El::new("div").class("tab-panels mt-4"));
                let anchor = self.tab_groups[index].container;
                if self.doc.insert_after(anchor, panels).is_err() {
                    let body = self.doc.body();
                    self.doc.append_child(body, panels);
                }
                self.tab_groups[index].panels = Some(panels);
                panels
            }
        };

        let name = self.doc.text_content(tab);
        let panel_id = self.doc.generate_id("tab-panel");
        let panel = self.doc.build(
            container,
            El::new("div")
                .id(panel_id.as_str())
                .class("tab-panel p-4 border border-gray-200 rounded-lg")
                .attr("role", "tabpanel")
                .attr("aria-hidden", "false")
                .child(
                    El::new("h3")
                        .class("text-lg font-semibold mb-3")
                        .text(name.as_str()),
                )
                .child(
                    El::new("p")
                        .class("text-gray-600 mb-4")
                        .text(format!("Content for {} tab.", name)),
                ),
        );
        self.doc.set_style(panel, "display", "block");
        self.doc.set_attribute(tab, "aria-controls", panel_id);
        Ok(panel)
    }

    /// Keyboard navigation: arrows wrap, Home/End jump, Enter/Space activate
    pub(super) fn tab_key_target(
        &self,
        group: &GroupId,
        tab: &TabId,
        key: Option<&str>,
    ) -> Option<Action> {
        let index = self.group_index(group).ok()?;
        let tabs = &self.tab_groups[index];
        let current = tabs.position(tab)?;
        let last = tabs.tabs.len().checked_sub(1)?;

        let target = match key? {
            "ArrowRight" => {
                if current == last {
                    0
                } else {
                    current + 1
                }
            }
            "ArrowLeft" => {
                if current == 0 {
                    last
                } else {
                    current - 1
                }
            }
            "Home" => 0,
            "End" => last,
            "Enter" | " " => current,
            _ => return None,
        };
        Some(Action::ActivateTab {
            group: group.clone(),
            tab: tabs.tabs[target].0.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::slug;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Active Matters"), "active-matters");
        assert_eq!(slug("  Closed / Archived "), "closed-archived");
        assert_eq!(slug("—"), "");
    }
}
