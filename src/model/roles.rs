//! Declarative element-role mapping
//!
//! Every interactive surface the controller enhances is found through a
//! role's selector list instead of ad-hoc sniffing. The defaults match
//! the conventional class names and ARIA hints of the CounselFlow
//! pages; a page can replace any role's list through the config file.

use crate::dom::Selector;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interactive surfaces the controller knows how to enhance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Sidebar,
    MainContent,
    SidebarToggle,
    MobileSidebarToggle,
    SidebarLabel,
    Logo,
    Chevron,
    /// Buttons whose title/label gets rewritten on toggle
    SidebarTitled,
    DropdownTrigger,
    TabList,
    Tab,
    Form,
    FormField,
    Table,
    SearchInput,
    Icon,
    Invocation,
    /// Any button no other role claimed
    Button,
    Toggle,
    StatusBadge,
    Progress,
    /// Clickable rows, cards and list items
    Interactive,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[
            Role::Sidebar,
            Role::MainContent,
            Role::SidebarToggle,
            Role::MobileSidebarToggle,
            Role::SidebarLabel,
            Role::Logo,
            Role::Chevron,
            Role::SidebarTitled,
            Role::DropdownTrigger,
            Role::TabList,
            Role::Tab,
            Role::Form,
            Role::FormField,
            Role::Table,
            Role::SearchInput,
            Role::Icon,
            Role::Invocation,
            Role::Button,
            Role::Toggle,
            Role::StatusBadge,
            Role::Progress,
            Role::Interactive,
        ]
    }

    /// Name written into the enhancement sentinel
    pub fn sentinel(&self) -> &'static str {
        match self {
            Role::Sidebar => "sidebar",
            Role::MainContent => "main-content",
            Role::SidebarToggle => "sidebar-toggle",
            Role::MobileSidebarToggle => "mobile-sidebar-toggle",
            Role::SidebarLabel => "sidebar-label",
            Role::Logo => "logo",
            Role::Chevron => "chevron",
            Role::SidebarTitled => "sidebar-titled",
            Role::DropdownTrigger => "dropdown",
            Role::TabList => "tablist",
            Role::Tab => "tab",
            Role::Form => "form",
            Role::FormField => "form-field",
            Role::Table => "table",
            Role::SearchInput => "search",
            Role::Icon => "icon",
            Role::Invocation => "invocation",
            Role::Button => "button",
            Role::Toggle => "toggle",
            Role::StatusBadge => "badge",
            Role::Progress => "progress",
            Role::Interactive => "interactive",
        }
    }

    /// Roles whose matches may be icons that stand for their button
    pub fn lifts_to_button(&self) -> bool {
        matches!(self, Role::SidebarToggle | Role::DropdownTrigger)
    }

    fn default_selectors(&self) -> &'static [&'static str] {
        match self {
            Role::Sidebar => &[
                ".sidebar",
                "[data-sidebar]",
                "aside",
                ".flex.min-h-0.flex-1.flex-col.bg-white",
            ],
            Role::MainContent => &["[data-main-content]", "main", ".main-content"],
            Role::SidebarToggle => &[
                "button[title=\"Collapse sidebar\"]",
                "button[title=\"Expand sidebar\"]",
                "button[aria-label=\"Collapse sidebar\"]",
                "button[aria-label=\"Expand sidebar\"]",
                ".sidebar-toggle",
                "[data-sidebar-toggle]",
                ".lucide-chevron-left",
                ".lucide-chevron-right",
            ],
            Role::MobileSidebarToggle => &[
                "button[aria-label=\"Open sidebar\"]",
                ".mobile-menu-button",
                "[data-mobile-toggle]",
            ],
            Role::SidebarLabel => &[
                "nav span.transition-all",
                "nav span[class*=\"duration-300\"]",
                "[data-sidebar-label]",
            ],
            Role::Logo => &["[data-logo]", ".logo", "h1"],
            Role::Chevron => &[".lucide-chevron-left", ".lucide-chevron-right"],
            Role::SidebarTitled => &[
                "button[title=\"Collapse sidebar\"]",
                "button[title=\"Expand sidebar\"]",
                "button[aria-label=\"Collapse sidebar\"]",
                "button[aria-label=\"Expand sidebar\"]",
            ],
            Role::DropdownTrigger => &[
                "button[aria-haspopup=\"true\"]",
                "button[aria-expanded]",
                ".dropdown-trigger",
                "[data-dropdown-trigger]",
                ".lucide-chevron-down",
            ],
            Role::TabList => &[
                "[role=\"tablist\"]",
                "[data-tab-group]",
                ".nav-tabs",
                ".nav-pills",
                ".btn-group",
                ".button-group",
            ],
            Role::Tab => &["[role=\"tab\"]", "[data-tab]", ".nav-link", "button"],
            Role::Form => &["form"],
            Role::FormField => &["input", "textarea", "select"],
            Role::Table => &["table"],
            Role::SearchInput => &[
                "input[placeholder*=\"Search\"]",
                "input[placeholder*=\"search\"]",
                "[data-search]",
            ],
            Role::Icon => &[
                "svg[class*=\"lucide\"]",
                "i[class*=\"fa-\"]",
                "[data-icon]",
                "button svg",
                "a svg",
            ],
            Role::Invocation => &["[data-action]"],
            Role::Button => &["button", ".btn", "[role=\"button\"]"],
            Role::Toggle => &["input[type=\"checkbox\"]", ".toggle", ".switch"],
            Role::StatusBadge => &[
                ".badge",
                ".status",
                "[class*=\"badge\"]",
                "[class*=\"status\"]",
            ],
            Role::Progress => &[".progress-bar", "[class*=\"progress\"]"],
            Role::Interactive => &[
                "[onclick]",
                "[data-action]",
                ".clickable",
                ".interactive",
                "[role=\"button\"]",
                "td[class*=\"cursor-pointer\"]",
                "tr[class*=\"cursor-pointer\"]",
                ".card[class*=\"cursor-pointer\"]",
                ".list-item[class*=\"cursor-pointer\"]",
            ],
        }
    }
}

/// Role → selector list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMap {
    selectors: BTreeMap<Role, Vec<String>>,
}

impl Default for RoleMap {
    fn default() -> Self {
        let selectors = Role::all()
            .iter()
            .map(|role| {
                let list = role.default_selectors().iter().map(|s| s.to_string()).collect();
                (*role, list)
            })
            .collect();
        Self { selectors }
    }
}

impl RoleMap {
    /// An empty map: every role finds nothing
    pub fn empty() -> Self {
        Self {
            selectors: BTreeMap::new(),
        }
    }

    pub fn selectors(&self, role: Role) -> &[String] {
        self.selectors.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, role: Role, selectors: Vec<String>) {
        self.selectors.insert(role, selectors);
    }

    pub fn with(mut self, role: Role, selectors: &[&str]) -> Self {
        self.set(role, selectors.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Defaults with every role present in `overrides` replaced
    pub fn with_overrides(overrides: &RoleMap) -> Self {
        let mut map = Self::default();
        for (role, list) in &overrides.selectors {
            map.set(*role, list.clone());
        }
        map
    }

    /// Parse every selector, failing on the first invalid one
    pub fn compile(&self, role: Role) -> Result<Vec<Selector>> {
        self.selectors(role)
            .iter()
            .map(|s| Selector::parse(s))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        for role in self.selectors.keys() {
            self.compile(*role)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_selectors() {
        let map = RoleMap::default();
        assert!(map.validate().is_ok());
        for role in Role::all() {
            assert!(!map.selectors(*role).is_empty(), "{:?} has no selectors", role);
        }
    }

    #[test]
    fn test_overrides_replace_only_named_roles() {
        let overrides: RoleMap =
            serde_json::from_str(r##"{ "sidebar": ["#app-nav"], "table": [] }"##).unwrap();
        let map = RoleMap::with_overrides(&overrides);

        assert_eq!(map.selectors(Role::Sidebar), &["#app-nav".to_string()]);
        assert!(map.selectors(Role::Table).is_empty());
        assert_eq!(
            map.selectors(Role::Form),
            RoleMap::default().selectors(Role::Form)
        );
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let map = RoleMap::empty().with(Role::Tab, &["div >"]);
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_sentinels_are_unique() {
        let mut names: Vec<_> = Role::all().iter().map(Role::sentinel).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Role::all().len());
    }
}
