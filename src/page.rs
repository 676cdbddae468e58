//! Demo matters page
//!
//! Static markup resembling the CounselFlow matters screen. Used by the
//! terminal preview and as the shared fixture in tests.

use crate::dom::{Document, El};

pub const MATTERS: &[(&str, &str, &str)] = &[
    ("Acme Merger", "TechCorp Limited", "Active"),
    ("Patent Filing", "Innovation Partners", "Pending"),
    ("Supply Dispute", "Global Industries", "Active"),
    ("Office Lease Review", "TechCorp Limited", "Closed"),
];

fn nav_link(label: &str, href: &str, icon: &str) -> El {
    El::new("li").child(
        El::new("a")
            .attr("href", href)
            .class("flex items-center px-3 py-2 rounded-md text-gray-700")
            .child(El::new("svg").class(&format!("lucide lucide-{} w-5 h-5", icon)))
            .child(
                El::new("span")
                    .class("ml-3 transition-all duration-300")
                    .text(label),
            ),
    )
}

fn sidebar() -> El {
    El::new("aside")
        .class("sidebar fixed inset-y-0 left-0 bg-white border-r")
        .attr("data-sidebar", "")
        .child(
            El::new("div")
                .class("flex items-center justify-between h-16 px-4")
                .child(El::new("h1").class("logo text-xl font-bold").text("CounselFlow"))
                .child(
                    El::new("button")
                        .attr("title", "Collapse sidebar")
                        .class("p-1 rounded-md")
                        .child(El::new("svg").class("lucide lucide-chevron-left w-5 h-5")),
                ),
        )
        .child(
            El::new("nav").class("mt-4").child(
                El::new("ul")
                    .child(nav_link("Dashboard", "../dashboard/", "layout-dashboard"))
                    .child(nav_link("Matters", "../matters/", "briefcase"))
                    .child(nav_link("Contracts", "../contracts/", "file-text"))
                    .child(nav_link("Entities", "../entities/", "building"))
                    .child(nav_link("Disputes", "../disputes/", "scale")),
            ),
        )
}

fn header() -> El {
    El::new("header")
        .class("flex items-center justify-between h-16 px-6 bg-white border-b")
        .child(
            El::new("button")
                .attr("aria-label", "Open sidebar")
                .class("mobile-menu-button md:hidden")
                .text("Menu"),
        )
        .child(
            El::new("input")
                .attr("type", "search")
                .attr("placeholder", "Search matters...")
                .class("w-64 border border-gray-300 rounded-md px-3 py-2"),
        )
        .child(
            El::new("button")
                .attr("aria-haspopup", "true")
                .class("profile-menu flex items-center space-x-2")
                .child(El::new("span").class("rounded-full bg-blue-600 text-white").text("DU"))
                .child(El::new("span").text("Demo User"))
                .child(El::new("svg").class("lucide lucide-chevron-down w-4 h-4")),
        )
}

fn quick_actions() -> El {
    El::new("div")
        .class("quick-actions flex space-x-3")
        .child(
            El::new("button")
                .attr("data-action", "openModal")
                .attr("data-modal-title", "Create New Matter")
                .attr("data-modal-form", "new-matter")
                .class("px-4 py-2 bg-blue-600 text-white rounded-md")
                .text("New Matter"),
        )
        .child(
            El::new("button")
                .attr("data-action", "openModal")
                .attr("data-modal-title", "Add Entity")
                .attr("data-modal-form", "new-entity")
                .class("px-4 py-2 border border-gray-300 rounded-md")
                .text("Add Entity"),
        )
        .child(
            El::new("button")
                .class("px-4 py-2 border border-gray-300 rounded-md")
                .text("Generate Report"),
        )
        .child(
            El::new("button")
                .class("px-4 py-2 border border-gray-300 rounded-md")
                .text("Import"),
        )
        .child(
            El::new("button")
                .class("px-4 py-2 border border-gray-300 rounded-md")
                .text("Export"),
        )
        .child(
            El::new("input")
                .attr("type", "checkbox")
                .attr("aria-label", "Show archived")
                .class("toggle ml-4"),
        )
}

fn capacity_bar() -> El {
    El::new("div")
        .class("progress-bar h-2 bg-blue-600 rounded-full")
        .attr("aria-label", "Matter capacity")
        .style("width", "40%")
}

fn tabs() -> El {
    El::new("div")
        .id("matter-tabs")
        .attr("role", "tablist")
        .class("flex border-b")
        .child(
            El::new("button")
                .attr("role", "tab")
                .attr("data-tab", "active")
                .attr("aria-controls", "panel-active")
                .attr("aria-selected", "true")
                .text("Active"),
        )
        .child(
            El::new("button")
                .attr("role", "tab")
                .attr("data-tab", "pending")
                .text("Pending"),
        )
        .child(
            El::new("button")
                .attr("role", "tab")
                .attr("data-tab", "closed")
                .text("Closed"),
        )
}

fn matters_table() -> El {
    let header = El::new("thead").child(
        El::new("tr").children(
            ["Matter", "Client", "Status", "Actions"]
                .into_iter()
                .map(|h| El::new("th").class("px-6 py-3 text-left").text(h)),
        ),
    );
    let rows = MATTERS.iter().map(|(matter, client, status)| {
        El::new("tr")
            .child(El::new("td").text(*matter))
            .child(El::new("td").text(*client))
            .child(El::new("td").child(El::new("span").class("status-badge").text(*status)))
            .child(
                El::new("td").child(
                    El::new("svg")
                        .class("lucide lucide-pencil cursor-pointer w-4 h-4")
                        .attr("aria-label", "Edit matter"),
                ),
            )
    });
    El::new("table")
        .id("matters-table")
        .class("min-w-full divide-y divide-gray-200")
        .child(header)
        .child(El::new("tbody").children(rows))
}

/// Build the full page
pub fn matters_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.build(body, sidebar());
    doc.build(
        body,
        El::new("div").class("flex flex-col").child(header()).child(
            El::new("main")
                .class("md:pl-64 p-6")
                .attr("data-main-content", "")
                .child(El::new("h2").class("text-2xl font-semibold").text("Matters"))
                .child(quick_actions())
                .child(capacity_bar())
                .child(tabs())
                .child(
                    El::new("div")
                        .id("panel-active")
                        .attr("role", "tabpanel")
                        .child(matters_table()),
                ),
        ),
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shape() {
        let doc = matters_page();
        let root = doc.root();
        assert_eq!(
            doc.query_selector_all(root, "tbody tr").unwrap().len(),
            MATTERS.len()
        );
        assert!(doc.query_selector(root, "aside.sidebar").unwrap().is_some());
        assert_eq!(
            doc.query_selector_all(root, "[data-action]").unwrap().len(),
            2
        );
        let bar = doc.query_selector(root, ".progress-bar").unwrap().unwrap();
        assert_eq!(doc.style(bar, "width"), Some("40%"));
    }
}
