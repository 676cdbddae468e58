//! Keyboard focus over the enhanced page
//!
//! The terminal has no pointer, so every element that would react to a
//! click or key press becomes a focus stop, in document order.

use counselflow_ui::dom::Document;
use counselflow_ui::{EventKind, NodeId};

/// Text entry controls: typed characters edit their value
pub fn is_editable(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        Some("textarea") => true,
        Some("input") => !matches!(
            doc.attribute(node, "type"),
            Some("checkbox" | "radio" | "button" | "submit")
        ),
        _ => false,
    }
}

pub fn is_checkbox(doc: &Document, node: NodeId) -> bool {
    doc.tag(node) == Some("input") && doc.attribute(node, "type") == Some("checkbox")
}

/// Link the browser would follow on its own
pub fn link_target(doc: &Document, node: NodeId) -> Option<&str> {
    if doc.tag(node) != Some("a") {
        return None;
    }
    doc.attribute(node, "href").filter(|h| !h.is_empty() && *h != "#")
}

fn reacts_to_input(doc: &Document, node: NodeId) -> bool {
    if is_editable(doc, node)
        || is_checkbox(doc, node)
        || doc.tag(node) == Some("select")
        || link_target(doc, node).is_some()
    {
        return true;
    }
    doc.listeners().on_node(node).iter().any(|(_, listener)| {
        listener.action.is_some()
            && matches!(
                listener.kind,
                EventKind::Click | EventKind::KeyDown | EventKind::Change
            )
    })
}

/// Focus stops inside `scope`, in document order
pub fn focus_targets(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    let mut targets: Vec<NodeId> = Vec::new();
    for node in doc.descendants(scope) {
        if doc.is_hidden(node) || !reacts_to_input(doc, node) {
            continue;
        }
        // Icons inside a control that is already a stop
        if doc.tag(node) == Some("svg")
            && doc.parent(node).is_some_and(|p| targets.contains(&p))
        {
            continue;
        }
        targets.push(node);
    }
    targets
}

/// Short human label for the status bar
pub fn describe(doc: &Document, node: NodeId) -> String {
    for attr in ["aria-label", "title", "placeholder"] {
        if let Some(label) = doc.attribute(node, attr).filter(|l| !l.is_empty()) {
            return label.to_string();
        }
    }
    let text = doc.text_content(node);
    if !text.trim().is_empty() {
        return text.trim().to_string();
    }
    if doc.tag(node) == Some("svg") {
        if let Some(parent) = doc.parent(node) {
            let parent_text = doc.text_content(parent);
            if !parent_text.trim().is_empty() {
                return parent_text.trim().to_string();
            }
            if let Some(label) = doc.attribute(parent, "aria-label") {
                return label.to_string();
            }
        }
    }
    doc.tag(node).unwrap_or("element").to_string()
}

/// Option values of a `<select>`
pub fn select_options(doc: &Document, select: NodeId) -> Vec<String> {
    doc.children(select)
        .iter()
        .filter(|o| doc.tag(**o) == Some("option"))
        .map(|o| doc.option_value(*o))
        .collect()
}
