//! Headless document model
//!
//! An arena of elements standing in for the rendered page: tags,
//! attributes, classes, inline style and text, plus the listener
//! registry. Slots of removed nodes are reused; each slot carries a
//! generation, so stale [`NodeId`]s held by timers resolve to nothing
//! instead of to the element that took their place.

pub mod builder;
pub mod events;
pub mod selector;

pub use builder::El;
pub use events::{DomEvent, EventKind, Listener, ListenerId, Listeners};
pub use selector::{Matchable, Selector};

use crate::action::Action;
use crate::error::{Result, UiError};
use std::collections::BTreeMap;
use std::fmt;

/// Slot index plus the generation it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.generation {
            0 => write!(f, "#{}", self.index),
            g => write!(f, "#{}.{}", self.index, g),
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// A single element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(|c| c.split_whitespace())
            .into_iter()
            .flatten()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// The document: element arena plus listeners
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Slot>,
    /// Indices of empty slots
    free: Vec<usize>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: Listeners,
    generated_ids: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty `<html><head/><body/></html>` document
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
            head: NodeId { index: 0, generation: 0 },
            body: NodeId { index: 0, generation: 0 },
            listeners: Listeners::default(),
            generated_ids: 0,
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.nodes[index];
            slot.element = Some(Element::new(tag));
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.nodes.push(Slot {
            generation: 0,
            element: Some(Element::new(tag)),
        });
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Number of live elements, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots allocated so far, live or free
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `node` exists and is reachable from the root
    pub fn contains(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return self.get(id).is_some();
            }
            current = self.get(id).and_then(|el| el.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.get(node).and_then(|el| el.parent) {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `node` as the next sibling of `reference`
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .parent(reference)
            .ok_or_else(|| UiError::not_found(format!("parent of {}", reference)))?;
        self.detach(node);
        if let Some(p) = self.get_mut(parent) {
            let index = p
                .children
                .iter()
                .position(|c| *c == reference)
                .map(|i| i + 1)
                .unwrap_or(p.children.len());
            p.children.insert(index, node);
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `node` and its subtree, dropping their listeners
    ///
    /// Returns the number of listeners detached. Removing a node that is
    /// already gone is a no-op. Freed slots are handed out again by
    /// [`Document::create_element`] under a new generation.
    pub fn remove(&mut self, node: NodeId) -> usize {
        if self.get(node).is_none() || node == self.root {
            return 0;
        }
        self.detach(node);

        let mut detached = 0;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .nodes
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            if let Some(el) = slot.element.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                stack.extend(el.children);
            }
            detached += self.listeners.remove_node(id);
        }
        detached
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Ancestors of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// Descendants of `node` in document order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes, classes, style, text
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|el| el.tag.as_str())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attr(name))
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attrs.remove(name);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) || self.get(node).is_none() {
            return;
        }
        let current = self.attribute(node, "class").unwrap_or("").trim().to_string();
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{} {}", current, class)
        };
        self.set_attribute(node, "class", updated);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let updated: Vec<String> = self
            .get(node)
            .map(|el| el.classes().filter(|c| *c != class).map(String::from).collect())
            .unwrap_or_default();
        self.set_attribute(node, "class", updated.join(" "));
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node)
            .and_then(|el| el.style.get(property))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(el) = self.get_mut(node) {
            if value.is_empty() {
                el.style.remove(property);
            } else {
                el.style.insert(property.to_string(), value);
            }
        }
    }

    /// Whether the element or an ancestor has `display: none`
    pub fn is_hidden(&self, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .any(|id| self.style(id, "display") == Some("none"))
    }

    pub fn own_text(&self, node: NodeId) -> &str {
        self.get(node).map(|el| el.text.as_str()).unwrap_or("")
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.into();
        }
    }

    /// Own text plus all descendant text, whitespace-joined and trimmed
    pub fn text_content(&self, node: NodeId) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .map(|id| self.own_text(id).trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Form control value (the `value` attribute)
    pub fn value(&self, node: NodeId) -> &str {
        self.attribute(node, "value").unwrap_or("")
    }

    /// Value a control would submit
    ///
    /// An explicit `value` wins. Otherwise a select reports its
    /// `selected` option (or the first one) and a textarea its text.
    pub fn control_value(&self, node: NodeId) -> String {
        if let Some(value) = self.attribute(node, "value") {
            return value.to_string();
        }
        match self.tag(node) {
            Some("select") => {
                let options: Vec<NodeId> = self
                    .descendants(node)
                    .into_iter()
                    .filter(|o| self.tag(*o) == Some("option"))
                    .collect();
                options
                    .iter()
                    .copied()
                    .find(|o| self.has_attribute(*o, "selected"))
                    .or_else(|| options.first().copied())
                    .map(|o| self.option_value(o))
                    .unwrap_or_default()
            }
            Some("textarea") => self.text_content(node),
            _ => String::new(),
        }
    }

    /// An option's `value`, or its text when it has none
    pub fn option_value(&self, option: NodeId) -> String {
        self.attribute(option, "value")
            .map(String::from)
            .unwrap_or_else(|| self.text_content(option))
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.set_attribute(node, "value", value);
    }

    /// Generate a document-unique id with `prefix`
    pub fn generate_id(&mut self, prefix: &str) -> String {
        loop {
            self.generated_ids += 1;
            let candidate = format!("{}-{}", prefix, self.generated_ids);
            if self.element_by_id(&candidate).is_none() {
                return candidate;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(el) = self.get(node) else {
            return false;
        };
        let ancestors: Vec<&Element> = self
            .ancestors(node)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect();
        selector.matches(el, ancestors.iter().copied())
    }

    /// Descendants of `scope` matching `selector`, in document order
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(scope, &selector))
    }

    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|id| self.matches(*id, &selector)))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|id| self.matches(*id, &selector)))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|node| self.attribute(*node, "id") == Some(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Listeners
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_listener(&mut self, node: NodeId, listener: Listener) -> ListenerId {
        self.listeners.add(node, listener)
    }

    pub fn add_document_listener(&mut self, listener: Listener) -> ListenerId {
        self.listeners.add_document(listener)
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Actions triggered by `event`, in bubbling order
    ///
    /// Events targeting nodes that are no longer in the document
    /// trigger nothing.
    pub fn actions_for(&self, event: &DomEvent) -> Vec<Action> {
        if !self.contains(event.target) {
            return Vec::new();
        }
        let mut path = vec![event.target];
        path.extend(self.ancestors(event.target));
        self.listeners.collect(event, &path)
    }
}
