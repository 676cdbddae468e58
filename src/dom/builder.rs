//! Fluent element builder
//!
//! Used for markup the controller generates (modals, toasts, menus,
//! placeholder panels) and for page fixtures.

use super::{Document, NodeId};

/// Element description that can be materialised into a [`Document`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<El>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add one or more whitespace-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(String::from));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    /// Inline style property
    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.style.push((property.to_string(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Document {
    /// Materialise `el` as the last child of `parent`
    pub fn build(&mut self, parent: NodeId, el: El) -> NodeId {
        let node = self.build_detached(el);
        self.append_child(parent, node);
        node
    }

    /// Materialise `el` without attaching it
    pub fn build_detached(&mut self, el: El) -> NodeId {
        let node = self.create_element(&el.tag);
        for (name, value) in el.attrs {
            self.set_attribute(node, &name, value);
        }
        for class in &el.classes {
            self.add_class(node, class);
        }
        for (property, value) in el.style {
            self.set_style(node, &property, value);
        }
        if let Some(text) = el.text {
            self.set_text(node, text);
        }
        for child in el.children {
            let child = self.build_detached(child);
            self.append_child(node, child);
        }
        node
    }
}
