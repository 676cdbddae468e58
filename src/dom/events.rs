//! Events and listener bookkeeping
//!
//! Listeners carry an [`Action`] template instead of a closure. Dispatch
//! walks the bubbling path, binds each template against the concrete
//! event and hands the resulting actions back to the controller.

use super::NodeId;
use crate::action::Action;
use std::collections::HashMap;

/// Kinds of events the controller listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    KeyDown,
    Submit,
    Focus,
    Blur,
}

/// A concrete event delivered to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// Key name for `KeyDown` (`"Escape"`, `"ArrowLeft"`, `"Enter"`, ...)
    pub key: Option<String>,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            key: None,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn input(target: NodeId) -> Self {
        Self::new(EventKind::Input, target)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn submit(form: NodeId) -> Self {
        Self::new(EventKind::Submit, form)
    }

    pub fn focus(target: NodeId) -> Self {
        Self::new(EventKind::Focus, target)
    }

    pub fn blur(target: NodeId) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn key_down(target: NodeId, key: impl Into<String>) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key.into()),
        }
    }
}

/// Handle returned when a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A registered listener
#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub kind: EventKind,
    /// `None` for a pure propagation barrier
    pub action: Option<Action>,
    pub stop_propagation: bool,
}

impl Listener {
    pub fn on(kind: EventKind, action: Action) -> Self {
        Self {
            kind,
            action: Some(action),
            stop_propagation: false,
        }
    }

    /// Listener that only stops the event from bubbling further
    pub fn barrier(kind: EventKind) -> Self {
        Self {
            kind,
            action: None,
            stop_propagation: true,
        }
    }

    pub fn stopping(mut self) -> Self {
        self.stop_propagation = true;
        self
    }
}

/// Listener registry for element and document scope
#[derive(Debug, Default)]
pub struct Listeners {
    by_node: HashMap<NodeId, Vec<(ListenerId, Listener)>>,
    document: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Listeners {
    fn allocate(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    pub fn add(&mut self, node: NodeId, listener: Listener) -> ListenerId {
        let id = self.allocate();
        self.by_node.entry(node).or_default().push((id, listener));
        id
    }

    pub fn add_document(&mut self, listener: Listener) -> ListenerId {
        let id = self.allocate();
        self.document.push((id, listener));
        id
    }

    /// Drop every listener on `node`, returning how many were removed
    pub fn remove_node(&mut self, node: NodeId) -> usize {
        self.by_node.remove(&node).map(|l| l.len()).unwrap_or(0)
    }

    pub fn on_node(&self, node: NodeId) -> &[(ListenerId, Listener)] {
        self.by_node.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_on(&self, node: NodeId, kind: EventKind) -> usize {
        self.on_node(node)
            .iter()
            .filter(|(_, l)| l.kind == kind)
            .count()
    }

    pub fn document_listeners(&self) -> &[(ListenerId, Listener)] {
        &self.document
    }

    /// Total number of element-scoped listeners
    pub fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect bound actions for `event` along `path` (target first)
    pub fn collect(&self, event: &DomEvent, path: &[NodeId]) -> Vec<Action> {
        let mut actions = Vec::new();

        for node in path {
            let mut stop = false;
            for (_, listener) in self.on_node(*node) {
                if listener.kind != event.kind {
                    continue;
                }
                if let Some(action) = listener.action.clone().and_then(|a| a.bind(event)) {
                    actions.push(action);
                }
                stop |= listener.stop_propagation;
            }
            if stop {
                return actions;
            }
        }

        for (_, listener) in &self.document {
            if listener.kind != event.kind {
                continue;
            }
            if let Some(action) = listener.action.clone().and_then(|a| a.bind(event)) {
                actions.push(action);
            }
        }

        actions
    }
}
