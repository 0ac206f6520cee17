//! In-memory document host.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::trace;

use crate::element::ElementId;
use crate::event::{Event, Key, Modifiers};
use crate::host::{DispatchOutcome, ElementHost, Notification};

type Listener = Arc<dyn Fn(&mut Notification) + Send + Sync>;

#[derive(Debug)]
struct Node {
    parent: Option<ElementId>,
    visible: bool,
}

#[derive(Default)]
struct Document {
    nodes: HashMap<ElementId, Node>,
    /// Open modal roots, topmost last.
    modals: Vec<ElementId>,
    focused: Option<ElementId>,
    /// Focus/blur/click events produced by the host, waiting to be routed.
    pending: Vec<Event>,
    listeners: HashMap<ElementId, Vec<(&'static str, Listener)>>,
    dispatched: Vec<(ElementId, Notification)>,
}

impl Document {
    fn parent(&self, id: &ElementId) -> Option<&ElementId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    fn contains(&self, ancestor: &ElementId, element: &ElementId) -> bool {
        if !self.nodes.contains_key(element) {
            return false;
        }
        let mut current = Some(element);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn is_visible(&self, element: &ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            match self.nodes.get(id) {
                Some(node) if node.visible => current = node.parent.as_ref(),
                _ => return false,
            }
        }
        true
    }

    fn set_focus(&mut self, target: Option<ElementId>) {
        if self.focused == target {
            return;
        }
        if let Some(old) = self.focused.take() {
            self.pending.push(Event::Blur { target: old });
        }
        if let Some(new) = &target {
            self.pending.push(Event::Focus {
                target: new.clone(),
            });
        }
        self.focused = target;
    }
}

/// An [`ElementHost`] backed by an in-memory element tree.
///
/// Elements form a tree through parent links. Focus changes queue
/// [`Event::Blur`]/[`Event::Focus`] events that the embedder drains with
/// [`MemoryHost::take_events`] and routes to its listeners, which is how a
/// real UI layer would deliver them.
#[derive(Clone, Default)]
pub struct MemoryHost {
    doc: Arc<Mutex<Document>>,
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (nodes, focused) = self
            .doc
            .lock()
            .map(|d| (d.nodes.len(), d.focused.clone()))
            .unwrap_or((0, None));
        f.debug_struct("MemoryHost")
            .field("nodes", &nodes)
            .field("focused", &focused)
            .finish()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a visible element under `parent` (or as a document root).
    pub fn insert(&self, id: impl Into<ElementId>, parent: Option<&ElementId>) -> ElementId {
        let id = id.into();
        if let Ok(mut doc) = self.doc.lock() {
            doc.nodes.insert(
                id.clone(),
                Node {
                    parent: parent.cloned(),
                    visible: true,
                },
            );
        }
        id
    }

    /// Remove an element and its whole subtree.
    pub fn remove(&self, id: &ElementId) {
        let Ok(mut doc) = self.doc.lock() else {
            return;
        };
        let doomed: Vec<ElementId> = doc
            .nodes
            .keys()
            .filter(|candidate| doc.contains(id, candidate))
            .cloned()
            .collect();
        if let Some(focused) = doc.focused.clone() {
            if doomed.contains(&focused) {
                doc.set_focus(None);
            }
        }
        for gone in &doomed {
            doc.nodes.remove(gone);
            doc.listeners.remove(gone);
        }
        doc.modals.retain(|m| !doomed.contains(m));
    }

    pub fn set_visible(&self, id: &ElementId, visible: bool) {
        if let Ok(mut doc) = self.doc.lock() {
            if let Some(node) = doc.nodes.get_mut(id) {
                node.visible = visible;
            }
        }
    }

    /// Open a modal layer rooted at `id`; it becomes the topmost layer.
    pub fn open_modal(&self, id: &ElementId) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.modals.retain(|m| m != id);
            doc.modals.push(id.clone());
        }
    }

    pub fn close_modal(&self, id: &ElementId) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.modals.retain(|m| m != id);
        }
    }

    /// Simulate a pointer activation: focus the element, then report the click.
    pub fn click(&self, id: &ElementId) {
        self.focus(id);
        if let Ok(mut doc) = self.doc.lock() {
            doc.pending.push(Event::Click { target: id.clone() });
        }
    }

    /// Clear focus.
    pub fn blur(&self) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.set_focus(None);
        }
    }

    /// Build a key event targeted at the focused element.
    pub fn key_event(&self, key: Key) -> Event {
        Event::Key {
            target: self.focused(),
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Drain the focus/blur/click events queued since the last call.
    pub fn take_events(&self) -> Vec<Event> {
        self.doc
            .lock()
            .map(|mut d| std::mem::take(&mut d.pending))
            .unwrap_or_default()
    }

    /// Listen for notifications named `name` dispatched on (or bubbling
    /// through) `id`.
    pub fn listen(
        &self,
        id: &ElementId,
        name: &'static str,
        listener: impl Fn(&mut Notification) + Send + Sync + 'static,
    ) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.listeners
                .entry(id.clone())
                .or_default()
                .push((name, Arc::new(listener)));
        }
    }

    /// Every notification dispatched so far, in order, with its target.
    pub fn dispatched(&self) -> Vec<(ElementId, Notification)> {
        self.doc
            .lock()
            .map(|d| d.dispatched.clone())
            .unwrap_or_default()
    }

    /// Names of notifications dispatched so far, in order.
    pub fn dispatched_names(&self) -> Vec<&'static str> {
        self.dispatched().into_iter().map(|(_, n)| n.name).collect()
    }
}

impl ElementHost for MemoryHost {
    fn is_visible(&self, element: &ElementId) -> bool {
        self.doc
            .lock()
            .map(|d| d.is_visible(element))
            .unwrap_or(false)
    }

    fn contains(&self, ancestor: &ElementId, element: &ElementId) -> bool {
        self.doc
            .lock()
            .map(|d| d.contains(ancestor, element))
            .unwrap_or(false)
    }

    fn is_above_top_modal_layer(&self, element: &ElementId) -> bool {
        self.doc
            .lock()
            .map(|d| match d.modals.last() {
                None => true,
                Some(top) => d.contains(top, element),
            })
            .unwrap_or(false)
    }

    fn focused(&self) -> Option<ElementId> {
        self.doc.lock().ok().and_then(|d| d.focused.clone())
    }

    fn focus(&self, element: &ElementId) -> bool {
        let Ok(mut doc) = self.doc.lock() else {
            return false;
        };
        if !doc.is_visible(element) {
            return false;
        }
        trace!("focus -> {}", element);
        doc.set_focus(Some(element.clone()));
        true
    }

    fn dispatch(&self, target: &ElementId, mut notification: Notification) -> DispatchOutcome {
        // Collect listeners first so they can call back into the host.
        let listeners: Vec<Listener> = {
            let Ok(doc) = self.doc.lock() else {
                return DispatchOutcome::default();
            };
            let mut path = vec![target.clone()];
            if notification.bubbles {
                let mut current = doc.parent(target);
                while let Some(id) = current {
                    path.push(id.clone());
                    current = doc.parent(id);
                }
            }
            path.iter()
                .filter_map(|id| doc.listeners.get(id))
                .flatten()
                .filter(|(name, _)| *name == notification.name)
                .map(|(_, l)| Arc::clone(l))
                .collect()
        };

        for listener in &listeners {
            listener(&mut notification);
        }

        let outcome = DispatchOutcome {
            canceled: notification.is_canceled(),
            delivered: listeners.len(),
        };
        if let Ok(mut doc) = self.doc.lock() {
            doc.dispatched.push((target.clone(), notification));
        }
        outcome
    }
}
