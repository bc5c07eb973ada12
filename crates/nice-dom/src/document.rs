//! Document
//!
//! Node id allocation and document-level event listeners.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::NodeId;

/// Event types dispatched at document level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
}

#[derive(Debug)]
struct Registration {
    id: u32,
    event: EventType,
    owner: NodeId,
}

#[derive(Debug, Default)]
struct ListenerRegistry {
    next_id: u32,
    registrations: Vec<Registration>,
}

/// Shared node id allocator
///
/// Every tree created from the same document draws from this counter, so
/// ids never collide between a host and its light-DOM children.
#[derive(Debug, Clone)]
pub struct NodeIds(Rc<Cell<u32>>);

impl NodeIds {
    pub fn next(&self) -> NodeId {
        let id = self.0.get();
        self.0.set(id + 1);
        NodeId(id)
    }
}

/// Document
#[derive(Debug)]
pub struct Document {
    ids: NodeIds,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

/// Registration of a document listener
///
/// The listener is removed when the handle is dropped.
#[derive(Debug)]
pub struct ListenerHandle {
    id: u32,
    event: EventType,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            // 0 is the document itself
            ids: NodeIds(Rc::new(Cell::new(1))),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
        }
    }

    /// Allocator shared by trees built in this document
    pub fn node_ids(&self) -> NodeIds {
        self.ids.clone()
    }

    pub fn create_node_id(&self) -> NodeId {
        self.ids.next()
    }

    /// Register `owner` for `event` at document level
    pub fn add_event_listener(&self, event: EventType, owner: NodeId) -> ListenerHandle {
        let mut registry = self.listeners.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.registrations.push(Registration { id, event, owner });
        tracing::debug!(?event, owner = owner.0, "document listener added");

        ListenerHandle {
            id,
            event,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Owners listening for `event`, in registration order
    pub fn listeners(&self, event: EventType) -> Vec<NodeId> {
        self.listeners
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.event == event)
            .map(|r| r.owner)
            .collect()
    }

    pub fn listener_count(&self, event: EventType) -> usize {
        self.listeners(event).len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerHandle {
    pub fn event(&self) -> EventType {
        self.event
    }

    /// Whether the document that issued this handle is still alive
    pub fn is_live(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().registrations.retain(|r| r.id != self.id);
            tracing::debug!(event = ?self.event, "document listener removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_shared() {
        let document = Document::new();
        let ids = document.node_ids();

        let a = document.create_node_id();
        let b = ids.next();
        let c = document.create_node_id();

        assert_eq!(a, NodeId(1));
        assert_eq!(b, NodeId(2));
        assert_eq!(c, NodeId(3));
    }

    #[test]
    fn test_listener_removed_on_drop() {
        let document = Document::new();
        let handle = document.add_event_listener(EventType::Click, NodeId(5));
        let _other = document.add_event_listener(EventType::Click, NodeId(6));

        assert_eq!(document.listeners(EventType::Click), vec![NodeId(5), NodeId(6)]);
        assert!(handle.is_live());

        drop(handle);
        assert_eq!(document.listeners(EventType::Click), vec![NodeId(6)]);
        assert_eq!(document.listener_count(EventType::KeyDown), 0);
    }

    #[test]
    fn test_handle_outlives_document() {
        let document = Document::new();
        let handle = document.add_event_listener(EventType::Click, NodeId(1));
        drop(document);

        assert!(!handle.is_live());
        drop(handle);
    }
}
