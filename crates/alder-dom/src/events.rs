//! Per-node event-listener sets.
//!
//! The tree carries listener registrations so that cloning can honor its
//! contract: clones duplicate the *sets* while the listener objects stay
//! shared by reference. Dispatch is deliberately minimal — listeners on the
//! target node run synchronously, with no capture or bubble phases.

use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// A listener callback, shared by reference between clones.
pub type EventListener = Rc<dyn Fn(NodeId)>;

/// Ordered per-event-name listener registrations for one node.
#[derive(Clone, Default)]
pub struct ListenerSet {
    entries: Vec<(String, Vec<EventListener>)>,
}

impl ListenerSet {
    /// Register a listener under an event name.
    pub fn add(&mut self, event: &str, listener: EventListener) {
        if let Some((_, listeners)) = self.entries.iter_mut().find(|(name, _)| name == event) {
            listeners.push(listener);
        } else {
            self.entries.push((event.to_string(), vec![listener]));
        }
    }

    /// Drop every listener under an event name; returns how many were removed.
    pub fn remove_all(&mut self, event: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|(name, listeners)| {
            if name == event {
                removed = listeners.len();
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of listeners registered under an event name.
    #[must_use]
    pub fn count(&self, event: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == event)
            .map_or(0, |(_, listeners)| listeners.len())
    }

    /// Listeners registered under an event name, in registration order.
    #[must_use]
    pub fn get(&self, event: &str) -> &[EventListener] {
        self.entries
            .iter()
            .find(|(name, _)| name == event)
            .map_or(&[], |(_, listeners)| listeners.as_slice())
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, listeners) in &self.entries {
            let _ = map.key(name).value(&listeners.len());
        }
        map.finish()
    }
}

impl Document {
    /// Register a listener on a node.
    pub fn add_event_listener(&mut self, id: NodeId, event: &str, listener: EventListener) {
        if let Some(node) = self.get_mut(id) {
            node.listeners.add(event, listener);
        }
    }

    /// Remove every listener a node holds for an event name.
    pub fn remove_event_listeners(&mut self, id: NodeId, event: &str) -> usize {
        self.get_mut(id)
            .map_or(0, |node| node.listeners.remove_all(event))
    }

    /// Number of listeners a node holds for an event name.
    #[must_use]
    pub fn listener_count(&self, id: NodeId, event: &str) -> usize {
        self.get(id).map_or(0, |node| node.listeners.count(event))
    }

    /// Invoke a node's own listeners for an event name, in registration
    /// order; returns how many ran.
    pub fn dispatch_event(&self, id: NodeId, event: &str) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        let listeners: Vec<EventListener> = node.listeners.get(event).to_vec();
        for listener in &listeners {
            (**listener)(id);
        }
        listeners.len()
    }
}
