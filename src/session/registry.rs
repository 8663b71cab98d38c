//! Listener registry.
//!
//! Stores event subscriptions and fans events out to them. Each
//! subscription owns the receiving half of an unbounded channel, so delivery
//! never blocks the transport and the subscriber drains events on its own
//! schedule.

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;

use crate::core::ListenerId;

use super::event::{SessionEvent, SessionEventKind};

/// The subscriber side of a registration.
#[derive(Debug)]
pub struct Subscription {
    /// Id to pass to `unregister` when done.
    pub id: ListenerId,

    /// Kind this subscription listens for.
    pub kind: SessionEventKind,

    /// Delivered events, in dispatch order.
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
}

#[derive(Debug)]
struct Listener {
    kind: SessionEventKind,
    sender: mpsc::UnboundedSender<SessionEvent>,
}

/// Registry for event listeners.
///
/// Listeners are indexed by kind for dispatch. Listeners whose receiver was
/// dropped are pruned the next time an event of their kind is dispatched.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    /// All registered listeners.
    listeners: FxHashMap<ListenerId, Listener>,

    /// Index by event kind, in registration order.
    by_kind: FxHashMap<SessionEventKind, Vec<ListenerId>>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl ListenerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    pub fn register(&mut self, kind: SessionEventKind) -> Subscription {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;

        let (sender, events) = mpsc::unbounded_channel();
        self.listeners.insert(id, Listener { kind, sender });
        self.by_kind.entry(kind).or_default().push(id);

        Subscription { id, kind, events }
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(&id) else {
            return false;
        };

        if let Some(list) = self.by_kind.get_mut(&listener.kind) {
            list.retain(|&lid| lid != id);
            if list.is_empty() {
                self.by_kind.remove(&listener.kind);
            }
        }
        true
    }

    /// Deliver an event to every listener of its kind.
    ///
    /// Returns the number of listeners that received it.
    pub fn dispatch(&mut self, event: &SessionEvent) -> usize {
        let Some(ids) = self.by_kind.get(&event.kind) else {
            return 0;
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for id in ids {
            let Some(listener) = self.listeners.get(id) else {
                continue;
            };
            if listener.sender.send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*id);
            }
        }

        for id in closed {
            self.unregister(id);
        }
        delivered
    }

    /// Number of listeners for a kind.
    #[must_use]
    pub fn count_for(&self, kind: SessionEventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Get total listener count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConnectionId;

    #[test]
    fn test_register_and_unregister() {
        let mut registry = ListenerRegistry::new();

        let sub = registry.register(SessionEventKind::ConnectionDestroyed);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.count_for(SessionEventKind::ConnectionDestroyed), 1);

        assert!(registry.unregister(sub.id));
        assert!(registry.is_empty());
        assert_eq!(registry.count_for(SessionEventKind::ConnectionDestroyed), 0);

        // Second unregister is a no-op
        assert!(!registry.unregister(sub.id));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut registry = ListenerRegistry::new();
        let a = registry.register(SessionEventKind::ConnectionCreated);
        let b = registry.register(SessionEventKind::ConnectionCreated);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut registry = ListenerRegistry::new();
        let mut destroyed = registry.register(SessionEventKind::ConnectionDestroyed);
        let mut created = registry.register(SessionEventKind::ConnectionCreated);

        let event = SessionEvent::connection_destroyed(ConnectionId(1), "disconnect");
        assert_eq!(registry.dispatch(&event), 1);

        assert_eq!(destroyed.events.try_recv().ok(), Some(event));
        assert!(created.events.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let mut registry = ListenerRegistry::new();
        let event = SessionEvent::connection_created(ConnectionId(1));
        assert_eq!(registry.dispatch(&event), 0);
    }

    #[test]
    fn test_closed_receivers_are_pruned() {
        let mut registry = ListenerRegistry::new();
        let sub = registry.register(SessionEventKind::ConnectionDestroyed);
        let _kept = registry.register(SessionEventKind::ConnectionDestroyed);
        drop(sub);

        let event = SessionEvent::connection_destroyed(ConnectionId(1), "disconnect");
        assert_eq!(registry.dispatch(&event), 1);
        assert_eq!(registry.len(), 1);
    }
}
