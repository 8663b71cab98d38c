//! Live-session handle.
//!
//! `LiveSession` is the interface the liveness monitor needs from the
//! streaming library: the remote roster size, per-kind event subscriptions,
//! and a way to leave. Methods take `&self` because the handle is shared
//! between the transport, which mutates it as participants come and go, and
//! the monitor, which observes it.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashSet;

use crate::core::{ConnectionId, ListenerId};

use super::event::{SessionEvent, SessionEventKind};
use super::registry::{ListenerRegistry, Subscription};

/// Operations the monitor consumes from a live session.
pub trait LiveSession {
    /// Number of remote participants currently visible.
    fn remote_connection_count(&self) -> usize;

    /// Subscribe to one kind of event.
    fn subscribe(&self, kind: SessionEventKind) -> Subscription;

    /// Remove a subscription. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Leave the session.
    fn disconnect(&self);
}

#[derive(Debug)]
struct SessionInner {
    session_id: String,
    connected: bool,
    remotes: FxHashSet<ConnectionId>,
    listeners: ListenerRegistry,
    next_connection: u32,
}

/// In-process live session.
///
/// A reference `LiveSession` used by tests and local tooling. Clones share
/// the same session, so one clone can play the transport while another is
/// handed to the monitor.
///
/// ```
/// use paired_session::session::{InMemorySession, LiveSession};
///
/// let session = InMemorySession::new("room-1");
/// let peer = session.connect_remote();
/// assert_eq!(session.remote_connection_count(), 1);
///
/// session.drop_remote(peer, "disconnect");
/// assert_eq!(session.remote_connection_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct InMemorySession {
    inner: Rc<RefCell<SessionInner>>,
}

impl InMemorySession {
    /// Create a connected session with no remote participants.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SessionInner {
                session_id: session_id.into(),
                connected: true,
                remotes: FxHashSet::default(),
                listeners: ListenerRegistry::new(),
                // 0 is the local connection
                next_connection: 1,
            })),
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn session_id(&self) -> String {
        self.inner.borrow().session_id.clone()
    }

    /// Check if the local participant is still in the session.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().connected
    }

    /// A remote participant joins. Emits `connectionCreated`.
    pub fn connect_remote(&self) -> ConnectionId {
        let mut inner = self.inner.borrow_mut();
        let id = ConnectionId::new(inner.next_connection);
        inner.next_connection += 1;
        inner.remotes.insert(id);
        inner.listeners.dispatch(&SessionEvent::connection_created(id));
        id
    }

    /// A remote participant leaves. Emits `connectionDestroyed` after the
    /// roster is updated. Returns `false` if the connection was unknown.
    pub fn drop_remote(&self, id: ConnectionId, reason: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.remotes.remove(&id) {
            return false;
        }
        let delivered = inner
            .listeners
            .dispatch(&SessionEvent::connection_destroyed(id, reason));
        debug!(
            "{}: {} destroyed ({}), {} listener(s) notified",
            inner.session_id, id, reason, delivered
        );
        true
    }

    /// Total registered listeners, across all kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Registered listeners for one kind.
    #[must_use]
    pub fn listener_count_for(&self, kind: SessionEventKind) -> usize {
        self.inner.borrow().listeners.count_for(kind)
    }
}

impl LiveSession for InMemorySession {
    fn remote_connection_count(&self) -> usize {
        self.inner.borrow().remotes.len()
    }

    fn subscribe(&self, kind: SessionEventKind) -> Subscription {
        self.inner.borrow_mut().listeners.register(kind)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.unregister(id)
    }

    fn disconnect(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.connected {
            return;
        }
        inner.connected = false;
        inner.remotes.clear();
        inner
            .listeners
            .dispatch(&SessionEvent::session_disconnected("disconnect"));
        debug!("{}: local participant left", inner.session_id);
    }
}
