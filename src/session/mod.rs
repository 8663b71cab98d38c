//! Live-session collaborators.
//!
//! The streaming transport itself is external. This module defines what the
//! rest of the crate needs from it, plus an in-process implementation:
//!
//! - [`LiveSession`]: Remote roster, event subscriptions, disconnect
//! - [`SessionEvent`] / [`SessionEventKind`]: Transport notifications
//! - [`ListenerRegistry`]: Per-kind subscription storage and fan-out
//! - [`InMemorySession`]: Reference session for tests and local tooling
//! - [`Navigator`] / [`Destination`]: Leaving the session view
//!
//! ## Example Usage
//!
//! ```
//! use paired_session::session::{InMemorySession, LiveSession, SessionEventKind};
//!
//! let session = InMemorySession::new("room-7");
//! let peer = session.connect_remote();
//!
//! let mut sub = session.subscribe(SessionEventKind::ConnectionDestroyed);
//! session.drop_remote(peer, "networkDisconnect");
//!
//! let event = sub.events.try_recv().unwrap();
//! assert_eq!(event.connection, Some(peer));
//!
//! assert!(session.unsubscribe(sub.id));
//! assert_eq!(session.listener_count(), 0);
//! ```

mod event;
mod handle;
mod navigation;
mod registry;

pub use event::{SessionEvent, SessionEventKind};
pub use handle::{InMemorySession, LiveSession};
pub use navigation::{Destination, Navigator};
pub use registry::{ListenerRegistry, Subscription};
