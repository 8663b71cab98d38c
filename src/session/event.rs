//! Live-session event types.
//!
//! The streaming transport notifies subscribers when participants come and
//! go. Only `ConnectionDestroyed` matters to the liveness monitor; the other
//! kinds exist so a session handle can report its full lifecycle.

use serde::{Deserialize, Serialize};

use crate::core::ConnectionId;

/// Kind of session event. Subscriptions are made per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionEventKind {
    /// A remote participant joined.
    ConnectionCreated,
    /// A remote participant left or was dropped.
    ConnectionDestroyed,
    /// The local participant left the session.
    SessionDisconnected,
}

impl SessionEventKind {
    /// Transport-level event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionCreated => "connectionCreated",
            Self::ConnectionDestroyed => "connectionDestroyed",
            Self::SessionDisconnected => "sessionDisconnected",
        }
    }
}

impl std::fmt::Display for SessionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session event with contextual data.
///
/// ## Event Data
///
/// - `kind`: What happened
/// - `connection`: The participant connection involved (if any)
/// - `reason`: Transport reason string (`"disconnect"`,
///   `"networkDisconnect"`, ...), if the transport reported one
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// The type of event.
    pub kind: SessionEventKind,

    /// The connection the event is about.
    pub connection: Option<ConnectionId>,

    /// Reason reported by the transport.
    pub reason: Option<String>,
}

impl SessionEvent {
    /// Create a new event with just a kind.
    #[must_use]
    pub fn new(kind: SessionEventKind) -> Self {
        Self {
            kind,
            connection: None,
            reason: None,
        }
    }

    /// Set the connection (builder pattern).
    #[must_use]
    pub fn with_connection(mut self, connection: ConnectionId) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Set the reason (builder pattern).
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// A remote participant joined.
    #[must_use]
    pub fn connection_created(connection: ConnectionId) -> Self {
        Self::new(SessionEventKind::ConnectionCreated).with_connection(connection)
    }

    /// A remote participant left.
    pub fn connection_destroyed(connection: ConnectionId, reason: impl Into<String>) -> Self {
        Self::new(SessionEventKind::ConnectionDestroyed)
            .with_connection(connection)
            .with_reason(reason)
    }

    /// The local participant left.
    pub fn session_disconnected(reason: impl Into<String>) -> Self {
        Self::new(SessionEventKind::SessionDisconnected).with_reason(reason)
    }
}
