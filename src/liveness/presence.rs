//! Remote-peer presence tracking.

use serde::{Deserialize, Serialize};

/// Remote-peer counts as seen by the monitor.
///
/// Only the monitor writes this. `previous_remote_peer_count` advances on
/// sampling ticks; destroyed events refresh the current count only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPresence {
    remote_peer_count: usize,
    previous_remote_peer_count: usize,
}

impl SessionPresence {
    /// Presence at mount: both counts start at the session's current value.
    #[must_use]
    pub const fn new(initial: usize) -> Self {
        Self {
            remote_peer_count: initial,
            previous_remote_peer_count: initial,
        }
    }

    /// Latest observed count.
    #[must_use]
    pub const fn remote_peer_count(&self) -> usize {
        self.remote_peer_count
    }

    /// Count at the previous sampling tick.
    #[must_use]
    pub const fn previous_remote_peer_count(&self) -> usize {
        self.previous_remote_peer_count
    }

    /// Exactly one peer at the last tick and none now.
    #[must_use]
    pub const fn peer_departed(&self) -> bool {
        self.previous_remote_peer_count == 1 && self.remote_peer_count == 0
    }

    pub(crate) fn observe(&mut self, current: usize) {
        self.remote_peer_count = current;
    }

    pub(crate) fn commit(&mut self) {
        self.previous_remote_peer_count = self.remote_peer_count;
    }
}

/// Once-only guard for the compensation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundState {
    refund_issued: bool,
}

impl RefundState {
    /// Check if the refund has been claimed.
    #[must_use]
    pub const fn refund_issued(&self) -> bool {
        self.refund_issued
    }

    /// Claim the refund. Returns `true` only for the first claim.
    pub(crate) fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.refund_issued, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_to_zero() {
        let mut presence = SessionPresence::new(1);
        presence.observe(0);
        assert!(presence.peer_departed());

        presence.commit();
        assert!(!presence.peer_departed());
        assert_eq!(presence.previous_remote_peer_count(), 0);
    }

    #[test]
    fn test_two_to_zero_is_not_departure() {
        let mut presence = SessionPresence::new(2);
        presence.observe(0);
        assert!(!presence.peer_departed());
    }

    #[test]
    fn test_observe_does_not_advance_previous() {
        let mut presence = SessionPresence::new(1);
        presence.observe(0);
        presence.observe(0);

        assert_eq!(presence.previous_remote_peer_count(), 1);
        assert!(presence.peer_departed());
    }

    #[test]
    fn test_claim_once() {
        let mut state = RefundState::default();
        assert!(!state.refund_issued());

        assert!(state.claim());
        assert!(!state.claim());
        assert!(state.refund_issued());
    }
}
