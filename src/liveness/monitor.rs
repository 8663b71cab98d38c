//! Departure detection and once-only teardown.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use super::presence::{RefundState, SessionPresence};
use super::refund::{RefundAction, RefundReceipt};
use crate::core::RefundError;
use crate::ledger::{PointsLedger, ProfileStore};
use crate::session::{Destination, LiveSession, Navigator};

/// User-facing notice raised by the monitor, in the order raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The partner left the session.
    PeerLeft,

    /// The match mode was not recognized; the default amount was refunded.
    UnknownMatchingMode { mode: String, refunded: u64 },

    /// The ledger rejected or failed the credit.
    RefundFailed { amount: u64, reason: String },

    /// No credentials were available, so nothing was credited.
    RefundSkipped { amount: u64 },
}

/// Why the session was left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartureReason {
    /// Remote peer count went from 1 to 0.
    PeerLeft,

    /// The local user left (declined consent, or left explicitly). No refund.
    LocalLeave,
}

/// What the departure path did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepartureReport {
    pub reason: DepartureReason,

    /// Receipt of the refund, when one was credited.
    pub refund: Option<RefundReceipt>,
}

/// Result of feeding one observation into the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// No departure.
    Stable,

    /// This call performed the departure.
    Departed(DepartureReport),

    /// A departure was detected but had already been handled.
    AlreadyHandled,
}

impl Observation {
    /// Check if this call performed the departure.
    #[must_use]
    pub const fn departed(&self) -> bool {
        matches!(self, Observation::Departed(_))
    }
}

/// Watches a live session for the partner leaving.
///
/// Two producers feed it: periodic [`sample`](Self::sample) calls and
/// `connectionDestroyed` events via
/// [`on_connection_destroyed`](Self::on_connection_destroyed). Either may see
/// the same 1 → 0 transition; [`on_peer_departed`](Self::on_peer_departed)
/// tears the session down and then refunds, exactly once.
///
/// The monitor never returns an error. Ledger failures become
/// [`Notice`]s and the teardown proceeds.
pub struct LivenessMonitor<S, L, P, N> {
    session: S,
    ledger: L,
    profile: P,
    navigator: N,
    refund: RefundAction,
    presence: SessionPresence,
    refund_state: RefundState,
    departure: Option<DepartureReason>,
    notices: Vec<Notice>,
}

impl<S, L, P, N> LivenessMonitor<S, L, P, N>
where
    S: LiveSession,
    L: PointsLedger,
    P: ProfileStore,
    N: Navigator,
{
    /// Mount a monitor on `session`.
    ///
    /// Both presence counts start at the session's current remote count.
    pub fn new(session: S, ledger: L, profile: P, navigator: N, refund: RefundAction) -> Self {
        let presence = SessionPresence::new(session.remote_connection_count());
        Self {
            session,
            ledger,
            profile,
            navigator,
            refund,
            presence,
            refund_state: RefundState::default(),
            departure: None,
            notices: Vec::new(),
        }
    }

    /// Periodic check. Always advances the previous count.
    pub async fn sample(&mut self) -> Observation {
        self.presence.observe(self.session.remote_connection_count());

        let observation = if self.presence.peer_departed() {
            self.on_peer_departed().await
        } else {
            Observation::Stable
        };

        self.presence.commit();
        observation
    }

    /// Event-driven check. Does not advance the previous count.
    pub async fn on_connection_destroyed(&mut self) -> Observation {
        self.presence.observe(self.session.remote_connection_count());

        if self.presence.peer_departed() {
            self.on_peer_departed().await
        } else {
            Observation::Stable
        }
    }

    /// Notify, disconnect, navigate, then refund. Idempotent.
    ///
    /// Teardown does not wait on the ledger.
    pub async fn on_peer_departed(&mut self) -> Observation {
        // Claim before the first await so a concurrent producer sees it.
        if self.departure.is_some() || !self.refund_state.claim() {
            debug!("peer departure already handled");
            return Observation::AlreadyHandled;
        }
        self.departure = Some(DepartureReason::PeerLeft);

        info!("remote peer left, leaving session and restoring points");
        self.notices.push(Notice::PeerLeft);

        // Leave first; the credit may take up to the ledger timeout.
        self.teardown();
        let refund = self.restore_points().await;

        Observation::Departed(DepartureReport {
            reason: DepartureReason::PeerLeft,
            refund,
        })
    }

    /// Leave without a refund. Shares the once-only guard with
    /// [`on_peer_departed`](Self::on_peer_departed).
    pub fn leave_session(&mut self) -> Observation {
        if self.departure.is_some() {
            debug!("session already left");
            return Observation::AlreadyHandled;
        }
        self.departure = Some(DepartureReason::LocalLeave);

        info!("leaving session");
        self.teardown();

        Observation::Departed(DepartureReport {
            reason: DepartureReason::LocalLeave,
            refund: None,
        })
    }

    async fn restore_points(&mut self) -> Option<RefundReceipt> {
        let quote = self.refund.quote();
        if quote.is_fallback() {
            self.notices.push(Notice::UnknownMatchingMode {
                mode: self.refund.context().matching_mode.clone(),
                refunded: quote.amount,
            });
        }

        match self.refund.credit(&quote, &self.ledger, &self.profile).await {
            Ok(receipt) => Some(receipt),
            Err(RefundError::MissingCredentials) => {
                warn!("no bearer token, skipping {} point refund", quote.amount);
                self.notices.push(Notice::RefundSkipped {
                    amount: quote.amount,
                });
                None
            }
            Err(RefundError::LedgerCallFailed { amount, source }) => {
                error!("failed to restore {} points: {}", amount, source);
                self.notices.push(Notice::RefundFailed {
                    amount,
                    reason: source.to_string(),
                });
                None
            }
        }
    }

    fn teardown(&mut self) {
        self.session.disconnect();
        self.navigator.navigate(Destination::Landing);
    }

    /// Current presence counts.
    #[must_use]
    pub fn presence(&self) -> SessionPresence {
        self.presence
    }

    /// Check if the refund has been claimed.
    #[must_use]
    pub fn refund_issued(&self) -> bool {
        self.refund_state.refund_issued()
    }

    /// How the session was left, if it was.
    #[must_use]
    pub fn departure(&self) -> Option<DepartureReason> {
        self.departure
    }

    /// Notices raised so far.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take the pending notices, leaving none.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    #[must_use]
    pub fn profile(&self) -> &P {
        &self.profile
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::core::{LedgerError, MatchContext, MonitorConfig};
    use crate::ledger::{BearerToken, SharedProfile, UserProfile};
    use crate::session::InMemorySession;

    #[derive(Clone, Default)]
    struct Ledger {
        credits: Rc<RefCell<Vec<u64>>>,
        fail: bool,
    }

    impl PointsLedger for Ledger {
        async fn credit(&self, amount: u64, _token: &BearerToken) -> Result<u64, LedgerError> {
            if self.fail {
                return Err(LedgerError::Server {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            self.credits.borrow_mut().push(amount);
            Ok(amount)
        }
    }

    #[derive(Clone, Default)]
    struct Nav(Rc<Cell<usize>>);

    impl Navigator for Nav {
        fn navigate(&mut self, destination: Destination) {
            assert_eq!(destination.path(), "/main");
            self.0.set(self.0.get() + 1);
        }
    }

    fn monitor(
        session: &InMemorySession,
        mode: &str,
        ledger: Ledger,
    ) -> LivenessMonitor<InMemorySession, Ledger, SharedProfile, Nav> {
        let profile = SharedProfile::new(UserProfile {
            user_id: 1,
            nickname: "a".into(),
            game_point: 0,
        });
        let refund = RefundAction::new(
            MatchContext::new(mode),
            Some(BearerToken::new("t")),
            &MonitorConfig::default(),
        );
        LivenessMonitor::new(session.clone(), ledger, profile, Nav::default(), refund)
    }

    #[tokio::test]
    async fn test_sample_detects_departure() {
        let session = InMemorySession::new("s");
        let peer = session.connect_remote();
        let ledger = Ledger::default();
        let mut monitor = monitor(&session, "love", ledger.clone());

        assert_eq!(monitor.sample().await, Observation::Stable);

        session.drop_remote(peer, "networkDisconnect");
        let observation = monitor.sample().await;

        assert!(observation.departed());
        assert_eq!(*ledger.credits.borrow(), vec![500]);
        assert_eq!(monitor.navigator().0.get(), 1);
        assert_eq!(monitor.profile().game_point(), Some(500));
        assert_eq!(monitor.notices(), &[Notice::PeerLeft]);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_event_then_tick_refunds_once() {
        let session = InMemorySession::new("s");
        let peer = session.connect_remote();
        let ledger = Ledger::default();
        let mut monitor = monitor(&session, "random", ledger.clone());

        session.drop_remote(peer, "networkDisconnect");
        assert!(monitor.on_connection_destroyed().await.departed());
        assert_eq!(monitor.presence().previous_remote_peer_count(), 1);

        assert_eq!(monitor.sample().await, Observation::AlreadyHandled);
        assert_eq!(monitor.presence().previous_remote_peer_count(), 0);
        assert_eq!(monitor.sample().await, Observation::Stable);

        assert_eq!(*ledger.credits.borrow(), vec![100]);
        assert_eq!(monitor.navigator().0.get(), 1);
    }

    #[tokio::test]
    async fn test_two_peers_to_zero_is_stable() {
        let session = InMemorySession::new("s");
        session.connect_remote();
        session.connect_remote();
        let mut monitor = monitor(&session, "love", Ledger::default());

        session.disconnect();
        assert_eq!(monitor.sample().await, Observation::Stable);
        assert_eq!(monitor.departure(), None);
    }

    #[tokio::test]
    async fn test_ledger_failure_still_tears_down() {
        let session = InMemorySession::new("s");
        let peer = session.connect_remote();
        let ledger = Ledger {
            fail: true,
            ..Default::default()
        };
        let mut monitor = monitor(&session, "top30", ledger);

        session.drop_remote(peer, "forceDisconnected");
        let observation = monitor.sample().await;

        assert_eq!(
            observation,
            Observation::Departed(DepartureReport {
                reason: DepartureReason::PeerLeft,
                refund: None,
            })
        );
        assert!(monitor.refund_issued());
        assert_eq!(monitor.navigator().0.get(), 1);
        assert_eq!(monitor.profile().game_point(), Some(0));
        assert!(matches!(
            monitor.notices(),
            [Notice::PeerLeft, Notice::RefundFailed { amount: 1000, .. }]
        ));
    }

    #[tokio::test]
    async fn test_unknown_mode_notice() {
        let session = InMemorySession::new("s");
        let peer = session.connect_remote();
        let ledger = Ledger::default();
        let mut monitor = monitor(&session, "blind", ledger.clone());

        session.drop_remote(peer, "networkDisconnect");
        monitor.sample().await;

        assert_eq!(*ledger.credits.borrow(), vec![100]);
        assert_eq!(
            monitor.drain_notices(),
            vec![
                Notice::PeerLeft,
                Notice::UnknownMatchingMode {
                    mode: "blind".into(),
                    refunded: 100,
                },
            ]
        );
        assert!(monitor.notices().is_empty());
    }

    #[tokio::test]
    async fn test_leave_then_peer_departure() {
        let session = InMemorySession::new("s");
        session.connect_remote();
        let ledger = Ledger::default();
        let mut monitor = monitor(&session, "love", ledger.clone());

        assert!(monitor.leave_session().departed());
        assert_eq!(monitor.departure(), Some(DepartureReason::LocalLeave));

        // Disconnect emptied the roster, so the next tick sees 1 -> 0.
        assert_eq!(monitor.sample().await, Observation::AlreadyHandled);
        assert_eq!(monitor.leave_session(), Observation::AlreadyHandled);

        assert!(ledger.credits.borrow().is_empty());
        assert_eq!(monitor.navigator().0.get(), 1);
    }

    #[tokio::test]
    async fn test_direct_call_is_idempotent() {
        let session = InMemorySession::new("s");
        let ledger = Ledger::default();
        let mut monitor = monitor(&session, "love", ledger.clone());

        assert!(monitor.on_peer_departed().await.departed());
        assert_eq!(monitor.on_peer_departed().await, Observation::AlreadyHandled);
        assert_eq!(ledger.credits.borrow().len(), 1);
    }
}
