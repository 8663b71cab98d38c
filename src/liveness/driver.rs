//! Timer and event loop for a mounted monitor.
//!
//! The driver is a plain future. It owns the sampling interval and the
//! `connectionDestroyed` subscription for as long as the session view is
//! mounted, and releases both however the loop ends.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::monitor::{DepartureReason, LivenessMonitor};
use crate::ledger::{PointsLedger, ProfileStore};
use crate::session::{LiveSession, Navigator, SessionEventKind};

/// Signal from the view hosting the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewSignal {
    /// The view was unmounted. Stop without leaving the session.
    Dismount,

    /// The local user chose to leave.
    Leave,
}

/// Why the driver loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Dismounted, or the signal sender was dropped.
    Dismounted,

    /// The session was left.
    Departed(DepartureReason),

    /// The session closed the event stream.
    EventsClosed,
}

/// Summary of one driver run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorExit {
    pub reason: ExitReason,

    /// Sampling ticks handled.
    pub ticks: u64,

    /// `connectionDestroyed` events handled.
    pub events: u64,
}

impl<S, L, P, N> LivenessMonitor<S, L, P, N>
where
    S: LiveSession,
    L: PointsLedger,
    P: ProfileStore,
    N: Navigator,
{
    /// Drive the monitor until dismount or departure.
    ///
    /// The first tick fires one `period` after the call, normally
    /// `MonitorConfig::sample_interval`. On return the listener is
    /// unsubscribed and the interval dropped.
    pub async fn run(
        mut self,
        period: Duration,
        mut signal: oneshot::Receiver<ViewSignal>,
    ) -> (Self, MonitorExit) {
        assert!(!period.is_zero(), "Sample interval must be non-zero");

        let mut subscription = self.session().subscribe(SessionEventKind::ConnectionDestroyed);
        let mut timer = time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0;
        let mut events = 0;

        let reason = loop {
            tokio::select! {
                biased;

                received = &mut signal => match received {
                    Ok(ViewSignal::Leave) => {
                        self.leave_session();
                    }
                    Ok(ViewSignal::Dismount) | Err(_) => break ExitReason::Dismounted,
                },
                event = subscription.events.recv() => match event {
                    Some(event) => {
                        events += 1;
                        debug!("{} observed", event.kind);
                        self.on_connection_destroyed().await;
                    }
                    None => break ExitReason::EventsClosed,
                },
                _ = timer.tick() => {
                    ticks += 1;
                    self.sample().await;
                }
            }

            if let Some(departure) = self.departure() {
                break ExitReason::Departed(departure);
            }
        };

        self.session().unsubscribe(subscription.id);
        drop(timer);
        info!(
            "liveness monitor stopped ({:?}) after {} tick(s), {} event(s)",
            reason, ticks, events
        );

        (self, MonitorExit { reason, ticks, events })
    }
}
