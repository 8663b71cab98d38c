//! Session liveness monitoring.
//!
//! Detects the remote partner leaving a paired session and performs the
//! departure exactly once: refund the matchmaking points, tell the user,
//! disconnect, and navigate to the landing page.
//!
//! ## Key Types
//!
//! - `LivenessMonitor`: Presence tracking plus the once-only departure path
//! - `SessionPresence`: Current and previous remote-peer counts
//! - `RefundAction`: Mode-dependent point refund through the ledger
//! - `Observation`: What one sample or event did
//! - `MonitorExit`: How a driver run ended
//!
//! ## Example Usage
//!
//! ```
//! use paired_session::core::{MatchContext, MonitorConfig};
//! use paired_session::core::LedgerError;
//! use paired_session::ledger::{BearerToken, PointsLedger, SharedProfile};
//! use paired_session::liveness::{LivenessMonitor, Observation, RefundAction};
//! use paired_session::session::{Destination, InMemorySession, Navigator};
//!
//! struct Ledger;
//!
//! impl PointsLedger for Ledger {
//!     async fn credit(&self, amount: u64, _token: &BearerToken) -> Result<u64, LedgerError> {
//!         Ok(amount)
//!     }
//! }
//!
//! struct Shell(Vec<Destination>);
//!
//! impl Navigator for Shell {
//!     fn navigate(&mut self, destination: Destination) {
//!         self.0.push(destination);
//!     }
//! }
//!
//! let session = InMemorySession::new("room-3");
//! let peer = session.connect_remote();
//!
//! let refund = RefundAction::new(
//!     MatchContext::new("love"),
//!     Some(BearerToken::new("token")),
//!     &MonitorConfig::default(),
//! );
//! let mut monitor =
//!     LivenessMonitor::new(session.clone(), Ledger, SharedProfile::empty(), Shell(Vec::new()), refund);
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! rt.block_on(async {
//!     session.drop_remote(peer, "networkDisconnect");
//!     assert!(monitor.sample().await.departed());
//!     assert_eq!(monitor.sample().await, Observation::Stable);
//! });
//!
//! assert_eq!(monitor.navigator().0, vec![Destination::Landing]);
//! ```

mod driver;
mod monitor;
mod presence;
mod refund;

pub use driver::{ExitReason, MonitorExit, ViewSignal};
pub use monitor::{DepartureReason, DepartureReport, LivenessMonitor, Notice, Observation};
pub use presence::{RefundState, SessionPresence};
pub use refund::{RefundAction, RefundQuote, RefundReceipt};
