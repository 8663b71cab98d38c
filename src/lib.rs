//! # paired-session
//!
//! Session logic for a paired video-chat game: two matched users rank word
//! cards together, and either of them may leave at any time.
//!
//! ## Design Principles
//!
//! 1. **Exactly-once departure**: The partner leaving is observed by a
//!    periodic sample and by a transport event. Both feed one idempotent
//!    handler, so the refund and teardown run once.
//!
//! 2. **Injected collaborators**: The live session, points ledger, profile
//!    cache, and router are traits. Nothing reaches for globals.
//!
//! 3. **Snapshots for display**: Assignment state uses `im-rs` persistent
//!    collections, so handing a snapshot to the view is O(1).
//!
//! ## Modules
//!
//! - `core`: Ids, configuration, errors, RNG
//! - `assignment`: Unique token-to-slot placement engine
//! - `session`: Live-session interface, event hub, navigation
//! - `ledger`: Points ledger and cached profile
//! - `liveness`: Departure detection, refund, and the async driver
//! - `view`: Chat/face-chat mode and the consent gate
//! - `game`: Word deck and ranking rounds

pub mod core;
pub mod assignment;
pub mod session;
pub mod ledger;
pub mod liveness;
pub mod view;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    SlotId, TokenId, ConnectionId, ListenerId,
    MatchContext, MatchingMode, MonitorConfig, RefundTable,
    AssignmentError, LedgerError, RefundError, UnknownMatchingMode,
    RoundRng,
};

pub use crate::assignment::{AssignmentEngine, AssignmentSnapshot, TokenStatus};

pub use crate::session::{
    InMemorySession, LiveSession, SessionEvent, SessionEventKind,
    Destination, Navigator,
};

pub use crate::ledger::{BearerToken, PointsLedger, ProfileStore, SharedProfile, UserProfile};

pub use crate::liveness::{
    LivenessMonitor, Observation, Notice, DepartureReason, DepartureReport,
    RefundAction, RefundReceipt, SessionPresence,
    MonitorExit, ExitReason, ViewSignal,
};

pub use crate::view::{ConsentChoice, SessionView, ViewMode, ViewTransition};

pub use crate::game::{RankingRound, WordCard, WordDeck};
