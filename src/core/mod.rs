//! Core types: identifiers, configuration, errors, RNG.
//!
//! These are shared by the liveness monitor and the assignment engine,
//! which otherwise do not depend on each other.

pub mod ids;
pub mod config;
pub mod error;
pub mod rng;

pub use ids::{ConnectionId, ListenerId, SlotId, TokenId};
pub use config::{
    MatchContext, MatchingMode, MonitorConfig, RefundTable, DEFAULT_LEDGER_TIMEOUT,
    DEFAULT_REFUND, DEFAULT_SAMPLE_INTERVAL,
};
pub use error::{AssignmentError, Identifier, LedgerError, RefundError, UnknownMatchingMode};
pub use rng::RoundRng;
