//! Error types.
//!
//! Nothing here is fatal. `AssignmentError` is returned to the input surface,
//! the refund errors are absorbed by the liveness monitor and turned into
//! log lines and notices.

use std::time::Duration;

use thiserror::Error;

use super::ids::{SlotId, TokenId};

/// An identifier that is not part of the configured pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identifier {
    Token(TokenId),
    Slot(SlotId),
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Token(token) => write!(f, "{}", token),
            Identifier::Slot(slot) => write!(f, "{}", slot),
        }
    }
}

/// Errors from the assignment engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// `place` was called with a token or slot outside the pools.
    /// State is left unchanged.
    #[error("{0} is not part of the configured pools")]
    InvalidIdentifier(Identifier),
}

/// Failure reported by the points ledger.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("ledger unreachable: {0}")]
    Network(String),

    #[error("ledger rejected the bearer token")]
    Unauthorized,

    #[error("ledger error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("ledger did not answer within {0:?}")]
    Timeout(Duration),
}

/// Errors from issuing a refund.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RefundError {
    /// The credit request failed. Not retried here.
    #[error("refund of {amount} points failed")]
    LedgerCallFailed {
        amount: u64,
        #[source]
        source: LedgerError,
    },

    /// No bearer token was available to authenticate the credit.
    #[error("no bearer token available for refund")]
    MissingCredentials,
}

/// A matching mode string that is not in the refund table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown matching mode: {0:?}")]
pub struct UnknownMatchingMode(pub String);
