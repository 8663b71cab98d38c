//! Points ledger and profile cache collaborators.
//!
//! Point balances live on a remote service. The session only ever credits
//! points back (the deduction happened at matchmaking), then mirrors the
//! credit into the locally cached user profile that other screens read.
//!
//! - [`PointsLedger`]: Remote credit call, authenticated by a bearer token
//! - [`ProfileStore`]: Injected accessor for the cached profile balance
//! - [`SharedProfile`]: Single-threaded shared profile cache

mod profile;

pub use profile::{ProfileStore, SharedProfile, UserProfile};

use std::future::Future;

use crate::core::LedgerError;

/// Bearer credential for ledger calls.
///
/// `Debug` does not print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value, for the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// Remote points ledger.
///
/// Implementations perform the network call. Implementors can write
/// `async fn credit(...)` directly.
pub trait PointsLedger {
    /// Credit `amount` points to the token holder.
    ///
    /// Returns the balance reported by the ledger after the credit.
    fn credit(
        &self,
        amount: u64,
        token: &BearerToken,
    ) -> impl Future<Output = Result<u64, LedgerError>>;
}
