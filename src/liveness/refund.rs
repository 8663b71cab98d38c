//! Point refund (compensation) action.
//!
//! Matchmaking deducts points up front. When the partner leaves, the same
//! amount is credited back. The action itself is not idempotent; the
//! monitor's `RefundState` makes sure it runs at most once per session.

use std::time::Duration;

use log::{info, warn};
use tokio::time;

use crate::core::{LedgerError, MatchContext, MatchingMode, MonitorConfig, RefundError, RefundTable};
use crate::ledger::{BearerToken, PointsLedger, ProfileStore};

/// Amount a refund will credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefundQuote {
    /// Points to credit.
    pub amount: u64,

    /// Recognized mode, or `None` when the default amount was used.
    pub mode: Option<MatchingMode>,
}

impl RefundQuote {
    /// Check if the default amount was used for an unknown mode.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.mode.is_none()
    }
}

/// Result of a successful refund.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefundReceipt {
    /// Points credited.
    pub amount: u64,

    /// Balance reported by the ledger.
    pub ledger_balance: u64,

    /// Cached profile balance after the credit, if a profile was cached.
    pub cached_balance: Option<u64>,
}

/// Compensation action for one session.
#[derive(Clone, Debug)]
pub struct RefundAction {
    context: MatchContext,
    token: Option<BearerToken>,
    table: RefundTable,
    default_amount: u64,
    timeout: Duration,
}

impl RefundAction {
    /// Create the action from the session's match context and credentials.
    pub fn new(context: MatchContext, token: Option<BearerToken>, config: &MonitorConfig) -> Self {
        Self {
            context,
            token,
            table: config.refund_table,
            default_amount: config.default_refund,
            timeout: config.ledger_timeout,
        }
    }

    /// Match context the refund is computed from.
    #[must_use]
    pub fn context(&self) -> &MatchContext {
        &self.context
    }

    /// Look up the refund amount.
    ///
    /// Unknown modes fall back to the default amount with a warning.
    #[must_use]
    pub fn quote(&self) -> RefundQuote {
        match self.context.mode() {
            Ok(mode) => RefundQuote {
                amount: self.table.amount_for(mode),
                mode: Some(mode),
            },
            Err(err) => {
                warn!("{}, refunding default {} points", err, self.default_amount);
                RefundQuote {
                    amount: self.default_amount,
                    mode: None,
                }
            }
        }
    }

    /// Credit a quoted amount through the ledger, then mirror it into the
    /// cached profile.
    ///
    /// A ledger call that outlives the configured timeout is abandoned and
    /// reported as `LedgerError::Timeout`. Needs a runtime with time enabled.
    pub async fn credit<L, P>(
        &self,
        quote: &RefundQuote,
        ledger: &L,
        profile: &P,
    ) -> Result<RefundReceipt, RefundError>
    where
        L: PointsLedger,
        P: ProfileStore,
    {
        let token = self.token.as_ref().ok_or(RefundError::MissingCredentials)?;

        info!("restoring {} points", quote.amount);
        let ledger_balance = time::timeout(self.timeout, ledger.credit(quote.amount, token))
            .await
            .unwrap_or(Err(LedgerError::Timeout(self.timeout)))
            .map_err(|source| RefundError::LedgerCallFailed {
                amount: quote.amount,
                source,
            })?;

        let cached_balance = profile.credit_game_point(quote.amount);
        info!("{} points restored", quote.amount);

        Ok(RefundReceipt {
            amount: quote.amount,
            ledger_balance,
            cached_balance,
        })
    }
}
