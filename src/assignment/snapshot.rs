//! Read-only view of an assignment for the display layer.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{SlotId, TokenId};

/// Where a token currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    /// In the pool, can be dragged.
    Available,
    /// Occupying a slot. The pool shows a placeholder in its place.
    Placed(SlotId),
}

impl TokenStatus {
    /// Check if the token is still in the pool.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, TokenStatus::Available)
    }
}

/// Snapshot of an assignment after a `place`.
///
/// Cloning is O(1): placement and availability are `im` persistent
/// structures shared with the engine until the next mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSnapshot {
    pub(crate) tokens: SmallVec<[TokenId; 8]>,
    pub(crate) slots: SmallVec<[SlotId; 8]>,
    pub(crate) placement: OrdMap<SlotId, TokenId>,
    pub(crate) available: OrdSet<TokenId>,
}

impl AssignmentSnapshot {
    /// Slot → token entries currently placed.
    #[must_use]
    pub fn placement(&self) -> &OrdMap<SlotId, TokenId> {
        &self.placement
    }

    /// Tokens not placed on any slot.
    #[must_use]
    pub fn available(&self) -> &OrdSet<TokenId> {
        &self.available
    }

    /// Token pool in its configured order.
    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    /// Slot pool in its configured order.
    #[must_use]
    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    /// Token occupying a slot, if any.
    #[must_use]
    pub fn token_at(&self, slot: SlotId) -> Option<TokenId> {
        self.placement.get(&slot).copied()
    }

    /// Slot a token occupies, if any.
    #[must_use]
    pub fn slot_of(&self, token: TokenId) -> Option<SlotId> {
        self.placement
            .iter()
            .find(|(_, &t)| t == token)
            .map(|(&slot, _)| slot)
    }

    /// Status of a token. `None` if the token is not in the pool.
    #[must_use]
    pub fn status(&self, token: TokenId) -> Option<TokenStatus> {
        if !self.tokens.contains(&token) {
            return None;
        }
        Some(match self.slot_of(token) {
            Some(slot) => TokenStatus::Placed(slot),
            None => TokenStatus::Available,
        })
    }

    /// Token pool with per-token status, in pool order.
    ///
    /// Placed tokens stay in the sequence so the pool keeps stable
    /// positions and renders a placeholder for them.
    pub fn pool_view(&self) -> impl Iterator<Item = (TokenId, TokenStatus)> + '_ {
        self.tokens.iter().map(move |&token| {
            let status = if self.available.contains(&token) {
                TokenStatus::Available
            } else {
                self.slot_of(token)
                    .map_or(TokenStatus::Available, TokenStatus::Placed)
            };
            (token, status)
        })
    }

    /// Slots with their occupant, in slot order.
    pub fn slot_view(&self) -> impl Iterator<Item = (SlotId, Option<TokenId>)> + '_ {
        self.slots.iter().map(move |&slot| (slot, self.token_at(slot)))
    }

    /// Check if every slot holds a token.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placement.len() == self.slots.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placement.len()
    }
}
