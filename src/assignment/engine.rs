//! Unique-assignment engine.
//!
//! Maps a fixed token pool onto a fixed slot pool through a single
//! operation, `place`. The mapping is kept injective: every slot holds at
//! most one token and every token sits on at most one slot. Placing a token
//! that is already on the board moves it; placing onto an occupied slot
//! sends the previous occupant back to the pool.

use im::{OrdMap, OrdSet};
use log::debug;
use smallvec::SmallVec;

use crate::core::{AssignmentError, Identifier, SlotId, TokenId};

use super::snapshot::AssignmentSnapshot;

/// Token-to-slot assignment state.
///
/// ## Usage
///
/// ```
/// use paired_session::assignment::AssignmentEngine;
/// use paired_session::core::{SlotId, TokenId};
///
/// let mut engine = AssignmentEngine::with_pool_sizes(5, 5);
///
/// engine.place(TokenId(3), SlotId(2)).unwrap();
/// let snapshot = engine.place(TokenId(1), SlotId(2)).unwrap();
///
/// // Token 1 displaced token 3, which is back in the pool
/// assert_eq!(snapshot.token_at(SlotId(2)), Some(TokenId(1)));
/// assert!(snapshot.available().contains(&TokenId(3)));
/// ```
#[derive(Clone, Debug)]
pub struct AssignmentEngine {
    /// Token pool, in display order.
    tokens: SmallVec<[TokenId; 8]>,

    /// Slot pool, in display order.
    slots: SmallVec<[SlotId; 8]>,

    /// Slot -> token. No token appears as a value twice.
    placement: OrdMap<SlotId, TokenId>,

    /// `tokens \ range(placement)`.
    available: OrdSet<TokenId>,
}

impl AssignmentEngine {
    /// Create an engine over the given pools.
    ///
    /// Panics if either pool is empty or contains duplicate ids.
    pub fn new(
        tokens: impl IntoIterator<Item = TokenId>,
        slots: impl IntoIterator<Item = SlotId>,
    ) -> Self {
        let tokens: SmallVec<[TokenId; 8]> = tokens.into_iter().collect();
        let slots: SmallVec<[SlotId; 8]> = slots.into_iter().collect();

        assert!(!tokens.is_empty(), "Token pool must not be empty");
        assert!(!slots.is_empty(), "Slot pool must not be empty");
        assert!(
            tokens.iter().copied().collect::<OrdSet<TokenId>>().len() == tokens.len(),
            "Token pool contains duplicate ids"
        );
        assert!(
            slots.iter().copied().collect::<OrdSet<SlotId>>().len() == slots.len(),
            "Slot pool contains duplicate ids"
        );

        let available = tokens.iter().copied().collect();

        Self {
            tokens,
            slots,
            placement: OrdMap::new(),
            available,
        }
    }

    /// Create an engine with tokens `1..=token_count` and slots
    /// `1..=slot_count`.
    #[must_use]
    pub fn with_pool_sizes(token_count: u16, slot_count: u16) -> Self {
        Self::new((1..=token_count).map(TokenId), (1..=slot_count).map(SlotId))
    }

    /// Place `token` onto `slot`.
    ///
    /// Any slot the token currently occupies is cleared first, then the
    /// token overwrites whatever occupied `slot`. Returns the updated
    /// snapshot. Unknown ids are rejected and leave the state unchanged.
    pub fn place(
        &mut self,
        token: TokenId,
        slot: SlotId,
    ) -> Result<AssignmentSnapshot, AssignmentError> {
        if !self.tokens.contains(&token) {
            return Err(AssignmentError::InvalidIdentifier(Identifier::Token(token)));
        }
        if !self.slots.contains(&slot) {
            return Err(AssignmentError::InvalidIdentifier(Identifier::Slot(slot)));
        }

        // Linear scan over every slot entry. The invariant allows at most
        // one hit, but all hits are cleared.
        let previous: SmallVec<[SlotId; 2]> = self
            .placement
            .iter()
            .filter(|(_, &t)| t == token)
            .map(|(&s, _)| s)
            .collect();
        for s in &previous {
            self.placement.remove(s);
        }

        let displaced = self.placement.insert(slot, token);
        self.recompute_available();

        debug!(
            "placed {} on {} (from {:?}, displaced {:?})",
            token,
            slot,
            previous.first(),
            displaced.filter(|&d| d != token)
        );

        Ok(self.snapshot())
    }

    fn recompute_available(&mut self) {
        let placed: SmallVec<[TokenId; 8]> = self.placement.values().copied().collect();
        self.available = self
            .tokens
            .iter()
            .copied()
            .filter(|t| !placed.contains(t))
            .collect();
    }

    /// Current state for display.
    #[must_use]
    pub fn snapshot(&self) -> AssignmentSnapshot {
        AssignmentSnapshot {
            tokens: self.tokens.clone(),
            slots: self.slots.clone(),
            placement: self.placement.clone(),
            available: self.available.clone(),
        }
    }

    /// Token occupying a slot, if any.
    #[must_use]
    pub fn token_at(&self, slot: SlotId) -> Option<TokenId> {
        self.placement.get(&slot).copied()
    }

    /// Check if a token is still in the pool.
    #[must_use]
    pub fn is_available(&self, token: TokenId) -> bool {
        self.available.contains(&token)
    }

    /// Token pool, in display order.
    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    /// Slot pool, in display order.
    #[must_use]
    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    /// Check if every slot holds a token.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placement.len() == self.slots.len()
    }

    /// Verify the injectivity and availability invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = OrdSet::new();
        for (slot, token) in self.placement.iter() {
            if !self.slots.contains(slot) || !self.tokens.contains(token) {
                return false;
            }
            if seen.insert(*token).is_some() {
                return false;
            }
        }

        let expected: OrdSet<TokenId> = self
            .tokens
            .iter()
            .copied()
            .filter(|t| !seen.contains(t))
            .collect();
        expected == self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AssignmentEngine {
        AssignmentEngine::with_pool_sizes(5, 5)
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        let snapshot = engine.snapshot();

        assert!(snapshot.placement().is_empty());
        assert_eq!(snapshot.available().len(), 5);
        assert!(!engine.is_complete());
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_place_into_empty_slot() {
        let mut engine = engine();

        let snapshot = engine.place(TokenId(2), SlotId(4)).unwrap();

        assert_eq!(snapshot.token_at(SlotId(4)), Some(TokenId(2)));
        assert!(!snapshot.available().contains(&TokenId(2)));
        assert_eq!(snapshot.available().len(), 4);
    }

    #[test]
    fn test_same_slot_is_noop() {
        let mut engine = engine();

        let first = engine.place(TokenId(1), SlotId(1)).unwrap();
        let second = engine.place(TokenId(1), SlotId(1)).unwrap();

        assert_eq!(first, second);
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_displacement() {
        let mut engine = engine();
        engine.place(TokenId(1), SlotId(1)).unwrap();

        let snapshot = engine.place(TokenId(2), SlotId(1)).unwrap();

        assert_eq!(snapshot.placement().len(), 1);
        assert_eq!(snapshot.token_at(SlotId(1)), Some(TokenId(2)));
        assert!(snapshot.available().contains(&TokenId(1)));
        // Displaced token is not auto-placed anywhere
        assert_eq!(snapshot.slot_of(TokenId(1)), None);
    }

    #[test]
    fn test_replacement_moves_token() {
        let mut engine = engine();
        engine.place(TokenId(1), SlotId(1)).unwrap();

        let snapshot = engine.place(TokenId(1), SlotId(2)).unwrap();

        assert_eq!(snapshot.placement().len(), 1);
        assert_eq!(snapshot.token_at(SlotId(1)), None);
        assert_eq!(snapshot.token_at(SlotId(2)), Some(TokenId(1)));
    }

    #[test]
    fn test_move_onto_occupied_slot() {
        let mut engine = engine();
        engine.place(TokenId(1), SlotId(1)).unwrap();
        engine.place(TokenId(2), SlotId(2)).unwrap();

        // Token 1 moves onto slot 2, displacing token 2 and vacating slot 1
        let snapshot = engine.place(TokenId(1), SlotId(2)).unwrap();

        assert_eq!(snapshot.token_at(SlotId(1)), None);
        assert_eq!(snapshot.token_at(SlotId(2)), Some(TokenId(1)));
        assert!(snapshot.available().contains(&TokenId(2)));
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_invalid_token_leaves_state() {
        let mut engine = engine();
        engine.place(TokenId(1), SlotId(1)).unwrap();
        let before = engine.snapshot();

        let err = engine.place(TokenId(99), SlotId(2)).unwrap_err();

        assert_eq!(
            err,
            AssignmentError::InvalidIdentifier(Identifier::Token(TokenId(99)))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_invalid_slot_leaves_state() {
        let mut engine = engine();
        let before = engine.snapshot();

        let err = engine.place(TokenId(1), SlotId(0)).unwrap_err();

        assert_eq!(
            err,
            AssignmentError::InvalidIdentifier(Identifier::Slot(SlotId(0)))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_fill_all_slots() {
        let mut engine = engine();
        for i in 1..=5 {
            engine.place(TokenId(i), SlotId(6 - i)).unwrap();
        }

        assert!(engine.is_complete());
        assert!(engine.snapshot().available().is_empty());
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_uneven_pools() {
        let mut engine = AssignmentEngine::with_pool_sizes(3, 5);
        engine.place(TokenId(1), SlotId(5)).unwrap();
        engine.place(TokenId(2), SlotId(4)).unwrap();
        engine.place(TokenId(3), SlotId(3)).unwrap();

        // Every token placed, slots still open
        assert!(engine.snapshot().available().is_empty());
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut engine = engine();
        let before = engine.place(TokenId(1), SlotId(1)).unwrap();

        engine.place(TokenId(1), SlotId(3)).unwrap();

        // Earlier snapshot is unaffected by later mutations
        assert_eq!(before.token_at(SlotId(1)), Some(TokenId(1)));
        assert_eq!(engine.token_at(SlotId(1)), None);
    }

    #[test]
    #[should_panic(expected = "Token pool contains duplicate ids")]
    fn test_duplicate_tokens_panic() {
        AssignmentEngine::new([TokenId(1), TokenId(1)], [SlotId(1)]);
    }

    #[test]
    #[should_panic(expected = "Slot pool contains duplicate ids")]
    fn test_duplicate_slots_panic() {
        AssignmentEngine::new([TokenId(1)], [SlotId(2), SlotId(2)]);
    }

    #[test]
    fn test_new_with_explicit_pools() {
        let engine = AssignmentEngine::new([TokenId(4), TokenId(9)], [SlotId(7)]);
        assert_eq!(engine.tokens(), &[TokenId(4), TokenId(9)]);
        assert_eq!(engine.slots(), &[SlotId(7)]);
        assert!(engine.is_available(TokenId(9)));
    }

    #[test]
    #[should_panic(expected = "Slot pool must not be empty")]
    fn test_empty_slots_panic() {
        AssignmentEngine::new([TokenId(1)], Vec::<SlotId>::new());
    }
}
