//! One ranking round.

use crate::assignment::{AssignmentEngine, AssignmentSnapshot};
use crate::core::{AssignmentError, RoundRng, SlotId, TokenId};

use super::deck::{WordCard, WordDeck};

/// A round of ranking word cards.
///
/// Word `i` (0-based) sits in slot `i + 1`; priority rank `r` is token `r`.
/// Placing rank `r` on a word's slot says "this word is my r-th priority".
#[derive(Clone, Debug)]
pub struct RankingRound {
    words: Vec<WordCard>,
    engine: AssignmentEngine,
}

impl RankingRound {
    /// Create a round over `words`, with one priority rank per word.
    ///
    /// Panics if `words` is empty.
    pub fn new(words: Vec<WordCard>) -> Self {
        assert!(!words.is_empty(), "Round must have at least 1 word");
        assert!(
            words.len() <= usize::from(u16::MAX),
            "Round has too many words"
        );

        let count = words.len() as u16;
        Self {
            words,
            engine: AssignmentEngine::with_pool_sizes(count, count),
        }
    }

    /// Round over every card of `deck`, in deck order.
    pub fn from_deck(deck: &WordDeck) -> Self {
        Self::new(deck.cards().to_vec())
    }

    /// Deal `count` shuffled words from `deck` and start a round.
    pub fn deal(deck: &WordDeck, rng: &mut RoundRng, count: usize) -> Self {
        Self::new(deck.deal(rng, count))
    }

    /// Put priority `rank` on the word in `slot`.
    pub fn place(
        &mut self,
        rank: TokenId,
        slot: SlotId,
    ) -> Result<AssignmentSnapshot, AssignmentError> {
        self.engine.place(rank, slot)
    }

    #[must_use]
    pub fn words(&self) -> &[WordCard] {
        &self.words
    }

    /// Word shown in `slot`.
    #[must_use]
    pub fn word(&self, slot: SlotId) -> Option<&WordCard> {
        usize::from(slot.raw())
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
    }

    #[must_use]
    pub fn snapshot(&self) -> AssignmentSnapshot {
        self.engine.snapshot()
    }

    /// Check if every word has a rank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    /// Words ordered from first to last priority. `None` until complete.
    #[must_use]
    pub fn ranking(&self) -> Option<Vec<&WordCard>> {
        if !self.is_complete() {
            return None;
        }

        let mut ranked: Vec<(TokenId, &WordCard)> = self
            .engine
            .slots()
            .iter()
            .filter_map(|&slot| Some((self.engine.token_at(slot)?, self.word(slot)?)))
            .collect();
        ranked.sort_by_key(|&(rank, _)| rank);
        Some(ranked.into_iter().map(|(_, word)| word).collect())
    }
}
