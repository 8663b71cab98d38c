//! Word cards and dealing.
//!
//! The default deck holds the five standard words in their display order.
//! A round can use that layout as is, or deal a seeded shuffle of it.

use serde::{Deserialize, Serialize};

use crate::core::RoundRng;

/// A word card shown in a ranking round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordCard {
    pub text: String,

    /// Card background, as a CSS hex color.
    pub color: String,
}

impl WordCard {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Pool of word cards a round is dealt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDeck {
    cards: Vec<WordCard>,
}

impl WordDeck {
    /// Create a deck. Panics if `cards` is empty.
    pub fn new(cards: Vec<WordCard>) -> Self {
        assert!(!cards.is_empty(), "Deck must have at least 1 card");
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[WordCard] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal `count` distinct cards in shuffled order.
    ///
    /// Panics if `count` exceeds the deck size.
    pub fn deal(&self, rng: &mut RoundRng, count: usize) -> Vec<WordCard> {
        assert!(
            count <= self.cards.len(),
            "Cannot deal {} cards from a deck of {}",
            count,
            self.cards.len()
        );

        let mut order: Vec<usize> = (0..self.cards.len()).collect();
        rng.shuffle(&mut order);
        order
            .into_iter()
            .take(count)
            .map(|i| self.cards[i].clone())
            .collect()
    }
}

impl Default for WordDeck {
    fn default() -> Self {
        Self::new(vec![
            WordCard::new("sea", "#2e8bab"),
            WordCard::new("baseball", "#bb7c7e"),
            WordCard::new("beer", "#bd9a5a"),
            WordCard::new("piano", "#58a279"),
            WordCard::new("amusement park", "#bd80ba"),
        ])
    }
}
