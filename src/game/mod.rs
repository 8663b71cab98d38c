//! Word-ranking mini-game.
//!
//! A player ranks word cards by dropping priority cards (1st through Nth)
//! onto them. Ranking is a unique assignment: a priority card sits on at
//! most one word. The standard round shows the default deck in order;
//! seeded deals are available for varied rounds.
//!
//! ## Example Usage
//!
//! ```
//! use paired_session::core::{RoundRng, SlotId, TokenId};
//! use paired_session::game::{RankingRound, WordDeck};
//!
//! let deck = WordDeck::default();
//! let mut round = RankingRound::deal(&deck, &mut RoundRng::new(7), 3);
//!
//! round.place(TokenId(1), SlotId(3)).unwrap();
//! round.place(TokenId(2), SlotId(1)).unwrap();
//! round.place(TokenId(3), SlotId(2)).unwrap();
//!
//! let ranking = round.ranking().unwrap();
//! assert_eq!(ranking[0], &round.words()[2]);
//! ```

mod deck;
mod round;

pub use deck::{WordCard, WordDeck};
pub use round::RankingRound;
