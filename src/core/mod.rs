//! This is the core module. It exports the non-holdem
//! related code: cards, sets of cards, and seven card ranking.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Sets of cards stored as a 52 bit mask.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// We want to be able to iterate over every way to deal some cards.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::{CardIter, combinations};

/// The crate wide error type.
mod error;
pub use self::error::HoldemError;

/// Hand strength and categories.
mod rank;
/// Export the rank and the categories.
pub use self::rank::{HandCategory, NUM_RANKS, Rank};

/// Seven card lookup tables and evaluation.
mod rank_table;
pub use self::rank_table::{
    FLUSH_TABLE_SIZE, HISTOGRAM_TABLE_SIZE, RankTable, encode_for_lookup, evaluate,
};
#[cfg(test)]
pub(crate) use self::rank_table::test_table;

/// Offline style builder for the rank tables.
mod table_gen;
