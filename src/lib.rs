//! Seven card Texas Hold'em hand ranking and showdown equity.
//!
//! Hands are ranked by two table lookups into a [`core::RankTable`]
//! that is built once and then shared read only. On top of that the
//! [`holdem`] module enumerates every way to finish the board (or a
//! random sample of them) and reports how often each player wins,
//! splits, or loses.
//!
//! ```
//! use holdem_equity::core::{CardBitSet, RankTable};
//! use holdem_equity::holdem::calculate_equity;
//!
//! let table = RankTable::generate();
//! let hands: Vec<CardBitSet> = vec!["AsAc".parse().unwrap(), "7h2d".parse().unwrap()];
//! let board: CardBitSet = "Ah7c2s".parse().unwrap();
//!
//! let result = calculate_equity(&table, &hands, board, CardBitSet::new()).unwrap();
//! assert!(result.equity(0) > result.equity(1));
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
/// Small helpers shared by the rest of the crate.
pub mod utils;
