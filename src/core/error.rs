use thiserror::Error;

use super::{Card, CardBitSet};

/// This is the core error type for the crate. It uses
/// `thiserror` to provide readable error messages.
///
/// Every input error is detected before any table lookup or
/// enumeration starts.
#[derive(Error, Debug)]
pub enum HoldemError {
    #[error("Expected {expected} cards but found {found}")]
    InvalidHandSize { expected: usize, found: usize },
    #[error("The same cards were given more than once: {0:?}")]
    OverlappingCards(CardBitSet),
    #[error("A board holds at most five cards, found {0}")]
    InvalidBoardSize(usize),
    #[error("At least one hand is needed to compute equity")]
    NoHands,
    #[error("Need {needed} unseen cards to complete the board but only {available} remain")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("At least one worker is needed")]
    InvalidWorkerCount,
    #[error("Monte Carlo estimation needs at least one iteration")]
    NoIterations,
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added {0}")]
    DuplicateCard(Card),
    #[error("Card index {0} is outside of the deck")]
    InvalidCardIndex(u8),
    #[error("Rank {0} is outside 1..=7462")]
    InvalidRank(u16),
    #[error("Malformed rank table: {0}")]
    MalformedRankTable(String),
    #[error("Unable to start the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[cfg(feature = "serde")]
    #[error("Rank table io failed")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Rank table could not be (de)serialized")]
    Json(#[from] serde_json::Error),
}
