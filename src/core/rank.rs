use std::fmt;

use super::HoldemError;

/// The number of distinct hand strengths in seven card poker.
pub const NUM_RANKS: u16 = 7462;

/// All the different possible hand categories.
///
/// Ordered from the weakest to the strongest, so `HighCard`
/// compares lowest.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    /// The lowest rank.
    /// No matches
    HighCard,
    /// One Card matches another.
    OnePair,
    /// Two diffent pair of matching cards.
    TwoPair,
    /// Three of the same value.
    ThreeOfAKind,
    /// Five cards in a sequence
    Straight,
    /// Five cards of the same suit
    Flush,
    /// Three of one value and two of another value
    FullHouse,
    /// Four of the same value.
    FourOfAKind,
    /// Five cards in a sequence all fo the same suit.
    StraightFlush,
}

/// The worst rank of every category, strongest category first.
const CATEGORY_BOUNDS: [(u16, HandCategory); 9] = [
    (10, HandCategory::StraightFlush),
    (166, HandCategory::FourOfAKind),
    (322, HandCategory::FullHouse),
    (1599, HandCategory::Flush),
    (1609, HandCategory::Straight),
    (2467, HandCategory::ThreeOfAKind),
    (3325, HandCategory::TwoPair),
    (6185, HandCategory::OnePair),
    (NUM_RANKS, HandCategory::HighCard),
];

/// Strength of a hand as one of 7462 equivalence classes.
///
/// `1` is a royal flush and `7462` is seven high. Lower values are
/// stronger hands, and two hands with the same best five cards get
/// the same value. The derived ordering is the numeric one, so the
/// winner of a showdown is the minimum.
///
/// ```
/// use holdem_equity::core::{HandCategory, Rank};
///
/// let royal = Rank::new(1).unwrap();
/// let seven_high = Rank::new(7462).unwrap();
///
/// assert!(royal.is_better_than(seven_high));
/// assert_eq!(HandCategory::StraightFlush, royal.category());
/// assert_eq!(HandCategory::HighCard, seven_high.category());
/// assert!(Rank::new(0).is_none());
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct Rank(u16);

impl Rank {
    pub fn new(value: u16) -> Option<Self> {
        if (1..=NUM_RANKS).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Wrap a value already known to be in range, straight from a rank table.
    pub(crate) const fn from_table(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_better_than(&self, other: Rank) -> bool {
        self.0 < other.0
    }

    pub fn category(&self) -> HandCategory {
        CATEGORY_BOUNDS
            .iter()
            .find(|(worst, _)| self.0 <= *worst)
            .map(|(_, category)| *category)
            .unwrap_or(HandCategory::HighCard)
    }
}

impl TryFrom<u16> for Rank {
    type Error = HoldemError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or(HoldemError::InvalidRank(value))
    }
}

impl From<Rank> for u16 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.0, self.category())
    }
}
