use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub};

use super::{Card, HoldemError, Suit, Value};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::ser::SerializeSeq;

/// This struct is a bitset for cards
/// Each card is represented by a bit in a 64 bit integer
///
/// The bit is set if the card present
/// The bit is unset if the card not in the set
///
/// Bit `i` is the card with index `i`, so the four suits
/// sit in four 13 bit runs, spades lowest.
///
/// It implements the BitOr, BitAnd, BitXor, and Sub traits
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    // The bitset
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_equity::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { cards: 0 }
    }

    /// This does what it says on the tin it insertes a card into the bitset
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet, Suit, Value};
    /// let mut cards = CardBitSet::new();
    ///
    /// cards.insert(Card::new(Value::Six, Suit::Club));
    /// cards.insert(Card::new(Value::King, Suit::Club));
    /// cards.insert(Card::new(Value::Ace, Suit::Club));
    /// assert_eq!(3, cards.count());
    /// ```
    pub fn insert(&mut self, card: Card) {
        self.cards |= 1 << u8::from(card);
    }

    /// Remove a card from the bitset
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet, Suit, Value};
    /// let mut cards = CardBitSet::new();
    /// cards.insert(Card::from(17));
    ///
    /// // We're using the u8 but it's got a value as well
    /// assert_eq!(Card::new(Value::Six, Suit::Club), Card::from(17));
    ///
    /// cards.remove(Card::new(Value::Six, Suit::Club));
    /// assert!(!cards.contains(Card::from(17)));
    /// ```
    pub fn remove(&mut self, card: Card) {
        self.cards &= !(1 << u8::from(card));
    }

    /// Is the card in the bitset ?
    pub fn contains(&self, card: Card) -> bool {
        (self.cards & (1 << u8::from(card))) != 0
    }

    /// Is the bitset empty ?
    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// How many cards are in the bitset ?
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet};
    /// let mut cards = CardBitSet::new();
    ///
    /// assert_eq!(0, cards.count());
    /// for card in 0..13 {
    ///    cards.insert(Card::from(card));
    ///    assert_eq!(card as usize + 1, cards.count());
    /// }
    /// assert_eq!(13, cards.count());
    /// ```
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.cards = 0;
    }

    /// True when no card is in both sets.
    pub fn is_disjoint(&self, other: CardBitSet) -> bool {
        self.cards & other.cards == 0
    }

    /// The raw 52 bit mask.
    pub const fn bits(&self) -> u64 {
        self.cards
    }

    /// The 13 bit rank mask of a single suit.
    ///
    /// ```
    /// use holdem_equity::core::{CardBitSet, Suit};
    ///
    /// let cards: CardBitSet = "AhKh2h2c".parse().unwrap();
    /// assert_eq!(0b1_1000_0000_0001, cards.suit_mask(Suit::Heart));
    /// assert_eq!(0b1, cards.suit_mask(Suit::Club));
    /// ```
    pub fn suit_mask(&self, suit: Suit) -> u16 {
        ((self.cards >> (suit as u64 * 13)) & 0x1fff) as u16
    }

    /// Sample one card from the bitset
    ///
    /// Returns `None` if the bitset is empty
    ///
    /// ```
    /// use rand::rng;
    /// use holdem_equity::core::CardBitSet;
    ///
    /// let mut rng = rng();
    /// let cards = CardBitSet::default();
    /// let card = cards.sample_one(&mut rng);
    ///
    /// assert!(card.is_some());
    /// assert!(cards.contains(card.unwrap()));
    /// assert!(CardBitSet::new().sample_one(&mut rng).is_none());
    /// ```
    pub fn sample_one<R: Rng>(&self, rng: &mut R) -> Option<Card> {
        if self.is_empty() {
            return None;
        }

        let max = 63 - self.cards.leading_zeros();
        let min = self.cards.trailing_zeros();

        let mut idx = rng.random_range(min..=max);
        while (self.cards & (1 << idx)) == 0 {
            // While it's faster to just decrement/incrment the index, we need to ensure
            // that this doesn't bias towards lower/higher values
            idx = rng.random_range(min..=max);
        }
        Some(Card::from(idx as u8))
    }
}

impl Default for CardBitSet {
    /// Create a new bitset with all the cards in it
    /// ```
    /// use holdem_equity::core::CardBitSet;
    ///
    /// let cards = CardBitSet::default();
    ///
    /// assert_eq!(52, cards.count());
    /// assert!(!cards.is_empty());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

/// Raw masks are only accepted when no bit above 51 is set.
impl TryFrom<u64> for CardBitSet {
    type Error = HoldemError;

    fn try_from(cards: u64) -> Result<Self, Self::Error> {
        if cards & !FIFTY_TWO_ONES != 0 {
            let first_bad = (cards & !FIFTY_TWO_ONES).trailing_zeros() as u8;
            return Err(HoldemError::InvalidCardIndex(first_bad));
        }
        Ok(Self { cards })
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = CardBitSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

/// Parse card notation such as `"AsAc"`, `"As Ac"` or `"A♠ A♣"`.
/// Whitespace between cards is ignored and duplicate cards are rejected.
impl FromStr for CardBitSet {
    type Err = HoldemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().filter(|c| !c.is_whitespace());
        let mut cards = CardBitSet::new();

        while let Some(vc) = chars.next() {
            let value = Value::from_char(vc).ok_or(HoldemError::UnexpectedValueChar)?;
            let suit = chars
                .next()
                .ok_or(HoldemError::TooFewChars)
                .map(Suit::from_char)?
                .ok_or(HoldemError::UnexpectedSuitChar)?;
            let card = Card::new(value, suit);

            if cards.contains(card) {
                return Err(HoldemError::DuplicateCard(card));
            }
            cards.insert(card);
        }

        Ok(cards)
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

impl Display for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in (*self).into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl BitOr<CardBitSet> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOr<Card> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Card) -> Self::Output {
        Self {
            cards: self.cards | (1 << u8::from(rhs)),
        }
    }
}

impl BitOrAssign<CardBitSet> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cards |= rhs.cards;
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= 1 << u8::from(rhs);
    }
}

impl BitXor for CardBitSet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards ^ rhs.cards,
        }
    }
}

impl BitXor<Card> for CardBitSet {
    type Output = Self;

    fn bitxor(self, rhs: Card) -> Self::Output {
        Self {
            cards: self.cards ^ (1 << u8::from(rhs)),
        }
    }
}

impl BitXorAssign<CardBitSet> for CardBitSet {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.cards ^= rhs.cards;
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

impl BitAndAssign for CardBitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.cards &= rhs.cards;
    }
}

/// Set difference, the cards of `self` that are not in `rhs`.
impl Sub for CardBitSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards & !rhs.cards,
        }
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            cards: !self.cards & FIFTY_TWO_ONES, // Ensure we only keep the first 52 bits
        }
    }
}

/// The iterator for the CardBitSet
/// It iterates over the cards in the bitset, lowest index first
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let card = self.0.trailing_zeros();
        self.0 &= !(1 << card);

        Some(Card::from(card as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CardBitSetIter {}

#[cfg(feature = "serde")]
impl serde::Serialize for CardBitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for card in (*self).into_iter() {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct CardBitSetVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for CardBitSetVisitor {
    type Value = CardBitSet;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of cards")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut cards = CardBitSet::new();
        while let Some(card) = seq.next_element()? {
            cards.insert(card);
        }
        Ok(cards)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CardBitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(CardBitSetVisitor)
    }
}
