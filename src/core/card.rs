use std::fmt;
use std::str::FromStr;

use super::HoldemError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all of the `Value`'s that are possible, lowest first.
    pub fn values() -> [Value; 13] {
        VALUES
    }

    /// Parse the single character used in card notation.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('T'));
    /// assert_eq!(None, Value::from_char('X'));
    /// ```
    pub fn from_char(c: char) -> Option<Value> {
        match c {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub fn suits() -> [Suit; 4] {
        SUITS
    }

    /// Parse a suit character. Both the ascii letters and the
    /// unicode glyphs (filled and outlined) are accepted.
    pub fn from_char(s: char) -> Option<Suit> {
        match s {
            'd' | '♦' | '♢' => Some(Suit::Diamond),
            's' | '♠' | '♤' => Some(Suit::Spade),
            'h' | '♥' | '♡' => Some(Suit::Heart),
            'c' | '♣' | '♧' => Some(Suit::Club),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Diamond => 'd',
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Club => 'c',
        }
    }
}

/// A single playing card.
///
/// Every card has a stable index in `0..52` computed as
/// `suit * 13 + value`. That means each suit owns a contiguous
/// 13 bit run when cards are stored in a `CardBitSet`.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// The index of this card in `0..52`.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// assert_eq!(0, Card::new(Value::Two, Suit::Spade).index());
    /// assert_eq!(17, Card::new(Value::Six, Suit::Club).index());
    /// assert_eq!(51, Card::new(Value::Ace, Suit::Diamond).index());
    /// ```
    pub fn index(&self) -> u8 {
        self.suit as u8 * 13 + self.value as u8
    }
}

/// Panics if `idx` is not a card index. Use `Card::try_from`
/// for indexes that come from outside the crate.
impl From<u8> for Card {
    fn from(idx: u8) -> Self {
        assert!(idx < 52, "card index {idx} out of range");
        Self {
            value: VALUES[(idx % 13) as usize],
            suit: SUITS[(idx / 13) as usize],
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.index()
    }
}

impl Card {
    /// Fallible conversion from a card index.
    pub fn try_from_index(idx: u8) -> Result<Self, HoldemError> {
        if idx < 52 {
            Ok(Card::from(idx))
        } else {
            Err(HoldemError::InvalidCardIndex(idx))
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

impl FromStr for Card {
    type Err = HoldemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let value = chars
            .next()
            .ok_or(HoldemError::TooFewChars)
            .map(Value::from_char)?
            .ok_or(HoldemError::UnexpectedValueChar)?;
        let suit = chars
            .next()
            .ok_or(HoldemError::TooFewChars)
            .map(Suit::from_char)?
            .ok_or(HoldemError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(HoldemError::UnparsedCharsRemaining);
        }
        Ok(Card::new(value, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card::new(Value::Three, Suit::Spade);
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Value::Three, Suit::Spade);
        let c2 = Card::new(Value::Four, Suit::Spade);
        let c3 = Card::new(Value::Four, Suit::Club);

        assert!(c1 == c1);
        assert!(c1 < c2);
        assert!(c2 > c1);
        assert!(c3 > c2);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_index_round_trip_all() {
        for idx in 0..52u8 {
            let card = Card::from(idx);
            assert_eq!(idx, u8::from(card));
        }
    }

    #[test]
    fn test_suit_runs_are_contiguous() {
        assert_eq!(13, Card::new(Value::Two, Suit::Club).index());
        assert_eq!(25, Card::new(Value::Ace, Suit::Club).index());
        assert_eq!(26, Card::new(Value::Two, Suit::Heart).index());
    }

    #[test]
    fn test_try_from_index() {
        assert!(Card::try_from_index(51).is_ok());
        assert!(matches!(
            Card::try_from_index(52),
            Err(HoldemError::InvalidCardIndex(52))
        ));
    }

    #[test]
    fn test_parse_ascii_and_glyphs() {
        let ace: Card = "As".parse().unwrap();
        assert_eq!(Card::new(Value::Ace, Suit::Spade), ace);
        assert_eq!(ace, "A♠".parse().unwrap());
        assert_eq!(ace, "A♤".parse().unwrap());
        assert_eq!(
            Card::new(Value::Queen, Suit::Heart),
            "Q♡".parse::<Card>().unwrap()
        );
        assert_eq!(
            Card::new(Value::Two, Suit::Diamond),
            "2♦".parse::<Card>().unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "Xs".parse::<Card>(),
            Err(HoldemError::UnexpectedValueChar)
        ));
        assert!(matches!(
            "Ax".parse::<Card>(),
            Err(HoldemError::UnexpectedSuitChar)
        ));
        assert!(matches!("A".parse::<Card>(), Err(HoldemError::TooFewChars)));
        assert!(matches!(
            "Asd".parse::<Card>(),
            Err(HoldemError::UnparsedCharsRemaining)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!("Td", Card::new(Value::Ten, Suit::Diamond).to_string());
        assert_eq!("Card(2c)", format!("{:?}", Card::new(Value::Two, Suit::Club)));
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
    }
}
