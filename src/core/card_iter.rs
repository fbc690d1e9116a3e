use super::{Card, CardBitSet};

/// Iterates every `num_cards` sized combination of a set of cards
/// exactly once.
///
/// Combinations come out in lexicographic order of the positions in
/// `possible_cards`. Asking for zero cards gives a single empty set,
/// asking for more cards than there are gives nothing.
///
/// ```
/// use holdem_equity::core::{CardBitSet, CardIter};
///
/// let cards: CardBitSet = "AsKsQs".parse().unwrap();
/// let pairs: Vec<CardBitSet> = CardIter::new(cards, 2).collect();
///
/// assert_eq!(3, pairs.len());
/// assert!(pairs.iter().all(|p| p.count() == 2));
/// ```
#[derive(Debug, Clone)]
pub struct CardIter {
    // All the possible cards that can be dealt
    possible_cards: Vec<Card>,

    // Positions making up the next combination, `None` once exhausted.
    idx: Option<Vec<usize>>,
}

impl CardIter {
    pub fn new(possible_cards: CardBitSet, num_cards: usize) -> CardIter {
        Self::from_cards(possible_cards.into_iter().collect(), num_cards)
    }

    pub fn from_cards(possible_cards: Vec<Card>, num_cards: usize) -> CardIter {
        let idx = if num_cards <= possible_cards.len() {
            Some((0..num_cards).collect())
        } else {
            None
        };
        CardIter {
            possible_cards,
            idx,
        }
    }

    /// Step the positions forward, returning false when the
    /// last combination has already been produced.
    fn advance(idx: &mut [usize], available: usize) -> bool {
        let num_cards = idx.len();
        // Find the right most position that still has room to move.
        let Some(level) = (0..num_cards).rev().find(|&i| idx[i] < available - num_cards + i)
        else {
            return false;
        };

        idx[level] += 1;
        for i in (level + 1)..num_cards {
            idx[i] = idx[i - 1] + 1;
        }
        true
    }
}

impl Iterator for CardIter {
    type Item = CardBitSet;

    fn next(&mut self) -> Option<CardBitSet> {
        let idx = self.idx.as_mut()?;

        let result = idx
            .iter()
            .fold(CardBitSet::new(), |set, &i| set | self.possible_cards[i]);

        if !Self::advance(idx, self.possible_cards.len()) {
            self.idx = None;
        }
        Some(result)
    }
}

/// How many ways there are to choose `k` items from `n`, or `None`
/// when the count does not fit in a `u64`.
///
/// ```
/// use holdem_equity::core::combinations;
///
/// assert_eq!(Some(1_712_304), combinations(48, 5));
/// assert_eq!(Some(1), combinations(44, 0));
/// assert_eq!(Some(0), combinations(3, 4));
/// assert_eq!(None, combinations(68, 34));
/// ```
pub fn combinations(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    // acc is C(n, i) at every step, so the division is exact.
    (0..k).try_fold(1u64, |acc, i| {
        acc.checked_mul((n - i) as u64).map(|v| v / (i + 1) as u64)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_iter_one() {
        let cards: CardBitSet = "2s".parse().unwrap();
        let all: Vec<CardBitSet> = CardIter::new(cards, 1).collect();
        assert_eq!(vec![cards], all);
    }

    #[test]
    fn test_iter_two() {
        let cards: CardBitSet = "2s3s4s".parse().unwrap();

        assert_eq!(3, CardIter::new(cards, 2).count());
        for pair in CardIter::new(cards, 2) {
            assert_eq!(2, pair.count());
        }
    }

    #[test]
    fn test_iter_zero_is_single_empty() {
        let cards: CardBitSet = "2s3s4s".parse().unwrap();
        let all: Vec<CardBitSet> = CardIter::new(cards, 0).collect();
        assert_eq!(vec![CardBitSet::new()], all);

        let none: Vec<CardBitSet> = CardIter::new(CardBitSet::new(), 0).collect();
        assert_eq!(vec![CardBitSet::new()], none);
    }

    #[test]
    fn test_iter_too_many() {
        let cards: CardBitSet = "2s3s".parse().unwrap();
        assert_eq!(0, CardIter::new(cards, 3).count());
    }

    #[test]
    fn test_iter_all_taken() {
        let cards: CardBitSet = "2s3s4h".parse().unwrap();
        let all: Vec<CardBitSet> = CardIter::new(cards, 3).collect();
        assert_eq!(vec![cards], all);
    }

    #[test]
    fn test_every_combination_exactly_once() {
        let deck: CardBitSet = "AsKsQsJsTs9s8s7s6s5s4s3s".parse().unwrap();
        for k in 0..=5 {
            let seen: Vec<CardBitSet> = CardIter::new(deck, k).collect();
            let unique: HashSet<CardBitSet> = seen.iter().cloned().collect();

            assert_eq!(combinations(12, k), Some(seen.len() as u64));
            assert_eq!(seen.len(), unique.len());
            assert!(seen.iter().all(|c| c.count() == k && (*c - deck).is_empty()));
        }
    }

    #[test]
    fn test_iter_deck() {
        assert_eq!(2_598_960, CardIter::new(CardBitSet::default(), 5).count());
    }

    #[test]
    fn test_combinations() {
        assert_eq!(Some(133_784_560), combinations(52, 7));
        assert_eq!(Some(2_598_960), combinations(52, 5));
        assert_eq!(Some(44), combinations(44, 1));
        assert_eq!(Some(1), combinations(0, 0));
    }

    #[test]
    fn test_combinations_overflow() {
        assert_eq!(None, combinations(68, 34));
        assert_eq!(None, combinations(200, 100));

        // Large but still fits, checked against Pascal's rule.
        let big = combinations(62, 31).unwrap();
        assert_eq!(
            big,
            combinations(61, 30).unwrap() + combinations(61, 31).unwrap()
        );
    }
}
