use std::cmp::Ordering;

use rand::Rng;

use crate::core::{Card, CardBitSet, CardIter, HoldemError, Rank, RankTable};
use crate::utils::PlayerBitSet;

/// Validated input for an equity calculation.
///
/// Each player's two hole cards are stored already joined with the
/// board, so finishing a hand is a single union with the completion.
#[derive(Debug, Clone)]
pub(crate) struct Showdown {
    hands: Vec<CardBitSet>,
    unseen: CardBitSet,
    needed: usize,
}

impl Showdown {
    pub(crate) fn new(
        hands: &[CardBitSet],
        board: CardBitSet,
        dead: CardBitSet,
    ) -> Result<Self, HoldemError> {
        if hands.is_empty() {
            return Err(HoldemError::NoHands);
        }
        for hand in hands {
            if hand.count() != 2 {
                return Err(HoldemError::InvalidHandSize {
                    expected: 2,
                    found: hand.count(),
                });
            }
        }
        if board.count() > 5 {
            return Err(HoldemError::InvalidBoardSize(board.count()));
        }

        // Any card seen in more than one group ends up in `shared`.
        let mut seen = CardBitSet::new();
        let mut shared = CardBitSet::new();
        for group in hands.iter().copied().chain([board, dead]) {
            shared |= seen & group;
            seen |= group;
        }
        if !shared.is_empty() {
            return Err(HoldemError::OverlappingCards(shared));
        }

        let unseen = !seen;
        let needed = 5 - board.count();
        if unseen.count() < needed {
            return Err(HoldemError::NotEnoughCards {
                needed,
                available: unseen.count(),
            });
        }

        Ok(Self {
            hands: hands.iter().map(|h| *h | board).collect(),
            unseen,
            needed,
        })
    }

    pub(crate) fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// How many board cards are still to come.
    pub(crate) fn needed(&self) -> usize {
        self.needed
    }

    pub(crate) fn unseen(&self) -> CardBitSet {
        self.unseen
    }

    /// Every player holding the best hand once `completion` is dealt.
    pub(crate) fn winners(&self, table: &RankTable, completion: CardBitSet) -> PlayerBitSet {
        let mut winners = PlayerBitSet::default();
        let mut best: Option<Rank> = None;

        for (idx, hand) in self.hands.iter().enumerate() {
            let rank = table.rank_seven(*hand | completion);
            match best.map(|b| rank.cmp(&b)) {
                // Lower ranks are stronger, so this is a new leader.
                None | Some(Ordering::Less) => {
                    winners = PlayerBitSet::single(idx);
                    best = Some(rank);
                }
                Some(Ordering::Equal) => winners.enable(idx),
                Some(Ordering::Greater) => {}
            }
        }
        winners
    }

    /// Score every completion produced by `completions`.
    pub(crate) fn tally<I>(&self, table: &RankTable, completions: I) -> Tally
    where
        I: IntoIterator<Item = CardBitSet>,
    {
        let mut tally = Tally::new(self.num_players());
        for completion in completions {
            tally.record(self.winners(table, completion));
        }
        tally
    }

    /// Every way to finish the board, each exactly once.
    pub(crate) fn completions(&self) -> CardIter {
        CardIter::new(self.unseen, self.needed)
    }

    /// A uniformly random way to finish the board.
    pub(crate) fn sample_completion<R: Rng>(&self, rng: &mut R) -> CardBitSet {
        let mut remaining = self.unseen;
        let mut completion = CardBitSet::new();
        for _ in 0..self.needed {
            if let Some(card) = remaining.sample_one(rng) {
                remaining.remove(card);
                completion.insert(card);
            }
        }
        completion
    }

    /// Split the completions into disjoint shards by the lowest
    /// unseen card each one uses.
    ///
    /// The shard led by the card at position `p` draws the rest of
    /// its cards from positions after `p`, so together the shards
    /// cover every completion exactly once. With nothing left to deal
    /// there is a single shard holding the one empty completion.
    pub(crate) fn shards(&self) -> Vec<Shard> {
        if self.needed == 0 {
            return vec![Shard {
                lead: None,
                rest: CardBitSet::new(),
                draw: 0,
            }];
        }

        let cards: Vec<Card> = self.unseen.into_iter().collect();
        cards
            .iter()
            .enumerate()
            .map(|(pos, lead)| Shard {
                lead: Some(*lead),
                rest: cards[pos + 1..].iter().copied().collect(),
                draw: self.needed - 1,
            })
            .collect()
    }
}

/// A disjoint slice of the completions of a `Showdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shard {
    lead: Option<Card>,
    rest: CardBitSet,
    draw: usize,
}

impl Shard {
    pub(crate) fn completions(&self) -> impl Iterator<Item = CardBitSet> + use<> {
        let lead: CardBitSet = self.lead.into_iter().collect();
        CardIter::new(self.rest, self.draw).map(move |cards| cards | lead)
    }

    pub(crate) fn lead(&self) -> Option<Card> {
        self.lead
    }
}

/// Integer showdown counts for every player.
///
/// Kept as counts keyed by how many players split the pot so that
/// merging partial tallies is exact and order independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tally {
    /// `splits[player][n - 1]` counts completions where the player
    /// held the best hand together with `n - 1` others.
    pub(crate) splits: Vec<Vec<u64>>,
    pub(crate) completions: u64,
}

impl Tally {
    pub(crate) fn new(num_players: usize) -> Self {
        Self {
            splits: vec![vec![0; num_players]; num_players],
            completions: 0,
        }
    }

    pub(crate) fn record(&mut self, winners: PlayerBitSet) {
        let shared_by = winners.count();
        for idx in winners.ones() {
            self.splits[idx][shared_by - 1] += 1;
        }
        self.completions += 1;
    }

    pub(crate) fn merge(mut self, other: Tally) -> Tally {
        for (mine, theirs) in self.splits.iter_mut().zip(other.splits) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        self.completions += other.completions;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::core::{combinations, test_table};

    fn cards(s: &str) -> CardBitSet {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_hands() {
        assert!(matches!(
            Showdown::new(&[], CardBitSet::new(), CardBitSet::new()),
            Err(HoldemError::NoHands)
        ));
    }

    #[test]
    fn test_hand_size() {
        assert!(matches!(
            Showdown::new(&[cards("AsAcAd")], CardBitSet::new(), CardBitSet::new()),
            Err(HoldemError::InvalidHandSize {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            Showdown::new(&[cards("As"), cards("KdKc")], CardBitSet::new(), CardBitSet::new()),
            Err(HoldemError::InvalidHandSize {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_board_size() {
        assert!(matches!(
            Showdown::new(&[cards("AsAc")], cards("2s3s4s5s6s7s"), CardBitSet::new()),
            Err(HoldemError::InvalidBoardSize(6))
        ));
    }

    #[test]
    fn test_overlaps_report_shared_cards() {
        let err = Showdown::new(
            &[cards("AsAc"), cards("AsKd")],
            CardBitSet::new(),
            CardBitSet::new(),
        );
        assert!(matches!(err, Err(HoldemError::OverlappingCards(c)) if c == cards("As")));

        let err = Showdown::new(&[cards("AsAc")], cards("Ac2d3h"), CardBitSet::new());
        assert!(matches!(err, Err(HoldemError::OverlappingCards(c)) if c == cards("Ac")));

        let err = Showdown::new(&[cards("AsAc")], cards("Kd2d3h"), cards("Kd7c"));
        assert!(matches!(err, Err(HoldemError::OverlappingCards(c)) if c == cards("Kd")));
    }

    #[test]
    fn test_not_enough_cards() {
        // Everything but three cards is dead.
        let hands = [cards("AsAc")];
        let dead = !(hands[0] | cards("2d3d4d"));
        let err = Showdown::new(&hands, CardBitSet::new(), dead);
        assert!(matches!(
            err,
            Err(HoldemError::NotEnoughCards {
                needed: 5,
                available: 3
            })
        ));
    }

    #[test]
    fn test_unseen_and_needed() {
        let s = Showdown::new(
            &[cards("AsAc"), cards("7h2d")],
            cards("Kd9s4c"),
            cards("Qh"),
        )
        .unwrap();
        assert_eq!(2, s.needed());
        assert_eq!(52 - 4 - 3 - 1, s.unseen().count());
        assert_eq!(combinations(44, 2), Some(s.completions().count() as u64));
    }

    #[test]
    fn test_winners_tie_and_single() {
        let table = test_table();
        // Board plays for everyone.
        let s = Showdown::new(
            &[cards("2c3d"), cards("2h3s"), cards("4c4d")],
            cards("AsKsQsJsTs"),
            CardBitSet::new(),
        )
        .unwrap();
        assert_eq!(3, s.winners(table, CardBitSet::new()).count());

        let s = Showdown::new(
            &[cards("AsAc"), cards("7h2d")],
            cards("Ad7c2s9hKd"),
            CardBitSet::new(),
        )
        .unwrap();
        assert_eq!(PlayerBitSet::single(0), s.winners(table, CardBitSet::new()));
    }

    #[test]
    fn test_shards_partition_completions() {
        let s = Showdown::new(
            &[cards("AsAc"), cards("7h2d")],
            cards("Kd9s"),
            CardBitSet::new(),
        )
        .unwrap();

        let mut seen: HashSet<CardBitSet> = HashSet::new();
        let shards = s.shards();
        assert_eq!(s.unseen().count(), shards.len());
        for shard in shards {
            for completion in shard.completions() {
                assert_eq!(3, completion.count());
                assert!(completion.contains(shard.lead().unwrap()));
                assert!(seen.insert(completion), "completion in two shards");
            }
        }
        assert_eq!(combinations(46, 3), Some(seen.len() as u64));
    }

    #[test]
    fn test_river_has_one_shard_with_one_completion() {
        let s = Showdown::new(
            &[cards("AsAc"), cards("7h2d")],
            cards("Kd9s4c3c8h"),
            CardBitSet::new(),
        )
        .unwrap();
        let shards = s.shards();
        assert_eq!(1, shards.len());
        assert_eq!(
            vec![CardBitSet::new()],
            shards[0].completions().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_sample_completion() {
        let s = Showdown::new(&[cards("AsAc")], cards("Kd"), cards("Qh")).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let c = s.sample_completion(&mut rng);
            assert_eq!(4, c.count());
            assert!(c.is_disjoint(!s.unseen()));
        }
    }

    #[test]
    fn test_tally_record_and_merge() {
        let mut a = Tally::new(3);
        a.record(PlayerBitSet::single(0));
        a.record(PlayerBitSet::single(0) | PlayerBitSet::single(2));

        let mut b = Tally::new(3);
        b.record(PlayerBitSet::new(3));

        let merged = a.clone().merge(b.clone());
        assert_eq!(3, merged.completions);
        assert_eq!(vec![1, 1, 1], merged.splits[0]);
        assert_eq!(vec![0, 0, 1], merged.splits[1]);
        assert_eq!(vec![0, 1, 1], merged.splits[2]);
        assert_eq!(merged, b.merge(a));
    }
}
