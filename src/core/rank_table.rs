use std::fmt;

use tracing::{Level, event};

use super::rank::NUM_RANKS;
use super::table_gen::{FiveCardClasses, build_flush_table, build_histogram_table};
use super::{CardBitSet, HoldemError, Rank};

/// One entry per 13 bit suited rank pattern.
pub const FLUSH_TABLE_SIZE: usize = 1 << 13;
/// One entry per way of holding 7 cards over 13 ranks, at most 4 per rank.
pub const HISTOGRAM_TABLE_SIZE: usize = 49_205;

const RANK_MASK: u64 = 0x1fff;

/// `HISTOGRAM_OFFSETS[rank][count][remaining]` is how many histograms
/// sort before one that puts `count` cards on `rank` with `remaining`
/// cards still to place on `rank..13`. Summing it over the ranks is a
/// minimal perfect hash of a seven card histogram into
/// `0..HISTOGRAM_TABLE_SIZE`.
const HISTOGRAM_OFFSETS: [[[u16; 8]; 5]; 13] = histogram_offsets();

const fn histogram_offsets() -> [[[u16; 8]; 5]; 13] {
    // fills[n][k]: ways to put exactly k cards on n ranks, at most 4 each.
    let mut fills = [[0u32; 8]; 14];
    fills[0][0] = 1;
    let mut n = 1;
    while n < 14 {
        let mut k = 0;
        while k < 8 {
            let mut c = 0;
            while c <= 4 && c <= k {
                fills[n][k] += fills[n - 1][k - c];
                c += 1;
            }
            k += 1;
        }
        n += 1;
    }

    let mut offsets = [[[0u16; 8]; 5]; 13];
    let mut rank = 0;
    while rank < 13 {
        let later_ranks = 12 - rank;
        let mut k = 0;
        while k < 8 {
            let mut c = 1;
            while c <= 4 {
                let skipped = if c - 1 <= k {
                    fills[later_ranks][k - (c - 1)]
                } else {
                    0
                };
                offsets[rank][c][k] = offsets[rank][c - 1][k] + skipped as u16;
                c += 1;
            }
            k += 1;
        }
        rank += 1;
    }
    offsets
}

/// Perfect hash of per rank counts that sum to seven.
pub(crate) fn histogram_index(counts: &[u8; 13]) -> usize {
    let mut remaining = 7usize;
    let mut index = 0usize;
    for (rank, count) in counts.iter().enumerate() {
        index += HISTOGRAM_OFFSETS[rank][*count as usize][remaining] as usize;
        remaining -= *count as usize;
    }
    index
}

/// Same hash computed straight from a seven card mask.
#[inline]
fn histogram_key(bits: u64) -> usize {
    let mut remaining = 7usize;
    let mut index = 0usize;
    for rank in 0..13 {
        let count = ((bits >> rank) & 1)
            + ((bits >> (rank + 13)) & 1)
            + ((bits >> (rank + 26)) & 1)
            + ((bits >> (rank + 39)) & 1);
        index += HISTOGRAM_OFFSETS[rank][count as usize][remaining] as usize;
        remaining -= count as usize;
        if remaining == 0 {
            break;
        }
    }
    index
}

/// The histogram table index of a seven card hand.
///
/// Two hands share an index exactly when they hold the same number of
/// cards of every rank.
///
/// ```
/// use holdem_equity::core::{CardBitSet, encode_for_lookup};
///
/// let a: CardBitSet = "AsAcKd7h5s4c2d".parse().unwrap();
/// let b: CardBitSet = "AhAdKs7c5d4h2s".parse().unwrap();
/// assert_eq!(encode_for_lookup(a).unwrap(), encode_for_lookup(b).unwrap());
/// ```
pub fn encode_for_lookup(hand: CardBitSet) -> Result<u32, HoldemError> {
    check_seven(hand)?;
    Ok(histogram_key(hand.bits()) as u32)
}

fn check_seven(hand: CardBitSet) -> Result<(), HoldemError> {
    let found = hand.count();
    if found != 7 {
        return Err(HoldemError::InvalidHandSize { expected: 7, found });
    }
    Ok(())
}

/// Read only lookup tables mapping any seven cards to their `Rank`.
///
/// Build it once with [`RankTable::generate`] (or load a saved copy)
/// and share it by reference. Nothing mutates it after construction
/// so any number of threads can evaluate against it at once.
///
/// ```
/// use holdem_equity::core::{CardBitSet, RankTable};
///
/// let table = RankTable::generate();
/// let hand: CardBitSet = "Ac3cAdQhJh2hJs".parse().unwrap();
///
/// assert_eq!(2491, table.evaluate(hand).unwrap().value());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RankTable {
    /// Indexed by a 13 bit suited rank pattern.
    flush: Vec<u16>,
    /// Indexed by `histogram_key`.
    histogram: Vec<u16>,
}

impl RankTable {
    /// Build both tables from scratch.
    pub fn generate() -> Self {
        let classes = FiveCardClasses::build();
        let table = Self {
            flush: build_flush_table(&classes),
            histogram: build_histogram_table(&classes),
        };
        event!(
            Level::INFO,
            flush_entries = table.flush.len(),
            histogram_entries = table.histogram.len(),
            "Generated rank table"
        );
        table
    }

    /// Accept tables built elsewhere after checking every reachable
    /// entry holds a valid rank.
    pub fn from_parts(flush: Vec<u16>, histogram: Vec<u16>) -> Result<Self, HoldemError> {
        if flush.len() != FLUSH_TABLE_SIZE {
            return Err(HoldemError::MalformedRankTable(format!(
                "flush table has {} entries, expected {FLUSH_TABLE_SIZE}",
                flush.len()
            )));
        }
        if histogram.len() != HISTOGRAM_TABLE_SIZE {
            return Err(HoldemError::MalformedRankTable(format!(
                "histogram table has {} entries, expected {HISTOGRAM_TABLE_SIZE}",
                histogram.len()
            )));
        }

        let valid = |v: u16| (1..=NUM_RANKS).contains(&v);
        if let Some(pattern) = (0..FLUSH_TABLE_SIZE)
            .find(|p| p.count_ones() >= 5 && !valid(flush[*p]))
        {
            return Err(HoldemError::MalformedRankTable(format!(
                "flush pattern {pattern:#015b} has rank {}",
                flush[pattern]
            )));
        }
        if let Some(index) = histogram.iter().position(|v| !valid(*v)) {
            return Err(HoldemError::MalformedRankTable(format!(
                "histogram entry {index} has rank {}",
                histogram[index]
            )));
        }

        Ok(Self { flush, histogram })
    }

    /// Rank exactly seven cards.
    ///
    /// Fails with `InvalidHandSize` for any other number of cards.
    pub fn evaluate(&self, hand: CardBitSet) -> Result<Rank, HoldemError> {
        check_seven(hand)?;
        Ok(self.rank_seven(hand))
    }

    /// Rank a hand already known to hold seven cards.
    ///
    /// With seven cards at most one suit can hold five, and when one
    /// does no four of a kind or full house is possible, so the flush
    /// table answer is final.
    #[inline]
    pub(crate) fn rank_seven(&self, hand: CardBitSet) -> Rank {
        let bits = hand.bits();
        for suit in 0..4 {
            let pattern = ((bits >> (suit * 13)) & RANK_MASK) as usize;
            if pattern.count_ones() >= 5 {
                return Self::checked(self.flush[pattern]);
            }
        }
        Self::checked(self.histogram[histogram_key(bits)])
    }

    #[inline]
    fn checked(value: u16) -> Rank {
        if value == 0 {
            unreachable!("rank table has no entry for a seven card hand");
        }
        Rank::from_table(value)
    }
}

/// Rank seven cards against `table`.
pub fn evaluate(table: &RankTable, hand: CardBitSet) -> Result<Rank, HoldemError> {
    table.evaluate(hand)
}

impl fmt::Debug for RankTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankTable")
            .field("flush", &self.flush.len())
            .field("histogram", &self.histogram.len())
            .finish()
    }
}

#[cfg(feature = "serde")]
mod persist {
    use std::fs::File;
    use std::io::{BufReader, BufWriter, Write};
    use std::path::Path;

    use serde::{Deserialize, Serialize};
    use tracing::{Level, event};

    use super::RankTable;
    use crate::core::HoldemError;

    #[derive(Serialize)]
    struct RankTableRef<'a> {
        flush: &'a [u16],
        histogram: &'a [u16],
    }

    #[derive(Deserialize)]
    struct RankTableOwned {
        flush: Vec<u16>,
        histogram: Vec<u16>,
    }

    impl RankTable {
        /// Write both tables as json.
        pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HoldemError> {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer(
                &mut writer,
                &RankTableRef {
                    flush: &self.flush,
                    histogram: &self.histogram,
                },
            )?;
            writer.flush()?;
            Ok(())
        }

        /// Read tables written by `save`, validating them on the way in.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HoldemError> {
            let reader = BufReader::new(File::open(path.as_ref())?);
            let owned: RankTableOwned = serde_json::from_reader(reader)?;
            let table = RankTable::from_parts(owned.flush, owned.histogram)?;
            event!(Level::INFO, path = %path.as_ref().display(), "Loaded rank table");
            Ok(table)
        }
    }
}

#[cfg(test)]
pub(crate) fn test_table() -> &'static RankTable {
    use std::sync::LazyLock;
    static TABLE: LazyLock<RankTable> = LazyLock::new(RankTable::generate);
    &TABLE
}
