//! Builds the two lookup tables behind [`RankTable`](super::RankTable).
//!
//! First all 7462 five card equivalence classes are numbered in the
//! usual order (royal flush is 1, seven high is 7462). Then every
//! seven card shape is resolved to the best five card class it contains:
//!
//! - suited rank patterns, one 13 bit mask per suit, for the flush table
//! - per rank card counts, 0 to 4 of each rank summing to 7, for the
//!   histogram table

use std::collections::HashMap;

use super::rank::NUM_RANKS;
use super::rank_table::{FLUSH_TABLE_SIZE, HISTOGRAM_TABLE_SIZE, histogram_index};

/// Every straight as a 13 bit rank mask, broadway first and the wheel last.
pub(crate) const STRAIGHTS: [u16; 10] = [
    0b1_1111_0000_0000,
    0b0_1111_1000_0000,
    0b0_0111_1100_0000,
    0b0_0011_1110_0000,
    0b0_0001_1111_0000,
    0b0_0000_1111_1000,
    0b0_0000_0111_1100,
    0b0_0000_0011_1110,
    0b0_0000_0001_1111,
    0b1_0000_0000_1111,
];

const POW5: [u32; 13] = {
    let mut pow = [1u32; 13];
    let mut i = 1;
    while i < 13 {
        pow[i] = pow[i - 1] * 5;
        i += 1;
    }
    pow
};

fn is_straight(mask: u16) -> bool {
    STRAIGHTS.contains(&mask)
}

/// Base five encoding of per rank counts. Only used while building.
fn quinary(counts: &[u8; 13]) -> u32 {
    counts
        .iter()
        .zip(POW5.iter())
        .map(|(c, p)| *c as u32 * p)
        .sum()
}

fn quinary_of(parts: &[(usize, u8)]) -> u32 {
    parts.iter().map(|(rank, c)| *c as u32 * POW5[*rank]).sum()
}

fn quinary_of_mask(mask: u16) -> u32 {
    (0..13)
        .filter(|r| mask & (1 << *r) != 0)
        .map(|r| POW5[r])
        .sum()
}

/// Descending five card rank masks that are not straights. The
/// integer order of distinct rank masks matches comparing the cards
/// high to low, so this is also strength order.
fn distinct_five_masks() -> impl Iterator<Item = u16> {
    (0..FLUSH_TABLE_SIZE as u16)
        .rev()
        .filter(|m| m.count_ones() == 5 && !is_straight(*m))
}

/// Every five card equivalence class.
pub(crate) struct FiveCardClasses {
    /// Indexed by a five bit rank mask, straight flushes and flushes.
    pub(crate) flush: Vec<u16>,
    /// Keyed by the base five rank counts of any unsuited five card hand.
    pub(crate) unsuited: HashMap<u32, u16>,
}

impl FiveCardClasses {
    pub(crate) fn build() -> Self {
        let mut flush = vec![0u16; FLUSH_TABLE_SIZE];
        let mut unsuited: HashMap<u32, u16> = HashMap::with_capacity(6175);
        let mut next: u16 = 0;

        for straight in STRAIGHTS {
            next += 1;
            flush[straight as usize] = next;
        }

        for quad in (0..13).rev() {
            for kicker in (0..13).rev().filter(|k| *k != quad) {
                next += 1;
                unsuited.insert(quinary_of(&[(quad, 4), (kicker, 1)]), next);
            }
        }

        for trips in (0..13).rev() {
            for pair in (0..13).rev().filter(|p| *p != trips) {
                next += 1;
                unsuited.insert(quinary_of(&[(trips, 3), (pair, 2)]), next);
            }
        }

        for mask in distinct_five_masks() {
            next += 1;
            flush[mask as usize] = next;
        }

        for straight in STRAIGHTS {
            next += 1;
            unsuited.insert(quinary_of_mask(straight), next);
        }

        for trips in (0..13).rev() {
            for high in (0..13).rev().filter(|k| *k != trips) {
                for low in (0..high).rev().filter(|k| *k != trips) {
                    next += 1;
                    unsuited.insert(quinary_of(&[(trips, 3), (high, 1), (low, 1)]), next);
                }
            }
        }

        for high_pair in (0..13).rev() {
            for low_pair in (0..high_pair).rev() {
                for kicker in (0..13).rev().filter(|k| *k != high_pair && *k != low_pair) {
                    next += 1;
                    unsuited.insert(
                        quinary_of(&[(high_pair, 2), (low_pair, 2), (kicker, 1)]),
                        next,
                    );
                }
            }
        }

        for pair in (0..13).rev() {
            for first in (0..13).rev().filter(|k| *k != pair) {
                for second in (0..first).rev().filter(|k| *k != pair) {
                    for third in (0..second).rev().filter(|k| *k != pair) {
                        next += 1;
                        unsuited.insert(
                            quinary_of(&[(pair, 2), (first, 1), (second, 1), (third, 1)]),
                            next,
                        );
                    }
                }
            }
        }

        for mask in distinct_five_masks() {
            next += 1;
            unsuited.insert(quinary_of_mask(mask), next);
        }

        debug_assert_eq!(NUM_RANKS, next);
        Self { flush, unsuited }
    }

    /// The class of five unsuited cards given as per rank counts.
    pub(crate) fn unsuited_rank(&self, counts: &[u8; 13]) -> u16 {
        self.unsuited.get(&quinary(counts)).copied().unwrap_or(0)
    }
}

/// Call `f` with every vector of per rank counts where each count is
/// at most `limit[rank]` and the counts add up to `total`.
fn for_each_histogram<F: FnMut(&[u8; 13])>(limit: &[u8; 13], total: u8, f: &mut F) {
    fn place<F: FnMut(&[u8; 13])>(
        limit: &[u8; 13],
        counts: &mut [u8; 13],
        rank: usize,
        remaining: u8,
        f: &mut F,
    ) {
        if rank == 13 {
            if remaining == 0 {
                f(counts);
            }
            return;
        }
        for c in 0..=limit[rank].min(remaining) {
            counts[rank] = c;
            place(limit, counts, rank + 1, remaining - c, f);
        }
        counts[rank] = 0;
    }

    let mut counts = [0u8; 13];
    place(limit, &mut counts, 0, total, f);
}

/// The flush table: for each suited rank pattern with five or more
/// cards, the best straight flush or flush inside it. Zero otherwise.
pub(crate) fn build_flush_table(classes: &FiveCardClasses) -> Vec<u16> {
    let mut table = vec![0u16; FLUSH_TABLE_SIZE];
    for mask in 0..FLUSH_TABLE_SIZE {
        if mask.count_ones() < 5 {
            continue;
        }
        let mut best = u16::MAX;
        // Walk every sub mask, keeping the five card ones.
        let mut sub = mask;
        while sub != 0 {
            if sub.count_ones() == 5 {
                best = best.min(classes.flush[sub]);
            }
            sub = (sub - 1) & mask;
        }
        table[mask] = best;
    }
    table
}

/// The histogram table: for each seven card rank histogram, the best
/// unsuited five card hand it contains.
pub(crate) fn build_histogram_table(classes: &FiveCardClasses) -> Vec<u16> {
    let mut table = vec![0u16; HISTOGRAM_TABLE_SIZE];
    for_each_histogram(&[4; 13], 7, &mut |counts| {
        let mut best = u16::MAX;
        for_each_histogram(counts, 5, &mut |five| {
            best = best.min(classes.unsuited_rank(five));
        });
        table[histogram_index(counts)] = best;
    });
    table
}
