#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate approx;
extern crate arbitrary;
extern crate holdem_equity;

use std::sync::LazyLock;

use approx::assert_relative_eq;
use holdem_equity::core::{CardBitSet, RankTable};
use holdem_equity::holdem::{calculate_equity, calculate_equity_parallel};

static TABLE: LazyLock<RankTable> = LazyLock::new(RankTable::generate);

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub hands: Vec<u64>,
    pub board: u64,
    pub dead: u64,
    pub worker_count: u8,
}

fn to_set(bits: u64) -> CardBitSet {
    CardBitSet::try_from(bits & ((1 << 52) - 1)).unwrap_or_else(|_| CardBitSet::new())
}

fuzz_target!(|input: Input| {
    let hands: Vec<CardBitSet> = input.hands.iter().map(|h| to_set(*h)).collect();
    let board = to_set(input.board);
    // Keep the enumeration small, only the turn and river.
    if board.count() < 4 {
        return;
    }

    let seq = calculate_equity(&TABLE, &hands, board, to_set(input.dead));
    let par = calculate_equity_parallel(
        &TABLE,
        &hands,
        board,
        to_set(input.dead),
        (input.worker_count % 4) as usize + 1,
    );

    match (seq, par) {
        (Ok(seq), Ok(par)) => {
            assert_eq!(seq, par);
            let total: f64 = seq.equities().iter().sum();
            assert_relative_eq!(1.0, total, epsilon = 1e-9);
        }
        (Err(_), Err(_)) => {}
        (seq, par) => panic!("sequential {seq:?} and parallel {par:?} disagree"),
    }
});
