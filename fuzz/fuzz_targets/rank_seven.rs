#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate holdem_equity;

use std::str;
use std::sync::LazyLock;

use holdem_equity::core::{CardBitSet, HoldemError, NUM_RANKS, RankTable};

static TABLE: LazyLock<RankTable> = LazyLock::new(RankTable::generate);

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(hand) = s.parse::<CardBitSet>() {
            match TABLE.evaluate(hand) {
                Ok(rank) => {
                    assert_eq!(7, hand.count());
                    assert!((1..=NUM_RANKS).contains(&rank.value()));
                }
                Err(HoldemError::InvalidHandSize { expected, found }) => {
                    assert_eq!(7, expected);
                    assert_ne!(7, found);
                }
                Err(e) => panic!("unexpected error {e:?}"),
            }
        }
    }
});
