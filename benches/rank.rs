#[macro_use]
extern crate criterion;
extern crate holdem_equity;
extern crate rand;

use criterion::{BatchSize, Criterion};
use holdem_equity::core::{CardBitSet, CardIter, RankTable};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_seven(rng: &mut StdRng) -> CardBitSet {
    let mut hand = CardBitSet::new();
    while hand.count() < 7 {
        if let Some(card) = (!hand).sample_one(rng) {
            hand.insert(card);
        }
    }
    hand
}

fn generate_table(c: &mut Criterion) {
    c.bench_function("Generate rank table", |b| b.iter(RankTable::generate));
}

fn rank_one(c: &mut Criterion) {
    let table = RankTable::generate();
    let hand: CardBitSet = "Ac3cAdQhJh2hJs".parse().unwrap();
    c.bench_function("Rank one 7 card hand", move |b| {
        b.iter(|| table.evaluate(hand))
    });
}

fn rank_random(c: &mut Criterion) {
    let table = RankTable::generate();
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("Rank random 7 card hands", move |b| {
        b.iter_batched(
            || random_seven(&mut rng),
            |hand| table.evaluate(hand),
            BatchSize::SmallInput,
        )
    });
}

fn rank_every_seven_from_ten(c: &mut Criterion) {
    let table = RankTable::generate();
    let cards: CardBitSet = "AsKdQh9c7s5d3h2c8s4d".parse().unwrap();
    c.bench_function("Rank every 7 card hand in 10 cards", move |b| {
        b.iter(|| {
            CardIter::new(cards, 7)
                .filter_map(|hand| table.evaluate(hand).ok())
                .count()
        })
    });
}

criterion_group!(
    benches,
    generate_table,
    rank_one,
    rank_random,
    rank_every_seven_from_ten
);
criterion_main!(benches);
