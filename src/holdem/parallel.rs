use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{Level, debug_span, dispatcher, event};

use crate::core::{CardBitSet, HoldemError, RankTable};

use super::equity::EquityResult;
use super::showdown::{Showdown, Tally};

/// The worker count used when the caller has no preference, one per
/// thread in rayon's global pool.
pub fn default_worker_count() -> usize {
    rayon::current_num_threads()
}

/// Exact showdown equity computed on `worker_count` threads.
///
/// The completions are split into disjoint shards, one per unseen
/// card, and every shard is scored independently before the counts
/// are merged. Counts are whole numbers, so the result is identical
/// to [`calculate_equity`](super::calculate_equity) for the same input
/// no matter how many workers are used.
///
/// ```
/// use holdem_equity::core::{CardBitSet, RankTable};
/// use holdem_equity::holdem::{calculate_equity, calculate_equity_parallel};
///
/// let table = RankTable::generate();
/// let hands: Vec<CardBitSet> = vec!["KsKd".parse().unwrap(), "Th9h".parse().unwrap()];
/// let board: CardBitSet = "8h7s2h".parse().unwrap();
///
/// let fast = calculate_equity_parallel(&table, &hands, board, CardBitSet::new(), 4).unwrap();
/// let slow = calculate_equity(&table, &hands, board, CardBitSet::new()).unwrap();
/// assert_eq!(fast, slow);
/// ```
pub fn calculate_equity_parallel(
    table: &RankTable,
    hands: &[CardBitSet],
    board: CardBitSet,
    dead: CardBitSet,
    worker_count: usize,
) -> Result<EquityResult, HoldemError> {
    let span = debug_span!(
        "calculate_equity_parallel",
        players = hands.len(),
        worker_count
    );
    let _enter = span.enter();

    let showdown = Showdown::new(hands, board, dead)?;
    if worker_count == 0 {
        return Err(HoldemError::InvalidWorkerCount);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|idx| format!("equity-worker-{idx}"))
        .build()?;

    let shards = showdown.shards();
    let num_players = showdown.num_players();
    event!(Level::TRACE, shards = shards.len(), "Dispatching shards");

    // Workers neither inherit the caller's subscriber nor its span.
    let dispatch = dispatcher::get_default(|d| d.clone());

    let tally = pool.install(|| {
        shards
            .into_par_iter()
            .fold(
                || Tally::new(num_players),
                |mut tally, shard| {
                    dispatcher::with_default(&dispatch, || {
                        span.in_scope(|| {
                            event!(Level::TRACE, lead = ?shard.lead(), "Scoring shard");
                            for completion in shard.completions() {
                                tally.record(showdown.winners(table, completion));
                            }
                            tally
                        })
                    })
                },
            )
            .reduce(|| Tally::new(num_players), Tally::merge)
    });

    event!(
        Level::DEBUG,
        needed = showdown.needed(),
        completions = tally.completions,
        "Enumerated every completion"
    );
    Ok(EquityResult::from(tally))
}
