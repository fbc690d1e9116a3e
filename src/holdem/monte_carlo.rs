use rand::Rng;
use tracing::{Level, debug_span, event};

use crate::core::{CardBitSet, HoldemError, RankTable};

use super::equity::EquityResult;
use super::showdown::Showdown;

/// Estimate showdown equity by dealing `iterations` random completions.
///
/// Input is checked the same way as
/// [`calculate_equity`](super::calculate_equity). Each iteration deals
/// the missing board cards uniformly from the unseen cards, so the
/// estimate converges on the exact answer as `iterations` grows.
///
/// ```
/// use holdem_equity::core::{CardBitSet, RankTable};
/// use holdem_equity::holdem::estimate_equity;
///
/// let table = RankTable::generate();
/// let hands: Vec<CardBitSet> = vec!["AsAc".parse().unwrap(), "7h2d".parse().unwrap()];
///
/// let mut rng = rand::rng();
/// let result =
///     estimate_equity(&table, &hands, CardBitSet::new(), CardBitSet::new(), 10_000, &mut rng)
///         .unwrap();
/// assert_eq!(10_000, result.completions());
/// assert!(result.equity(0) > 0.8);
/// ```
pub fn estimate_equity<R: Rng>(
    table: &RankTable,
    hands: &[CardBitSet],
    board: CardBitSet,
    dead: CardBitSet,
    iterations: usize,
    rng: &mut R,
) -> Result<EquityResult, HoldemError> {
    let span = debug_span!("estimate_equity", players = hands.len(), iterations);
    let _enter = span.enter();

    let showdown = Showdown::new(hands, board, dead)?;
    if iterations == 0 {
        return Err(HoldemError::NoIterations);
    }

    let tally = showdown.tally(
        table,
        (0..iterations).map(|_| showdown.sample_completion(rng)),
    );

    event!(
        Level::DEBUG,
        needed = showdown.needed(),
        completions = tally.completions,
        "Sampled completions"
    );
    Ok(EquityResult::from(tally))
}
