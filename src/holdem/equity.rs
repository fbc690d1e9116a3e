use tracing::{Level, debug_span, event};

use crate::core::{CardBitSet, HoldemError, RankTable};

use super::showdown::{Showdown, Tally};

/// How one player fared over every counted completion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEquity {
    /// Share of the pot won on average. A split between `n` players
    /// counts as `1 / n` for each of them.
    pub equity: f64,
    /// Fraction of completions won outright.
    pub win: f64,
    /// Fraction of completions where the pot was split.
    pub tie: f64,
    /// Fraction of completions lost.
    pub loss: f64,
}

/// The result of an equity calculation, one entry per input hand and
/// in the same order.
///
/// ```
/// use holdem_equity::core::{CardBitSet, RankTable};
/// use holdem_equity::holdem::calculate_equity;
///
/// let table = RankTable::generate();
/// let hands: Vec<CardBitSet> = vec!["AsAc".parse().unwrap(), "7h2d".parse().unwrap()];
/// let board: CardBitSet = "Ad7c2s9hKd".parse().unwrap();
///
/// let result = calculate_equity(&table, &hands, board, CardBitSet::new()).unwrap();
/// assert_eq!(1, result.completions());
/// assert_eq!(vec![1.0, 0.0], result.equities());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityResult {
    players: Vec<PlayerEquity>,
    completions: u64,
}

impl EquityResult {
    pub fn equity(&self, idx: usize) -> f64 {
        self.players[idx].equity
    }

    pub fn equities(&self) -> Vec<f64> {
        self.players.iter().map(|p| p.equity).collect()
    }

    pub fn player(&self, idx: usize) -> &PlayerEquity {
        &self.players[idx]
    }

    pub fn players(&self) -> &[PlayerEquity] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// How many completed boards were scored.
    pub fn completions(&self) -> u64 {
        self.completions
    }
}

impl From<Tally> for EquityResult {
    fn from(tally: Tally) -> Self {
        let total = tally.completions as f64;
        let players = tally
            .splits
            .iter()
            .map(|splits| {
                let won: u64 = splits[0];
                let tied: u64 = splits[1..].iter().sum();
                let lost = tally.completions - won - tied;
                let shares: f64 = splits
                    .iter()
                    .enumerate()
                    .map(|(n, count)| *count as f64 / (n + 1) as f64)
                    .sum();
                PlayerEquity {
                    equity: shares / total,
                    win: won as f64 / total,
                    tie: tied as f64 / total,
                    loss: lost as f64 / total,
                }
            })
            .collect();

        Self {
            players,
            completions: tally.completions,
        }
    }
}

/// Exact showdown equity of every hand, found by dealing out every
/// possible rest of the board.
///
/// `hands` are the players' hole cards, two each. `board` holds zero
/// to five community cards already dealt and `dead` any cards known
/// to be out of play. No card may appear in more than one of these.
///
/// The returned equities add up to one.
pub fn calculate_equity(
    table: &RankTable,
    hands: &[CardBitSet],
    board: CardBitSet,
    dead: CardBitSet,
) -> Result<EquityResult, HoldemError> {
    let span = debug_span!("calculate_equity", players = hands.len());
    let _enter = span.enter();

    let showdown = Showdown::new(hands, board, dead)?;
    let tally = showdown.tally(table, showdown.completions());

    event!(
        Level::DEBUG,
        needed = showdown.needed(),
        completions = tally.completions,
        "Enumerated every completion"
    );
    Ok(EquityResult::from(tally))
}
