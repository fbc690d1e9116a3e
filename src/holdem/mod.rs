/// Input checking and per completion scoring shared by every engine.
mod showdown;

/// Exact equity, enumerating every completion on one thread.
mod equity;
/// Export the result types and `calculate_equity`
pub use self::equity::{EquityResult, PlayerEquity, calculate_equity};

/// Exact equity split across a pool of worker threads.
mod parallel;
pub use self::parallel::{calculate_equity_parallel, default_worker_count};

/// Sampled equity for when an estimate is good enough.
mod monte_carlo;
pub use self::monte_carlo::estimate_equity;
