/// Which players are in a set, used for showdown winners.
mod player_bit_set;
pub use self::player_bit_set::{ActivePlayerBitSetIter, MAX_PLAYERS, PlayerBitSet};
