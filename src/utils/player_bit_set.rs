use std::ops::BitOr;

/// The most players a `PlayerBitSet` can track.
pub const MAX_PLAYERS: usize = 32;

/// A small set of player indexes.
///
/// ```
/// use holdem_equity::utils::PlayerBitSet;
///
/// let mut winners = PlayerBitSet::default();
/// winners.enable(0);
/// winners.enable(3);
///
/// assert_eq!(2, winners.count());
/// assert_eq!(vec![0, 3], winners.ones().collect::<Vec<_>>());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBitSet {
    set: u32,
}

impl PlayerBitSet {
    /// All of the first `players` players.
    pub fn new(players: usize) -> Self {
        debug_assert!(players <= MAX_PLAYERS);
        let set = if players >= MAX_PLAYERS {
            u32::MAX
        } else {
            (1 << players) - 1
        };
        Self { set }
    }
    /// Only the player at `idx`.
    pub fn single(idx: usize) -> Self {
        let mut s = Self::default();
        s.enable(idx);
        s
    }
    pub fn count(&self) -> usize {
        self.set.count_ones() as usize
    }
    pub fn enable(&mut self, idx: usize) {
        self.set |= 1 << idx;
    }
    pub fn ones(self) -> ActivePlayerBitSetIter {
        ActivePlayerBitSetIter { set: self.set }
    }
}

impl BitOr for PlayerBitSet {
    type Output = PlayerBitSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            set: self.set | rhs.set,
        }
    }
}

pub struct ActivePlayerBitSetIter {
    set: u32,
}

impl Iterator for ActivePlayerBitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set == 0 {
            None
        } else {
            // Find the index of the first non-zero
            let idx = self.set.trailing_zeros() as usize;
            // Then set the first non-zero to zero
            self.set &= !(1 << idx);
            // Then emit the next one
            Some(idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_count() {
        assert_eq!(7, PlayerBitSet::new(7).count());
        assert_eq!(MAX_PLAYERS, PlayerBitSet::new(MAX_PLAYERS).count());
    }

    #[test]
    fn test_default_zero_count() {
        assert_eq!(0, PlayerBitSet::default().count());
        assert_eq!(None, PlayerBitSet::default().ones().next());
    }

    #[test]
    fn test_enable_count() {
        let mut s = PlayerBitSet::default();

        s.enable(0);
        assert_eq!(1, s.count());
        s.enable(0);
        assert_eq!(1, s.count());

        s.enable(2);
        assert_eq!(2, s.count());
        assert_eq!(vec![0, 2], s.ones().collect::<Vec<_>>());
    }

    #[test]
    fn test_single_and_or() {
        let s = PlayerBitSet::single(1) | PlayerBitSet::single(4);
        assert_eq!(vec![1, 4], s.ones().collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_all() {
        let mut iter = PlayerBitSet::new(3).ones();

        assert_eq!(Some(0), iter.next());
        assert_eq!(Some(1), iter.next());
        assert_eq!(Some(2), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn test_highest_player() {
        let mut s = PlayerBitSet::default();
        s.enable(31);
        assert_eq!(vec![31], s.ones().collect::<Vec<_>>());
    }
}
