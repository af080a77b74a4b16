//! Drop sequences: how a lifted stack is spread over the squares it crosses.

use serde::{Deserialize, Serialize};

use crate::TakError;

/// Validated drop counts of a movement, one per square traversed.
///
/// Always non-empty with every entry at least 1.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Drops(Vec<u8>);

impl Drops {
    pub fn new(counts: Vec<u8>) -> Result<Drops, TakError> {
        if counts.is_empty() {
            return Err(TakError::EmptyDrops);
        }
        if counts.contains(&0) {
            return Err(TakError::ZeroDrop);
        }
        Ok(Drops(counts))
    }

    /// Wrap a sequence produced by [`drop_sequences`].
    pub(crate) fn from_generated(counts: Vec<u8>) -> Drops {
        debug_assert!(!counts.is_empty() && !counts.contains(&0));
        Drops(counts)
    }

    /// Total stones lifted from the source square.
    #[inline]
    pub fn picks(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }

    /// Number of squares traversed.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated sequence.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<u8>> for Drops {
    type Error = TakError;

    fn try_from(counts: Vec<u8>) -> Result<Drops, TakError> {
        Drops::new(counts)
    }
}

impl From<Drops> for Vec<u8> {
    fn from(drops: Drops) -> Vec<u8> {
        drops.0
    }
}

/// All ordered ways to drop `stones` stones over `spaces` squares, at least one per square.
///
/// These are the compositions of `stones` into `spaces` parts, so there are
/// C(stones - 1, spaces - 1) of them. Sequences come out in lexicographic
/// order (first drop ascending). Empty when `spaces` is 0 or exceeds `stones`.
pub fn drop_sequences(stones: u8, spaces: u8) -> Vec<Vec<u8>> {
    if spaces == 0 || spaces > stones {
        return Vec::new();
    }
    if spaces == 1 {
        return vec![vec![stones]];
    }

    let mut sequences = Vec::new();
    // Leave at least one stone for each remaining square
    for first in 1..=stones - (spaces - 1) {
        for rest in drop_sequences(stones - first, spaces - 1) {
            let mut sequence = Vec::with_capacity(spaces as usize);
            sequence.push(first);
            sequence.extend(rest);
            sequences.push(sequence);
        }
    }
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: u64, k: u64) -> u64 {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_single_space() {
        assert_eq!(drop_sequences(2, 1), vec![vec![2]]);
        assert_eq!(drop_sequences(1, 1), vec![vec![1]]);
    }

    #[test]
    fn test_four_over_two() {
        assert_eq!(drop_sequences(4, 2), vec![vec![1, 3], vec![2, 2], vec![3, 1]]);
    }

    #[test]
    fn test_more_spaces_than_stones() {
        assert!(drop_sequences(3, 4).is_empty());
        assert!(drop_sequences(0, 1).is_empty());
        assert!(drop_sequences(3, 0).is_empty());
    }

    #[test]
    fn test_one_per_square() {
        assert_eq!(drop_sequences(3, 3), vec![vec![1, 1, 1]]);
    }

    #[test]
    fn test_sequence_invariants() {
        for stones in 1..=8u8 {
            for spaces in 1..=stones {
                let sequences = drop_sequences(stones, spaces);
                assert_eq!(
                    sequences.len() as u64,
                    binomial(stones as u64 - 1, spaces as u64 - 1),
                    "count for ({}, {})",
                    stones,
                    spaces
                );
                for sequence in &sequences {
                    assert_eq!(sequence.len(), spaces as usize);
                    assert!(sequence.iter().all(|&n| n >= 1));
                    assert_eq!(sequence.iter().map(|&n| n as u32).sum::<u32>(), stones as u32);
                }
                let mut sorted = sequences.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted, sequences, "not lexicographic/unique for ({}, {})", stones, spaces);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(drop_sequences(6, 3), drop_sequences(6, 3));
    }

    #[test]
    fn test_drops_validation() {
        assert_eq!(Drops::new(vec![]), Err(TakError::EmptyDrops));
        assert_eq!(Drops::new(vec![2, 0, 1]), Err(TakError::ZeroDrop));
        let drops = Drops::new(vec![2, 1, 1]).unwrap();
        assert_eq!(drops.picks(), 4);
        assert_eq!(drops.len(), 3);
        assert_eq!(drops.iter().collect::<Vec<_>>(), vec![2, 1, 1]);
    }
}
