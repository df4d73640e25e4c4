use std::fmt::Debug;

use crate::graph::StationIdx;

/// Fixed-capacity bitset over all stations of a graph.
///
/// The solver keeps one of these per DP state to remember which concrete
/// stations a partial tour has already collected; cloning is a flat copy of a
/// few machine words rather than a deep copy of a hash set.
#[derive(Clone, PartialEq, Eq)]
pub struct StationSet {
    words: Box<[u64]>,
}

impl StationSet {
    pub fn new(num_stations: usize) -> Self {
        Self {
            words: vec![0; num_stations.div_ceil(64)].into_boxed_slice(),
        }
    }

    pub fn contains(&self, station: StationIdx) -> bool {
        let bit = station.0 as usize;
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    /// Returns false if the station was already present.
    pub fn insert(&mut self, station: StationIdx) -> bool {
        let bit = station.0 as usize;
        let word = &mut self.words[bit / 64];
        let mask = 1 << (bit % 64);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    pub fn remove(&mut self, station: StationIdx) {
        let bit = station.0 as usize;
        self.words[bit / 64] &= !(1 << (bit % 64));
    }

    pub fn extend(&mut self, stations: impl IntoIterator<Item = StationIdx>) {
        for station in stations {
            self.insert(station);
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|it| it.count_ones() as usize).sum()
    }
}

impl Debug for StationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = f.debug_set();
        for (word_idx, word) in self.words.iter().enumerate() {
            for bit in 0..64 {
                if word & (1 << bit) != 0 {
                    set.entry(&StationIdx((word_idx * 64 + bit) as u32));
                }
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut set = StationSet::new(130);
        assert!(set.insert(StationIdx(0)));
        assert!(set.insert(StationIdx(64)));
        assert!(set.insert(StationIdx(129)));
        assert!(!set.insert(StationIdx(64)));
        assert!(set.contains(StationIdx(129)));
        assert!(!set.contains(StationIdx(1)));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn clones_are_independent() {
        let mut set = StationSet::new(8);
        set.insert(StationIdx(2));
        let mut copy = set.clone();
        copy.insert(StationIdx(3));
        assert!(!set.contains(StationIdx(3)));
        assert!(copy.contains(StationIdx(2)));
    }
}
