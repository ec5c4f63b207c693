//! Ordered Tallies
//!
//! Queen priorities and spawn instructions are keyed counts whose iteration
//! order is part of the contract: entries keep the position of their first
//! insertion, and overwriting a key updates it in place.

use hive_events::CasteType;

/// Insertion-ordered map from a key to a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, u32)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> Option<u32> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`, keeping its original position if already present.
    pub fn set(&mut self, key: K, value: u32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Adds `value` to the current count of `key` (zero when absent).
    pub fn add(&mut self, key: K, value: u32) {
        let current = self.get(key).unwrap_or(0);
        self.set(key, current + value);
    }

    /// Copies every entry of `other` into `self`, later values overwriting.
    pub fn merge(&mut self, other: &Tally<K>) {
        for &(key, value) in &other.entries {
            self.set(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, v)| *v).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + Eq> FromIterator<(K, u32)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (key, value) in iter {
            tally.set(key, value);
        }
        tally
    }
}

/// Caste -> number of organisms to spawn, in request order
pub type SpawnOrders = Tally<CasteType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut orders = SpawnOrders::new();
        orders.set(CasteType::Worker, 2);
        orders.set(CasteType::Soldier, 1);
        orders.set(CasteType::Worker, 5);

        let entries: Vec<_> = orders.iter().collect();
        assert_eq!(entries, vec![(CasteType::Worker, 5), (CasteType::Soldier, 1)]);
        assert_eq!(orders.total(), 6);
    }

    #[test]
    fn test_add_accumulates() {
        let mut orders = SpawnOrders::new();
        orders.add(CasteType::Cleaner, 2);
        orders.add(CasteType::Cleaner, 3);
        assert_eq!(orders.get(CasteType::Cleaner), Some(5));
        assert_eq!(orders.get(CasteType::Queen), None);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut combined: SpawnOrders =
            [(CasteType::Worker, 3), (CasteType::Breeder, 1)].into_iter().collect();
        let later: SpawnOrders =
            [(CasteType::Breeder, 4), (CasteType::Queen, 1)].into_iter().collect();
        combined.merge(&later);

        let entries: Vec<_> = combined.iter().collect();
        assert_eq!(
            entries,
            vec![
                (CasteType::Worker, 3),
                (CasteType::Breeder, 4),
                (CasteType::Queen, 1)
            ]
        );
    }
}
