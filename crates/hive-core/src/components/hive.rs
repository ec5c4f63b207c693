//! Hive State
//!
//! The shared resource and population ledger mutated by the cycle engine and
//! the caste behaviors it invokes.

use hive_events::{CasteType, ThreatLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ColonyConfig;

/// Maximum structural integrity
pub const MAX_STRUCTURE: u32 = 100;

/// Live organism count per caste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    counts: [u32; 7],
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, caste: CasteType) -> u32 {
        self.counts[caste.index()]
    }

    pub(crate) fn set(&mut self, caste: CasteType, count: u32) {
        self.counts[caste.index()] = count;
    }

    pub(crate) fn increment(&mut self, caste: CasteType) {
        self.counts[caste.index()] += 1;
    }

    pub(crate) fn decrement(&mut self, caste: CasteType) {
        let slot = &mut self.counts[caste.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// `(caste, count)` pairs in canonical caste order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (CasteType, u32)> + '_ {
        CasteType::ALL.iter().map(move |&caste| (caste, self.get(caste)))
    }

    /// Caste label -> count, for statistics.
    pub fn by_label(&self) -> BTreeMap<String, u32> {
        self.iter()
            .map(|(caste, count)| (caste.label().to_string(), count))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveState {
    pub food_level: u32,
    pub waste_level: u32,
    /// 0-100
    pub structural_integrity: u32,
    pub threat_level: ThreatLevel,
    /// Kept equal to the number of active organisms of each caste by the engine
    population: Population,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl HiveState {
    /// Hive resources from config with an empty population; the engine fills
    /// the population in as it admits the initial colony.
    pub fn from_config(colony: &ColonyConfig) -> Self {
        Self {
            food_level: colony.food,
            waste_level: colony.waste,
            structural_integrity: colony.structure.min(MAX_STRUCTURE),
            threat_level: colony.threat,
            population: Population::new(),
            total_births: 0,
            total_deaths: 0,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub(crate) fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn total_population(&self) -> u32 {
        self.population.total()
    }

    /// Counts a newborn.
    pub(crate) fn record_birth(&mut self, caste: CasteType) {
        self.population.increment(caste);
        self.total_births += 1;
    }

    /// Counts a death.
    pub(crate) fn record_death(&mut self, caste: CasteType) {
        self.population.decrement(caste);
        self.total_deaths += 1;
    }

    pub fn add_food(&mut self, amount: u32) {
        self.food_level = self.food_level.saturating_add(amount);
    }

    pub fn consume_food(&mut self, amount: u32) {
        self.food_level = self.food_level.saturating_sub(amount);
    }

    pub fn add_waste(&mut self, amount: u32) {
        self.waste_level = self.waste_level.saturating_add(amount);
    }

    pub fn remove_waste(&mut self, amount: u32) {
        self.waste_level = self.waste_level.saturating_sub(amount);
    }

    pub fn set_structure(&mut self, integrity: u32) {
        self.structural_integrity = integrity.min(MAX_STRUCTURE);
    }

    pub fn erode_structure(&mut self, amount: u32) {
        self.structural_integrity = self.structural_integrity.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_counts() {
        let mut population = Population::new();
        population.increment(CasteType::Worker);
        population.increment(CasteType::Worker);
        population.increment(CasteType::Queen);
        population.decrement(CasteType::Soldier);

        assert_eq!(population.get(CasteType::Worker), 2);
        assert_eq!(population.get(CasteType::Soldier), 0);
        assert_eq!(population.total(), 3);

        let labels = population.by_label();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels["Worker"], 2);
        assert_eq!(labels["Bio-Architect"], 0);
    }

    #[test]
    fn test_births_and_deaths_update_counters() {
        let mut hive = HiveState::from_config(&ColonyConfig::default());
        assert_eq!(hive.total_population(), 0);

        hive.record_birth(CasteType::Cleaner);
        hive.record_birth(CasteType::Cleaner);
        hive.record_death(CasteType::Cleaner);

        assert_eq!(hive.population().get(CasteType::Cleaner), 1);
        assert_eq!(hive.total_births, 2);
        assert_eq!(hive.total_deaths, 1);
    }

    #[test]
    fn test_resources_clamp() {
        let mut hive = HiveState::from_config(&ColonyConfig::default());
        hive.consume_food(1_000);
        assert_eq!(hive.food_level, 0);

        hive.remove_waste(5);
        assert_eq!(hive.waste_level, 0);

        hive.set_structure(250);
        assert_eq!(hive.structural_integrity, MAX_STRUCTURE);
        hive.erode_structure(300);
        assert_eq!(hive.structural_integrity, 0);
    }
}
