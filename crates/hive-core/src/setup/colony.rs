//! Colony Spawning
//!
//! Creates the founding population with caste-specific randomized ages.

use hive_events::CasteType;

use crate::components::{Organism, OrganismId};
use crate::config::InitialPopulation;
use crate::rng::RandomSource;

/// Inclusive range of starting ages for a founding organism of `caste`
pub fn founding_age_range(caste: CasteType) -> (u32, u32) {
    match caste {
        CasteType::Queen => (20, 40),
        CasteType::Worker => (0, 15),
        CasteType::Soldier => (0, 12),
        CasteType::Cleaner => (0, 18),
        CasteType::Breeder => (5, 20),
        CasteType::BioArchitect => (0, 25),
        CasteType::Cerebral => (10, 20),
    }
}

/// Spawns the founding colony.
///
/// Ids run from 1 in caste order (queens first), so the returned organisms are
/// sorted by id. Founders have no birth cycle.
pub fn spawn_initial_colony(population: &InitialPopulation, rng: &mut dyn RandomSource) -> Vec<Organism> {
    let mut organisms = Vec::with_capacity(population.total() as usize);
    let mut next_id: OrganismId = 1;

    for caste in CasteType::ALL {
        let (youngest, oldest) = founding_age_range(caste);
        for _ in 0..population.count(caste) {
            let age = rng.int_inclusive(youngest as i32, oldest as i32).max(0) as u32;
            organisms.push(Organism::new(next_id, caste, age));
            next_id += 1;
        }
    }

    organisms
}

/// Summary of a spawned colony, for the startup banner
#[derive(Debug, Clone, Default)]
pub struct SpawnSummary {
    pub total: usize,
    pub by_caste: Vec<(CasteType, usize)>,
}

pub fn spawn_summary(organisms: &[Organism]) -> SpawnSummary {
    let by_caste = CasteType::ALL
        .iter()
        .map(|&caste| (caste, organisms.iter().filter(|o| o.caste == caste).count()))
        .filter(|&(_, count)| count > 0)
        .collect();

    SpawnSummary {
        total: organisms.len(),
        by_caste,
    }
}
