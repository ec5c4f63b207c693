//! Cycle Engine
//!
//! `HiveSimulation` owns the hive ledger and the living organisms and advances
//! them one cycle at a time. Each cycle runs a fixed sequence of steps:
//!
//! 1. collapse pre-checks (structure and waste grace periods)
//! 2. vulnerability culling when the hive has no breeders or soldiers
//! 3. breeder-crisis culling when the hive has no breeders
//! 4. aging
//! 5. queen succession
//! 6. random threat drift
//! 7. queen cognition, then cerebral counsel
//! 8. workers, 9. soldiers, 10. cleaners, 11. bio-architects
//! 12. breeding
//! 13. worker safeguards
//! 14. natural births
//! 15. decay
//! 16. status snapshot
//!
//! Only steps 1, 2, 3 and 5 can end the colony. Organisms act in ascending id
//! order within every step.

mod crisis;
mod phases;

pub use crisis::{vulnerability_death_chance, CrisisCounters};

use hive_events::{
    BirthOrigin, CasteType, CollapseReason, DeathCause, HiveEvent, HiveEventKind, HiveStatistics,
};
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::castes::{capability, Capability};
use crate::components::{HiveState, Organism, OrganismId};
use crate::config::HiveConfig;
use crate::output::status_line;
use crate::rng::{RandomSource, SimRng};
use crate::setup::spawn_initial_colony;

/// Result of a single cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    Collapsed(CollapseReason),
}

impl CycleOutcome {
    /// Returns true unless the colony collapsed.
    pub fn survived(self) -> bool {
        matches!(self, CycleOutcome::Completed)
    }
}

/// Active organisms whose caste provides `role`, in id order.
fn acting(
    organisms: &BTreeMap<OrganismId, Organism>,
    role: Capability,
) -> impl Iterator<Item = &Organism> + '_ {
    organisms
        .values()
        .filter(move |organism| organism.active && capability(organism.caste) == role)
}

/// The hive colony simulation
pub struct HiveSimulation<R: RandomSource = SimRng> {
    hive: HiveState,
    /// Living organisms keyed by id
    organisms: BTreeMap<OrganismId, Organism>,
    cycle_count: u64,
    next_organism_id: OrganismId,
    crisis: CrisisCounters,
    /// Set by the worker safeguard; raises next cycle's worker order to the floor
    carried_worker_floor: bool,
    collapse: Option<CollapseReason>,
    pending_events: Vec<HiveEvent>,
    config: HiveConfig,
    rng: R,
}

impl HiveSimulation<SimRng> {
    /// Simulation seeded from operating system entropy.
    pub fn new(config: HiveConfig) -> Self {
        Self::with_rng(config, SimRng::from_entropy())
    }

    /// Simulation with a fixed seed.
    pub fn seeded(config: HiveConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::seeded(seed))
    }
}

impl<R: RandomSource> HiveSimulation<R> {
    /// Builds the hive from `config` and spawns the founding colony with `rng`.
    pub fn with_rng(config: HiveConfig, mut rng: R) -> Self {
        let mut hive = HiveState::from_config(&config.colony);
        let founders = spawn_initial_colony(&config.colony.population, &mut rng);

        let mut organisms = BTreeMap::new();
        let mut next_organism_id = 1;
        for organism in founders {
            hive.population_mut().increment(organism.caste);
            next_organism_id = next_organism_id.max(organism.id + 1);
            organisms.insert(organism.id, organism);
        }

        Self {
            hive,
            organisms,
            cycle_count: 0,
            next_organism_id,
            crisis: CrisisCounters::default(),
            carried_worker_floor: false,
            collapse: None,
            pending_events: Vec::new(),
            config,
            rng,
        }
    }

    pub fn hive(&self) -> &HiveState {
        &self.hive
    }

    /// Mutable resources and threat. Population counts stay engine-owned.
    pub fn hive_mut(&mut self) -> &mut HiveState {
        &mut self.hive
    }

    pub fn organisms(&self) -> impl Iterator<Item = &Organism> + '_ {
        self.organisms.values()
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    pub fn crisis(&self) -> &CrisisCounters {
        &self.crisis
    }

    /// Reason the most recent collapse happened, if any.
    pub fn collapse(&self) -> Option<CollapseReason> {
        self.collapse
    }

    /// Removes every organism of `caste` from the colony without recording
    /// deaths. Returns the number removed.
    pub fn remove_caste(&mut self, caste: CasteType) -> usize {
        let before = self.organisms.len();
        self.organisms.retain(|_, organism| organism.caste != caste);
        self.hive.population_mut().set(caste, 0);
        before - self.organisms.len()
    }

    /// Takes the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<HiveEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Advances the colony by one cycle.
    pub fn step(&mut self) -> CycleOutcome {
        match self.run_cycle() {
            Ok(()) => CycleOutcome::Completed,
            Err(reason) => {
                info!(cycle = self.cycle_count, "{}", reason);
                self.collapse = Some(reason);
                self.emit(HiveEventKind::Collapsed { reason });
                CycleOutcome::Collapsed(reason)
            }
        }
    }

    /// Advances one cycle; returns false exactly when the colony collapsed.
    pub fn simulate_cycle(&mut self) -> bool {
        self.step().survived()
    }

    /// Read-only projection of the hive.
    pub fn get_statistics(&self) -> HiveStatistics {
        let population = self.hive.population();
        HiveStatistics {
            total_cycles: self.cycle_count,
            total_population: population.total(),
            total_births: self.hive.total_births,
            total_deaths: self.hive.total_deaths,
            current_food: self.hive.food_level,
            current_waste: self.hive.waste_level,
            current_threat: self.hive.threat_level.name().to_string(),
            current_structure: self.hive.structural_integrity,
            population_by_caste: population.by_label(),
        }
    }

    /// Human-readable snapshot of the hive.
    pub fn status_line(&self) -> String {
        status_line(self.cycle_count, &self.hive, self.first_living(CasteType::Queen))
    }

    /// Runs up to `max_cycles` cycles, pausing `cycle_delay_ms` between them.
    /// Returns the collapse reason if the colony ended early.
    pub fn run_simulation(&mut self, max_cycles: u64) -> Option<CollapseReason> {
        self.run_with(max_cycles, |_, _| {})
    }

    /// Like [`run_simulation`](Self::run_simulation), calling `observer` after
    /// every cycle.
    pub fn run_with<F>(&mut self, max_cycles: u64, mut observer: F) -> Option<CollapseReason>
    where
        F: FnMut(&mut Self, CycleOutcome),
    {
        info!(max_cycles, "Hive simulation started");
        let delay = Duration::from_millis(self.config.simulation.cycle_delay_ms);

        for cycle in 0..max_cycles {
            let outcome = self.step();
            observer(self, outcome);

            if let CycleOutcome::Collapsed(reason) = outcome {
                warn!("Hive collapsed: {}", reason);
                return Some(reason);
            }
            if !delay.is_zero() && cycle + 1 < max_cycles {
                thread::sleep(delay);
            }
        }

        info!(cycles = self.cycle_count, "Simulation ended");
        None
    }

    /// Steps 1-16 of a cycle. An `Err` is a terminal collapse.
    fn run_cycle(&mut self) -> Result<(), CollapseReason> {
        self.check_collapse_hazards()?;
        self.apply_vulnerability()?;
        self.apply_breeder_crisis()?;
        self.age_organisms();
        let living_queens = self.ensure_queen()?;
        self.drift_threat();

        let (priorities, mut instructions) = self.queen_cognition(living_queens);
        self.cerebral_counsel(&mut instructions);

        self.worker_phase();
        self.soldier_phase();
        self.cleaner_phase();
        self.architect_phase();
        if !instructions.is_empty() {
            self.breeding_phase(&instructions, living_queens);
        }
        self.worker_safeguards(&priorities);
        self.natural_births(living_queens);
        self.decay();

        info!("{}", self.status_line());
        self.cycle_count += 1;
        Ok(())
    }

    fn emit(&mut self, kind: HiveEventKind) {
        self.pending_events.push(HiveEvent::new(self.cycle_count, kind));
    }

    /// Ids of active organisms of `caste`, ascending.
    fn living_ids(&self, caste: CasteType) -> Vec<OrganismId> {
        self.organisms
            .values()
            .filter(|organism| organism.active && organism.caste == caste)
            .map(|organism| organism.id)
            .collect()
    }

    fn first_living(&self, caste: CasteType) -> Option<&Organism> {
        self.organisms
            .values()
            .find(|organism| organism.active && organism.caste == caste)
    }

    /// Assigns the next id to a newborn and adds it to the colony.
    fn admit(&mut self, mut organism: Organism, origin: BirthOrigin) -> OrganismId {
        let id = self.next_organism_id;
        self.next_organism_id += 1;
        organism.id = id;

        self.hive.record_birth(organism.caste);
        self.emit(HiveEventKind::Birth {
            organism_id: id,
            caste: organism.caste,
            origin,
        });
        self.organisms.insert(id, organism);
        id
    }

    /// Removes dead organisms from the colony and records their deaths.
    fn bury(&mut self, dead: Vec<(OrganismId, DeathCause)>) {
        for (id, cause) in dead {
            let Some(mut organism) = self.organisms.remove(&id) else {
                continue;
            };
            organism.deactivate();

            self.hive.record_death(organism.caste);
            self.emit(HiveEventKind::Death {
                organism_id: id,
                caste: organism.caste,
                age: organism.age,
                cause,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialPopulation;
    use crate::rng::FixedRng;
    use hive_events::ThreatLevel;

    fn quiet_config() -> HiveConfig {
        let mut config = HiveConfig::default();
        config.simulation.cycle_delay_ms = 0;
        config
    }

    #[test]
    fn test_new_hive_matches_config() {
        let sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        let stats = sim.get_statistics();
        assert_eq!(stats.total_cycles, 0);
        assert_eq!(stats.total_population, 23);
        assert_eq!(stats.total_births, 0);
        assert_eq!(stats.count_of("Queen"), 1);
        assert_eq!(stats.count_of("Worker"), 10);
        assert_eq!(stats.current_threat, "NONE");
        assert_eq!(sim.organisms().count(), 23);
    }

    #[test]
    fn test_admit_assigns_sequential_ids() {
        let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        let first = sim.admit(Organism::newborn(CasteType::Worker, 0), BirthOrigin::Natural);
        let second = sim.admit(Organism::newborn(CasteType::Cleaner, 0), BirthOrigin::Natural);
        assert_eq!((first, second), (24, 25));
        assert_eq!(sim.hive().population().get(CasteType::Worker), 11);
        assert_eq!(sim.hive().total_births, 2);
        assert_eq!(sim.drain_events().len(), 2);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_bury_updates_ledger() {
        let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        sim.bury(vec![(2, DeathCause::Natural), (999, DeathCause::Natural)]);
        assert!(sim.organism(2).is_none());
        assert_eq!(sim.hive().population().get(CasteType::Worker), 9);
        assert_eq!(sim.hive().total_deaths, 1);
    }

    #[test]
    fn test_remove_caste_keeps_counts_consistent() {
        let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        assert_eq!(sim.remove_caste(CasteType::Soldier), 5);
        assert_eq!(sim.hive().population().get(CasteType::Soldier), 0);
        assert_eq!(sim.hive().total_deaths, 0);
        assert_eq!(sim.get_statistics().caste_sum(), 18);
    }

    #[test]
    fn test_status_line_mentions_queen() {
        let sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        let line = sim.status_line();
        assert!(line.contains("Queen: 1, age 30"), "{}", line);
        assert!(line.contains("Threat: NONE"));
    }

    #[test]
    fn test_run_stops_on_collapse() {
        let mut config = quiet_config();
        config.colony.population = InitialPopulation {
            queen: 1,
            ..InitialPopulation::empty()
        };
        config.colony.threat = ThreatLevel::High;

        let mut sim = HiveSimulation::with_rng(config, FixedRng::new(0.0));
        let mut observed = 0;
        let reason = sim.run_with(10, |_, _| observed += 1);

        assert_eq!(reason, Some(CollapseReason::UndefendedExtinction));
        assert_eq!(observed, 1);
        assert_eq!(sim.collapse(), Some(CollapseReason::UndefendedExtinction));
        let events = sim.drain_events();
        assert!(events.last().is_some_and(HiveEvent::is_terminal));
    }

    #[test]
    fn test_run_to_limit_returns_none() {
        let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
        assert_eq!(sim.run_simulation(3), None);
        assert_eq!(sim.cycle_count(), 3);
    }
}
