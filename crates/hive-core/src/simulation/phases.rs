//! Per-cycle phases between succession and the status snapshot.

use hive_events::{BirthOrigin, CasteType, HiveEventKind, ThreatCause, ThreatLevel};
use tracing::{debug, info, warn};

use super::{acting, HiveSimulation};
use crate::castes::{
    analyze_existential_threat, defend_hive, execute_tasks, generate_genetic_instructions,
    maintain_structure, process_stimuli, process_waste, spawn_organisms, Capability, Clutch,
    Priorities, Priority, WorkerReport,
};
use crate::components::{Organism, SpawnOrders, Vitality};
use crate::rng::RandomSource;

/// Chance per cycle that the threat level rises on its own
const THREAT_RISE_CHANCE: f64 = 0.05;
/// Chance per cycle, when it did not rise, that the threat level eases
const THREAT_EASE_CHANCE: f64 = 0.1;
/// Defense power needed to lower the threat by one step
const DEFENSE_PER_STEP: u32 = 20;
/// Worker count below which the safeguard engages
const SAFEGUARD_WORKERS: u32 = 3;
/// The safeguard stays idle through the early cycles
const SAFEGUARD_GRACE_CYCLES: u64 = 10;
/// Worker order floor applied by the safeguard
const SAFEGUARD_WORKER_FLOOR: u32 = 3;
const NATURAL_BIRTH_CHANCE: f64 = 0.1;
/// Chance a natural birth adds a cleaner or soldier to the worker
const NATURAL_EXTRA_CHANCE: f64 = 0.3;
const NATURAL_EXTRAS: [CasteType; 2] = [CasteType::Cleaner, CasteType::Soldier];

impl<R: RandomSource> HiveSimulation<R> {
    /// Step 4: ages every organism and buries the dead.
    pub(super) fn age_organisms(&mut self) {
        let mut dead = Vec::new();
        for organism in self.organisms.values_mut().filter(|o| o.active) {
            if let Vitality::Died(cause) = organism.age_one_cycle(&mut self.rng) {
                if organism.caste == CasteType::Queen {
                    info!(queen = organism.id, age = organism.age, "Queen death");
                }
                dead.push((organism.id, cause));
            }
        }

        if !dead.is_empty() {
            debug!(deaths = dead.len(), "Aging deaths");
            self.bury(dead);
        }
    }

    /// Step 6: the threat either rises, eases, or holds.
    pub(super) fn drift_threat(&mut self) {
        let from = self.hive.threat_level;
        let to = if self.rng.chance(THREAT_RISE_CHANCE) {
            from.raised()
        } else if self.rng.chance(THREAT_EASE_CHANCE) {
            from.lowered()
        } else {
            from
        };
        self.change_threat(to, ThreatCause::Drift);
    }

    /// Step 7: every living queen assesses the hive. Later queens overwrite
    /// earlier entries in both the combined priorities and instructions.
    pub(super) fn queen_cognition(&mut self, living_queens: u32) -> (Priorities, SpawnOrders) {
        let mut all_priorities = Priorities::new();
        let mut instructions = SpawnOrders::new();

        for id in self.living_ids(CasteType::Queen) {
            let Some(queen) = self.organisms.get(&id) else {
                continue;
            };
            let priorities = process_stimuli(queen, &self.hive, living_queens);
            let orders = generate_genetic_instructions(queen, &priorities);
            let preparing = priorities.contains(Priority::IncreaseQueens)
                && queen.is_near_end_of_life();
            let age = queen.age;

            all_priorities.merge(&priorities);
            instructions.merge(&orders);
            if preparing {
                self.emit(HiveEventKind::SuccessionPrepared { queen_id: id, age });
            }
        }

        if std::mem::take(&mut self.carried_worker_floor) {
            let current = instructions.get(CasteType::Worker).unwrap_or(0);
            instructions.set(CasteType::Worker, current.max(SAFEGUARD_WORKER_FLOOR));
        }

        debug!(
            priorities = all_priorities.len(),
            requested = instructions.total(),
            "Queen cognition"
        );
        (all_priorities, instructions)
    }

    /// Step 7b: cerebrals fold their emergency bundles into the instructions.
    pub(super) fn cerebral_counsel(&mut self, instructions: &mut SpawnOrders) {
        for cerebral in acting(&self.organisms, Capability::Advise) {
            let strategy = analyze_existential_threat(cerebral, &self.hive);
            if let Some(bundle) = strategy.emergency_spawn {
                debug!(cerebral = cerebral.id, requested = bundle.total(), "Cerebral counsel");
                instructions.merge(&bundle);
            }
        }
    }

    /// Step 8: workers gather food, produce waste, and report threats.
    pub(super) fn worker_phase(&mut self) {
        let rng = &mut self.rng;
        let reports: Vec<WorkerReport> = acting(&self.organisms, Capability::Gather)
            .map(|worker| execute_tasks(worker, &mut *rng))
            .collect();

        let mut food = 0;
        let mut waste = 0;
        for report in reports {
            food += report.food_gathered;
            waste += report.waste_generated;
            if let Some(detected) = report.detected_threat {
                if detected > self.hive.threat_level {
                    self.change_threat(detected, ThreatCause::WorkerDetection);
                }
            }
        }

        debug!(food, waste, "Worker phase");
        self.hive.add_food(food);
        self.hive.add_waste(waste);
    }

    /// Step 9: enough combined defense pushes the threat down.
    pub(super) fn soldier_phase(&mut self) {
        let threat = self.hive.threat_level;
        let mut total_defense = 0;
        for soldier in acting(&self.organisms, Capability::Defend) {
            total_defense += defend_hive(soldier, threat, &mut self.rng);
        }

        if total_defense == 0 {
            return;
        }
        debug!(total_defense, "Soldier phase");

        let reduction = threat.ordinal().min(total_defense / DEFENSE_PER_STEP);
        if reduction > 0 {
            self.change_threat(threat.reduced_by(reduction), ThreatCause::SoldierDefense);
        }
    }

    /// Step 10: cleaners all work from the waste level at the start of the
    /// phase; recycled biomass becomes food.
    pub(super) fn cleaner_phase(&mut self) {
        let waste = self.hive.waste_level;
        let mut processed = 0;
        let mut recycled = 0;
        for cleaner in acting(&self.organisms, Capability::Clean) {
            let report = process_waste(cleaner, waste, &mut self.rng);
            processed += report.processed;
            recycled += report.recycled;
        }

        debug!(processed, recycled, "Cleaner phase");
        self.hive.remove_waste(processed);
        self.hive.add_food(recycled);
    }

    /// Step 11: architects repair one after another, each capped at 100.
    pub(super) fn architect_phase(&mut self) {
        for architect in acting(&self.organisms, Capability::Repair) {
            let repaired =
                maintain_structure(architect, self.hive.structural_integrity, &mut self.rng);
            self.hive.set_structure(repaired);
        }
    }

    /// Step 12: every breeder works through the combined instructions.
    pub(super) fn breeding_phase(&mut self, instructions: &SpawnOrders, living_queens: u32) {
        for id in self.living_ids(CasteType::Breeder) {
            let Some(breeder) = self.organisms.get_mut(&id) else {
                continue;
            };
            let clutch = spawn_organisms(
                breeder,
                instructions,
                self.cycle_count,
                living_queens,
                &mut self.rng,
            );
            self.welcome(clutch, BirthOrigin::QueenOrder, living_queens);
        }
    }

    /// Step 13: low worker numbers raise next cycle's worker order, and an
    /// empty worker caste gets one worker immediately.
    pub(super) fn worker_safeguards(&mut self, priorities: &Priorities) {
        let workers = self.hive.population().get(CasteType::Worker);

        if workers < SAFEGUARD_WORKERS
            && self.cycle_count > SAFEGUARD_GRACE_CYCLES
            && !priorities.keys().any(Priority::is_emergency)
        {
            warn!(workers, "Auto-emergency: raising the worker order for next cycle");
            self.carried_worker_floor = true;
            self.emit(HiveEventKind::WorkerSafeguard {
                worker_population: workers,
            });
        }

        if workers == 0 {
            warn!("Critical failure: no workers left, spawning an emergency worker");
            let worker = Organism::newborn(CasteType::Worker, self.cycle_count);
            self.admit(worker, BirthOrigin::EmergencyWorker);
        }
    }

    /// Step 14: occasionally the first breeder produces a worker, sometimes
    /// with a cleaner or soldier alongside.
    pub(super) fn natural_births(&mut self, living_queens: u32) {
        if !self.rng.chance(NATURAL_BIRTH_CHANCE) {
            return;
        }
        let Some(id) = self.first_living(CasteType::Breeder).map(|b| b.id) else {
            return;
        };

        let mut orders = SpawnOrders::new();
        orders.set(CasteType::Worker, 1);
        if self.rng.chance(NATURAL_EXTRA_CHANCE) {
            let extra = NATURAL_EXTRAS[self.rng.choose_index(NATURAL_EXTRAS.len())];
            orders.set(extra, 1);
        }

        let Some(breeder) = self.organisms.get_mut(&id) else {
            return;
        };
        let clutch = spawn_organisms(
            breeder,
            &orders,
            self.cycle_count,
            living_queens,
            &mut self.rng,
        );
        self.welcome(clutch, BirthOrigin::Natural, living_queens);
    }

    /// Step 15: the colony eats and the structure wears.
    pub(super) fn decay(&mut self) {
        let consumed = self.hive.total_population() / 2;
        self.hive.consume_food(consumed);
        let wear = self.rng.int_inclusive(1, 3).max(0) as u32;
        self.hive.erode_structure(wear);
    }

    fn change_threat(&mut self, to: ThreatLevel, cause: ThreatCause) {
        let from = self.hive.threat_level;
        if from == to {
            return;
        }
        self.hive.threat_level = to;
        info!(?cause, "Threat level {} -> {}", from, to);
        self.emit(HiveEventKind::ThreatChanged { from, to, cause });
    }

    /// Admits a breeder's clutch.
    fn welcome(&mut self, clutch: Clutch, origin: BirthOrigin, living_queens: u32) {
        if clutch.queen_blocked {
            self.emit(HiveEventKind::QueenSpawnBlocked { living_queens });
        }
        if clutch.offspring.is_empty() {
            return;
        }

        let mut born = Vec::with_capacity(clutch.offspring.len());
        for organism in clutch.offspring {
            let caste = organism.caste;
            let id = self.admit(organism, origin);
            born.push(format!("{}-{}", caste.label(), id));
        }
        info!(?origin, "Births: {}", born.join(", "));
    }
}
