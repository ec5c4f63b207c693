//! Terminal checks: hazard grace periods, vulnerability culling, the breeder
//! crisis, and queen succession.

use hive_events::{
    BirthOrigin, CasteType, CollapseReason, DeathCause, Hazard, HiveEventKind, ThreatLevel,
};
use tracing::{info, warn};

use super::HiveSimulation;
use crate::components::{Organism, UNASSIGNED_ID};
use crate::rng::RandomSource;

/// Ceiling on the per-organism kill chance of an undefended hive
const MAX_VULNERABILITY_CHANCE: f64 = 0.75;
/// Queens and workers shrug off a vulnerability kill when a roll exceeds this
const HARDY_SURVIVAL_ROLL: f64 = 0.3;
/// Breeder-crisis kill chance per threat step
const BREEDER_CRISIS_CHANCE: f64 = 0.2;

/// Consecutive-cycle counters behind the grace periods and vulnerability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrisisCounters {
    /// Cycles in a row that began at zero structural integrity
    pub structure_critical_cycles: u32,
    /// Cycles in a row that began at or above the waste threshold
    pub waste_critical_cycles: u32,
    /// Cycles in a row with no breeders and no soldiers under threat
    pub vulnerable_cycles: u32,
}

/// Kill chance applied to every organism of an undefended hive.
pub fn vulnerability_death_chance(threat: ThreatLevel, vulnerable_cycles: u32) -> f64 {
    let base = 0.05 * threat.ordinal() as f64;
    (base + vulnerable_cycles as f64 * 0.02).min(MAX_VULNERABILITY_CHANCE)
}

impl<R: RandomSource> HiveSimulation<R> {
    /// Step 1: structure and waste grace periods.
    pub(super) fn check_collapse_hazards(&mut self) -> Result<(), CollapseReason> {
        let grace = self.config.collapse.structure_grace_cycles;
        if self.hive.structural_integrity == 0 {
            self.crisis.structure_critical_cycles += 1;
            let elapsed = self.crisis.structure_critical_cycles;
            if elapsed >= grace {
                return Err(CollapseReason::StructuralFailure);
            }
            warn!(
                "Imminent collapse: structure at 0%, {} cycles until collapse",
                grace - elapsed
            );
            self.emit(HiveEventKind::GraceWarning {
                hazard: Hazard::Structure,
                cycles_remaining: grace - elapsed,
            });
        } else {
            self.crisis.structure_critical_cycles = 0;
        }

        let threshold = self.config.collapse.waste_threshold;
        let grace = self.config.collapse.waste_grace_cycles;
        if self.hive.waste_level >= threshold {
            self.crisis.waste_critical_cycles += 1;
            let elapsed = self.crisis.waste_critical_cycles;
            if elapsed >= grace {
                return Err(CollapseReason::ToxicOverload);
            }
            warn!(
                waste = self.hive.waste_level,
                "Critical waste: {} cycles until toxic collapse",
                grace - elapsed
            );
            self.emit(HiveEventKind::GraceWarning {
                hazard: Hazard::Waste,
                cycles_remaining: grace - elapsed,
            });
        } else {
            self.crisis.waste_critical_cycles = 0;
        }

        Ok(())
    }

    /// Step 2: an undefended hive under threat loses organisms at an
    /// escalating rate. Queens and workers get a second roll to survive.
    pub(super) fn apply_vulnerability(&mut self) -> Result<(), CollapseReason> {
        let population = self.hive.population();
        let threat = self.hive.threat_level;
        let undefended = population.get(CasteType::Breeder) == 0
            && population.get(CasteType::Soldier) == 0
            && threat.is_active();

        if !undefended {
            self.crisis.vulnerable_cycles = 0;
            return Ok(());
        }

        self.crisis.vulnerable_cycles += 1;
        let death_chance = vulnerability_death_chance(threat, self.crisis.vulnerable_cycles);

        let mut dead = Vec::new();
        for organism in self.organisms.values().filter(|o| o.active) {
            if !self.rng.chance(death_chance) {
                continue;
            }
            let hardy = matches!(organism.caste, CasteType::Queen | CasteType::Worker);
            if hardy && self.rng.unit() > HARDY_SURVIVAL_ROLL {
                continue;
            }
            dead.push((organism.id, DeathCause::Undefended));
        }

        if !dead.is_empty() {
            warn!(
                threat = %threat,
                vulnerable_cycles = self.crisis.vulnerable_cycles,
                "Defense crisis: {} organisms perished (death chance {:.1}%)",
                dead.len(),
                death_chance * 100.0
            );
            self.bury(dead);
        }

        if self.hive.total_population() == 0 {
            return Err(CollapseReason::UndefendedExtinction);
        }
        Ok(())
    }

    /// Step 3: with no breeders under threat, every organism faces a flat
    /// kill chance scaled by the threat level.
    pub(super) fn apply_breeder_crisis(&mut self) -> Result<(), CollapseReason> {
        let threat = self.hive.threat_level;
        if self.hive.population().get(CasteType::Breeder) > 0 || !threat.is_active() {
            return Ok(());
        }

        let death_chance = BREEDER_CRISIS_CHANCE * threat.ordinal() as f64;
        let mut dead = Vec::new();
        for organism in self.organisms.values().filter(|o| o.active) {
            if self.rng.chance(death_chance) {
                dead.push((organism.id, DeathCause::BreederCrisis));
            }
        }

        if dead.is_empty() {
            return Ok(());
        }

        warn!(
            threat = %threat,
            "Breeder extinction event: {} organisms died in the crisis",
            dead.len()
        );
        self.bury(dead);

        if self.hive.total_population() == 0 {
            return Err(CollapseReason::BreederCrisisExtinction);
        }
        Ok(())
    }

    /// Step 5: a queenless hive gets one emergency queen, if enabled.
    /// Returns the number of living queens.
    pub(super) fn ensure_queen(&mut self) -> Result<u32, CollapseReason> {
        let living = self.living_ids(CasteType::Queen).len() as u32;
        if living > 0 {
            return Ok(living);
        }

        info!("Queenless hive: immediate succession required");
        self.emit(HiveEventKind::SuccessionTriggered);

        if !self.config.succession.emergency_queen {
            return Err(CollapseReason::Queenless);
        }

        let age = self.rng.int_inclusive(15, 25).max(0) as u32;
        let mut queen = Organism::new(UNASSIGNED_ID, CasteType::Queen, age);
        queen.birth_cycle = Some(self.cycle_count);
        let id = self.admit(queen, BirthOrigin::EmergencyQueen);
        info!(queen = id, age, "Emergency queen spawned");

        let living = self.living_ids(CasteType::Queen).len() as u32;
        if living == 0 {
            return Err(CollapseReason::Queenless);
        }
        Ok(living)
    }
}
