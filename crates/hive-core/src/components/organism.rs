//! Organism Model
//!
//! A single record type for every caste. Age drives energy, effectiveness,
//! and death.

use hive_events::{CasteType, DeathCause};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rng::RandomSource;

/// Identifier of an organism, unique among the living colony
pub type OrganismId = u32;

/// Placeholder id carried by newborns until the engine admits them
pub const UNASSIGNED_ID: OrganismId = 0;

/// Aging factor at which the prime plateau begins
const GROWTH_END: f64 = 0.3;
/// Aging factor at which decline begins
const DECLINE_START: f64 = 0.7;
/// Effectiveness of a brand new organism
const NEWBORN_EFFECTIVENESS: f64 = 0.7;
/// Effectiveness lost between the start of decline and the end of life
const DECLINE_DEPTH: f64 = 0.4;
/// Energy never decays below this
const MIN_ENERGY: f64 = 20.0;

/// Result of aging one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Died(DeathCause),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub caste: CasteType,
    /// Cycles elapsed
    pub age: u32,
    pub max_lifespan: u32,
    /// Alive flag; once false it is never reset
    pub active: bool,
    /// 0-100, declines in old age
    pub energy: f64,
    /// Cycle of birth; `None` for the initial population
    pub birth_cycle: Option<u64>,
    /// Cycles a breeder must wait before spawning again
    pub breeding_cooldown: u32,
}

impl Organism {
    pub fn new(id: OrganismId, caste: CasteType, age: u32) -> Self {
        Self {
            id,
            caste,
            age,
            max_lifespan: caste.max_lifespan(),
            active: true,
            energy: 100.0,
            birth_cycle: None,
            breeding_cooldown: 0,
        }
    }

    /// Age-zero organism born during `cycle`, awaiting an id.
    pub fn newborn(caste: CasteType, cycle: u64) -> Self {
        let mut organism = Self::new(UNASSIGNED_ID, caste, 0);
        organism.birth_cycle = Some(cycle);
        organism
    }

    /// Fraction of the lifespan already lived.
    pub fn aging_factor(&self) -> f64 {
        self.age as f64 / self.max_lifespan as f64
    }

    /// Ages the organism by one cycle and rolls for death.
    ///
    /// Reaching the lifespan always kills, before the probabilistic roll is
    /// consulted. Callers age only active organisms.
    pub fn age_one_cycle(&mut self, rng: &mut dyn RandomSource) -> Vitality {
        self.age += 1;

        let aging_factor = self.aging_factor();
        if aging_factor > DECLINE_START {
            let decline = (aging_factor - DECLINE_START) * 100.0;
            self.energy = (100.0 - decline).max(MIN_ENERGY);
        }

        if self.age >= self.max_lifespan {
            self.active = false;
            return Vitality::Died(DeathCause::OldAge);
        }

        let death_chance = 0.001 + aging_factor * 0.01;
        if rng.chance(death_chance) {
            self.active = false;
            return Vitality::Died(DeathCause::Natural);
        }

        Vitality::Alive
    }

    /// Effectiveness in `[0.6, 1.0]` for living organisms, zero for dead ones.
    ///
    /// Ramps from 0.7 to 1.0 while young, plateaus at 1.0 in prime, and falls
    /// to 0.6 over the last 30% of the lifespan.
    pub fn effectiveness(&self) -> f64 {
        if !self.active {
            return 0.0;
        }

        let aging_factor = self.aging_factor();
        if aging_factor <= GROWTH_END {
            NEWBORN_EFFECTIVENESS + (aging_factor / GROWTH_END) * (1.0 - NEWBORN_EFFECTIVENESS)
        } else if aging_factor <= DECLINE_START {
            1.0
        } else {
            let decline = (aging_factor - DECLINE_START) / (1.0 - DECLINE_START);
            1.0 - decline * DECLINE_DEPTH
        }
    }

    /// Past 90% of the lifespan.
    pub fn is_near_end_of_life(&self) -> bool {
        self.age as f64 > self.max_lifespan as f64 * 0.9
    }

    /// Marks the organism dead. Irreversible.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.caste.label(), self.id)?;
        if self.active {
            write!(f, "({}/{})", self.age, self.max_lifespan)?;
        } else {
            write!(f, "(dead)")?;
        }
        if let Some(cycle) = self.birth_cycle {
            write!(f, "[Born C{}]", cycle)?;
        }
        Ok(())
    }
}
