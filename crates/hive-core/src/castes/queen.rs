//! Queen Cognition
//!
//! Queens read the hive ledger, rank its needs as named priorities, and turn
//! those priorities into spawn instructions for the breeders.

use hive_events::{CasteType, ThreatLevel};
use std::fmt;
use tracing::{info, warn};

use super::scaled;
use crate::components::{HiveState, Organism, SpawnOrders, Tally};

/// Food below this asks for more workers
const FOOD_SHORTAGE: u32 = 30;
/// Food above this signals a worker surplus
const FOOD_SURPLUS: u32 = 80;
/// Waste above this asks for more cleaners
const WASTE_BACKLOG: u32 = 70;
/// Integrity below this asks for more bio-architects
const STRUCTURE_WEAK: u32 = 50;
/// Colonies smaller than this push for growth
const SMALL_COLONY: u32 = 20;
/// Colonies smaller than this request the emergency baseline bundle
const COLLAPSING_COLONY: u32 = 5;
/// Fewer workers than this is a critical shortage
const CRITICAL_WORKERS: u32 = 2;
/// Soldiers are topped up to this many
const MIN_SOLDIERS: u32 = 3;
/// Floor for emergency worker and soldier requests
const EMERGENCY_FLOOR: u32 = 3;

/// Named hive need with an integer urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    IncreaseWorkers,
    ReduceWorkers,
    IncreaseCleaners,
    IncreaseSoldiers,
    IncreaseBioArchitects,
    IncreaseBreeders,
    IncreaseQueens,
    EmergencyWorkers,
    EmergencyAll,
    EmergencySoldiers,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::IncreaseWorkers => "increase_workers",
            Priority::ReduceWorkers => "reduce_workers",
            Priority::IncreaseCleaners => "increase_cleaners",
            Priority::IncreaseSoldiers => "increase_soldiers",
            Priority::IncreaseBioArchitects => "increase_bio_architects",
            Priority::IncreaseBreeders => "increase_breeders",
            Priority::IncreaseQueens => "increase_queens",
            Priority::EmergencyWorkers => "emergency_workers",
            Priority::EmergencyAll => "emergency_all",
            Priority::EmergencySoldiers => "emergency_soldiers",
        }
    }

    pub fn is_emergency(self) -> bool {
        matches!(
            self,
            Priority::EmergencyWorkers | Priority::EmergencyAll | Priority::EmergencySoldiers
        )
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority -> urgency, in the order the queen raised them
pub type Priorities = Tally<Priority>;

/// Assesses the hive and returns its needs as priorities.
///
/// Later checks overwrite earlier entries for the same priority, so the
/// soldier top-up replaces a threat-scaled soldier request.
pub fn process_stimuli(queen: &Organism, hive: &HiveState, living_queens: u32) -> Priorities {
    let mut priorities = Priorities::new();
    if !queen.active {
        return priorities;
    }

    let effectiveness = queen.effectiveness();

    if hive.food_level < FOOD_SHORTAGE {
        priorities.set(Priority::IncreaseWorkers, scaled(3, effectiveness));
    } else if hive.food_level > FOOD_SURPLUS {
        priorities.set(Priority::ReduceWorkers, 1);
    }

    if hive.waste_level > WASTE_BACKLOG {
        priorities.set(Priority::IncreaseCleaners, scaled(2, effectiveness));
    }

    if hive.threat_level >= ThreatLevel::Medium {
        priorities.set(
            Priority::IncreaseSoldiers,
            scaled(hive.threat_level.ordinal(), effectiveness),
        );
    }

    if hive.structural_integrity < STRUCTURE_WEAK {
        priorities.set(Priority::IncreaseBioArchitects, scaled(2, effectiveness));
    }

    let total_population = hive.total_population();
    if total_population < SMALL_COLONY {
        priorities.add(Priority::IncreaseWorkers, 2);
        priorities.set(Priority::IncreaseBreeders, 1);
    }

    if living_queens == 0 {
        priorities.set(Priority::IncreaseQueens, 1);
        info!("Succession triggered: no living queens, requesting a successor");
    } else if queen.is_near_end_of_life() && living_queens == 1 {
        priorities.set(Priority::IncreaseQueens, 1);
        info!(
            queen = queen.id,
            age = queen.age,
            "Succession preparation: sole queen nearing the end of her life"
        );
    }

    let population = hive.population();
    if population.get(CasteType::Worker) < CRITICAL_WORKERS {
        priorities.set(Priority::EmergencyWorkers, EMERGENCY_FLOOR);
        warn!("Emergency: critical worker shortage detected");
    }

    if total_population < COLLAPSING_COLONY {
        priorities.set(Priority::EmergencyAll, 1);
        warn!("Emergency: population collapse imminent");
    }

    let soldiers = population.get(CasteType::Soldier);
    if soldiers == 0 && hive.threat_level.is_active() {
        priorities.set(Priority::EmergencySoldiers, EMERGENCY_FLOOR);
        warn!(threat = %hive.threat_level, "Emergency: no soldiers during threat");
    } else if soldiers < MIN_SOLDIERS {
        priorities.set(Priority::IncreaseSoldiers, MIN_SOLDIERS - soldiers);
    }

    priorities
}

/// Converts priorities into a caste -> count spawn order.
///
/// Priorities with zero urgency are skipped. `ReduceWorkers` is advisory and
/// produces no order.
pub fn generate_genetic_instructions(queen: &Organism, priorities: &Priorities) -> SpawnOrders {
    let mut orders = SpawnOrders::new();
    if !queen.active {
        return orders;
    }

    for (priority, urgency) in priorities.iter() {
        if urgency == 0 {
            continue;
        }

        match priority {
            Priority::IncreaseWorkers => orders.set(CasteType::Worker, urgency),
            Priority::IncreaseCleaners => orders.set(CasteType::Cleaner, urgency),
            Priority::IncreaseSoldiers => orders.set(CasteType::Soldier, urgency),
            Priority::IncreaseBioArchitects => orders.set(CasteType::BioArchitect, urgency),
            Priority::IncreaseQueens => orders.set(CasteType::Queen, urgency),
            Priority::IncreaseBreeders => orders.set(CasteType::Breeder, urgency),
            Priority::EmergencyWorkers => {
                orders.set(CasteType::Worker, urgency.max(EMERGENCY_FLOOR))
            }
            Priority::EmergencySoldiers => {
                orders.set(CasteType::Soldier, urgency.max(EMERGENCY_FLOOR))
            }
            Priority::EmergencyAll => {
                orders.set(CasteType::Worker, 2);
                orders.set(CasteType::Cleaner, 1);
                orders.set(CasteType::Soldier, 1);
            }
            Priority::ReduceWorkers => {}
        }
    }

    orders
}
