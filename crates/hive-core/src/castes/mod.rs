//! Caste Behaviors
//!
//! Each caste contributes one capability to the cycle. Behaviors are free
//! functions over an [`Organism`](crate::components::Organism) record; the
//! engine picks the organisms to run through [`capability`].

pub mod architect;
pub mod breeder;
pub mod cerebral;
pub mod cleaner;
pub mod queen;
pub mod soldier;
pub mod worker;

use hive_events::CasteType;

pub use architect::maintain_structure;
pub use breeder::{spawn_organisms, Clutch};
pub use cerebral::{analyze_existential_threat, CerebralStrategy};
pub use cleaner::{process_waste, WasteReport};
pub use queen::{generate_genetic_instructions, process_stimuli, Priorities, Priority};
pub use soldier::defend_hive;
pub use worker::{execute_tasks, WorkerReport};

/// What an organism contributes to the hive each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read hive state and issue spawn instructions
    Govern,
    /// Gather food, produce waste, spot threats
    Gather,
    /// Push the threat level down
    Defend,
    /// Turn waste into biomass
    Clean,
    /// Restore structural integrity
    Repair,
    /// Spawn new organisms
    Breed,
    /// Plan responses to existential threats
    Advise,
}

/// Dispatch table from caste to capability.
pub fn capability(caste: CasteType) -> Capability {
    match caste {
        CasteType::Queen => Capability::Govern,
        CasteType::Worker => Capability::Gather,
        CasteType::Soldier => Capability::Defend,
        CasteType::Cleaner => Capability::Clean,
        CasteType::Breeder => Capability::Breed,
        CasteType::BioArchitect => Capability::Repair,
        CasteType::Cerebral => Capability::Advise,
    }
}

/// Scales a random base quantity by effectiveness, truncating toward zero.
pub(crate) fn scaled(base: u32, effectiveness: f64) -> u32 {
    (base as f64 * effectiveness).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_caste_has_a_distinct_capability() {
        let mut seen = std::collections::HashSet::new();
        for caste in CasteType::ALL {
            assert!(seen.insert(capability(caste)));
        }
    }

    #[test]
    fn test_scaled_truncates() {
        assert_eq!(scaled(5, 1.0), 5);
        assert_eq!(scaled(5, 0.7), 3);
        assert_eq!(scaled(8, 0.6), 4);
        assert_eq!(scaled(9, 0.0), 0);
    }
}
