use hive_events::{CasteType, ThreatLevel};

use crate::components::{HiveState, Organism, SpawnOrders};

/// Integrity below which the counsel also asks for architects
const REINFORCE_BELOW: u32 = 70;

/// Response a cerebral proposes to the hive's current danger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CerebralStrategy {
    /// Soldier-heavy spawn bundle, present only under HIGH threat or worse
    pub emergency_spawn: Option<SpawnOrders>,
}

impl CerebralStrategy {
    pub fn is_empty(&self) -> bool {
        self.emergency_spawn.is_none()
    }
}

pub fn analyze_existential_threat(cerebral: &Organism, hive: &HiveState) -> CerebralStrategy {
    if !cerebral.active || hive.threat_level < ThreatLevel::High {
        return CerebralStrategy::default();
    }

    let multiplier = ((cerebral.effectiveness() * 2.0).floor() as u32).max(1);
    let mut bundle = SpawnOrders::new();
    bundle.set(CasteType::Soldier, 15 * multiplier);
    bundle.set(CasteType::Worker, 3 * multiplier);
    if hive.structural_integrity < REINFORCE_BELOW {
        bundle.set(CasteType::BioArchitect, 2);
    }

    CerebralStrategy {
        emergency_spawn: Some(bundle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColonyConfig;

    fn hive_at(threat: ThreatLevel, structure: u32) -> HiveState {
        let mut hive = HiveState::from_config(&ColonyConfig::default());
        hive.threat_level = threat;
        hive.set_structure(structure);
        hive
    }

    #[test]
    fn test_quiet_below_high() {
        let cerebral = Organism::new(7, CasteType::Cerebral, 25);
        assert!(analyze_existential_threat(&cerebral, &hive_at(ThreatLevel::Medium, 40)).is_empty());
    }

    #[test]
    fn test_prime_cerebral_doubles_bundle() {
        let cerebral = Organism::new(7, CasteType::Cerebral, 25);
        let strategy = analyze_existential_threat(&cerebral, &hive_at(ThreatLevel::High, 90));
        let bundle = strategy.emergency_spawn.unwrap_or_default();
        let entries: Vec<_> = bundle.iter().collect();
        assert_eq!(entries, vec![(CasteType::Soldier, 30), (CasteType::Worker, 6)]);
    }

    #[test]
    fn test_weak_structure_adds_architects() {
        // age 10 of 50: effectiveness below 1.0, multiplier 1
        let cerebral = Organism::new(7, CasteType::Cerebral, 10);
        let strategy = analyze_existential_threat(&cerebral, &hive_at(ThreatLevel::Existential, 60));
        let bundle = strategy.emergency_spawn.unwrap_or_default();
        assert_eq!(bundle.get(CasteType::Soldier), Some(15));
        assert_eq!(bundle.get(CasteType::Worker), Some(3));
        assert_eq!(bundle.get(CasteType::BioArchitect), Some(2));
    }

    #[test]
    fn test_inactive_cerebral_offers_nothing() {
        let mut cerebral = Organism::new(7, CasteType::Cerebral, 25);
        cerebral.deactivate();
        assert!(analyze_existential_threat(&cerebral, &hive_at(ThreatLevel::Existential, 10)).is_empty());
    }
}
