use hive_events::ThreatLevel;

use crate::components::Organism;
use crate::rng::RandomSource;

/// Defense power a soldier brings against the current threat.
pub fn defend_hive(soldier: &Organism, threat: ThreatLevel, rng: &mut dyn RandomSource) -> u32 {
    if !soldier.active || !threat.is_active() {
        return 0;
    }

    let base = rng.int_inclusive(5, 15).max(0) as f64;
    (base * threat.ordinal() as f64 * soldier.effectiveness()).floor() as u32
}
