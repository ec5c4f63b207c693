//! Worker foraging: food in, waste out, and an eye on the perimeter.

use hive_events::ThreatLevel;

use super::scaled;
use crate::components::Organism;
use crate::rng::RandomSource;

/// Detection chance of a worker at full effectiveness
const DETECTION_CHANCE: f64 = 0.1;

/// Threat levels a worker can report
const DETECTABLE: [ThreatLevel; 2] = [ThreatLevel::Low, ThreatLevel::Medium];

/// Outcome of one worker's shift
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub food_gathered: u32,
    pub waste_generated: u32,
    pub detected_threat: Option<ThreatLevel>,
}

pub fn execute_tasks(worker: &Organism, rng: &mut dyn RandomSource) -> WorkerReport {
    if !worker.active {
        return WorkerReport::default();
    }

    let effectiveness = worker.effectiveness();
    let food_gathered = scaled(rng.int_inclusive(3, 8).max(0) as u32, effectiveness);

    let detected_threat = if rng.chance(DETECTION_CHANCE * effectiveness) {
        Some(DETECTABLE[rng.choose_index(DETECTABLE.len())])
    } else {
        None
    };

    let waste_generated = rng.int_inclusive(1, 3).max(0) as u32;

    WorkerReport {
        food_gathered,
        waste_generated,
        detected_threat,
    }
}
