//! Status Snapshot
//!
//! One-line human-readable summary of the hive, logged at the end of every
//! cycle.

use std::fmt::Write;

use crate::components::{HiveState, Organism};

/// Formats the hive for the cycle log.
///
/// `queen` is the first living queen, if any. Castes with no members are left
/// out of the population breakdown.
pub fn status_line(cycle: u64, hive: &HiveState, queen: Option<&Organism>) -> String {
    let mut line = format!(
        "Cycle {} | Food: {} | Waste: {} | Structure: {}% | Threat: {}",
        cycle, hive.food_level, hive.waste_level, hive.structural_integrity, hive.threat_level
    );

    let _ = write!(line, " | Population ({} total)", hive.total_population());
    match queen {
        Some(queen) => {
            let _ = write!(line, " (Queen: {}, age {})", queen.id, queen.age);
        }
        None => line.push_str(" (NO QUEEN!)"),
    }

    let breakdown: Vec<String> = hive
        .population()
        .iter()
        .filter(|&(_, count)| count > 0)
        .map(|(caste, count)| format!("{}: {}", caste.label(), count))
        .collect();
    if !breakdown.is_empty() {
        let _ = write!(line, ": {}", breakdown.join(", "));
    }

    let _ = write!(
        line,
        " | Births: {} | Deaths: {}",
        hive.total_births, hive.total_deaths
    );
    line
}
