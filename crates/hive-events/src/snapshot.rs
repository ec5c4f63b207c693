//! Snapshot Types
//!
//! Serialization structs for statistics and run reports.
//!
//! Statistics are a read-only projection of hive state, used by front ends,
//! analysis scripts, and tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CollapseReason, ThreatLevel};

/// Generates a unique identifier for a simulation run.
pub fn generate_run_id() -> String {
    format!("run_{}", uuid::Uuid::new_v4().simple())
}

/// Read-only projection of the hive at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveStatistics {
    pub total_cycles: u64,
    pub total_population: u32,
    pub total_births: u64,
    pub total_deaths: u64,
    pub current_food: u32,
    pub current_waste: u32,
    /// Threat name, e.g. "MEDIUM"
    pub current_threat: String,
    /// Structural integrity percentage, 0-100
    pub current_structure: u32,
    /// Caste label -> live count
    pub population_by_caste: BTreeMap<String, u32>,
}

impl HiveStatistics {
    /// Sum of the per-caste counts. Always equals `total_population`.
    pub fn caste_sum(&self) -> u32 {
        self.population_by_caste.values().sum()
    }

    /// Live count for a caste label, zero when absent.
    pub fn count_of(&self, label: &str) -> u32 {
        self.population_by_caste.get(label).copied().unwrap_or(0)
    }

    /// Serializes the statistics to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the statistics to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes statistics from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Summary of one completed cycle for history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub cycle: u64,
    pub population: u32,
    pub births: u64,
    pub deaths: u64,
    pub food: u32,
    pub waste: u32,
    pub structure: u32,
    pub threat: ThreatLevel,
}

/// Complete record of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: String,
    pub cycles_completed: u64,
    pub peak_population: u32,
    /// Terminal outcome, absent when the run stopped at its cycle limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse: Option<CollapseReason>,
    pub final_statistics: HiveStatistics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<CycleSummary>,
}

impl SimulationReport {
    /// Returns true if the colony was still alive when the run ended.
    pub fn survived(&self) -> bool {
        self.collapse.is_none()
    }

    /// Serializes the report to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
