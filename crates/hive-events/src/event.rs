//! Event Types
//!
//! Everything log-worthy that happens inside a cycle is recorded as a
//! [`HiveEvent`]. Events serialize one per line (JSONL).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CasteType, ThreatLevel};

/// Primary event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Birth,
    Death,
    Threat,
    Succession,
    Crisis,
    Collapse,
}

impl EventCategory {
    /// Returns all category variants.
    pub fn all() -> &'static [EventCategory] {
        &[
            EventCategory::Birth,
            EventCategory::Death,
            EventCategory::Threat,
            EventCategory::Succession,
            EventCategory::Crisis,
            EventCategory::Collapse,
        ]
    }
}

/// How an organism came into the colony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthOrigin {
    /// Spawned by a breeder following queen instructions
    QueenOrder,
    /// Spontaneous natural birth from the first breeder
    Natural,
    /// Inserted directly by the engine to end a queenless state
    EmergencyQueen,
    /// Inserted directly by the engine when no workers remain
    EmergencyWorker,
}

/// Why an organism died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Reached its caste's maximum lifespan
    OldAge,
    /// Lost the per-cycle age-scaled death roll
    Natural,
    /// Killed while the hive had neither breeders nor soldiers under threat
    Undefended,
    /// Killed while the hive had no breeders under threat
    BreederCrisis,
}

/// What moved the threat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCause {
    /// Random environmental drift
    Drift,
    /// A worker detected a higher threat
    WorkerDetection,
    /// Soldiers pushed the threat back
    SoldierDefense,
}

/// Resource conditions that can collapse the hive after a grace period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Structure,
    Waste,
}

/// Terminal outcome of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseReason {
    /// Structural integrity stayed at zero past its grace period
    StructuralFailure,
    /// Waste stayed at or above the toxic threshold past its grace period
    ToxicOverload,
    /// Every organism died while the hive was undefended
    UndefendedExtinction,
    /// Every organism died during a breeder crisis
    BreederCrisisExtinction,
    /// No queen survived and none could be spawned
    Queenless,
}

impl fmt::Display for CollapseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CollapseReason::StructuralFailure => "catastrophic collapse: hive structure has failed",
            CollapseReason::ToxicOverload => "toxic overload: waste reached critical mass",
            CollapseReason::UndefendedExtinction => {
                "colony extinction: all organisms perished to undefended threats"
            }
            CollapseReason::BreederCrisisExtinction => {
                "colony extinction: all organisms perished in the breeder crisis"
            }
            CollapseReason::Queenless => "hive collapse: no living queen and emergency spawn failed",
        };
        f.write_str(text)
    }
}

/// The specific thing that happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HiveEventKind {
    Birth {
        organism_id: u32,
        caste: CasteType,
        origin: BirthOrigin,
    },
    Death {
        organism_id: u32,
        caste: CasteType,
        age: u32,
        cause: DeathCause,
    },
    ThreatChanged {
        from: ThreatLevel,
        to: ThreatLevel,
        cause: ThreatCause,
    },
    /// A queen requested a successor because the hive is queenless
    SuccessionTriggered,
    /// The sole queen is near the end of her life and requested a successor
    SuccessionPrepared { queen_id: u32, age: u32 },
    /// A breeder refused a queen request because a queen is alive
    QueenSpawnBlocked { living_queens: u32 },
    /// Worker numbers are low; a worker spawn floor carries into the next cycle
    WorkerSafeguard { worker_population: u32 },
    /// A hazard is active and will collapse the hive after `cycles_remaining`
    GraceWarning { hazard: Hazard, cycles_remaining: u32 },
    Collapsed { reason: CollapseReason },
}

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveEvent {
    /// Cycle index during which the event happened
    pub cycle: u64,
    pub kind: HiveEventKind,
}

impl HiveEvent {
    pub fn new(cycle: u64, kind: HiveEventKind) -> Self {
        Self { cycle, kind }
    }

    /// Category of this event.
    pub fn category(&self) -> EventCategory {
        match self.kind {
            HiveEventKind::Birth { .. } => EventCategory::Birth,
            HiveEventKind::Death { .. } => EventCategory::Death,
            HiveEventKind::ThreatChanged { .. } => EventCategory::Threat,
            HiveEventKind::SuccessionTriggered
            | HiveEventKind::SuccessionPrepared { .. }
            | HiveEventKind::QueenSpawnBlocked { .. } => EventCategory::Succession,
            HiveEventKind::WorkerSafeguard { .. } | HiveEventKind::GraceWarning { .. } => {
                EventCategory::Crisis
            }
            HiveEventKind::Collapsed { .. } => EventCategory::Collapse,
        }
    }

    /// Returns true if this event ended the simulation.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, HiveEventKind::Collapsed { .. })
    }

    /// Serializes the event to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
