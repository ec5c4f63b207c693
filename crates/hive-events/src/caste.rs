//! Caste and Threat Types
//!
//! The fixed vocabulary of the colony: which role an organism plays and how
//! much danger the hive is in.
//!
//! # Example
//!
//! ```
//! use hive_events::{CasteType, ThreatLevel};
//!
//! assert_eq!(CasteType::BioArchitect.label(), "Bio-Architect");
//! assert_eq!(ThreatLevel::High.raised(), ThreatLevel::Existential);
//! assert_eq!(ThreatLevel::None.lowered(), ThreatLevel::None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral role assigned to an organism at creation, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasteType {
    Queen,
    Worker,
    Soldier,
    Cleaner,
    Breeder,
    BioArchitect,
    Cerebral,
}

impl CasteType {
    /// All castes in canonical order. Population tables and reports use this order.
    pub const ALL: [CasteType; 7] = [
        CasteType::Queen,
        CasteType::Worker,
        CasteType::Soldier,
        CasteType::Cleaner,
        CasteType::Breeder,
        CasteType::BioArchitect,
        CasteType::Cerebral,
    ];

    /// Position of this caste in [`CasteType::ALL`].
    pub fn index(self) -> usize {
        match self {
            CasteType::Queen => 0,
            CasteType::Worker => 1,
            CasteType::Soldier => 2,
            CasteType::Cleaner => 3,
            CasteType::Breeder => 4,
            CasteType::BioArchitect => 5,
            CasteType::Cerebral => 6,
        }
    }

    /// Human-readable label used in reports and status lines.
    pub fn label(self) -> &'static str {
        match self {
            CasteType::Queen => "Queen",
            CasteType::Worker => "Worker",
            CasteType::Soldier => "Soldier",
            CasteType::Cleaner => "Cleaner",
            CasteType::Breeder => "Breeder",
            CasteType::BioArchitect => "Bio-Architect",
            CasteType::Cerebral => "Cerebral",
        }
    }

    /// Maximum lifespan in cycles.
    pub fn max_lifespan(self) -> u32 {
        match self {
            CasteType::Queen => 100,
            CasteType::Worker => 25,
            CasteType::Soldier => 20,
            CasteType::Cleaner => 30,
            CasteType::Breeder => 35,
            CasteType::BioArchitect => 40,
            CasteType::Cerebral => 50,
        }
    }

    /// Whether a breeder can produce this caste. Cerebrals cannot be bred.
    pub fn is_breedable(self) -> bool {
        !matches!(self, CasteType::Cerebral)
    }
}

impl fmt::Display for CasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CasteType {
    type Err = ParseCasteError;

    /// Accepts either the display label ("Bio-Architect") or the snake_case
    /// serialized name ("bio_architect"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "queen" => Ok(CasteType::Queen),
            "worker" => Ok(CasteType::Worker),
            "soldier" => Ok(CasteType::Soldier),
            "cleaner" => Ok(CasteType::Cleaner),
            "breeder" => Ok(CasteType::Breeder),
            "bio_architect" => Ok(CasteType::BioArchitect),
            "cerebral" => Ok(CasteType::Cerebral),
            _ => Err(ParseCasteError(s.to_string())),
        }
    }
}

/// Error returned when a caste name is not recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseCasteError(pub String);

impl fmt::Display for ParseCasteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown caste: '{}'", self.0)
    }
}

impl std::error::Error for ParseCasteError {}

/// Ordinal hive-wide danger indicator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Existential,
}

impl ThreatLevel {
    /// Numeric ordinal, 0 (NONE) through 4 (EXISTENTIAL).
    pub fn ordinal(self) -> u32 {
        match self {
            ThreatLevel::None => 0,
            ThreatLevel::Low => 1,
            ThreatLevel::Medium => 2,
            ThreatLevel::High => 3,
            ThreatLevel::Existential => 4,
        }
    }

    /// Builds a level from an ordinal, clamping anything above 4 to EXISTENTIAL.
    pub fn from_ordinal(ordinal: u32) -> Self {
        match ordinal {
            0 => ThreatLevel::None,
            1 => ThreatLevel::Low,
            2 => ThreatLevel::Medium,
            3 => ThreatLevel::High,
            _ => ThreatLevel::Existential,
        }
    }

    /// One step up, capped at EXISTENTIAL.
    pub fn raised(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// One step down, floored at NONE.
    pub fn lowered(self) -> Self {
        Self::from_ordinal(self.ordinal().saturating_sub(1))
    }

    /// Lowers the level by `steps` ordinals, floored at NONE.
    pub fn reduced_by(self, steps: u32) -> Self {
        Self::from_ordinal(self.ordinal().saturating_sub(steps))
    }

    /// True for anything above NONE.
    pub fn is_active(self) -> bool {
        self != ThreatLevel::None
    }

    /// Upper-case name as shown in statistics ("NONE", "HIGH", ...).
    pub fn name(self) -> &'static str {
        match self {
            ThreatLevel::None => "NONE",
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Existential => "EXISTENTIAL",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
