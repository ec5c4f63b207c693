//! Configuration System
//!
//! Loads tuning parameters from hive.toml for easy adjustment without recompiling.
//! Every section is optional; missing values fall back to the defaults below.

use hive_events::{CasteType, ThreatLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "hive.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HiveConfig {
    pub simulation: SimulationConfig,
    pub colony: ColonyConfig,
    pub collapse: CollapseConfig,
    pub succession: SuccessionConfig,
}

/// Driver parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub max_cycles: u64,
    /// Pause between cycles when running continuously
    pub cycle_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_cycles: 100,
            cycle_delay_ms: 500,
        }
    }
}

/// Initial colony make-up and hive resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    pub food: u32,
    pub waste: u32,
    /// Structural integrity percentage, clamped to 100
    pub structure: u32,
    pub threat: ThreatLevel,
    pub population: InitialPopulation,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            food: 100,
            waste: 0,
            structure: 100,
            threat: ThreatLevel::None,
            population: InitialPopulation::default(),
        }
    }
}

/// Number of organisms of each caste at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPopulation {
    pub queen: u32,
    pub worker: u32,
    pub soldier: u32,
    pub cleaner: u32,
    pub breeder: u32,
    pub bio_architect: u32,
    pub cerebral: u32,
}

impl InitialPopulation {
    pub fn count(&self, caste: CasteType) -> u32 {
        match caste {
            CasteType::Queen => self.queen,
            CasteType::Worker => self.worker,
            CasteType::Soldier => self.soldier,
            CasteType::Cleaner => self.cleaner,
            CasteType::Breeder => self.breeder,
            CasteType::BioArchitect => self.bio_architect,
            CasteType::Cerebral => self.cerebral,
        }
    }

    pub fn total(&self) -> u32 {
        CasteType::ALL.iter().map(|&caste| self.count(caste)).sum()
    }

    /// A colony with no organisms at all
    pub fn empty() -> Self {
        Self {
            queen: 0,
            worker: 0,
            soldier: 0,
            cleaner: 0,
            breeder: 0,
            bio_architect: 0,
            cerebral: 0,
        }
    }
}

impl Default for InitialPopulation {
    fn default() -> Self {
        Self {
            queen: 1,
            worker: 10,
            soldier: 5,
            cleaner: 3,
            breeder: 2,
            bio_architect: 2,
            cerebral: 0,
        }
    }
}

/// Grace periods before a hazard collapses the hive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// Consecutive cycles at zero integrity that end the colony
    pub structure_grace_cycles: u32,
    /// Waste level at which the toxic countdown starts
    pub waste_threshold: u32,
    /// Consecutive cycles at or above the waste threshold that end the colony
    pub waste_grace_cycles: u32,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            structure_grace_cycles: 3,
            waste_threshold: 200,
            waste_grace_cycles: 5,
        }
    }
}

/// Queen replacement policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessionConfig {
    /// Spawn a queen directly when the hive is found queenless after aging
    pub emergency_queen: bool,
}

impl Default for SuccessionConfig {
    fn default() -> Self {
        Self {
            emergency_queen: true,
        }
    }
}

impl HiveConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse tuning file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HiveConfig::default();
        assert_eq!(config.simulation.max_cycles, 100);
        assert_eq!(config.colony.population.total(), 23);
        assert_eq!(config.colony.population.count(CasteType::Cerebral), 0);
        assert_eq!(config.colony.food, 100);
        assert_eq!(config.colony.threat, ThreatLevel::None);
        assert_eq!(config.collapse.structure_grace_cycles, 3);
        assert_eq!(config.collapse.waste_threshold, 200);
        assert_eq!(config.collapse.waste_grace_cycles, 5);
        assert!(config.succession.emergency_queen);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HiveConfig::from_str(
            r#"
            [colony]
            food = 40
            threat = "HIGH"

            [colony.population]
            soldier = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.colony.food, 40);
        assert_eq!(config.colony.threat, ThreatLevel::High);
        assert_eq!(config.colony.population.soldier, 0);
        assert_eq!(config.colony.population.worker, 10);
        assert_eq!(config.colony.structure, 100);
        assert_eq!(config.simulation.cycle_delay_ms, 500);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = HiveConfig::from_str("[colony]\nfood = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = HiveConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = HiveConfig::default().to_toml().unwrap();
        let parsed = HiveConfig::from_str(&text).unwrap();
        assert_eq!(parsed.colony.population, InitialPopulation::default());
    }
}
