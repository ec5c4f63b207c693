//! Shared event types and serialization for the hive simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the engine and for anything that consumes its output.

pub mod caste;
pub mod event;
pub mod snapshot;

// Re-export caste and threat types
pub use caste::{CasteType, ParseCasteError, ThreatLevel};

// Re-export event types
pub use event::*;

// Re-export snapshot types
pub use snapshot::{generate_run_id, CycleSummary, HiveStatistics, SimulationReport};
