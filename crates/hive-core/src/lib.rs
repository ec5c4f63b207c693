//! Hive Colony Simulation Engine
//!
//! A colony of caste-specialized organisms shares food, waste, structure and
//! threat. Each call to [`HiveSimulation::simulate_cycle`] advances the colony
//! by one cycle and reports whether it survived.

pub mod castes;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod rng;
pub mod setup;
pub mod simulation;

pub use components::*;
pub use config::{ConfigError, HiveConfig};
pub use error::HiveError;
pub use events::EventLogger;
pub use output::{status_line, write_report, StatsCollector};
pub use rng::{FixedRng, RandomSource, SequenceRng, SimRng};
pub use setup::spawn_initial_colony;
pub use simulation::{vulnerability_death_chance, CycleOutcome, HiveSimulation};
