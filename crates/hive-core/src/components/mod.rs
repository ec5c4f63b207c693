//! Hive Components
//!
//! Organisms, the shared hive ledger, and the ordered tallies castes exchange.

pub mod hive;
pub mod orders;
pub mod organism;

pub use hive::*;
pub use orders::*;
pub use organism::*;
