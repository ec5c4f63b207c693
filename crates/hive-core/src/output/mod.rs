//! Output Generation
//!
//! Status snapshots and run statistics.

pub mod stats;
pub mod status;

pub use stats::*;
pub use status::*;
