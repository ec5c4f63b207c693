//! Colony Setup
//!
//! Initial population spawning.

pub mod colony;

pub use colony::*;
