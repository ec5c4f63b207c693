//! Event System
//!
//! JSONL logging of the events the engine records each cycle.

pub mod logger;

pub use logger::*;
