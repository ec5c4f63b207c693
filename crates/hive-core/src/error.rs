//! Error types for the fallible edges of the engine: configuration, event
//! logs, and report output. Cycle processing itself never fails.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum HiveError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
