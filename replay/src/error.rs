//! Unified error handling for the replay tool.

use crate::config::ConfigError;
use std::path::PathBuf;

/// Replay error type.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: nailfeed_engine::Error,
    },

    #[error("Engine error: {0}")]
    Engine(#[from] nailfeed_engine::Error),

    #[error("failed to encode report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for the replay tool.
pub type Result<T> = std::result::Result<T, ReplayError>;
