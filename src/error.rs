//! Errors from loading, preparing and starting launches.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading and starting a launch descriptor.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("command line is empty")]
    EmptyCommandLine,

    #[error("failed to read launch descriptor: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid launch descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to open {}: {source}", path.display())]
    OpenStream {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    #[cfg(windows)]
    #[error("Windows API call failed: {0}")]
    Os(#[from] windows::core::Error),
}
