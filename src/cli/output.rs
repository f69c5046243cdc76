//! CLI output: error mapping from domain errors to a stable CLI surface.

use crate::error::{ApiError, StrategyError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid pipeline state in {path}: {source}")]
    InvalidState {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Failed to encode pipeline state: {0}")]
    Encode(serde_json::Error),
}

/// Map errors to a string for CLI output.
pub fn map_error(e: &CliError) -> String {
    match e {
        CliError::Strategy(StrategyError::InvalidInput(msg)) => {
            format!("Invalid pipeline state: {}", msg)
        }
        other => other.to_string(),
    }
}
