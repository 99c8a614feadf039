//! Error kinds surfaced by snapshot operations.
//!
//! Command functions return [`anyhow::Result`]; these variants travel inside
//! it so callers can tell a missing token from a missing marker with
//! `err.downcast_ref::<SnapshotError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A required environment variable is missing or blank.
    #[error("{var} not found in environment")]
    Configuration { var: &'static str },

    /// The current-version marker is not present in the target file.
    #[error("Cannot find {marker} in {}", path.display())]
    Precondition { marker: String, path: PathBuf },

    /// An external tool (git) could not be spawned or exited non-zero.
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: &'static str, message: String },

    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The check-run API answered with a non-success status.
    #[error("Check-run API returned HTTP {status}")]
    ApiStatus { status: u16 },

    #[error("Failed to serialize check-run payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;
