//! Project-level settings.
//!
//! Read from `[package.metadata.snapshot-release]` in `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.snapshot-release]
//! version_file = "src/project_version.rs"
//! document = "docs/snapshots.md"
//! check_name = "Snapshot Build Output"
//! ```
//!
//! Every key is optional. Paths are relative to the repository root.

use std::path::PathBuf;

use serde::Deserialize;

use crate::github::DEFAULT_CHECK_NAME;

/// Metadata key holding the settings.
pub const METADATA_KEY: &str = "snapshot-release";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Source file carrying the version marker.
    pub version_file: PathBuf,

    /// Markdown appended to the check-run summary. Optional on disk.
    pub document: PathBuf,

    /// Name of the check run shown on the commit.
    pub check_name: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            version_file: PathBuf::from("src/project_version.rs"),
            document: PathBuf::from("docs/snapshots.md"),
            check_name: DEFAULT_CHECK_NAME.to_string(),
        }
    }
}

impl SnapshotConfig {
    /// Load settings from package metadata.
    ///
    /// Falls back to defaults when the key is absent or malformed.
    pub fn from_package(package: &cargo_metadata::Package) -> Self {
        Self::from_metadata(&package.metadata)
    }

    fn from_metadata(metadata: &serde_json::Value) -> Self {
        metadata
            .get(METADATA_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}
