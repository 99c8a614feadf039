//! Stamp the snapshot version into the generated version file.
//!
//! The version file carries the project version between markers:
//!
//! ```text
//! pub const PROJECT_VERSION: &str = /*PROJECT_VERSION_START*/"2.7.0"/*PROJECT_VERSION_END*/;
//! ```
//!
//! This command swaps `"2.7.0"` for the snapshot version of the current
//! commit, e.g. `"2.7.0-dev-abcdef12"`. Because the marker is matched on the
//! version declared in Cargo.toml, a second run on the same checkout fails
//! until the file is reset.
//!
//! # Examples
//!
//! ```bash
//! # Rewrite the configured version file
//! CURRENT_BRANCH_NAME=dev cargo snapshot-release update-version
//!
//! # Rewrite a specific file
//! cargo snapshot-release update-version --file src/build_info.rs
//!
//! # Show the new marker without touching the file
//! cargo snapshot-release update-version --dry-run
//! ```

use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use cargo_plugin_utils::logger::Logger;
use clap::Parser;

use super::common::{
    ProjectArgs,
    compute_snapshot,
    load_project,
};
use crate::marker;

/// Arguments for the `update-version` command.
#[derive(Parser, Debug)]
pub struct UpdateVersionArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Source file carrying the version marker.
    ///
    /// Defaults to `version_file` from `[package.metadata.snapshot-release]`,
    /// or `src/project_version.rs` in the repository root.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the rewritten marker instead of writing the file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Replace the current-version marker with the snapshot version marker.
///
/// Prints the snapshot version on success.
///
/// # Errors
///
/// Returns an error if:
/// - The manifest cannot be read
/// - `--require-branch` is set and no branch is given
/// - `git rev-parse HEAD` fails
/// - The version file does not contain the marker for the current version
///   (the file is left untouched)
/// - The version file cannot be read or written
pub fn update_version(args: UpdateVersionArgs) -> Result<()> {
    let mut logger = Logger::new();

    logger.status("Reading", "package version");
    let project = load_project(&args.project)?;
    let base = args
        .project
        .base_version
        .clone()
        .unwrap_or_else(|| project.version.clone());

    logger.status("Computing", "snapshot version");
    let snapshot = compute_snapshot(&args.project, &base, &mut logger)?;

    let path = args
        .file
        .unwrap_or_else(|| project.path(&project.config.version_file));

    if args.dry_run {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        marker::rewrite_text(&text, &project.version, &snapshot.version, &path)?;
        logger.finish();
        println!("{}", marker::marker(&snapshot.version));
        return Ok(());
    }

    logger.status("Updating", &path.display().to_string());
    marker::rewrite_file(&path, &project.version, &snapshot.version)?;
    logger.finish();

    println!("{}", snapshot.version);
    Ok(())
}
