#![doc = include_str!("../README.md")]

/// Command implementations and argument types.
///
/// # Example: computing a snapshot version from another tool
///
/// ```no_run
/// use cargo_plugin_utils::logger::Logger;
/// use cargo_snapshot_release::commands::{
///     ProjectArgs,
///     compute_snapshot,
///     load_project,
/// };
///
/// # fn main() -> anyhow::Result<()> {
/// let args = ProjectArgs::for_repo(".");
/// let project = load_project(&args)?;
/// let mut logger = Logger::new();
/// let snapshot = compute_snapshot(&args, &project.version, &mut logger)?;
/// println!("{}", snapshot.version);
/// # Ok(())
/// # }
/// ```
pub mod commands;
/// Project settings from package metadata.
pub mod config;
/// Error kinds.
pub mod error;
/// Git helpers.
pub mod git;
/// GitHub check-run helpers.
pub mod github;
/// Version marker rewriting.
pub mod marker;
/// Snapshot version derivation.
pub mod version;
