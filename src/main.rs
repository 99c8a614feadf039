//! Cargo subcommand for publishing snapshot builds.
//!
//! Two steps of a snapshot pipeline, each run by CI with no arguments:
//! - `update-version` stamps `<version>-<branch>-<short-sha>` into the
//!   generated version file before the build
//! - `publish-page` reports the snapshot as a GitHub check run after the
//!   artifacts are published
//!
//! `version` prints the snapshot version for shell steps.

use std::fs;

use anyhow::Result;
use cargo_snapshot_release::commands;
use cargo_snapshot_release::commands::{
    PublishPageArgs,
    ShowVersionArgs,
    UpdateVersionArgs,
};
use clap::{
    CommandFactory,
    Parser,
    Subcommand,
};

#[derive(Parser, Debug)]
#[command(bin_name = "cargo", version, arg_required_else_help = false)]
struct CargoArgs {
    #[command(subcommand)]
    subcmd: Option<TopCommand>,
}

#[derive(Subcommand, Debug)]
enum TopCommand {
    /// Snapshot versioning and publishing for CI
    #[command(name = "snapshot-release")]
    SnapshotRelease(SnapshotReleaseCli),
}

#[derive(Parser, Debug)]
#[command(subcommand_required = false, arg_required_else_help = false)]
struct SnapshotReleaseCli {
    #[command(subcommand)]
    command: Option<SnapshotReleaseCommand>,
}

#[derive(Parser, Debug)]
enum SnapshotReleaseCommand {
    /// Rewrite the version marker with the snapshot version
    #[command(name = "update-version")]
    UpdateVersion(UpdateVersionArgs),
    /// Create a GitHub check run announcing the snapshot build
    #[command(name = "publish-page")]
    PublishPage(PublishPageArgs),
    /// Print the snapshot version of the current commit
    #[command(name = "version")]
    Version(ShowVersionArgs),
}

/// Check if any .env* files exist in the current directory.
fn has_env_files() -> bool {
    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(_) => return false,
    };

    let patterns = [".env", ".env.local", ".env.prod", ".env.dev", ".env.test"];
    let is_file = |name: &str| {
        fs::metadata(current_dir.join(name))
            .map(|m| m.is_file())
            .unwrap_or(false)
    };

    if patterns.into_iter().any(|pattern| is_file(pattern)) {
        return true;
    }

    // Also check for .env.{USER} pattern
    std::env::var("USER")
        .map(|user| is_file(format!(".env.{}", user).as_str()))
        .unwrap_or(false)
}

fn main() -> Result<()> {
    // GH_TOKEN may live in an encrypted .env.local handled by dotenvage
    if has_env_files()
        && let Err(e) = dotenvage::EnvLoader::new().and_then(|loader| loader.load())
    {
        eprintln!("Warning: Failed to load/decrypt env files: {}", e);
        eprintln!("Continuing with existing environment variables...");
    }

    let args = CargoArgs::parse();

    if let Some(TopCommand::SnapshotRelease(cli)) = args.subcmd {
        if let Some(command) = cli.command {
            return match command {
                SnapshotReleaseCommand::UpdateVersion(args) => commands::update_version(args),
                SnapshotReleaseCommand::PublishPage(args) => commands::publish_page(args),
                SnapshotReleaseCommand::Version(args) => commands::show_version(args),
            };
        }

        // No inner command: show help
        SnapshotReleaseCli::command().print_help()?;
        println!();
        return Ok(());
    }

    // No subcommand: show help
    CargoArgs::command().print_help()?;
    println!();
    Ok(())
}
