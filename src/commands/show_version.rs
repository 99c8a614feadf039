//! Print the snapshot version of the current commit.
//!
//! Computes the same version `update-version` and `publish-page` use,
//! without writing or sending anything.
//!
//! # Examples
//!
//! ```bash
//! # e.g. "2.7.0-dev-abcdef12"
//! CURRENT_BRANCH_NAME=dev cargo snapshot-release version
//!
//! # JSON with the parts
//! cargo snapshot-release version --format json
//! ```

use anyhow::Result;
use cargo_plugin_utils::logger::Logger;
use clap::Parser;

use super::common::{
    ProjectArgs,
    Snapshot,
    compute_snapshot,
    load_project,
};

/// Arguments for the `version` command.
#[derive(Parser, Debug)]
pub struct ShowVersionArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format.
    ///
    /// - `version`: Print just the snapshot version
    /// - `json`: Print JSON with version, base, branch and sha fields
    #[arg(long, default_value = "version")]
    pub format: String,
}

/// Compute and print the snapshot version.
///
/// # Example Output
///
/// With `--format version`:
/// ```text
/// 2.7.0-dev-abcdef12
/// ```
///
/// With `--format json`:
/// ```json
/// {"version":"2.7.0-dev-abcdef12","base":"2.7.0","branch":"dev","sha":"abcdef1234567890..."}
/// ```
pub fn show_version(args: ShowVersionArgs) -> Result<()> {
    if !matches!(args.format.as_str(), "version" | "json") {
        anyhow::bail!("Invalid format: {}", args.format);
    }

    let mut logger = Logger::new();
    let base = match &args.project.base_version {
        Some(base) => base.clone(),
        None => {
            logger.status("Reading", "package version");
            load_project(&args.project)?.version
        }
    };

    let snapshot = compute_snapshot(&args.project, &base, &mut logger)?;
    logger.finish();

    println!("{}", render(&snapshot, &args.format)?);
    Ok(())
}

fn render(snapshot: &Snapshot, format: &str) -> Result<String> {
    match format {
        "version" => Ok(snapshot.version.clone()),
        "json" => Ok(serde_json::json!({
            "version": snapshot.version,
            "base": snapshot.base,
            "branch": snapshot.branch.as_str(),
            "sha": snapshot.sha,
        })
        .to_string()),
        _ => anyhow::bail!("Invalid format: {}", format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::test_support::create_snapshot_project;
    use crate::version::BranchName;

    fn sample() -> Snapshot {
        Snapshot {
            base: "2.7.0".to_string(),
            branch: BranchName::Named("dev".to_string()),
            sha: "abcdef1234567890".to_string(),
            version: "2.7.0-dev-abcdef12".to_string(),
        }
    }

    #[test]
    fn test_render_version() {
        assert_eq!(render(&sample(), "version").unwrap(), "2.7.0-dev-abcdef12");
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&sample(), "json").unwrap()).unwrap();
        assert_eq!(json["version"], "2.7.0-dev-abcdef12");
        assert_eq!(json["base"], "2.7.0");
        assert_eq!(json["branch"], "dev");
        assert_eq!(json["sha"], "abcdef1234567890");
    }

    #[test]
    fn test_render_rejects_unknown_format() {
        let err = render(&sample(), "yaml").unwrap_err();
        assert_eq!(err.to_string(), "Invalid format: yaml");
    }

    #[test]
    fn test_invalid_format_fails_before_git() {
        let dir = tempfile::tempdir().unwrap();
        let args = ShowVersionArgs {
            project: ProjectArgs::for_repo(dir.path()),
            format: "yaml".to_string(),
        };
        let err = show_version(args).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    #[cfg_attr(target_os = "windows", ignore)]
    fn test_show_version_with_base_override_skips_manifest() {
        let dir = create_snapshot_project("1.0.0");
        std::fs::remove_file(dir.path().join("Cargo.toml")).unwrap();

        let mut project = ProjectArgs::for_repo(dir.path());
        project.base_version = Some("9.9.9".to_string());
        let args = ShowVersionArgs {
            project,
            format: "version".to_string(),
        };
        assert!(show_version(args).is_ok());
    }
}
