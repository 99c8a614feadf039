//! Common helper functions shared across commands.

use std::env;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use cargo_metadata::MetadataCommand;
use cargo_plugin_utils::logger::Logger;
use clap::Args;

use crate::config::SnapshotConfig;
use crate::git;
use crate::version::{
    self,
    BRANCH_ENV,
    BranchName,
};

/// Arguments locating the project and naming the build, shared by all
/// commands.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the git repository root.
    ///
    /// `git rev-parse HEAD` runs here and relative paths from the
    /// configuration resolve against it.
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    /// Path to the Cargo.toml manifest file.
    ///
    /// Defaults to `Cargo.toml` in the repository root.
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Base version of the snapshot.
    ///
    /// Defaults to the package version in Cargo.toml.
    #[arg(long)]
    pub base_version: Option<String>,

    /// Branch the snapshot is built from.
    #[arg(long, env = "CURRENT_BRANCH_NAME")]
    pub branch: Option<String>,

    /// Fail when no branch is given instead of using `unknown`.
    #[arg(long)]
    pub require_branch: bool,
}

impl ProjectArgs {
    /// Arguments for the repository at `repo_path` with everything else
    /// left to defaults.
    pub fn for_repo(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            manifest_path: None,
            base_version: None,
            branch: None,
            require_branch: false,
        }
    }

    fn manifest(&self) -> PathBuf {
        self.manifest_path
            .clone()
            .unwrap_or_else(|| self.repo_path.join("Cargo.toml"))
    }
}

/// The project as described by its manifest.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    /// Version the project currently declares.
    pub version: String,
    pub config: SnapshotConfig,
}

impl Project {
    /// Resolve a configured path against the repository root.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// A computed snapshot version together with its inputs.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub base: String,
    pub branch: BranchName,
    /// Full commit hash.
    pub sha: String,
    pub version: String,
}

/// Load the package from the manifest using cargo_metadata.
pub fn load_package(manifest_path: &Path) -> Result<cargo_metadata::Package> {
    let metadata = MetadataCommand::new()
        .manifest_path(manifest_path)
        .no_deps()
        .exec()
        .with_context(|| {
            format!(
                "Failed to get cargo metadata for {}",
                manifest_path.display()
            )
        })?;

    if let Some(root_package) = metadata.root_package() {
        return Ok(root_package.clone());
    }

    // Virtual manifest: take the first workspace member
    let first_member_id = metadata
        .workspace_members
        .first()
        .context("No package found in metadata")?;
    metadata
        .packages
        .iter()
        .find(|pkg| &pkg.id == first_member_id)
        .cloned()
        .context("No package found in metadata")
}

/// Read the project version and snapshot settings.
pub fn load_project(args: &ProjectArgs) -> Result<Project> {
    let package = load_package(&args.manifest())?;
    Ok(Project {
        root: args.repo_path.clone(),
        version: package.version.to_string(),
        config: SnapshotConfig::from_package(&package),
    })
}

/// Compute the snapshot version for the current HEAD.
///
/// The branch is checked before git runs, so a missing required branch
/// fails without spawning anything.
pub fn compute_snapshot(args: &ProjectArgs, base: &str, logger: &mut Logger) -> Result<Snapshot> {
    let branch = version::resolve_branch(args.branch.as_deref(), args.require_branch)?;
    if branch.is_unknown() {
        logger.warning(
            "Missing",
            &format!("{} not set, using branch '{}'", BRANCH_ENV, branch.as_str()),
        );
    } else {
        logger.status("Branch", branch.as_str());
    }

    let sha = git::head_sha(&args.repo_path)?;
    logger.status("Commit", &sha);

    let version = version::snapshot_version(base, branch.as_str(), &sha);
    logger.status("Snapshot", &version);

    Ok(Snapshot {
        base: base.to_string(),
        branch,
        sha,
        version,
    })
}

/// Detect GitHub repository from environment or git remote.
#[allow(clippy::disallowed_methods)] // CLI tool needs direct env access
pub fn detect_repo(repo_path: &Path) -> Result<(String, String)> {
    // Try GITHUB_REPOSITORY env var first (set by GitHub Actions)
    if let Ok(repo) = env::var("GITHUB_REPOSITORY")
        && let Some((owner, name)) = repo.split_once('/')
        && !owner.is_empty()
        && !name.is_empty()
        && !name.contains('/')
    {
        return Ok((owner.to_string(), name.to_string()));
    }

    let repo = gix::discover(repo_path).context("Failed to discover git repository")?;
    let remote_url = repo
        .find_default_remote(gix::remote::Direction::Fetch)
        .transpose()
        .context("Failed to find default remote")?
        .and_then(|remote| {
            remote
                .url(gix::remote::Direction::Fetch)
                .map(|url| url.to_string())
        });

    if let Some(owner_repo) = remote_url.as_deref().and_then(git::parse_github_remote) {
        return Ok(owner_repo);
    }

    anyhow::bail!(
        "Could not detect GitHub repository. Set GITHUB_REPOSITORY or use --owner/--repo flags"
    );
}

/// Get owner and repo from args or environment.
pub fn get_owner_repo(
    owner: Option<String>,
    repo: Option<String>,
    repo_path: &Path,
) -> Result<(String, String)> {
    match (owner, repo) {
        (Some(o), Some(r)) => Ok((o, r)),
        (Some(_), None) | (None, Some(_)) => {
            anyhow::bail!("Both --owner and --repo must be provided together");
        }
        (None, None) => detect_repo(repo_path),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::git::test_support::init_repo_with_commit;
    use crate::marker::marker;

    /// Create a committed cargo project declaring `version`, with a version
    /// file carrying the marker for that version.
    pub fn create_snapshot_project(version: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            format!(
                r#"
[package]
name = "test-package"
version = "{version}"
edition = "2021"
"#
            ),
        )
        .unwrap();

        let src_dir = dir.path().join("src");
        std::fs::create_dir_all(&src_dir).unwrap();
        std::fs::write(src_dir.join("lib.rs"), "mod project_version;\n").unwrap();
        std::fs::write(
            src_dir.join("project_version.rs"),
            format!(
                "pub const PROJECT_VERSION: &str = {};\n",
                marker(version)
            ),
        )
        .unwrap();

        init_repo_with_commit(dir.path());
        dir
    }
}
