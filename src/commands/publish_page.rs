//! Report a snapshot build as a GitHub check run.
//!
//! Creates a successful check run on the current commit whose summary names
//! the snapshot version and embeds a usage document (typically instructions
//! for consuming snapshot artifacts). The raw API response is echoed to
//! stdout for the CI log.
//!
//! # Examples
//!
//! ```bash
//! # In GitHub Actions (GITHUB_REPOSITORY is set by the runner)
//! GH_TOKEN=... CURRENT_BRANCH_NAME=dev cargo snapshot-release publish-page
//!
//! # Explicit repository and document
//! cargo snapshot-release publish-page --owner acme --repo widget \
//!     --document docs/UsingSnapshots.md
//!
//! # Fail the step when GitHub rejects the check run
//! cargo snapshot-release publish-page --fail-on-status
//! ```

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use cargo_plugin_utils::logger::Logger;
use clap::Parser;

use super::common::{
    ProjectArgs,
    compute_snapshot,
    get_owner_repo,
    load_project,
};
use crate::error::SnapshotError;
use crate::github::{
    CheckRunPayload,
    CheckRunRequest,
    CheckRunTransport,
    DEFAULT_API_URL,
    HttpTransport,
    check_runs_endpoint,
    echo_response,
};

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GH_TOKEN";

/// Arguments for the `publish-page` command.
#[derive(Parser, Debug)]
pub struct PublishPageArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// GitHub token allowed to create check runs.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// GitHub repository owner.
    ///
    /// Defaults to `GITHUB_REPOSITORY` or the `origin` remote.
    #[arg(long)]
    pub owner: Option<String>,

    /// GitHub repository name.
    ///
    /// Defaults to `GITHUB_REPOSITORY` or the `origin` remote.
    #[arg(long)]
    pub repo: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Markdown document appended to the check-run summary.
    ///
    /// Defaults to `document` from `[package.metadata.snapshot-release]`,
    /// or `docs/snapshots.md`. A missing document is not an error.
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Check-run name. Defaults to the configured `check_name`.
    #[arg(long)]
    pub check_name: Option<String>,

    /// Fail when the API answers with a non-success status.
    ///
    /// The response body is echoed either way.
    #[arg(long)]
    pub fail_on_status: bool,
}

/// Create the snapshot check run over HTTPS and echo the response.
pub fn publish_page(args: PublishPageArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    publish_page_with(&args, HttpTransport::new, &mut out)
}

/// Create the snapshot check run through a transport made by `connect`.
///
/// The token is checked before anything else runs. `connect` is called
/// right before the single request and the transport it returns is dropped
/// when this function returns, on success or error.
///
/// # Errors
///
/// Returns an error if:
/// - No token is given (`GH_TOKEN`)
/// - The project, branch, commit or repository cannot be determined
/// - The request fails at the connection level
/// - The response cannot be written to `out`
/// - `fail_on_status` is set and the status is not 2xx
pub fn publish_page_with<T, F>(
    args: &PublishPageArgs,
    connect: F,
    out: &mut dyn Write,
) -> Result<()>
where
    T: CheckRunTransport,
    F: FnOnce() -> Result<T>,
{
    let token = args
        .gh_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SnapshotError::Configuration { var: TOKEN_ENV })?
        .to_string();

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

    let (owner, repo) = get_owner_repo(
        args.owner.clone(),
        args.repo.clone(),
        &args.project.repo_path,
    )?;
    let endpoint = check_runs_endpoint(&args.api_url, &owner, &repo);

    let document_path = args
        .document
        .clone()
        .unwrap_or_else(|| project.path(&project.config.document));
    let document = read_document(&document_path, &mut logger);

    let check_name = args
        .check_name
        .as_deref()
        .unwrap_or(project.config.check_name.as_str());
    let request = CheckRunRequest {
        endpoint,
        token,
        payload: CheckRunPayload::snapshot(
            check_name,
            &snapshot.sha,
            &snapshot.version,
            &document,
        ),
    };

    logger.status("Publishing", &request.endpoint);
    logger.finish();

    let transport = connect()?;
    let response = transport.post_check_run(&request)?;

    echo_response(out, &response.body).context("Failed to write check-run response")?;

    if !response.is_success() {
        if args.fail_on_status {
            return Err(SnapshotError::ApiStatus {
                status: response.status,
            }
            .into());
        }
        logger.warning(
            "Status",
            &format!("check-run API returned HTTP {}", response.status),
        );
    }

    Ok(())
}

/// Read the summary document, treating any read failure as an empty one.
fn read_document(path: &Path, logger: &mut Logger) -> String {
    match std::fs::read_to_string(path) {
        Ok(document) => document,
        Err(_) => {
            logger.warning(
                "Skipping",
                &format!("{} (not readable, summary left empty)", path.display()),
            );
            String::new()
        }
    }
}
