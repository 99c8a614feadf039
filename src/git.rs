//! Git queries.

use std::path::Path;
use std::process::Command;

use crate::error::{
    Result,
    SnapshotError,
};

/// Get the full hash of the commit HEAD points to.
///
/// Runs `git rev-parse HEAD` inside `repo_root` and returns its trimmed
/// stdout. Not retried: a missing `git` binary, a non-zero exit or an empty
/// answer are all reported as [`SnapshotError::ExternalTool`].
pub fn head_sha(repo_root: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_root)
        .output()
        .map_err(|e| SnapshotError::ExternalTool {
            tool: "git",
            message: format!("failed to execute git rev-parse HEAD: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SnapshotError::ExternalTool {
            tool: "git",
            message: format!(
                "git rev-parse HEAD exited with {} in {}: {}",
                output.status,
                repo_root.display(),
                stderr.trim()
            ),
        });
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
        return Err(SnapshotError::ExternalTool {
            tool: "git",
            message: "git rev-parse HEAD printed nothing".to_string(),
        });
    }

    Ok(sha)
}

/// Split a GitHub remote URL into `(owner, repo)`.
///
/// Understands `git@github.com:owner/repo.git`,
/// `ssh://git@github.com/owner/repo.git` and
/// `https://github.com/owner/repo(.git)`.
pub fn parse_github_remote(url: &str) -> Option<(String, String)> {
    let rest = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("http://github.com/"))?;
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let mut parts = rest.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}
