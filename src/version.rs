//! Snapshot version derivation.
//!
//! A snapshot version qualifies the project's base version with the branch
//! it was built from and the abbreviated commit hash:
//! `<base>-<branch>-<short-sha>`, e.g. `2.7.0-dev-abcdef12`.

use crate::error::{
    Result,
    SnapshotError,
};

/// Environment variable carrying the branch label in CI.
pub const BRANCH_ENV: &str = "CURRENT_BRANCH_NAME";

/// Branch label used when the branch is not known.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Number of hash characters kept in a snapshot version.
pub const SHORT_SHA_LEN: usize = 8;

/// Abbreviate a commit hash to [`SHORT_SHA_LEN`] characters.
///
/// Hashes shorter than that are returned whole.
pub fn short_sha(sha: &str) -> &str {
    let sha = sha.trim();
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((end, _)) => &sha[..end],
        None => sha,
    }
}

/// Compose a snapshot version from its parts.
///
/// Pure: the same inputs always give the same string.
pub fn snapshot_version(base: &str, branch: &str, sha: &str) -> String {
    format!("{}-{}-{}", base.trim(), branch, short_sha(sha))
}

/// Decide which branch label goes into the snapshot version.
///
/// A blank value counts as absent. An absent branch falls back to
/// [`UNKNOWN_BRANCH`], unless `required` is set, in which case it is a
/// configuration error naming [`BRANCH_ENV`].
pub fn resolve_branch(branch: Option<&str>, required: bool) -> Result<BranchName> {
    match branch.map(str::trim).filter(|b| !b.is_empty()) {
        Some(name) => Ok(BranchName::Named(name.to_string())),
        None if required => Err(SnapshotError::Configuration { var: BRANCH_ENV }),
        None => Ok(BranchName::Unknown),
    }
}

/// Branch label, keeping track of whether it was actually supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchName {
    Named(String),
    Unknown,
}

impl BranchName {
    pub fn as_str(&self) -> &str {
        match self {
            BranchName::Named(name) => name,
            BranchName::Unknown => UNKNOWN_BRANCH,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BranchName::Unknown)
    }
}
