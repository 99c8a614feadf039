//! Version marker rewriting.
//!
//! Generated sources carry the project version between two comment markers:
//!
//! ```text
//! pub const PROJECT_VERSION: &str = /*PROJECT_VERSION_START*/"2.7.0"/*PROJECT_VERSION_END*/;
//! ```
//!
//! The marker is located by exact string match, so the current version must
//! be known up front.

use std::path::Path;

use anyhow::{
    Context,
    Result,
};

use crate::error::{
    self,
    SnapshotError,
};

pub const MARKER_START: &str = "/*PROJECT_VERSION_START*/";
pub const MARKER_END: &str = "/*PROJECT_VERSION_END*/";

/// Render the marker wrapping `version`.
pub fn marker(version: &str) -> String {
    format!("{}\"{}\"{}", MARKER_START, version, MARKER_END)
}

/// Replace the marker for `current` with the marker for `snapshot` in `text`.
///
/// Only the first occurrence is replaced. Fails with
/// [`SnapshotError::Precondition`] when the current marker is absent; the
/// `path` only labels that error.
pub fn rewrite_text(
    text: &str,
    current: &str,
    snapshot: &str,
    path: &Path,
) -> error::Result<String> {
    let current_marker = marker(current);
    if !text.contains(&current_marker) {
        return Err(SnapshotError::Precondition {
            marker: current_marker,
            path: path.to_path_buf(),
        });
    }
    Ok(text.replacen(&current_marker, &marker(snapshot), 1))
}

/// Rewrite the version marker inside the file at `path`.
///
/// The file is read whole, checked, and written back whole. Nothing is
/// written when the current marker is missing, so a failed call leaves the
/// file as it was. Running it twice fails the second time.
pub fn rewrite_file(path: &Path, current: &str, snapshot: &str) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let rewritten = rewrite_text(&text, current, snapshot, path)?;

    std::fs::write(path, rewritten)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_version_file(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project_version.rs");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_marker_format() {
        assert_eq!(
            marker("1.0.0"),
            "/*PROJECT_VERSION_START*/\"1.0.0\"/*PROJECT_VERSION_END*/"
        );
    }

    #[test]
    fn test_rewrite_file_replaces_marker() {
        let (_dir, path) = create_version_file(
            "// generated\npub const PROJECT_VERSION: &str = /*PROJECT_VERSION_START*/\"2.7.0\"/*PROJECT_VERSION_END*/;\n",
        );

        rewrite_file(&path, "2.7.0", "2.7.0-dev-abcdef12").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(&marker("2.7.0-dev-abcdef12")).count(), 1);
        assert!(!content.contains(&marker("2.7.0")));
        assert!(content.starts_with("// generated\n"));
        assert!(content.ends_with(";\n"));
    }

    #[test]
    fn test_rewrite_file_missing_marker_leaves_file_untouched() {
        let original = "pub const PROJECT_VERSION: &str = \"2.7.0\";\n";
        let (_dir, path) = create_version_file(original);

        let err = rewrite_file(&path, "2.7.0", "2.7.0-dev-abcdef12").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::Precondition { .. })
        ));
        assert!(err.to_string().contains("Cannot find"));
        assert_eq!(std::fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_rewrite_file_wrong_current_version() {
        let original = "const V: &str = /*PROJECT_VERSION_START*/\"2.6.0\"/*PROJECT_VERSION_END*/;";
        let (_dir, path) = create_version_file(original);

        assert!(rewrite_file(&path, "2.7.0", "2.7.0-dev-abcdef12").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_rewrite_file_twice_fails_second_time() {
        let (_dir, path) = create_version_file(
            "const V: &str = /*PROJECT_VERSION_START*/\"1.0.0\"/*PROJECT_VERSION_END*/;",
        );

        rewrite_file(&path, "1.0.0", "1.0.0-main-01234567").unwrap();
        let after_first = std::fs::read_to_string(&path).unwrap();

        let err = rewrite_file(&path, "1.0.0", "1.0.0-main-01234567").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::Precondition { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_rewrite_text_only_first_occurrence() {
        let text = format!("{}\n{}\n", marker("1.0.0"), marker("1.0.0"));
        let rewritten = rewrite_text(&text, "1.0.0", "1.0.0-x-1", Path::new("v.rs")).unwrap();
        assert_eq!(rewritten, format!("{}\n{}\n", marker("1.0.0-x-1"), marker("1.0.0")));
    }

    #[test]
    fn test_rewrite_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = rewrite_file(&dir.path().join("absent.rs"), "1.0.0", "1.0.1").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
