//! # Local Repository Scanner
//!
//! Discovers the on-disk state of the workspace: which directories are git
//! repositories, which category directory each one currently lives in, and
//! where it is on the filesystem.
//!
//! The workspace layout is flat and two levels deep: the root contains
//! category directories (by convention `NN-label`, recognized by a leading
//! ASCII digit) plus an optional `unsorted` staging directory, and each of
//! those contains repository directories. A directory only counts as a
//! repository if it contains a `.git` marker directory; anything else is
//! silently skipped.
//!
//! Results come back in filesystem enumeration order, which is not sorted.
//! Callers that need determinism sort explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the staging directory for repositories that have not been
/// organized into a category yet.
pub const UNSORTED_DIR: &str = "unsorted";

/// One local repository as found on disk. Ephemeral: recomputed on every
/// scan, never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepo {
    /// Repository name, taken from the directory name.
    pub name: String,
    /// Absolute or workspace-relative path of the repository directory.
    pub path: PathBuf,
    /// Name of the parent directory, i.e. the current category.
    pub category: String,
}

/// Find every git repository in the workspace.
///
/// Scans top-level directories whose name starts with a digit, plus
/// `unsorted` if present. A missing or empty workspace yields an empty list,
/// not an error.
pub fn find_all_repos(base_dir: &Path) -> Result<Vec<LocalRepo>> {
    let mut category_dirs: Vec<PathBuf> = Vec::new();

    if base_dir.is_dir() {
        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            if name
                .to_string_lossy()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
            {
                category_dirs.push(entry.path());
            }
        }
    }

    let unsorted = base_dir.join(UNSORTED_DIR);
    if unsorted.is_dir() {
        category_dirs.push(unsorted);
    }

    let mut repos = Vec::new();
    for category_dir in &category_dirs {
        let category = dir_name(category_dir);
        for entry in fs::read_dir(category_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.join(".git").is_dir() {
                continue;
            }
            repos.push(LocalRepo {
                name: dir_name(&path),
                path,
                category: category.clone(),
            });
        }
    }

    Ok(repos)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_repo(base: &Path, category: &str, name: &str) {
        let repo = base.join(category).join(name);
        fs::create_dir_all(repo.join(".git")).unwrap();
    }

    #[test]
    fn test_empty_workspace() {
        let temp = TempDir::new().unwrap();
        assert!(find_all_repos(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_workspace_is_empty() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("nope");
        assert!(find_all_repos(&gone).unwrap().is_empty());
    }

    #[test]
    fn test_finds_repos_in_category_and_unsorted_dirs() {
        let temp = TempDir::new().unwrap();
        add_repo(temp.path(), "01-async-core", "async");
        add_repo(temp.path(), "02-http-web", "async-http");
        add_repo(temp.path(), "unsorted", "fresh-clone");

        let mut repos = find_all_repos(temp.path()).unwrap();
        repos.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].name, "async");
        assert_eq!(repos[0].category, "01-async-core");
        assert_eq!(repos[0].path, temp.path().join("01-async-core/async"));
        assert_eq!(repos[1].name, "async-http");
        assert_eq!(repos[1].category, "02-http-web");
        assert_eq!(repos[2].name, "fresh-clone");
        assert_eq!(repos[2].category, "unsorted");
    }

    #[test]
    fn test_skips_directories_without_git_marker() {
        let temp = TempDir::new().unwrap();
        add_repo(temp.path(), "01-async-core", "async");
        fs::create_dir_all(temp.path().join("01-async-core/notes")).unwrap();

        let repos = find_all_repos(temp.path()).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "async");
    }

    #[test]
    fn test_ignores_non_category_top_level_dirs() {
        let temp = TempDir::new().unwrap();
        add_repo(temp.path(), "scratch", "async");
        add_repo(temp.path(), ".hidden", "other");

        assert!(find_all_repos(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_git_marker_file_is_not_a_repo() {
        // A `.git` file (as in a worktree link) is not the marker we scan
        // for; only a `.git` directory counts.
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("01-async-core/linked");
        fs::create_dir_all(&repo).unwrap();
        fs::write(repo.join(".git"), "gitdir: elsewhere").unwrap();

        assert!(find_all_repos(temp.path()).unwrap().is_empty());
    }
}
