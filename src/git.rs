//! # Version-Control Gateway
//!
//! Wraps the system `git` command behind four capability calls: clone,
//! fetch, ref-compare, and pull. Outcomes are exit-status-derived; no
//! subprocess output is interpreted beyond success/failure and exact
//! ref-string equality.
//!
//! Using the system `git` binary (rather than a library binding) means the
//! operator's existing SSH keys, credential helpers, and `~/.gitconfig` all
//! apply without any handling on our side.
//!
//! ## Design
//!
//! The [`GitOps`] trait separates the gateway interface from the concrete
//! subprocess implementation so that the reconciler can be exercised in
//! tests with a mock gateway. [`SystemGit`] is the real implementation.

use std::path::Path;
use std::process::Command;

use log::{debug, warn};

/// Outcome of a clone attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The target already contains a repository with that name.
    Skipped,
    Cloned,
    Failed,
}

/// Outcome of one update attempt against a local clone.
///
/// Any subprocess condition not enumerated here maps to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The path has no `.git` marker directory.
    NoGit,
    /// The checked-out branch has no configured upstream.
    NoUpstream,
    /// Local and upstream refs are identical after a fetch; no pull run.
    UpToDate,
    /// A pull succeeded.
    Updated,
    Failed,
}

/// Trait for git operations - allows mocking in tests
pub trait GitOps {
    /// Clone `url` as `target_dir/name`. Skips without touching the network
    /// when `target_dir/name/.git` already exists.
    fn clone_repo(&self, url: &str, name: &str, target_dir: &Path) -> CloneOutcome;

    /// Fetch and, when the local ref is behind its upstream, pull.
    ///
    /// Must fetch before comparing, and must short-circuit to `UpToDate`
    /// without attempting a pull when the refs already match.
    fn update_repo(&self, repo_path: &Path) -> UpdateOutcome;
}

/// The default implementation of [`GitOps`], which uses the system `git`
/// command.
pub struct SystemGit;

impl GitOps for SystemGit {
    fn clone_repo(&self, url: &str, name: &str, target_dir: &Path) -> CloneOutcome {
        if target_dir.join(name).join(".git").is_dir() {
            return CloneOutcome::Skipped;
        }

        match run_git(target_dir, &["clone", url, name]) {
            Some(true) => CloneOutcome::Cloned,
            _ => CloneOutcome::Failed,
        }
    }

    fn update_repo(&self, repo_path: &Path) -> UpdateOutcome {
        if !repo_path.join(".git").is_dir() {
            return UpdateOutcome::NoGit;
        }

        // A branch without a configured upstream makes @{u} unresolvable.
        if run_git(repo_path, &["rev-parse", "--abbrev-ref", "@{u}"]) != Some(true) {
            return UpdateOutcome::NoUpstream;
        }

        if run_git(repo_path, &["fetch", "origin", "--quiet"]) != Some(true) {
            return UpdateOutcome::Failed;
        }

        let local = capture_git(repo_path, &["rev-parse", "HEAD"]);
        let remote = capture_git(repo_path, &["rev-parse", "@{u}"]);
        match (local, remote) {
            (Some(local), Some(remote)) if local == remote => UpdateOutcome::UpToDate,
            (Some(_), Some(_)) => match run_git(repo_path, &["pull", "--quiet"]) {
                Some(true) => UpdateOutcome::Updated,
                _ => UpdateOutcome::Failed,
            },
            _ => UpdateOutcome::Failed,
        }
    }
}

/// Run a git subcommand in `dir`, reporting only exit-status success.
/// `None` means the process could not be spawned at all.
fn run_git(dir: &Path, args: &[&str]) -> Option<bool> {
    debug!("git {} (in {})", args.join(" "), dir.display());
    match Command::new("git").args(args).current_dir(dir).output() {
        Ok(output) => Some(output.status.success()),
        Err(e) => {
            warn!("failed to spawn git {}: {}", args.join(" "), e);
            None
        }
    }
}

/// Run a git subcommand and return its trimmed stdout on success.
fn capture_git(dir: &Path, args: &[&str]) -> Option<String> {
    match Command::new("git").args(args).current_dir(dir).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(_) => None,
        Err(e) => {
            warn!("failed to spawn git {}: {}", args.join(" "), e);
            None
        }
    }
}
