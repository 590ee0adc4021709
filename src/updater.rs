//! # Reconciler
//!
//! Orchestrates the scanner, the git gateway, the remote lister, and the
//! metadata store into the three reconciliation operations: the update pass
//! over enabled repositories, the new-repository check against the hosting
//! API, and cloning of missing repositories into the staging directory.
//!
//! Per-repository outcomes are terminal for the pass and are tallied, never
//! raised: a failed pull or clone leaves the batch running. Nothing here
//! retries; every operation is additive or idempotent, so the operator
//! re-running the command is the retry path.

use std::path::Path;

use chrono::Utc;
use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::git::{CloneOutcome, GitOps, SystemGit, UpdateOutcome};
use crate::github::{GithubApi, RepoLister};
use crate::metadata::MetadataStore;
use crate::scan::{self, UNSORTED_DIR};

/// Tally of one update pass.
///
/// `skipped` counts repositories excluded before any network operation
/// because they are disabled, not per-repository failures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: usize,
    pub up_to_date: usize,
    pub failed: usize,
    pub no_upstream: usize,
    pub skipped: usize,
}

/// Tally of one clone-missing pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloneSummary {
    pub cloned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The reconciliation orchestrator.
pub struct Updater<'a> {
    config: &'a Config,
    git: Box<dyn GitOps + 'a>,
    lister: Box<dyn RepoLister + 'a>,
    store: MetadataStore<'a>,
}

impl<'a> Updater<'a> {
    /// Updater wired to the system git binary and the GitHub API.
    pub fn new(config: &'a Config) -> Self {
        let lister = GithubApi::new(config.org.clone(), config.token.clone());
        Self::with_collaborators(config, Box::new(SystemGit), Box::new(lister))
    }

    /// Updater with injected collaborators, for tests.
    pub fn with_collaborators(
        config: &'a Config,
        git: Box<dyn GitOps + 'a>,
        lister: Box<dyn RepoLister + 'a>,
    ) -> Self {
        Self {
            config,
            git,
            lister,
            store: MetadataStore::new(config),
        }
    }

    /// One reconciliation pass: fetch/compare/pull every enabled repository
    /// and tally the outcomes.
    ///
    /// After every attempted update — including `Failed` and `NoUpstream` —
    /// the repository's `last_pull_at` is stamped with the current time.
    /// The stamp marks "we attempted this", not success.
    pub fn update_all(&self) -> Result<UpdateSummary> {
        let mut summary = UpdateSummary::default();
        let repos = self.store.enabled_repositories()?;
        let now = Utc::now();

        for repo in &repos {
            let outcome = self.git.update_repo(&repo.path);
            match outcome {
                UpdateOutcome::Updated => {
                    println!("Updating {}... ✓ updated", repo.name);
                    summary.updated += 1;
                }
                UpdateOutcome::UpToDate => {
                    println!("Updating {}... ✓ up-to-date", repo.name);
                    summary.up_to_date += 1;
                }
                UpdateOutcome::NoUpstream => {
                    println!("Updating {}... ⚠ no upstream", repo.name);
                    summary.no_upstream += 1;
                }
                UpdateOutcome::NoGit | UpdateOutcome::Failed => {
                    println!("Updating {}... ✗ failed", repo.name);
                    summary.failed += 1;
                }
            }

            self.store
                .update_repo_timestamps(&repo.name, Some(now), None, None)?;
        }

        let total = scan::find_all_repos(&self.config.base_dir)?.len();
        summary.skipped = total - repos.len();

        Ok(summary)
    }

    /// Diff the remote listing against local clones.
    ///
    /// Every remote repository gets its `remote_pushed_at`/
    /// `remote_updated_at` refreshed in the store; repositories the store
    /// has never seen are seeded with `enabled: true`. Returns the sorted
    /// names of repositories that exist remotely, are not cloned locally,
    /// and are not disabled.
    pub fn check_new_repos(&self) -> Result<Vec<String>> {
        let remote = self.lister.fetch_all_repos();
        let local = scan::find_all_repos(&self.config.base_dir)?;

        let mut metadata = self.store.load()?;
        for repo in &remote {
            let is_new = !metadata.repositories.contains_key(&repo.name);
            let entry = metadata.repositories.entry(repo.name.clone()).or_default();
            if is_new {
                entry.enabled = Some(true);
            }
            if let Some(at) = repo.pushed_at {
                entry.remote_pushed_at = Some(at);
            }
            if let Some(at) = repo.updated_at {
                entry.remote_updated_at = Some(at);
            }
        }
        self.store.save(&metadata)?;

        let mut new_repos: Vec<String> = remote
            .iter()
            .filter(|r| !local.iter().any(|l| l.name == r.name))
            .filter(|r| metadata.is_enabled(&r.name))
            .map(|r| r.name.clone())
            .collect();
        new_repos.sort();
        Ok(new_repos)
    }

    /// Clone the named repositories into `target_dir` (default: the
    /// `unsorted` staging directory). Names the remote listing does not
    /// know are silently skipped.
    pub fn clone_missing(
        &self,
        names: &[String],
        target_dir: Option<&Path>,
    ) -> Result<CloneSummary> {
        let default_target = self.config.base_dir.join(UNSORTED_DIR);
        let target = target_dir.unwrap_or(&default_target);
        std::fs::create_dir_all(target)?;

        let mut summary = CloneSummary::default();
        let remote = self.lister.fetch_all_repos();

        for name in names {
            let Some(repo) = remote.iter().find(|r| &r.name == name) else {
                info!("{} not found in remote listing, skipping", name);
                continue;
            };

            match self.git.clone_repo(&repo.clone_url, name, target) {
                CloneOutcome::Cloned => {
                    println!("Cloning {}... ✓ cloned", name);
                    summary.cloned += 1;
                }
                CloneOutcome::Skipped => {
                    println!("Cloning {}... ⚠ already exists", name);
                    summary.skipped += 1;
                }
                CloneOutcome::Failed => {
                    println!("Cloning {}... ✗ failed", name);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
