//! # Pattern Categorizer and Organizer
//!
//! Maps repository names to category labels and moves misplaced repository
//! directories into their correct category directory.
//!
//! ## Categorization contract
//!
//! Rules are an ordered mapping from category label to a list of regex
//! patterns. Categories are evaluated in ascending lexicographic label order
//! (this ordering, not rule-file insertion order, is the tie-break when more
//! than one category could match); within a category, patterns are tested in
//! list order. The first pattern that matches anywhere in the repository
//! name wins and its category is returned immediately. Patterns that need
//! whole-name matching must anchor themselves with `^`/`$`. A name nothing
//! matches falls back to [`FALLBACK_CATEGORY`].
//!
//! Patterns are compiled once at [`Categorizer`] construction; an invalid
//! pattern is a construction error naming the category and pattern.

use std::fs;
use std::path::Path;

use log::info;
use regex::Regex;

use crate::config::CategoryRules;
use crate::error::{Error, Result};
use crate::scan::{self, LocalRepo};

/// Category assigned to repository names no pattern matches.
pub const FALLBACK_CATEGORY: &str = "99-miscellaneous";

/// Result summary of one organization pass.
///
/// `errors` holds per-repository move failures as strings; a failed move
/// never aborts the batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub moved: usize,
    pub errors: Vec<String>,
}

/// Compiled categorization rules.
pub struct Categorizer {
    // (label, compiled patterns) pairs in ascending label order.
    rules: Vec<(String, Vec<Regex>)>,
}

impl Categorizer {
    /// Compile a rule set. Rules arrive in a `BTreeMap`, so iteration is
    /// already in the ascending label order the contract requires.
    pub fn new(rules: &CategoryRules) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for (category, patterns) in rules {
            let mut regexes = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern).map_err(|e| Error::Pattern {
                    category: category.clone(),
                    pattern: pattern.clone(),
                    source: e,
                })?;
                regexes.push(regex);
            }
            compiled.push((category.clone(), regexes));
        }
        Ok(Self { rules: compiled })
    }

    /// Map a repository name to its category label.
    ///
    /// Pure and deterministic: identical (name, rule set) always yields the
    /// identical category.
    pub fn categorize(&self, name: &str) -> &str {
        for (category, patterns) in &self.rules {
            for pattern in patterns {
                if pattern.is_match(name) {
                    return category;
                }
            }
        }
        FALLBACK_CATEGORY
    }

    /// Move every misplaced repository into its correct category directory.
    ///
    /// In dry-run mode the filesystem is untouched and `moved` counts the
    /// moves a real run would perform. Move failures are recorded in
    /// `errors` and the batch continues.
    pub fn organize_repositories(&self, base_dir: &Path, dry_run: bool) -> Result<OrganizeSummary> {
        let mut summary = OrganizeSummary::default();

        for repo in scan::find_all_repos(base_dir)? {
            let target_category = self.categorize(&repo.name);
            if repo.category == target_category {
                continue;
            }

            if dry_run {
                println!("[DRY] Would move {} -> {}/", repo.name, target_category);
                summary.moved += 1;
                continue;
            }

            match move_repo(base_dir, &repo, target_category) {
                Ok(()) => {
                    println!("Moved {} -> {}/", repo.name, target_category);
                    summary.moved += 1;
                }
                Err(e) => {
                    summary
                        .errors
                        .push(format!("Failed to move {}: {}", repo.name, e));
                }
            }
        }

        Ok(summary)
    }
}

fn move_repo(base_dir: &Path, repo: &LocalRepo, target_category: &str) -> std::io::Result<()> {
    let target_dir = base_dir.join(target_category);
    fs::create_dir_all(&target_dir)?;
    let destination = target_dir.join(&repo.name);
    info!(
        "moving {} -> {}",
        repo.path.display(),
        destination.display()
    );
    fs::rename(&repo.path, destination)
}
