//! # Workspace Configuration
//!
//! This module defines the `Config` struct that every component receives at
//! construction. It carries the workspace root, the GitHub organization name,
//! and the (optional) API token, and it knows where the two on-disk documents
//! live:
//!
//! - `categories.json` — category label → list of regex pattern strings,
//!   loaded lazily and cached for the lifetime of the process.
//! - `.workspace_metadata.json` — the persistent metadata record managed by
//!   [`crate::metadata::MetadataStore`].
//!
//! Token resolution (explicit value > `GITHUB_TOKEN` > `GH_TOKEN` >
//! anonymous) happens at the process entry point via [`resolve_token`];
//! library code only ever sees the already-resolved `Option<String>`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Category rules: label → ordered list of regex pattern strings.
///
/// A `BTreeMap` so that iteration order is ascending lexicographic label
/// order, which is the documented tie-break order for categorization.
pub type CategoryRules = BTreeMap<String, Vec<String>>;

/// File name of the category rules document at the workspace root.
pub const CATEGORIES_FILE: &str = "categories.json";

/// File name of the persistent metadata document at the workspace root.
pub const METADATA_FILE: &str = ".workspace_metadata.json";

/// Resolve the GitHub API token for this invocation.
///
/// Priority: explicit value > `GITHUB_TOKEN` > `GH_TOKEN` > none.
/// Anonymous access works but is rate-limited harder by the API.
pub fn resolve_token(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| env::var("GITHUB_TOKEN").ok())
        .or_else(|| env::var("GH_TOKEN").ok())
        .filter(|t| !t.is_empty())
}

/// Shared configuration for all workspace components.
#[derive(Debug)]
pub struct Config {
    /// Workspace root directory containing the category directories.
    pub base_dir: PathBuf,
    /// GitHub organization whose repositories are managed.
    pub org: String,
    /// Resolved API token, if any.
    pub token: Option<String>,
    categories: OnceLock<CategoryRules>,
}

impl Config {
    pub fn new(base_dir: impl Into<PathBuf>, org: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            org: org.into(),
            token,
            categories: OnceLock::new(),
        }
    }

    /// Path of the category rules file.
    pub fn categories_file(&self) -> PathBuf {
        self.base_dir.join(CATEGORIES_FILE)
    }

    /// Path of the persistent metadata file.
    pub fn metadata_file(&self) -> PathBuf {
        self.base_dir.join(METADATA_FILE)
    }

    /// Category rules, loaded from `categories.json` on first use and cached
    /// for the process lifetime. A missing file yields an empty rule set
    /// (everything falls back to the miscellaneous category).
    pub fn categories(&self) -> Result<&CategoryRules> {
        if let Some(rules) = self.categories.get() {
            return Ok(rules);
        }
        let loaded = load_categories(&self.categories_file())?;
        Ok(self.categories.get_or_init(|| loaded))
    }
}

fn load_categories(path: &Path) -> Result<CategoryRules> {
    if !path.exists() {
        return Ok(CategoryRules::new());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::CategoriesParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
